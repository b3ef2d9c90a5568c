//! SignalStream Core — domain types, sample data, query engine, forms, session store.
//!
//! This crate contains everything the TUI and CLI share:
//! - Domain types (signals, strategies, users, dashboard snapshot)
//! - Deterministic sample data provider behind the `DataProvider` trait
//! - Client-side filter/sort engine for the feed and the catalog
//! - Form drafts with field-level validation
//! - In-memory session store with the admin mutation semantics
//! - Demo configuration (seed, feed size, simulated latencies)

pub mod config;
pub mod data;
pub mod domain;
pub mod forms;
pub mod query;
pub mod rng;
pub mod store;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything handed across the worker channel is
    /// Send + Sync. If any type fails this check, the build breaks
    /// immediately instead of at the first thread spawn.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::TradingSignal>();
        require_sync::<domain::TradingSignal>();
        require_send::<domain::TradingStrategy>();
        require_sync::<domain::TradingStrategy>();
        require_send::<domain::User>();
        require_sync::<domain::User>();
        require_send::<domain::DashboardSnapshot>();
        require_sync::<domain::DashboardSnapshot>();
        require_send::<domain::Direction>();
        require_sync::<domain::Direction>();
        require_send::<domain::SubscriptionStatus>();
        require_sync::<domain::SubscriptionStatus>();

        // ID types
        require_send::<domain::StrategyId>();
        require_sync::<domain::StrategyId>();
        require_send::<domain::UserId>();
        require_sync::<domain::UserId>();

        // Data layer
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::SampleProvider>();
        require_sync::<data::SampleProvider>();

        // Queries and form records
        require_send::<query::StrategyQuery>();
        require_sync::<query::StrategyQuery>();
        require_send::<query::SignalQuery>();
        require_sync::<query::SignalQuery>();
        require_send::<forms::ValidBroadcast>();
        require_sync::<forms::ValidBroadcast>();
        require_send::<forms::ValidStrategy>();
        require_sync::<forms::ValidStrategy>();
        require_send::<forms::ValidUser>();
        require_sync::<forms::ValidUser>();

        // Store and config
        require_send::<store::SessionStore>();
        require_sync::<store::SessionStore>();
        require_send::<config::DemoConfig>();
        require_sync::<config::DemoConfig>();

        // RNG
        require_send::<rng::SeedHierarchy>();
        require_sync::<rng::SeedHierarchy>();
    }
}
