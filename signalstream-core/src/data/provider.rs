//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (in-memory sample data
//! today, a real API later) so we can swap implementations and mock for tests.

use thiserror::Error;

use crate::domain::{DashboardSnapshot, StrategyId, TradingSignal, TradingStrategy, User};

/// Structured error types for data operations.
///
/// These are designed to be displayable in both CLI and TUI contexts, so the
/// not-found messages carry the exact text the views show.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("Signal not found.")]
    SignalNotFound { index: usize },

    #[error("Strategy not found.")]
    StrategyNotFound { id: StrategyId },

    #[error("data error: {0}")]
    Other(String),
}

/// Trait for read-side data sources.
///
/// Implementations return fully materialized collections; filtering and
/// sorting happen in the query layer, not here. Mutations go through the
/// session store, which seeds itself from one fetch.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the signal feed, newest first.
    fn fetch_signals(&self) -> Result<Vec<TradingSignal>, DataError>;

    /// Fetch one signal by its position in the feed.
    fn fetch_signal(&self, index: usize) -> Result<TradingSignal, DataError>;

    /// Fetch the strategy catalog.
    fn fetch_strategies(&self) -> Result<Vec<TradingStrategy>, DataError>;

    /// Fetch one strategy by id.
    fn fetch_strategy(&self, id: &StrategyId) -> Result<TradingStrategy, DataError>;

    /// Fetch the user roster.
    fn fetch_users(&self) -> Result<Vec<User>, DataError>;

    /// Fetch the admin dashboard snapshot.
    fn fetch_dashboard(&self) -> Result<DashboardSnapshot, DataError>;

    /// Check if the provider is currently available (failure injection off).
    fn is_available(&self) -> bool;
}
