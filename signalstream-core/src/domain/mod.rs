//! Domain types for SignalStream

pub mod dashboard;
pub mod ids;
pub mod signal;
pub mod strategy;
pub mod user;

pub use dashboard::{ActivityEntry, ActivityKind, DashboardSnapshot, DashboardStats};
pub use ids::{StrategyId, UserId};
pub use signal::{Direction, TradingSignal};
pub use strategy::{StrategyPerformance, TradingStrategy};
pub use user::{SubscriptionStatus, User};
