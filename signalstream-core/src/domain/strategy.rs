//! TradingStrategy — a named methodology with historical performance metrics.

use serde::{Deserialize, Serialize};

use crate::domain::StrategyId;

/// Historical performance metrics for a strategy.
///
/// `win_rate` and `max_drawdown` are percentages on a 0–100 scale;
/// `profit_factor` is gross profit over gross loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPerformance {
    pub win_rate: f64,
    pub profit_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharpe_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_drawdown: Option<f64>,
}

impl StrategyPerformance {
    /// Range sanity check: win rate and drawdown within 0–100, profit factor
    /// non-negative.
    pub fn is_sane(&self) -> bool {
        (0.0..=100.0).contains(&self.win_rate)
            && self.profit_factor >= 0.0
            && self
                .max_drawdown
                .map_or(true, |dd| (0.0..=100.0).contains(&dd))
    }
}

/// A trading strategy offered to subscribers.
///
/// Provider-created; the admin panel may add, edit, or delete strategies, but
/// those mutations apply to the session's in-memory copy only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingStrategy {
    pub id: StrategyId,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicators_used: Option<String>,
    pub performance: StrategyPerformance,
}
