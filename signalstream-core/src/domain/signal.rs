//! TradingSignal — a single broadcast buy/sell recommendation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::StrategyId;

/// Trade direction. Determines which side of the entry price the stop and
/// target must sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Buy => "Buy",
            Direction::Sell => "Sell",
        }
    }

    /// Parse from the form's literal value. Case-sensitive, matching the
    /// select options ("Buy" / "Sell").
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Buy" => Some(Direction::Buy),
            "Sell" => Some(Direction::Sell),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A broadcast trading signal. Immutable once created — the signal history
/// supports append only, never update or delete.
///
/// The `timestamp` doubles as the signal's identifier within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingSignal {
    pub asset: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub target_price: f64,
    pub strategy_id: StrategyId,
    pub timestamp: DateTime<Utc>,
    /// Indicator readings at broadcast time. Unordered; may be empty; no
    /// specific keys are guaranteed to exist.
    pub indicator_values: HashMap<String, f64>,
}

impl TradingSignal {
    /// True when stop and target sit on the correct side of the entry price
    /// for this signal's direction.
    pub fn prices_well_ordered(&self) -> bool {
        match self.direction {
            Direction::Buy => {
                self.stop_loss < self.entry_price && self.target_price > self.entry_price
            }
            Direction::Sell => {
                self.stop_loss > self.entry_price && self.target_price < self.entry_price
            }
        }
    }

    /// Indicator readings sorted by key, for display. The underlying map has
    /// no defined iteration order.
    pub fn sorted_indicators(&self) -> Vec<(&str, f64)> {
        let mut pairs: Vec<(&str, f64)> = self
            .indicator_values
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}
