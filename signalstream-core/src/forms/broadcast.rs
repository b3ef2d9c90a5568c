//! Broadcast-signal form.

use serde::Serialize;

use super::{parse_number, FieldErrors};
use crate::domain::{Direction, StrategyId, TradingStrategy};

/// Raw broadcast form state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BroadcastDraft {
    pub strategy_id: String,
    pub asset: String,
    pub direction: Option<Direction>,
    pub entry_price: String,
    pub stop_loss: String,
    pub target_price: String,
    pub additional_notes: String,
}

/// A fully validated broadcast request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidBroadcast {
    pub strategy_id: StrategyId,
    /// Uppercased asset symbol.
    pub asset: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub target_price: f64,
    pub additional_notes: Option<String>,
}

impl BroadcastDraft {
    /// Fresh draft with the form's defaults (direction preselected to Buy).
    pub fn empty() -> Self {
        Self {
            direction: Some(Direction::Buy),
            ..Self::default()
        }
    }

    /// Validate every field. The selected strategy must exist in `strategies`;
    /// price levels must be positive and on the correct side of entry for the
    /// chosen direction.
    pub fn validate(
        &self,
        strategies: &[TradingStrategy],
    ) -> Result<ValidBroadcast, FieldErrors> {
        let mut errors = FieldErrors::default();

        let strategy_id = self.strategy_id.trim();
        if strategy_id.is_empty() {
            errors.push("strategy_id", "Please select a strategy.");
        } else if !strategies.iter().any(|s| s.id.as_str() == strategy_id) {
            errors.push("strategy_id", "Selected strategy does not exist.");
        }

        let asset = self.asset.trim();
        if asset.is_empty() {
            errors.push("asset", "Asset symbol is required.");
        }

        if self.direction.is_none() {
            errors.push("direction", "Signal direction is required.");
        }

        let entry = positive_price(&self.entry_price, "entry_price", "Entry price", &mut errors);
        let stop = positive_price(&self.stop_loss, "stop_loss", "Stop loss", &mut errors);
        let target = positive_price(&self.target_price, "target_price", "Target price", &mut errors);

        // Ordering checks only run once the individual prices are in shape.
        if let (Some(direction), Some(entry), Some(stop), Some(target)) =
            (self.direction, entry, stop, target)
        {
            match direction {
                Direction::Buy => {
                    if stop >= entry {
                        errors.push(
                            "stop_loss",
                            "Stop loss must be below the entry price for a Buy signal.",
                        );
                    }
                    if target <= entry {
                        errors.push(
                            "target_price",
                            "Target price must be above the entry price for a Buy signal.",
                        );
                    }
                }
                Direction::Sell => {
                    if stop <= entry {
                        errors.push(
                            "stop_loss",
                            "Stop loss must be above the entry price for a Sell signal.",
                        );
                    }
                    if target >= entry {
                        errors.push(
                            "target_price",
                            "Target price must be below the entry price for a Sell signal.",
                        );
                    }
                }
            }
        }

        // A missing value always comes with an error, so a clean pass means
        // everything parsed.
        let (Some(direction), Some(entry_price), Some(stop_loss), Some(target_price)) =
            (self.direction, entry, stop, target)
        else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let notes = self.additional_notes.trim();
        Ok(ValidBroadcast {
            strategy_id: StrategyId::new(strategy_id),
            asset: asset.to_uppercase(),
            direction,
            entry_price,
            stop_loss,
            target_price,
            additional_notes: if notes.is_empty() {
                None
            } else {
                Some(notes.to_string())
            },
        })
    }
}

impl ValidBroadcast {
    /// Materialize as a feed record broadcast at the given instant. The feed
    /// carries no indicator readings for hand-entered signals.
    pub fn into_signal(self, timestamp: chrono::DateTime<chrono::Utc>) -> crate::domain::TradingSignal {
        crate::domain::TradingSignal {
            asset: self.asset,
            direction: self.direction,
            entry_price: self.entry_price,
            stop_loss: self.stop_loss,
            target_price: self.target_price,
            strategy_id: self.strategy_id,
            timestamp,
            indicator_values: std::collections::HashMap::new(),
        }
    }
}

/// Parse and range-check one price field.
fn positive_price(
    raw: &str,
    field: &'static str,
    label: &str,
    errors: &mut FieldErrors,
) -> Option<f64> {
    let value = parse_number(raw, field, label, errors)?;
    if value > 0.0 {
        Some(value)
    } else {
        errors.push(field, format!("{label} must be positive."));
        None
    }
}
