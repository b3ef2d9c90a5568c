//! Strategy add/edit form.

use serde::Serialize;

use super::{parse_number, parse_optional_number, FieldErrors};
use crate::domain::{StrategyId, StrategyPerformance, TradingStrategy};

/// Raw strategy form state. `id` is set when editing an existing entry and
/// absent for a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyDraft {
    pub id: Option<StrategyId>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub indicators_used: String,
    pub win_rate: String,
    pub profit_factor: String,
    pub sharpe_ratio: String,
    pub max_drawdown: String,
}

/// A fully validated strategy record, minus its final id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidStrategy {
    pub id: Option<StrategyId>,
    pub name: String,
    pub description: String,
    pub category: Option<String>,
    pub indicators_used: Option<String>,
    pub performance: StrategyPerformance,
}

impl StrategyDraft {
    /// Prefill from an existing catalog entry for editing.
    pub fn from_strategy(strategy: &TradingStrategy) -> Self {
        Self {
            id: Some(strategy.id.clone()),
            name: strategy.name.clone(),
            description: strategy.description.clone(),
            category: strategy.category.clone().unwrap_or_default(),
            indicators_used: strategy.indicators_used.clone().unwrap_or_default(),
            win_rate: format_metric(Some(strategy.performance.win_rate)),
            profit_factor: format_metric(Some(strategy.performance.profit_factor)),
            sharpe_ratio: format_metric(strategy.performance.sharpe_ratio),
            max_drawdown: format_metric(strategy.performance.max_drawdown),
        }
    }

    pub fn validate(&self) -> Result<ValidStrategy, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.name.chars().count() < 3 {
            errors.push("name", "Strategy name must be at least 3 characters.");
        }
        if self.description.chars().count() < 10 {
            errors.push("description", "Description must be at least 10 characters.");
        }

        let win_rate = parse_number(&self.win_rate, "win_rate", "Win rate", &mut errors);
        if let Some(rate) = win_rate {
            if !(0.0..=100.0).contains(&rate) {
                errors.push("win_rate", "Win rate must be between 0 and 100.");
            }
        }
        let profit_factor =
            parse_number(&self.profit_factor, "profit_factor", "Profit factor", &mut errors);
        if let Some(factor) = profit_factor {
            if factor < 0.0 {
                errors.push("profit_factor", "Profit factor must be zero or greater.");
            }
        }
        let sharpe_ratio =
            parse_optional_number(&self.sharpe_ratio, "sharpe_ratio", "Sharpe ratio", &mut errors);
        let max_drawdown =
            parse_optional_number(&self.max_drawdown, "max_drawdown", "Max drawdown", &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }
        let (Some(win_rate), Some(profit_factor), Some(sharpe_ratio), Some(max_drawdown)) =
            (win_rate, profit_factor, sharpe_ratio, max_drawdown)
        else {
            return Err(errors);
        };

        let category = self.category.trim();
        let indicators = self.indicators_used.trim();
        Ok(ValidStrategy {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category: if category.is_empty() {
                None
            } else {
                Some(category.to_string())
            },
            indicators_used: if indicators.is_empty() {
                None
            } else {
                Some(indicators.to_string())
            },
            performance: StrategyPerformance {
                win_rate,
                profit_factor,
                sharpe_ratio,
                max_drawdown,
            },
        })
    }
}

impl ValidStrategy {
    /// Materialize as a catalog record under the given id.
    pub fn into_strategy(self, id: StrategyId) -> TradingStrategy {
        TradingStrategy {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            indicators_used: self.indicators_used,
            performance: self.performance,
        }
    }
}

/// Render a metric for a text field; absent values become an empty field.
fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::strategy_catalog;

    fn new_draft() -> StrategyDraft {
        StrategyDraft {
            id: None,
            name: "Keltner Squeeze".to_string(),
            description: "Enters when price escapes a Keltner channel squeeze.".to_string(),
            category: "Volatility Breakout".to_string(),
            indicators_used: "Keltner, ATR".to_string(),
            win_rate: "52.5".to_string(),
            profit_factor: "1.4".to_string(),
            sharpe_ratio: "".to_string(),
            max_drawdown: "12.5".to_string(),
        }
    }

    #[test]
    fn valid_draft_produces_typed_record() {
        let valid = new_draft().validate().unwrap();
        assert_eq!(valid.name, "Keltner Squeeze");
        assert_eq!(valid.category.as_deref(), Some("Volatility Breakout"));
        assert_eq!(valid.performance.win_rate, 52.5);
        assert_eq!(valid.performance.sharpe_ratio, None);
        assert_eq!(valid.performance.max_drawdown, Some(12.5));
    }

    #[test]
    fn short_name_and_description_are_flagged() {
        let mut draft = new_draft();
        draft.name = "ab".to_string();
        draft.description = "too short".to_string();
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some("Strategy name must be at least 3 characters.")
        );
        assert_eq!(
            errors.get("description"),
            Some("Description must be at least 10 characters.")
        );
    }

    #[test]
    fn win_rate_must_stay_inside_percent_range() {
        let mut draft = new_draft();
        draft.win_rate = "120".to_string();
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.get("win_rate"),
            Some("Win rate must be between 0 and 100.")
        );

        draft.win_rate = "-1".to_string();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn negative_profit_factor_is_rejected() {
        let mut draft = new_draft();
        draft.profit_factor = "-0.5".to_string();
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.get("profit_factor"),
            Some("Profit factor must be zero or greater.")
        );
    }

    #[test]
    fn blank_metrics_default_to_zero() {
        let mut draft = new_draft();
        draft.win_rate = "".to_string();
        draft.profit_factor = "".to_string();
        let valid = draft.validate().unwrap();
        assert_eq!(valid.performance.win_rate, 0.0);
        assert_eq!(valid.performance.profit_factor, 0.0);
    }

    #[test]
    fn optional_metrics_reject_junk_but_allow_blank() {
        let mut draft = new_draft();
        draft.sharpe_ratio = "high".to_string();
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            errors.get("sharpe_ratio"),
            Some("Sharpe ratio must be a number.")
        );
    }

    #[test]
    fn edit_prefill_round_trips_the_catalog_entry() {
        let original = &strategy_catalog()[1];
        let draft = StrategyDraft::from_strategy(original);
        assert_eq!(draft.id.as_ref(), Some(&original.id));
        assert_eq!(draft.sharpe_ratio, "0.95");
        assert_eq!(draft.max_drawdown, "");

        let valid = draft.validate().unwrap();
        let rebuilt = valid.into_strategy(original.id.clone());
        assert_eq!(&rebuilt, original);
    }
}
