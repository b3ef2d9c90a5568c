//! Client-side filter/sort engine.
//!
//! Collections are fetched whole and narrowed here: the provider has no
//! pagination or server-side filtering. Queries are plain value types the
//! views hold in their state; `apply` is a pure derivation recomputed
//! whenever the source collection or the criteria change.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::{StrategyId, TradingSignal, TradingStrategy, User};

// ─── Strategy catalog ────────────────────────────────────────────────

/// Sort order for the strategy catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum StrategySort {
    /// Name ascending, case-insensitive.
    #[default]
    Name,
    /// Win rate descending.
    WinRate,
    /// Profit factor descending.
    ProfitFactor,
}

impl StrategySort {
    pub const ALL: [StrategySort; 3] = [
        StrategySort::Name,
        StrategySort::WinRate,
        StrategySort::ProfitFactor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StrategySort::Name => "Default",
            StrategySort::WinRate => "Win Rate (High to Low)",
            StrategySort::ProfitFactor => "Profit Factor (High to Low)",
        }
    }

    pub fn next(self) -> Self {
        match self {
            StrategySort::Name => StrategySort::WinRate,
            StrategySort::WinRate => StrategySort::ProfitFactor,
            StrategySort::ProfitFactor => StrategySort::Name,
        }
    }
}

/// Filter and sort criteria for the strategy catalog view.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct StrategyQuery {
    /// Exact category match; `None` means all categories.
    pub category: Option<String>,
    pub sort: StrategySort,
}

impl StrategyQuery {
    /// Narrow and order the catalog. Filtering happens before sorting; the
    /// sort is stable, so entries that compare equal keep catalog order.
    pub fn apply<'a>(&self, strategies: &'a [TradingStrategy]) -> Vec<&'a TradingStrategy> {
        let mut filtered: Vec<&TradingStrategy> = strategies
            .iter()
            .filter(|s| match &self.category {
                Some(category) => s.category.as_deref() == Some(category.as_str()),
                None => true,
            })
            .collect();

        match self.sort {
            StrategySort::Name => {
                filtered.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
            StrategySort::WinRate => {
                filtered.sort_by(|a, b| desc_f64(a.performance.win_rate, b.performance.win_rate));
            }
            StrategySort::ProfitFactor => {
                filtered.sort_by(|a, b| {
                    desc_f64(a.performance.profit_factor, b.performance.profit_factor)
                });
            }
        }
        filtered
    }

    /// Reset both criteria in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_filtered(&self) -> bool {
        self.category.is_some() || self.sort != StrategySort::default()
    }
}

/// Distinct categories present in the catalog, alphabetical. Entries without
/// a category are skipped.
pub fn distinct_categories(strategies: &[TradingStrategy]) -> Vec<String> {
    strategies
        .iter()
        .filter_map(|s| s.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ─── Signal history ──────────────────────────────────────────────────

/// Filter criteria for the signal history view.
///
/// `end_date` is inclusive of the entire calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct SignalQuery {
    pub asset: Option<String>,
    pub strategy_id: Option<StrategyId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SignalQuery {
    /// Narrow the feed, always newest first regardless of criteria.
    pub fn apply<'a>(&self, signals: &'a [TradingSignal]) -> Vec<&'a TradingSignal> {
        let mut filtered: Vec<&TradingSignal> =
            signals.iter().filter(|s| self.matches(s)).collect();
        filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        filtered
    }

    fn matches(&self, signal: &TradingSignal) -> bool {
        if let Some(asset) = &self.asset {
            if &signal.asset != asset {
                return false;
            }
        }
        if let Some(strategy_id) = &self.strategy_id {
            if &signal.strategy_id != strategy_id {
                return false;
            }
        }
        // Date bounds compare on the signal's UTC calendar day, which makes
        // both ends inclusive of their whole day.
        let day = signal.timestamp.date_naive();
        if let Some(start) = self.start_date {
            if day < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if day > end {
                return false;
            }
        }
        true
    }

    /// Reset all four criteria in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_filtered(&self) -> bool {
        *self != Self::default()
    }
}

/// Distinct assets present in the feed, alphabetical.
pub fn distinct_assets(signals: &[TradingSignal]) -> Vec<String> {
    signals
        .iter()
        .map(|s| s.asset.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct strategy ids present in the feed, alphabetical.
pub fn distinct_strategy_ids(signals: &[TradingSignal]) -> Vec<StrategyId> {
    signals
        .iter()
        .map(|s| s.strategy_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ─── User search ─────────────────────────────────────────────────────

/// Case-insensitive substring search over name and email. An empty term
/// matches everyone.
pub fn search_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    let needle = term.to_lowercase();
    users
        .iter()
        .filter(|u| {
            needle.is_empty()
                || u.name.to_lowercase().contains(&needle)
                || u.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Descending order on a float metric; incomparable values rank equal.
fn desc_f64(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Direction, StrategyPerformance};
    use chrono::{Datelike, TimeZone, Utc};
    use std::collections::HashMap;

    fn make_strategy(id: &str, name: &str, category: Option<&str>, win_rate: f64) -> TradingStrategy {
        TradingStrategy {
            id: StrategyId::new(id),
            name: name.to_string(),
            description: "A strategy used by the query tests.".to_string(),
            category: category.map(str::to_string),
            indicators_used: None,
            performance: StrategyPerformance {
                win_rate,
                profit_factor: 1.5,
                sharpe_ratio: None,
                max_drawdown: None,
            },
        }
    }

    fn make_signal(asset: &str, strategy: &str, day: u32, hour: u32) -> TradingSignal {
        TradingSignal {
            asset: asset.to_string(),
            direction: Direction::Buy,
            entry_price: 100.0,
            stop_loss: 95.0,
            target_price: 110.0,
            strategy_id: StrategyId::new(strategy),
            timestamp: Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap(),
            indicator_values: HashMap::new(),
        }
    }

    #[test]
    fn default_query_sorts_by_name_case_insensitively() {
        let strategies = vec![
            make_strategy("b", "beta", None, 50.0),
            make_strategy("a", "Alpha", None, 60.0),
            make_strategy("g", "Gamma", None, 40.0),
        ];
        let names: Vec<&str> = StrategyQuery::default()
            .apply(&strategies)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "beta", "Gamma"]);
    }

    #[test]
    fn category_filter_keeps_exact_matches_only() {
        let strategies = vec![
            make_strategy("a", "Alpha", Some("Trend Following"), 50.0),
            make_strategy("b", "Beta", Some("Momentum"), 50.0),
            make_strategy("c", "Gamma", None, 50.0),
        ];
        let query = StrategyQuery {
            category: Some("Trend Following".to_string()),
            sort: StrategySort::Name,
        };
        let out = query.apply(&strategies);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id.as_str(), "a");
    }

    #[test]
    fn win_rate_sort_is_descending() {
        let strategies = vec![
            make_strategy("low", "Low", None, 45.0),
            make_strategy("high", "High", None, 62.0),
            make_strategy("mid", "Mid", None, 55.0),
        ];
        let query = StrategyQuery {
            category: None,
            sort: StrategySort::WinRate,
        };
        let ids: Vec<&str> = query.apply(&strategies).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
    }

    #[test]
    fn equal_win_rates_keep_catalog_order() {
        let strategies = vec![
            make_strategy("first", "First", None, 55.2),
            make_strategy("second", "Second", None, 55.2),
            make_strategy("third", "Third", None, 55.2),
        ];
        let query = StrategyQuery {
            category: None,
            sort: StrategySort::WinRate,
        };
        let ids: Vec<&str> = query.apply(&strategies).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn profit_factor_sort_is_descending() {
        let mut strategies = vec![
            make_strategy("a", "A", None, 50.0),
            make_strategy("b", "B", None, 50.0),
        ];
        strategies[0].performance.profit_factor = 1.2;
        strategies[1].performance.profit_factor = 1.9;
        let query = StrategyQuery {
            category: None,
            sort: StrategySort::ProfitFactor,
        };
        let ids: Vec<&str> = query.apply(&strategies).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn strategy_clear_resets_both_criteria() {
        let mut query = StrategyQuery {
            category: Some("Momentum".to_string()),
            sort: StrategySort::WinRate,
        };
        assert!(query.is_filtered());
        query.clear();
        assert_eq!(query, StrategyQuery::default());
        assert!(!query.is_filtered());
    }

    #[test]
    fn distinct_categories_are_sorted_and_deduped() {
        let strategies = vec![
            make_strategy("a", "A", Some("Momentum"), 50.0),
            make_strategy("b", "B", Some("Trend Following"), 50.0),
            make_strategy("c", "C", Some("Momentum"), 50.0),
            make_strategy("d", "D", None, 50.0),
        ];
        assert_eq!(
            distinct_categories(&strategies),
            vec!["Momentum".to_string(), "Trend Following".to_string()]
        );
    }

    #[test]
    fn signal_filters_combine_conjunctively() {
        let signals = vec![
            make_signal("AAPL", "SMA_Crossover_1", 1, 10),
            make_signal("AAPL", "RSI_Momentum", 2, 10),
            make_signal("TSLA", "SMA_Crossover_1", 3, 10),
        ];
        let query = SignalQuery {
            asset: Some("AAPL".to_string()),
            strategy_id: Some(StrategyId::new("SMA_Crossover_1")),
            start_date: None,
            end_date: None,
        };
        let out = query.apply(&signals);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].asset, "AAPL");
        assert_eq!(out[0].strategy_id.as_str(), "SMA_Crossover_1");
    }

    #[test]
    fn filtered_signals_stay_newest_first() {
        let signals = vec![
            make_signal("AAPL", "a", 1, 10),
            make_signal("AAPL", "a", 5, 10),
            make_signal("AAPL", "a", 3, 10),
        ];
        let out = SignalQuery::default().apply(&signals);
        let days: Vec<u32> = out
            .iter()
            .map(|s| s.timestamp.date_naive().day())
            .collect();
        assert_eq!(days, vec![5, 3, 1]);
    }

    #[test]
    fn end_date_includes_its_whole_day() {
        let signals = vec![
            make_signal("AAPL", "a", 10, 23),
            make_signal("AAPL", "a", 11, 0),
        ];
        let query = SignalQuery {
            asset: None,
            strategy_id: None,
            start_date: None,
            end_date: Some(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()),
        };
        let out = query.apply(&signals);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].timestamp.date_naive().day(), 10);
    }

    #[test]
    fn start_date_is_inclusive() {
        let signals = vec![
            make_signal("AAPL", "a", 9, 23),
            make_signal("AAPL", "a", 10, 0),
        ];
        let query = SignalQuery {
            asset: None,
            strategy_id: None,
            start_date: Some(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()),
            end_date: None,
        };
        let out = query.apply(&signals);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].timestamp.date_naive().day(), 10);
    }

    #[test]
    fn signal_clear_resets_all_four_criteria() {
        let mut query = SignalQuery {
            asset: Some("AAPL".to_string()),
            strategy_id: Some(StrategyId::new("a")),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30),
        };
        assert!(query.is_filtered());
        query.clear();
        assert_eq!(query, SignalQuery::default());
        assert!(!query.is_filtered());
    }

    #[test]
    fn distinct_assets_and_strategies_are_sorted() {
        let signals = vec![
            make_signal("TSLA", "b", 1, 0),
            make_signal("AAPL", "a", 2, 0),
            make_signal("TSLA", "a", 3, 0),
        ];
        assert_eq!(distinct_assets(&signals), vec!["AAPL", "TSLA"]);
        assert_eq!(
            distinct_strategy_ids(&signals),
            vec![StrategyId::new("a"), StrategyId::new("b")]
        );
    }

    #[test]
    fn user_search_matches_name_or_email() {
        let users = crate::data::sample::user_roster();
        let by_name = search_users(&users, "alice");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Alice Johnson");

        let by_email = search_users(&users, "SAMPLE.NET");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].name, "Bob Smith");

        assert_eq!(search_users(&users, "").len(), users.len());
        assert!(search_users(&users, "nobody-here").is_empty());
    }
}
