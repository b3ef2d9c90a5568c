//! In-memory sample data provider.
//!
//! Serves the demo catalogs (strategies, users, dashboard) and a deterministic
//! pseudo-random signal feed. All randomness flows through the seed hierarchy,
//! so the same master seed always yields byte-identical collections. An outage
//! toggle makes every fetch fail, for exercising the error paths.

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::Rng;

use super::provider::{DataError, DataProvider};
use crate::domain::{
    ActivityEntry, ActivityKind, DashboardSnapshot, DashboardStats, Direction, StrategyId,
    StrategyPerformance, SubscriptionStatus, TradingSignal, TradingStrategy, User, UserId,
};
use crate::rng::SeedHierarchy;

/// Assets the signal feed rotates through.
pub const ASSETS: [&str; 9] = [
    "AAPL", "GOOGL", "MSFT", "TSLA", "AMZN", "BTC/USD", "ETH/USD", "EUR/USD", "SPY",
];

/// Strategy ids the signal feed rotates through (the catalog has one more,
/// Fib_Retracement, which never emits signals).
pub const SIGNAL_STRATEGIES: [&str; 5] = [
    "SMA_Crossover_1",
    "EMA_Reversal_2",
    "MACD_Divergence",
    "RSI_Momentum",
    "Bollinger_Breakout",
];

pub const DEFAULT_SIGNAL_COUNT: usize = 25;

const WEEK_MILLIS: f64 = 7.0 * 24.0 * 60.0 * 60.0 * 1000.0;

/// In-memory provider backed by the seed hierarchy.
pub struct SampleProvider {
    seeds: SeedHierarchy,
    now: DateTime<Utc>,
    signal_count: usize,
    simulate_outage: bool,
}

impl SampleProvider {
    pub fn new(master_seed: u64) -> Self {
        Self::anchored(master_seed, Utc::now())
    }

    /// Build a provider with a fixed "now". Signal timestamps are spread over
    /// the 7 days before this anchor, so a fixed anchor plus a fixed seed
    /// gives a fully reproducible feed.
    pub fn anchored(master_seed: u64, now: DateTime<Utc>) -> Self {
        Self {
            seeds: SeedHierarchy::new(master_seed),
            now,
            signal_count: DEFAULT_SIGNAL_COUNT,
            simulate_outage: false,
        }
    }

    pub fn with_signal_count(mut self, count: usize) -> Self {
        self.signal_count = count;
        self
    }

    /// Make every fetch fail with `DataError::Unavailable`.
    pub fn with_outage(mut self, outage: bool) -> Self {
        self.simulate_outage = outage;
        self
    }

    fn guard(&self) -> Result<(), DataError> {
        if self.simulate_outage {
            Err(DataError::Unavailable("simulated outage".into()))
        } else {
            Ok(())
        }
    }

    /// Generate one signal from its feed position. Asset and strategy rotate
    /// round-robin over the fixed lists; everything else is drawn from the
    /// position's own RNG.
    fn generate_signal(&self, index: usize) -> TradingSignal {
        let mut rng = self.seeds.rng_for("signals", index as u64);

        let direction = if rng.gen::<f64>() > 0.5 {
            Direction::Buy
        } else {
            Direction::Sell
        };
        let entry_price = rng.gen::<f64>() * 500.0 + 50.0;
        let stop_offset = rng.gen::<f64>() * 10.0 + 1.0;
        let target_offset = rng.gen::<f64>() * 10.0 + 1.0;
        let (stop_loss, target_price) = match direction {
            Direction::Buy => (entry_price - stop_offset, entry_price + target_offset),
            Direction::Sell => (entry_price + stop_offset, entry_price - target_offset),
        };

        let age_millis = (rng.gen::<f64>() * WEEK_MILLIS) as i64;

        let mut indicator_values = HashMap::new();
        indicator_values.insert("RSI".to_string(), rng.gen::<f64>() * 100.0);
        indicator_values.insert("ATR".to_string(), rng.gen::<f64>() * 5.0 + 0.5);
        if rng.gen::<f64>() > 0.5 {
            indicator_values.insert("MACD_Signal".to_string(), rng.gen::<f64>() * 2.0 - 1.0);
        }

        TradingSignal {
            asset: ASSETS[index % ASSETS.len()].to_string(),
            direction,
            entry_price,
            stop_loss,
            target_price,
            strategy_id: StrategyId::new(SIGNAL_STRATEGIES[index % SIGNAL_STRATEGIES.len()]),
            timestamp: self.now - Duration::milliseconds(age_millis),
            indicator_values,
        }
    }
}

impl DataProvider for SampleProvider {
    fn name(&self) -> &str {
        "sample"
    }

    fn fetch_signals(&self) -> Result<Vec<TradingSignal>, DataError> {
        self.guard()?;
        let mut signals: Vec<TradingSignal> = (0..self.signal_count)
            .map(|i| self.generate_signal(i))
            .collect();
        signals.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(signals)
    }

    fn fetch_signal(&self, index: usize) -> Result<TradingSignal, DataError> {
        self.fetch_signals()?
            .into_iter()
            .nth(index)
            .ok_or(DataError::SignalNotFound { index })
    }

    fn fetch_strategies(&self) -> Result<Vec<TradingStrategy>, DataError> {
        self.guard()?;
        Ok(strategy_catalog())
    }

    fn fetch_strategy(&self, id: &StrategyId) -> Result<TradingStrategy, DataError> {
        self.fetch_strategies()?
            .into_iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| DataError::StrategyNotFound { id: id.clone() })
    }

    fn fetch_users(&self) -> Result<Vec<User>, DataError> {
        self.guard()?;
        Ok(user_roster())
    }

    fn fetch_dashboard(&self) -> Result<DashboardSnapshot, DataError> {
        self.guard()?;
        Ok(dashboard_snapshot())
    }

    fn is_available(&self) -> bool {
        !self.simulate_outage
    }
}

/// The fixed strategy catalog.
pub fn strategy_catalog() -> Vec<TradingStrategy> {
    vec![
        TradingStrategy {
            id: StrategyId::new("SMA_Crossover_1"),
            name: "Simple Moving Average Crossover".to_string(),
            description: "Buys when short-term SMA crosses above long-term SMA, sells on the reverse.".to_string(),
            category: Some("Trend Following".to_string()),
            indicators_used: None,
            performance: StrategyPerformance {
                win_rate: 55.2,
                profit_factor: 1.45,
                sharpe_ratio: None,
                max_drawdown: Some(15.8),
            },
        },
        TradingStrategy {
            id: StrategyId::new("EMA_Reversal_2"),
            name: "Exponential Moving Average Reversal".to_string(),
            description: "Identifies potential reversals using deviations from short-term EMA.".to_string(),
            category: Some("Mean Reversion".to_string()),
            indicators_used: None,
            performance: StrategyPerformance {
                win_rate: 62.1,
                profit_factor: 1.62,
                sharpe_ratio: Some(0.95),
                max_drawdown: None,
            },
        },
        TradingStrategy {
            id: StrategyId::new("MACD_Divergence"),
            name: "MACD Divergence Hunter".to_string(),
            description: "Looks for divergences between price action and the MACD indicator.".to_string(),
            category: Some("Reversal".to_string()),
            indicators_used: None,
            performance: StrategyPerformance {
                win_rate: 48.5,
                profit_factor: 1.33,
                sharpe_ratio: None,
                max_drawdown: Some(18.2),
            },
        },
        TradingStrategy {
            id: StrategyId::new("RSI_Momentum"),
            name: "RSI Momentum Rider".to_string(),
            description: "Enters trades when RSI indicates strong momentum (above 70 for buy, below 30 for sell).".to_string(),
            category: Some("Momentum".to_string()),
            indicators_used: None,
            performance: StrategyPerformance {
                win_rate: 58.0,
                profit_factor: 1.55,
                sharpe_ratio: Some(1.1),
                max_drawdown: None,
            },
        },
        TradingStrategy {
            id: StrategyId::new("Bollinger_Breakout"),
            name: "Bollinger Band Breakout".to_string(),
            description: "Trades breakouts above or below the Bollinger Bands, anticipating volatility.".to_string(),
            category: Some("Volatility Breakout".to_string()),
            indicators_used: None,
            performance: StrategyPerformance {
                win_rate: 45.9,
                profit_factor: 1.28,
                sharpe_ratio: None,
                max_drawdown: Some(22.5),
            },
        },
        TradingStrategy {
            id: StrategyId::new("Fib_Retracement"),
            name: "Fibonacci Retracement Levels".to_string(),
            description: "Uses Fibonacci levels as potential entry/exit points during trends.".to_string(),
            category: Some("Trend Following".to_string()),
            indicators_used: None,
            performance: StrategyPerformance {
                win_rate: 60.5,
                profit_factor: 1.70,
                sharpe_ratio: Some(1.05),
                max_drawdown: None,
            },
        },
    ]
}

/// The fixed user roster.
pub fn user_roster() -> Vec<User> {
    vec![
        User {
            id: UserId::new("usr_1a2b3c"),
            name: "Alice Johnson".to_string(),
            email: "alice.j@example.com".to_string(),
            subscription_status: SubscriptionStatus::Active,
            joined_date: Utc.with_ymd_and_hms(2023, 5, 15, 10, 30, 0).unwrap(),
            is_admin: false,
            avatar_url: Some("https://picsum.photos/id/1011/100/100".to_string()),
            plan_name: Some("Premium".to_string()),
        },
        User {
            id: UserId::new("usr_4d5e6f"),
            name: "Bob Smith".to_string(),
            email: "bob.smith@sample.net".to_string(),
            subscription_status: SubscriptionStatus::Trial,
            joined_date: Utc.with_ymd_and_hms(2024, 1, 20, 14, 0, 0).unwrap(),
            is_admin: false,
            avatar_url: Some("https://picsum.photos/id/1005/100/100".to_string()),
            plan_name: Some("Trial".to_string()),
        },
        User {
            id: UserId::new("usr_7g8h9i"),
            name: "Charlie Brown".to_string(),
            email: "charlie.b@mail.org".to_string(),
            subscription_status: SubscriptionStatus::Inactive,
            joined_date: Utc.with_ymd_and_hms(2022, 11, 1, 8, 0, 0).unwrap(),
            is_admin: false,
            avatar_url: None,
            plan_name: Some("Basic (Inactive)".to_string()),
        },
        User {
            id: UserId::new("usr_admin01"),
            name: "Admin User".to_string(),
            email: "admin@signalstream.app".to_string(),
            subscription_status: SubscriptionStatus::Active,
            joined_date: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
            is_admin: true,
            avatar_url: Some("https://picsum.photos/id/1025/100/100".to_string()),
            plan_name: Some("Admin".to_string()),
        },
        User {
            id: UserId::new("usr_jklmno"),
            name: "Diana Prince".to_string(),
            email: "diana.p@example.com".to_string(),
            subscription_status: SubscriptionStatus::Expired,
            joined_date: Utc.with_ymd_and_hms(2023, 2, 10, 11, 45, 0).unwrap(),
            is_admin: false,
            avatar_url: Some("https://picsum.photos/id/1027/100/100".to_string()),
            plan_name: Some("Premium (Expired)".to_string()),
        },
        User {
            id: UserId::new("usr_pqrstuv"),
            name: "Ethan Hunt".to_string(),
            email: "ethan.h@sample.org".to_string(),
            subscription_status: SubscriptionStatus::Active,
            joined_date: Utc.with_ymd_and_hms(2024, 3, 1, 16, 20, 0).unwrap(),
            is_admin: false,
            avatar_url: Some("https://picsum.photos/id/10/100/100".to_string()),
            plan_name: Some("Standard".to_string()),
        },
    ]
}

/// The fixed dashboard snapshot.
pub fn dashboard_snapshot() -> DashboardSnapshot {
    DashboardSnapshot {
        stats: DashboardStats {
            total_users: 1250,
            total_users_caption: "+20 since last week".to_string(),
            active_subscriptions: 980,
            active_subscriptions_caption: "95% retention rate".to_string(),
            signals_sent_today: 15,
            signals_sent_today_caption: "5 more than yesterday".to_string(),
        },
        recent_activity: vec![
            ActivityEntry {
                kind: ActivityKind::Signup,
                description: "New user registered: john.doe@example.com".to_string(),
                age: "2 hours ago".to_string(),
            },
            ActivityEntry {
                kind: ActivityKind::Broadcast,
                description: "Signal broadcasted: SMA_Crossover_1 - Buy AAPL".to_string(),
                age: "3 hours ago".to_string(),
            },
            ActivityEntry {
                kind: ActivityKind::Subscription,
                description: "User upgraded plan: jane.smith@example.com".to_string(),
                age: "5 hours ago".to_string(),
            },
            ActivityEntry {
                kind: ActivityKind::Signup,
                description: "New user registered: mike.jones@example.com".to_string(),
                age: "1 day ago".to_string(),
            },
            ActivityEntry {
                kind: ActivityKind::Broadcast,
                description: "Signal broadcasted: RSI_Momentum - Sell TSLA".to_string(),
                age: "1 day ago".to_string(),
            },
        ],
    }
}
