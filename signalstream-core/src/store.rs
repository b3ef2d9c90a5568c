//! In-memory session store for admin mutations.
//!
//! Seeded once from the provider, then owned by the session: adds, edits and
//! deletes live only in process memory. Nothing here simulates latency; the
//! caller decides how long a mutation appears to take.

use chrono::{DateTime, Utc};

use crate::data::{DataError, DataProvider};
use crate::domain::{StrategyId, TradingSignal, TradingStrategy, User, UserId};
use crate::forms::{ValidBroadcast, ValidStrategy, ValidUser};

/// Outcome of a strategy save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// New entry appended under a generated id.
    Added(StrategyId),
    /// Existing entry replaced in place.
    Updated(StrategyId),
    /// Edit referenced an id that is no longer present; nothing changed.
    Missing(StrategyId),
}

/// Mutable session state backing the admin views.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    signals: Vec<TradingSignal>,
    strategies: Vec<TradingStrategy>,
    users: Vec<User>,
}

impl SessionStore {
    pub fn new(
        signals: Vec<TradingSignal>,
        strategies: Vec<TradingStrategy>,
        users: Vec<User>,
    ) -> Self {
        Self {
            signals,
            strategies,
            users,
        }
    }

    /// Seed from one full fetch of each collection.
    pub fn seeded(provider: &dyn DataProvider) -> Result<Self, DataError> {
        Ok(Self {
            signals: provider.fetch_signals()?,
            strategies: provider.fetch_strategies()?,
            users: provider.fetch_users()?,
        })
    }

    pub fn signals(&self) -> &[TradingSignal] {
        &self.signals
    }

    /// Replace the signal feed wholesale after a refetch. Local broadcasts
    /// made since the previous fetch are discarded with the old copy.
    pub fn replace_signals(&mut self, signals: Vec<TradingSignal>) {
        self.signals = signals;
    }

    /// Replace the strategy catalog wholesale after a refetch.
    pub fn replace_strategies(&mut self, strategies: Vec<TradingStrategy>) {
        self.strategies = strategies;
    }

    /// Replace the user roster wholesale after a refetch.
    pub fn replace_users(&mut self, users: Vec<User>) {
        self.users = users;
    }

    pub fn strategies(&self) -> &[TradingStrategy] {
        &self.strategies
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn strategy(&self, id: &StrategyId) -> Option<&TradingStrategy> {
        self.strategies.iter().find(|s| &s.id == id)
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Add (no id) or update (id set) a strategy. Updates replace the entry
    /// in place, keeping its catalog position; the id itself never changes.
    pub fn save_strategy(&mut self, record: ValidStrategy, now_millis: i64) -> SaveOutcome {
        match record.id.clone() {
            Some(id) => {
                match self.strategies.iter_mut().find(|s| s.id == id) {
                    Some(slot) => {
                        *slot = record.into_strategy(id.clone());
                        SaveOutcome::Updated(id)
                    }
                    None => SaveOutcome::Missing(id),
                }
            }
            None => {
                let id = self.generate_strategy_id(now_millis);
                self.strategies.push(record.into_strategy(id.clone()));
                SaveOutcome::Added(id)
            }
        }
    }

    /// Remove a strategy. Deleting an id that is already gone is a no-op and
    /// returns false.
    pub fn delete_strategy(&mut self, id: &StrategyId) -> bool {
        let before = self.strategies.len();
        self.strategies.retain(|s| &s.id != id);
        self.strategies.len() < before
    }

    /// Merge a validated edit into the matching user. Returns false when the
    /// id is no longer present.
    pub fn update_user(&mut self, edit: &ValidUser) -> bool {
        match self.users.iter_mut().find(|u| u.id == edit.id) {
            Some(user) => {
                edit.apply_to(user);
                true
            }
            None => false,
        }
    }

    /// Remove a user. Same no-op semantics as strategy deletion.
    pub fn delete_user(&mut self, id: &UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|u| &u.id != id);
        self.users.len() < before
    }

    /// Append a broadcast signal to the feed, keeping newest-first order. The
    /// feed is append-only; broadcast signals are never edited or removed.
    pub fn broadcast(&mut self, record: ValidBroadcast, now: DateTime<Utc>) -> &TradingSignal {
        let signal = record.into_signal(now);
        let at = self
            .signals
            .iter()
            .position(|s| s.timestamp <= signal.timestamp)
            .unwrap_or(self.signals.len());
        self.signals.insert(at, signal);
        &self.signals[at]
    }

    /// Time-based id for new strategies, suffixed on collision.
    fn generate_strategy_id(&self, now_millis: i64) -> StrategyId {
        let base = format!("new_{now_millis}");
        if self.strategy(&StrategyId::new(base.clone())).is_none() {
            return StrategyId::new(base);
        }
        let mut n = 1u32;
        loop {
            let candidate = StrategyId::new(format!("{base}_{n}"));
            if self.strategy(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }
}
