//! Form state for the broadcast panel and the admin overlays.
//!
//! Each state wraps a core draft with a field cursor, the last validation
//! failures, and a submitting flag that stays set while the worker sleeps out
//! the simulated latency. Text fields edit in place; choice fields cycle with
//! Left/Right so plain letters stay available to the text fields.

use signalstream_core::domain::{
    Direction, SubscriptionStatus, TradingStrategy, User,
};
use signalstream_core::forms::{
    BroadcastDraft, FieldErrors, StrategyDraft, UserDraft, ValidBroadcast, ValidStrategy,
    ValidUser,
};

/// Step an index through a fixed-size field list.
fn step_field(current: usize, count: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % count
    } else {
        (current + count - 1) % count
    }
}

// ── Broadcast ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastField {
    Strategy,
    Asset,
    Direction,
    EntryPrice,
    StopLoss,
    TargetPrice,
    Notes,
}

impl BroadcastField {
    pub const ALL: [BroadcastField; 7] = [
        BroadcastField::Strategy,
        BroadcastField::Asset,
        BroadcastField::Direction,
        BroadcastField::EntryPrice,
        BroadcastField::StopLoss,
        BroadcastField::TargetPrice,
        BroadcastField::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BroadcastField::Strategy => "Strategy",
            BroadcastField::Asset => "Asset",
            BroadcastField::Direction => "Direction",
            BroadcastField::EntryPrice => "Entry price",
            BroadcastField::StopLoss => "Stop loss",
            BroadcastField::TargetPrice => "Target price",
            BroadcastField::Notes => "Notes",
        }
    }

    /// Key the core validator reports errors under.
    pub fn error_key(self) -> &'static str {
        match self {
            BroadcastField::Strategy => "strategy_id",
            BroadcastField::Asset => "asset",
            BroadcastField::Direction => "direction",
            BroadcastField::EntryPrice => "entry_price",
            BroadcastField::StopLoss => "stop_loss",
            BroadcastField::TargetPrice => "target_price",
            BroadcastField::Notes => "additional_notes",
        }
    }
}

/// Broadcast panel form — persistent, reset only after a successful send.
#[derive(Debug)]
pub struct BroadcastFormState {
    pub draft: BroadcastDraft,
    pub field: usize,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl BroadcastFormState {
    pub fn new() -> Self {
        Self {
            draft: BroadcastDraft::empty(),
            field: 0,
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    pub fn current_field(&self) -> BroadcastField {
        BroadcastField::ALL[self.field]
    }

    pub fn next_field(&mut self) {
        self.field = step_field(self.field, BroadcastField::ALL.len(), true);
    }

    pub fn prev_field(&mut self) {
        self.field = step_field(self.field, BroadcastField::ALL.len(), false);
    }

    /// Mutable buffer behind the focused field, when it is a text field.
    pub fn text_buffer(&mut self) -> Option<&mut String> {
        match self.current_field() {
            BroadcastField::Asset => Some(&mut self.draft.asset),
            BroadcastField::EntryPrice => Some(&mut self.draft.entry_price),
            BroadcastField::StopLoss => Some(&mut self.draft.stop_loss),
            BroadcastField::TargetPrice => Some(&mut self.draft.target_price),
            BroadcastField::Notes => Some(&mut self.draft.additional_notes),
            BroadcastField::Strategy | BroadcastField::Direction => None,
        }
    }

    /// Cycle the focused choice field. The strategy selector walks the live
    /// catalog, so a strategy deleted mid-session drops out of rotation.
    pub fn cycle_choice(&mut self, strategies: &[TradingStrategy], forward: bool) {
        match self.current_field() {
            BroadcastField::Strategy => {
                let ids: Vec<String> = strategies
                    .iter()
                    .map(|s| s.id.as_str().to_string())
                    .collect();
                if ids.is_empty() {
                    return;
                }
                let pos = ids.iter().position(|id| *id == self.draft.strategy_id);
                let next = match (pos, forward) {
                    (Some(p), true) => (p + 1) % ids.len(),
                    (Some(p), false) => (p + ids.len() - 1) % ids.len(),
                    (None, true) => 0,
                    (None, false) => ids.len() - 1,
                };
                self.draft.strategy_id = ids[next].clone();
            }
            BroadcastField::Direction => {
                self.draft.direction = Some(match self.draft.direction {
                    Some(Direction::Buy) => Direction::Sell,
                    _ => Direction::Buy,
                });
            }
            _ => {}
        }
    }

    /// Validate the whole draft. Failures stick to the state for rendering.
    pub fn validate(&mut self, strategies: &[TradingStrategy]) -> Option<ValidBroadcast> {
        match self.draft.validate(strategies) {
            Ok(valid) => {
                self.errors = FieldErrors::default();
                Some(valid)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Clear the form back to its defaults after a successful broadcast.
    pub fn reset(&mut self) {
        self.draft = BroadcastDraft::empty();
        self.field = 0;
        self.errors = FieldErrors::default();
        self.submitting = false;
    }
}

impl Default for BroadcastFormState {
    fn default() -> Self {
        Self::new()
    }
}

// ── Strategy add/edit ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyField {
    Name,
    Description,
    Category,
    Indicators,
    WinRate,
    ProfitFactor,
    SharpeRatio,
    MaxDrawdown,
}

impl StrategyField {
    pub const ALL: [StrategyField; 8] = [
        StrategyField::Name,
        StrategyField::Description,
        StrategyField::Category,
        StrategyField::Indicators,
        StrategyField::WinRate,
        StrategyField::ProfitFactor,
        StrategyField::SharpeRatio,
        StrategyField::MaxDrawdown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StrategyField::Name => "Name",
            StrategyField::Description => "Description",
            StrategyField::Category => "Category",
            StrategyField::Indicators => "Indicators",
            StrategyField::WinRate => "Win rate %",
            StrategyField::ProfitFactor => "Profit factor",
            StrategyField::SharpeRatio => "Sharpe ratio",
            StrategyField::MaxDrawdown => "Max drawdown %",
        }
    }

    pub fn error_key(self) -> &'static str {
        match self {
            StrategyField::Name => "name",
            StrategyField::Description => "description",
            StrategyField::Category => "category",
            StrategyField::Indicators => "indicators_used",
            StrategyField::WinRate => "win_rate",
            StrategyField::ProfitFactor => "profit_factor",
            StrategyField::SharpeRatio => "sharpe_ratio",
            StrategyField::MaxDrawdown => "max_drawdown",
        }
    }
}

/// Strategy add/edit overlay form.
#[derive(Debug)]
pub struct StrategyFormState {
    pub draft: StrategyDraft,
    pub field: usize,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl StrategyFormState {
    pub fn new_add() -> Self {
        Self {
            draft: StrategyDraft::default(),
            field: 0,
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    pub fn new_edit(strategy: &TradingStrategy) -> Self {
        Self {
            draft: StrategyDraft::from_strategy(strategy),
            field: 0,
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.draft.id.is_some() {
            "Edit Strategy"
        } else {
            "Add Strategy"
        }
    }

    pub fn current_field(&self) -> StrategyField {
        StrategyField::ALL[self.field]
    }

    pub fn next_field(&mut self) {
        self.field = step_field(self.field, StrategyField::ALL.len(), true);
    }

    pub fn prev_field(&mut self) {
        self.field = step_field(self.field, StrategyField::ALL.len(), false);
    }

    pub fn text_buffer(&mut self) -> &mut String {
        match self.current_field() {
            StrategyField::Name => &mut self.draft.name,
            StrategyField::Description => &mut self.draft.description,
            StrategyField::Category => &mut self.draft.category,
            StrategyField::Indicators => &mut self.draft.indicators_used,
            StrategyField::WinRate => &mut self.draft.win_rate,
            StrategyField::ProfitFactor => &mut self.draft.profit_factor,
            StrategyField::SharpeRatio => &mut self.draft.sharpe_ratio,
            StrategyField::MaxDrawdown => &mut self.draft.max_drawdown,
        }
    }

    pub fn validate(&mut self) -> Option<ValidStrategy> {
        match self.draft.validate() {
            Ok(valid) => {
                self.errors = FieldErrors::default();
                Some(valid)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}

// ── User edit ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Email,
    Status,
    Admin,
}

impl UserField {
    pub const ALL: [UserField; 4] = [
        UserField::Name,
        UserField::Email,
        UserField::Status,
        UserField::Admin,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UserField::Name => "Name",
            UserField::Email => "Email",
            UserField::Status => "Subscription",
            UserField::Admin => "Admin",
        }
    }

    pub fn error_key(self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Email => "email",
            UserField::Status => "subscription_status",
            UserField::Admin => "is_admin",
        }
    }
}

/// User edit overlay form.
#[derive(Debug)]
pub struct UserFormState {
    pub draft: UserDraft,
    pub field: usize,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl UserFormState {
    pub fn new_edit(user: &User) -> Self {
        Self {
            draft: UserDraft::from_user(user),
            field: 0,
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    pub fn current_field(&self) -> UserField {
        UserField::ALL[self.field]
    }

    pub fn next_field(&mut self) {
        self.field = step_field(self.field, UserField::ALL.len(), true);
    }

    pub fn prev_field(&mut self) {
        self.field = step_field(self.field, UserField::ALL.len(), false);
    }

    pub fn text_buffer(&mut self) -> Option<&mut String> {
        match self.current_field() {
            UserField::Name => Some(&mut self.draft.name),
            UserField::Email => Some(&mut self.draft.email),
            UserField::Status | UserField::Admin => None,
        }
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        match self.current_field() {
            UserField::Status => {
                let all = SubscriptionStatus::ALL;
                let pos = self
                    .draft
                    .subscription_status
                    .and_then(|s| all.iter().position(|a| *a == s));
                let next = match (pos, forward) {
                    (Some(p), true) => (p + 1) % all.len(),
                    (Some(p), false) => (p + all.len() - 1) % all.len(),
                    (None, true) => 0,
                    (None, false) => all.len() - 1,
                };
                self.draft.subscription_status = Some(all[next]);
            }
            UserField::Admin => self.draft.is_admin = !self.draft.is_admin,
            _ => {}
        }
    }

    pub fn validate(&mut self) -> Option<ValidUser> {
        match self.draft.validate() {
            Ok(valid) => {
                self.errors = FieldErrors::default();
                Some(valid)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signalstream_core::data::sample::{strategy_catalog, user_roster};

    #[test]
    fn broadcast_field_cursor_wraps() {
        let mut form = BroadcastFormState::new();
        assert_eq!(form.current_field(), BroadcastField::Strategy);
        form.prev_field();
        assert_eq!(form.current_field(), BroadcastField::Notes);
        form.next_field();
        assert_eq!(form.current_field(), BroadcastField::Strategy);
    }

    #[test]
    fn strategy_selector_cycles_live_catalog() {
        let catalog = strategy_catalog();
        let mut form = BroadcastFormState::new();

        form.cycle_choice(&catalog, true);
        assert_eq!(form.draft.strategy_id, catalog[0].id.as_str());
        form.cycle_choice(&catalog, true);
        assert_eq!(form.draft.strategy_id, catalog[1].id.as_str());
        form.cycle_choice(&catalog, false);
        assert_eq!(form.draft.strategy_id, catalog[0].id.as_str());

        // A selection deleted from the catalog restarts the walk.
        form.draft.strategy_id = "gone".to_string();
        form.cycle_choice(&catalog, true);
        assert_eq!(form.draft.strategy_id, catalog[0].id.as_str());

        form.cycle_choice(&[], true);
        assert_eq!(form.draft.strategy_id, catalog[0].id.as_str());
    }

    #[test]
    fn direction_toggles_between_buy_and_sell() {
        let mut form = BroadcastFormState::new();
        form.field = 2; // Direction
        assert_eq!(form.draft.direction, Some(Direction::Buy));
        form.cycle_choice(&[], true);
        assert_eq!(form.draft.direction, Some(Direction::Sell));
        form.cycle_choice(&[], false);
        assert_eq!(form.draft.direction, Some(Direction::Buy));
    }

    #[test]
    fn failed_validation_sticks_to_the_state() {
        let mut form = BroadcastFormState::new();
        assert!(form.validate(&strategy_catalog()).is_none());
        assert!(!form.errors.is_empty());
        assert_eq!(
            form.errors.get(BroadcastField::Strategy.error_key()),
            Some("Please select a strategy.")
        );
    }

    #[test]
    fn reset_clears_draft_errors_and_submitting() {
        let mut form = BroadcastFormState::new();
        form.draft.asset = "AAPL".to_string();
        form.submitting = true;
        let _ = form.validate(&strategy_catalog());

        form.reset();
        assert_eq!(form.draft, signalstream_core::forms::BroadcastDraft::empty());
        assert!(form.errors.is_empty());
        assert!(!form.submitting);
    }

    #[test]
    fn edit_form_title_tracks_the_id() {
        let catalog = strategy_catalog();
        assert_eq!(StrategyFormState::new_add().title(), "Add Strategy");
        assert_eq!(StrategyFormState::new_edit(&catalog[0]).title(), "Edit Strategy");
    }

    #[test]
    fn user_status_cycles_all_four_states() {
        let mut form = UserFormState::new_edit(&user_roster()[0]);
        form.field = 2; // Status
        let start = form.draft.subscription_status.unwrap();
        for _ in 0..SubscriptionStatus::ALL.len() {
            form.cycle_choice(true);
        }
        assert_eq!(form.draft.subscription_status, Some(start));
    }

    #[test]
    fn admin_flag_toggles_either_direction() {
        let mut form = UserFormState::new_edit(&user_roster()[0]);
        form.field = 3; // Admin
        let start = form.draft.is_admin;
        form.cycle_choice(true);
        assert_eq!(form.draft.is_admin, !start);
        form.cycle_choice(false);
        assert_eq!(form.draft.is_admin, start);
    }
}
