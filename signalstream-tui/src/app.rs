//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here: the session store seeded from provider fetches,
//! per-panel queries and cursors, the status line, and the error history.
//! The worker thread communicates via channels; fetch responses carry a
//! generation counter so a stale fetch can never overwrite a newer one.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use signalstream_core::domain::{
    DashboardSnapshot, StrategyId, TradingSignal, TradingStrategy, User, UserId,
};
use signalstream_core::query::{
    distinct_assets, distinct_categories, distinct_strategy_ids, search_users, SignalQuery,
    StrategyQuery,
};
use signalstream_core::store::SessionStore;

use crate::forms::{BroadcastFormState, StrategyFormState, UserFormState};
use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Panel {
    Signals,
    Strategies,
    Broadcast,
    Users,
    Dashboard,
    Account,
    Help,
}

pub const PANEL_COUNT: usize = 7;

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Signals => 0,
            Panel::Strategies => 1,
            Panel::Broadcast => 2,
            Panel::Users => 3,
            Panel::Dashboard => 4,
            Panel::Account => 5,
            Panel::Help => 6,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Signals),
            1 => Some(Panel::Strategies),
            2 => Some(Panel::Broadcast),
            3 => Some(Panel::Users),
            4 => Some(Panel::Dashboard),
            5 => Some(Panel::Account),
            6 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Signals => "Signals",
            Panel::Strategies => "Strategies",
            Panel::Broadcast => "Broadcast",
            Panel::Users => "Users",
            Panel::Dashboard => "Dashboard",
            Panel::Account => "Account",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % PANEL_COUNT).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + PANEL_COUNT - 1) % PANEL_COUNT).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display. Validation failures stay inline on their form
/// and never land here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Mutation,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Fetch => "FETCH",
            ErrorCategory::Mutation => "MUT",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Which signal filter the filter bar is focused on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalFilterField {
    #[default]
    Asset,
    Strategy,
    StartDate,
    EndDate,
}

impl SignalFilterField {
    pub fn label(self) -> &'static str {
        match self {
            SignalFilterField::Asset => "Asset",
            SignalFilterField::Strategy => "Strategy",
            SignalFilterField::StartDate => "From",
            SignalFilterField::EndDate => "To",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SignalFilterField::Asset => SignalFilterField::Strategy,
            SignalFilterField::Strategy => SignalFilterField::StartDate,
            SignalFilterField::StartDate => SignalFilterField::EndDate,
            SignalFilterField::EndDate => SignalFilterField::Asset,
        }
    }
}

/// Step an optional choice through `options`: None → first/last → ... → None.
fn cycle_option<T: Clone + PartialEq>(options: &[T], current: &Option<T>, step: i32) -> Option<T> {
    if options.is_empty() {
        return None;
    }
    let len = options.len() as i32;
    let pos = current
        .as_ref()
        .and_then(|c| options.iter().position(|o| o == c))
        .map(|p| p as i32);
    let next = match pos {
        None => {
            if step > 0 {
                0
            } else {
                len - 1
            }
        }
        Some(p) => p + step,
    };
    if next < 0 || next >= len {
        None
    } else {
        Some(options[next as usize].clone())
    }
}

/// Signal history panel: filter bar state plus cursor and load state.
#[derive(Debug, Default)]
pub struct SignalsPanelState {
    pub query: SignalQuery,
    pub filter_focus: SignalFilterField,
    pub cursor: usize,
    pub loading: bool,
    pub banner: Option<String>,
    pub generation: u64,
}

impl SignalsPanelState {
    /// Step the focused filter. Asset and strategy cycle through the distinct
    /// values present in the feed; date bounds move one day at a time,
    /// starting from the feed window when unset.
    pub fn adjust_filter(&mut self, signals: &[TradingSignal], step: i32) {
        match self.filter_focus {
            SignalFilterField::Asset => {
                self.query.asset = cycle_option(&distinct_assets(signals), &self.query.asset, step);
            }
            SignalFilterField::Strategy => {
                self.query.strategy_id = cycle_option(
                    &distinct_strategy_ids(signals),
                    &self.query.strategy_id,
                    step,
                );
            }
            SignalFilterField::StartDate => {
                let base = self
                    .query
                    .start_date
                    .unwrap_or_else(|| default_date(signals) - Duration::days(7));
                self.query.start_date = Some(base + Duration::days(step.into()));
            }
            SignalFilterField::EndDate => {
                let base = self.query.end_date.unwrap_or_else(|| default_date(signals));
                self.query.end_date = Some(base + Duration::days(step.into()));
            }
        }
        self.cursor = 0;
    }

    /// Reset all four criteria in one atomic update.
    pub fn clear_filters(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }
}

/// Newest feed day, used to seed date filters; today when the feed is empty.
fn default_date(signals: &[TradingSignal]) -> NaiveDate {
    signals
        .iter()
        .map(|s| s.timestamp.date_naive())
        .max()
        .unwrap_or_else(|| Utc::now().date_naive())
}

/// Strategy catalog panel.
#[derive(Debug, Default)]
pub struct StrategiesPanelState {
    pub query: StrategyQuery,
    pub cursor: usize,
    pub loading: bool,
    pub banner: Option<String>,
    pub generation: u64,
}

impl StrategiesPanelState {
    pub fn cycle_category(&mut self, strategies: &[TradingStrategy], step: i32) {
        self.query.category =
            cycle_option(&distinct_categories(strategies), &self.query.category, step);
        self.cursor = 0;
    }

    pub fn cycle_sort(&mut self) {
        self.query.sort = self.query.sort.next();
        self.cursor = 0;
    }
}

/// User roster panel with incremental search.
#[derive(Debug, Default)]
pub struct UsersPanelState {
    pub search: String,
    pub searching: bool,
    pub cursor: usize,
    pub loading: bool,
    pub banner: Option<String>,
    pub generation: u64,
}

/// Admin dashboard panel.
#[derive(Debug, Default)]
pub struct DashboardPanelState {
    pub snapshot: Option<DashboardSnapshot>,
    pub loading: bool,
    pub banner: Option<String>,
    pub generation: u64,
}

/// Account panel: the session's own profile plus local notification toggles.
#[derive(Debug)]
pub struct AccountPanelState {
    pub user: Option<User>,
    pub cursor: usize,
    pub notify_signal_alerts: bool,
    pub notify_product_news: bool,
}

impl Default for AccountPanelState {
    fn default() -> Self {
        Self {
            user: None,
            cursor: 0,
            notify_signal_alerts: true,
            notify_product_news: false,
        }
    }
}

pub const ACCOUNT_TOGGLE_COUNT: usize = 2;

impl AccountPanelState {
    pub fn toggle_current(&mut self) {
        match self.cursor {
            0 => self.notify_signal_alerts = !self.notify_signal_alerts,
            1 => self.notify_product_news = !self.notify_product_news,
            _ => {}
        }
    }
}

/// What a delete confirmation is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Strategy(StrategyId, String),
    User(UserId, String),
}

impl DeleteTarget {
    pub fn describe(&self) -> String {
        match self {
            DeleteTarget::Strategy(_, name) => format!("strategy \"{name}\""),
            DeleteTarget::User(_, name) => format!("user \"{name}\""),
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug)]
pub enum Overlay {
    None,
    Welcome,
    SignalDetail(TradingSignal),
    StrategyDetail(TradingStrategy),
    StrategyForm(StrategyFormState),
    UserForm(UserFormState),
    ConfirmDelete(DeleteTarget),
    ErrorHistory,
}

impl Overlay {
    pub fn is_none(&self) -> bool {
        matches!(self, Overlay::None)
    }
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Session data — all collections live here, panels hold views over it.
    pub store: SessionStore,

    // Panel states
    pub signals: SignalsPanelState,
    pub strategies: StrategiesPanelState,
    pub broadcast: BroadcastFormState,
    pub users: UsersPanelState,
    pub dashboard: DashboardPanelState,
    pub account: AccountPanelState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    pub cancel: Arc<AtomicBool>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,

    // Paths
    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        cancel: Arc<AtomicBool>,
        state_path: PathBuf,
    ) -> Self {
        Self {
            active_panel: Panel::Signals,
            running: true,
            store: SessionStore::default(),
            signals: SignalsPanelState::default(),
            strategies: StrategiesPanelState::default(),
            broadcast: BroadcastFormState::new(),
            users: UsersPanelState::default(),
            dashboard: DashboardPanelState::default(),
            account: AccountPanelState::default(),
            worker_tx,
            worker_rx,
            cancel,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
            state_path,
        }
    }

    /// Currently visible signal rows (filtered + newest-first).
    pub fn visible_signals(&self) -> Vec<&TradingSignal> {
        self.signals.query.apply(self.store.signals())
    }

    /// Currently visible catalog rows (filtered + sorted).
    pub fn visible_strategies(&self) -> Vec<&TradingStrategy> {
        self.strategies.query.apply(self.store.strategies())
    }

    /// Currently visible roster rows (search-narrowed).
    pub fn visible_users(&self) -> Vec<&User> {
        search_users(self.store.users(), &self.users.search)
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    // ── Fetch requests ───────────────────────────────────────────────
    //
    // Each request bumps the panel's generation before sending, so any
    // response still in flight from an earlier request is dropped on
    // arrival instead of overwriting newer data.

    pub fn request_signals(&mut self) {
        self.signals.generation += 1;
        self.signals.loading = true;
        self.signals.banner = None;
        let _ = self.worker_tx.send(WorkerCommand::FetchSignals {
            generation: self.signals.generation,
        });
    }

    pub fn request_strategies(&mut self) {
        self.strategies.generation += 1;
        self.strategies.loading = true;
        self.strategies.banner = None;
        let _ = self.worker_tx.send(WorkerCommand::FetchStrategies {
            generation: self.strategies.generation,
        });
    }

    pub fn request_users(&mut self) {
        self.users.generation += 1;
        self.users.loading = true;
        self.users.banner = None;
        let _ = self.worker_tx.send(WorkerCommand::FetchUsers {
            generation: self.users.generation,
        });
    }

    pub fn request_dashboard(&mut self) {
        self.dashboard.generation += 1;
        self.dashboard.loading = true;
        self.dashboard.banner = None;
        let _ = self.worker_tx.send(WorkerCommand::FetchDashboard {
            generation: self.dashboard.generation,
        });
    }

    /// Seed every collection at startup.
    pub fn request_all(&mut self) {
        self.request_signals();
        self.request_strategies();
        self.request_users();
        self.request_dashboard();
    }

    /// Stop the event loop and tell the worker to abandon any simulated
    /// latency it is currently sleeping out.
    pub fn quit(&mut self) {
        self.running = false;
        self.cancel.store(true, std::sync::atomic::Ordering::Relaxed);
    }

    /// Refetch whatever the active panel shows.
    pub fn refresh_active_panel(&mut self) {
        match self.active_panel {
            Panel::Signals => self.request_signals(),
            Panel::Strategies | Panel::Broadcast => self.request_strategies(),
            Panel::Users | Panel::Account => self.request_users(),
            Panel::Dashboard => self.request_dashboard(),
            Panel::Help => {}
        }
        self.set_status("Refreshing...");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn test_app() -> AppState {
        let (tx, _held_rx) = mpsc::channel();
        let (_held_tx, rx) = mpsc::channel();
        // Keep the far ends alive so sends do not error.
        std::mem::forget(_held_rx);
        std::mem::forget(_held_tx);
        AppState::new(
            tx,
            rx,
            Arc::new(AtomicBool::new(false)),
            PathBuf::from("state.json"),
        )
    }

    #[test]
    fn panel_cycle_wraps_both_ways() {
        assert_eq!(Panel::Signals.next(), Panel::Strategies);
        assert_eq!(Panel::Help.next(), Panel::Signals);
        assert_eq!(Panel::Signals.prev(), Panel::Help);
        for i in 0..PANEL_COUNT {
            assert_eq!(Panel::from_index(i).unwrap().index(), i);
        }
        assert!(Panel::from_index(PANEL_COUNT).is_none());
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut app = test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn cycle_option_walks_through_and_back_to_none() {
        let options = vec!["AAPL".to_string(), "TSLA".to_string()];

        let step1 = cycle_option(&options, &None, 1);
        assert_eq!(step1.as_deref(), Some("AAPL"));
        let step2 = cycle_option(&options, &step1, 1);
        assert_eq!(step2.as_deref(), Some("TSLA"));
        let step3 = cycle_option(&options, &step2, 1);
        assert_eq!(step3, None);

        // Backwards from None lands on the last option.
        assert_eq!(cycle_option(&options, &None, -1).as_deref(), Some("TSLA"));
        assert_eq!(cycle_option::<String>(&[], &None, 1), None);
    }

    #[test]
    fn filter_focus_cycles_all_four_fields() {
        let mut field = SignalFilterField::Asset;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(field);
            field = field.next();
        }
        assert_eq!(field, SignalFilterField::Asset);
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn clear_filters_resets_everything_at_once() {
        use signalstream_core::data::{DataProvider, SampleProvider};

        let mut app = test_app();
        app.store
            .replace_signals(SampleProvider::new(3).fetch_signals().unwrap());
        app.signals.adjust_filter(app.store.signals(), 1);
        app.signals.filter_focus = SignalFilterField::StartDate;
        app.signals.adjust_filter(app.store.signals(), 1);
        assert!(app.signals.query.is_filtered());

        app.signals.clear_filters();
        assert!(!app.signals.query.is_filtered());
        assert_eq!(app.signals.cursor, 0);
    }

    #[test]
    fn account_toggles_flip_independently() {
        let mut account = AccountPanelState::default();
        assert!(account.notify_signal_alerts);
        account.toggle_current();
        assert!(!account.notify_signal_alerts);

        account.cursor = 1;
        account.toggle_current();
        assert!(account.notify_product_news);
        assert!(!account.notify_signal_alerts);
    }

    #[test]
    fn fetch_requests_bump_generations() {
        let mut app = test_app();
        let g0 = app.signals.generation;
        app.request_signals();
        assert_eq!(app.signals.generation, g0 + 1);
        assert!(app.signals.loading);

        app.request_all();
        assert_eq!(app.signals.generation, g0 + 2);
        assert_eq!(app.strategies.generation, 1);
        assert_eq!(app.users.generation, 1);
        assert_eq!(app.dashboard.generation, 1);
    }
}
