//! App state persistence — JSON save/load across restarts.
//!
//! Only preferences persist: filters, panel, search text, notification
//! toggles. Session data never touches disk; every restart reseeds from the
//! provider.

use std::path::Path;

use serde::{Deserialize, Serialize};

use signalstream_core::query::{SignalQuery, StrategyQuery};

use crate::app::Panel;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedState {
    pub active_panel: Panel,
    pub signal_query: SignalQuery,
    pub strategy_query: StrategyQuery,
    pub user_search: String,
    pub welcome_dismissed: bool,
    pub notify_signal_alerts: bool,
    pub notify_product_news: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            active_panel: Panel::Signals,
            signal_query: SignalQuery::default(),
            strategy_query: StrategyQuery::default(),
            user_search: String::new(),
            welcome_dismissed: false,
            notify_signal_alerts: true,
            notify_product_news: false,
        }
    }
}

/// Load persisted state from disk. Returns defaults if file is missing or corrupt.
pub fn load(path: &Path) -> PersistedState {
    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => PersistedState::default(),
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &crate::app::AppState) -> PersistedState {
    PersistedState {
        active_panel: app.active_panel,
        signal_query: app.signals.query.clone(),
        strategy_query: app.strategies.query.clone(),
        user_search: app.users.search.clone(),
        welcome_dismissed: !matches!(app.overlay, crate::app::Overlay::Welcome),
        notify_signal_alerts: app.account.notify_signal_alerts,
        notify_product_news: app.account.notify_product_news,
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut crate::app::AppState, state: PersistedState) {
    app.active_panel = state.active_panel;
    app.signals.query = state.signal_query;
    app.strategies.query = state.strategy_query;
    app.users.search = state.user_search;
    if !state.welcome_dismissed {
        app.overlay = crate::app::Overlay::Welcome;
    }
    app.account.notify_signal_alerts = state.notify_signal_alerts;
    app.account.notify_product_news = state.notify_product_news;
}

#[cfg(test)]
mod tests {
    use super::*;
    use signalstream_core::query::StrategySort;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = PersistedState::default();
        state.active_panel = Panel::Users;
        state.signal_query.asset = Some("TSLA".to_string());
        state.strategy_query.sort = StrategySort::WinRate;
        state.user_search = "example.com".to_string();
        state.welcome_dismissed = true;

        save(&path, &state).unwrap();
        let loaded = load(&path);

        assert_eq!(loaded.active_panel, Panel::Users);
        assert_eq!(loaded.signal_query.asset.as_deref(), Some("TSLA"));
        assert_eq!(loaded.strategy_query.sort, StrategySort::WinRate);
        assert_eq!(loaded.user_search, "example.com");
        assert!(loaded.welcome_dismissed);
    }

    #[test]
    fn missing_file_returns_defaults() {
        let loaded = load(Path::new("/nonexistent/path/state.json"));
        assert_eq!(loaded.active_panel, Panel::Signals);
        assert!(!loaded.welcome_dismissed);
        assert!(loaded.notify_signal_alerts);
    }

    #[test]
    fn corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let loaded = load(&path);
        assert!(loaded.signal_query.asset.is_none());
    }
}
