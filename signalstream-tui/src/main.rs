//! SignalStream TUI — seven-panel terminal interface with vim-style navigation.
//!
//! Panels:
//! 1. Signals — filterable newest-first feed with drill-down
//! 2. Strategies — catalog with category filter, sort cycling, CRUD
//! 3. Broadcast — signal entry form with inline validation
//! 4. Users — searchable roster with edit/delete
//! 5. Dashboard — headline stats and recent activity
//! 6. Account — session profile and notification toggles
//! 7. Help — keyboard shortcuts and documentation

mod app;
mod forms;
mod input;
mod persistence;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use signalstream_core::config::DemoConfig;
use signalstream_core::store::SaveOutcome;

use crate::app::{AppState, ErrorCategory, Overlay};
use crate::worker::{FetchTarget, Mutation, WorkerCommand, WorkerResponse};

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("signalstream");
    let state_path = config_dir.join("state.json");
    let config_path = config_dir.join("config.toml");

    // Demo configuration: provider seed, feed size, simulated latencies.
    let config = DemoConfig::load_or_default(&config_path).map_err(|e| anyhow::anyhow!(e))?;

    // Load persisted preferences
    let persisted = persistence::load(&state_path);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));

    // Spawn worker
    let worker_handle = worker::spawn_worker(
        config.provider(),
        config.latency.clone(),
        cmd_rx,
        resp_tx,
        cancel.clone(),
    );

    // Build app state
    let mut app = AppState::new(cmd_tx.clone(), resp_rx, cancel.clone(), state_path.clone());

    // Apply persisted preferences, then seed every collection.
    persistence::apply(&mut app, persisted);
    app.request_all();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save preferences before exit
    let persisted = persistence::extract(&app);
    let _ = persistence::save(&app.state_path, &persisted);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::SignalsLoaded { generation, signals } => {
            // A stale response never overwrites a newer request's view.
            if generation != app.signals.generation {
                return;
            }
            app.signals.loading = false;
            app.signals.banner = None;
            app.store.replace_signals(signals);
            clamp_cursors(app);
            app.set_status(format!("Loaded {} signals", app.store.signals().len()));
        }
        WorkerResponse::StrategiesLoaded { generation, strategies } => {
            if generation != app.strategies.generation {
                return;
            }
            app.strategies.loading = false;
            app.strategies.banner = None;
            app.store.replace_strategies(strategies);
            clamp_cursors(app);
        }
        WorkerResponse::UsersLoaded { generation, users } => {
            if generation != app.users.generation {
                return;
            }
            app.users.loading = false;
            app.users.banner = None;
            // The demo session browses as the first roster account.
            app.account.user = users.first().cloned();
            app.store.replace_users(users);
            clamp_cursors(app);
        }
        WorkerResponse::DashboardLoaded { generation, snapshot } => {
            if generation != app.dashboard.generation {
                return;
            }
            app.dashboard.loading = false;
            app.dashboard.banner = None;
            app.dashboard.snapshot = Some(snapshot);
        }
        WorkerResponse::FetchFailed { generation, target, error } => {
            handle_fetch_failed(app, generation, target, error);
        }
        WorkerResponse::MutationDone { mutation } => {
            handle_mutation_done(app, mutation);
        }
    }
}

fn handle_fetch_failed(app: &mut AppState, generation: u64, target: FetchTarget, error: String) {
    let current = match target {
        FetchTarget::Signals => &mut app.signals.generation,
        FetchTarget::Strategies => &mut app.strategies.generation,
        FetchTarget::Users => &mut app.users.generation,
        FetchTarget::Dashboard => &mut app.dashboard.generation,
    };
    if generation != *current {
        return;
    }
    match target {
        FetchTarget::Signals => {
            app.signals.loading = false;
            app.signals.banner = Some(error.clone());
        }
        FetchTarget::Strategies => {
            app.strategies.loading = false;
            app.strategies.banner = Some(error.clone());
        }
        FetchTarget::Users => {
            app.users.loading = false;
            app.users.banner = Some(error.clone());
        }
        FetchTarget::Dashboard => {
            app.dashboard.loading = false;
            app.dashboard.banner = Some(error.clone());
        }
    }
    app.push_error(ErrorCategory::Fetch, error, format!("fetch {}", target.label()));
}

/// Apply a mutation to the session store now that its simulated latency has
/// elapsed. Nothing was touched while the worker slept, so a failed
/// validation or a vanished id leaves the store exactly as it was.
fn handle_mutation_done(app: &mut AppState, mutation: Mutation) {
    match mutation {
        Mutation::SaveStrategy(valid) => {
            let outcome = app
                .store
                .save_strategy(valid, Utc::now().timestamp_millis());
            if matches!(app.overlay, Overlay::StrategyForm(_)) {
                app.overlay = Overlay::None;
            }
            match outcome {
                SaveOutcome::Added(id) => {
                    app.set_status(format!("Strategy added ({id})"));
                }
                SaveOutcome::Updated(id) => {
                    app.set_status(format!("Strategy updated ({id})"));
                }
                SaveOutcome::Missing(id) => {
                    app.push_error(
                        ErrorCategory::Mutation,
                        "Strategy no longer exists; nothing saved.".to_string(),
                        id.to_string(),
                    );
                }
            }
            clamp_cursors(app);
        }
        Mutation::DeleteStrategy(id) => {
            if app.store.delete_strategy(&id) {
                app.set_status("Strategy deleted");
            } else {
                app.set_warning("Strategy was already gone");
            }
            clamp_cursors(app);
        }
        Mutation::UpdateUser(valid) => {
            let id = valid.id.clone();
            let updated = app.store.update_user(&valid);
            if matches!(app.overlay, Overlay::UserForm(_)) {
                app.overlay = Overlay::None;
            }
            if updated {
                // Keep the account panel's copy in sync with the roster.
                if app.account.user.as_ref().map(|u| &u.id) == Some(&id) {
                    app.account.user = app.store.user(&id).cloned();
                }
                app.set_status("User saved");
            } else {
                app.push_error(
                    ErrorCategory::Mutation,
                    "User no longer exists; nothing saved.".to_string(),
                    id.to_string(),
                );
            }
            clamp_cursors(app);
        }
        Mutation::DeleteUser(id) => {
            if app.store.delete_user(&id) {
                app.set_status("User deleted");
            } else {
                app.set_warning("User was already gone");
            }
            clamp_cursors(app);
        }
        Mutation::Broadcast(valid) => {
            let asset = valid.asset.clone();
            app.store.broadcast(valid, Utc::now());
            app.broadcast.reset();
            app.set_status(format!("Signal for {asset} broadcast to subscribers"));
        }
    }
}

/// Keep every cursor inside its (possibly shrunken) filtered view.
fn clamp_cursors(app: &mut AppState) {
    let signals = app.visible_signals().len();
    app.signals.cursor = app.signals.cursor.min(signals.saturating_sub(1));
    let strategies = app.visible_strategies().len();
    app.strategies.cursor = app.strategies.cursor.min(strategies.saturating_sub(1));
    let users = app.visible_users().len();
    app.users.cursor = app.users.cursor.min(users.saturating_sub(1));
}
