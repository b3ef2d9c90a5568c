//! Keyboard input dispatch — overlays → global keys → panel-specific handlers.
//!
//! Text-entry surfaces (the broadcast form, the user search line, the admin
//! form overlays) consume printable keys before the global digit/letter
//! shortcuts, so typing "q" into an asset field never quits the app. Tab and
//! BackTab switch panels from anywhere outside an overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, DeleteTarget, Overlay, Panel, ACCOUNT_TOGGLE_COUNT};
use crate::worker::{Mutation, WorkerCommand};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::SignalDetail(_) | Overlay::StrategyDetail(_) => {
            handle_detail_overlay(app, key);
            return;
        }
        Overlay::StrategyForm(_) => {
            handle_strategy_form(app, key);
            return;
        }
        Overlay::UserForm(_) => {
            handle_user_form(app, key);
            return;
        }
        Overlay::ConfirmDelete(_) => {
            handle_confirm_delete(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Panel switching works everywhere outside overlays.
    match key.code {
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        _ => {}
    }

    // 3. Active text entry eats printable keys before global shortcuts.
    if app.active_panel == Panel::Users && app.users.searching {
        handle_user_search(app, key);
        return;
    }
    if app.active_panel == Panel::Broadcast {
        handle_broadcast_key(app, key);
        return;
    }

    // 4. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return;
        }
        KeyCode::Char('r') => {
            app.refresh_active_panel();
            return;
        }
        KeyCode::Char(c @ '1'..='7') => {
            let index = c as usize - '1' as usize;
            if let Some(panel) = Panel::from_index(index) {
                app.active_panel = panel;
            }
            return;
        }
        _ => {}
    }

    // 5. Panel-specific keys.
    match app.active_panel {
        Panel::Signals => handle_signals_key(app, key),
        Panel::Strategies => handle_strategies_key(app, key),
        Panel::Broadcast => {} // handled above
        Panel::Users => handle_users_key(app, key),
        Panel::Dashboard => {} // display only
        Panel::Account => handle_account_key(app, key),
        Panel::Help => handle_help_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_detail_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.overlay = Overlay::None;
        }
        _ => {}
    }
}

// ── Signals panel ────────────────────────────────────────────────────

fn handle_signals_key(app: &mut AppState, key: KeyEvent) {
    let row_count = app.visible_signals().len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if row_count > 0 && app.signals.cursor + 1 < row_count {
                app.signals.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.signals.cursor = app.signals.cursor.saturating_sub(1);
        }
        KeyCode::Char('f') => {
            app.signals.filter_focus = app.signals.filter_focus.next();
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.signals.adjust_filter(app.store.signals(), -1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.signals.adjust_filter(app.store.signals(), 1);
        }
        KeyCode::Char('c') => {
            app.signals.clear_filters();
            app.set_status("Filters cleared");
        }
        KeyCode::Enter => {
            let selected = app
                .visible_signals()
                .get(app.signals.cursor)
                .map(|s| (*s).clone());
            if let Some(signal) = selected {
                app.overlay = Overlay::SignalDetail(signal);
            }
        }
        _ => {}
    }
}

// ── Strategies panel ─────────────────────────────────────────────────

fn handle_strategies_key(app: &mut AppState, key: KeyEvent) {
    let row_count = app.visible_strategies().len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if row_count > 0 && app.strategies.cursor + 1 < row_count {
                app.strategies.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.strategies.cursor = app.strategies.cursor.saturating_sub(1);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.strategies.cycle_category(app.store.strategies(), -1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.strategies.cycle_category(app.store.strategies(), 1);
        }
        KeyCode::Char('s') => {
            app.strategies.cycle_sort();
        }
        KeyCode::Char('c') => {
            app.strategies.query.clear();
            app.strategies.cursor = 0;
            app.set_status("Filters cleared");
        }
        KeyCode::Enter => {
            let selected = app
                .visible_strategies()
                .get(app.strategies.cursor)
                .map(|s| (*s).clone());
            if let Some(strategy) = selected {
                app.overlay = Overlay::StrategyDetail(strategy);
            }
        }
        KeyCode::Char('a') => {
            app.overlay = Overlay::StrategyForm(crate::forms::StrategyFormState::new_add());
        }
        KeyCode::Char('e') => {
            let selected = app
                .visible_strategies()
                .get(app.strategies.cursor)
                .map(|s| (*s).clone());
            if let Some(strategy) = selected {
                app.overlay =
                    Overlay::StrategyForm(crate::forms::StrategyFormState::new_edit(&strategy));
            }
        }
        KeyCode::Char('d') => {
            let selected = app
                .visible_strategies()
                .get(app.strategies.cursor)
                .map(|s| (s.id.clone(), s.name.clone()));
            if let Some((id, name)) = selected {
                app.overlay = Overlay::ConfirmDelete(DeleteTarget::Strategy(id, name));
            }
        }
        _ => {}
    }
}

// ── Broadcast panel ──────────────────────────────────────────────────

fn handle_broadcast_key(app: &mut AppState, key: KeyEvent) {
    if app.broadcast.submitting {
        return;
    }
    let on_choice_field = matches!(
        app.broadcast.current_field(),
        crate::forms::BroadcastField::Strategy | crate::forms::BroadcastField::Direction
    );

    match key.code {
        KeyCode::Char('q') if on_choice_field => {
            app.quit();
        }
        KeyCode::Down => app.broadcast.next_field(),
        KeyCode::Up => app.broadcast.prev_field(),
        KeyCode::Left => {
            let catalog = app.store.strategies().to_vec();
            app.broadcast.cycle_choice(&catalog, false);
        }
        KeyCode::Right => {
            let catalog = app.store.strategies().to_vec();
            app.broadcast.cycle_choice(&catalog, true);
        }
        KeyCode::Backspace => {
            if let Some(buffer) = app.broadcast.text_buffer() {
                buffer.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = app.broadcast.text_buffer() {
                buffer.push(c);
            }
        }
        KeyCode::Enter => {
            let catalog = app.store.strategies().to_vec();
            if let Some(valid) = app.broadcast.validate(&catalog) {
                app.broadcast.submitting = true;
                let _ = app
                    .worker_tx
                    .send(WorkerCommand::Mutate(Mutation::Broadcast(valid)));
                app.set_status("Broadcasting signal...");
            } else {
                app.set_warning(format!(
                    "Broadcast form has {} validation error(s)",
                    app.broadcast.errors.len()
                ));
            }
        }
        _ => {}
    }
}

// ── Users panel ──────────────────────────────────────────────────────

fn handle_user_search(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.users.searching = false;
            app.users.search.clear();
            app.users.cursor = 0;
        }
        KeyCode::Enter => {
            app.users.searching = false;
        }
        KeyCode::Backspace => {
            app.users.search.pop();
            app.users.cursor = 0;
        }
        KeyCode::Char(c) => {
            app.users.search.push(c);
            app.users.cursor = 0;
        }
        _ => {}
    }
}

fn handle_users_key(app: &mut AppState, key: KeyEvent) {
    let row_count = app.visible_users().len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if row_count > 0 && app.users.cursor + 1 < row_count {
                app.users.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.users.cursor = app.users.cursor.saturating_sub(1);
        }
        KeyCode::Char('/') => {
            app.users.searching = true;
        }
        KeyCode::Char('c') => {
            app.users.search.clear();
            app.users.cursor = 0;
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            let selected = app
                .visible_users()
                .get(app.users.cursor)
                .map(|u| (*u).clone());
            if let Some(user) = selected {
                app.overlay = Overlay::UserForm(crate::forms::UserFormState::new_edit(&user));
            }
        }
        KeyCode::Char('d') => {
            let selected = app
                .visible_users()
                .get(app.users.cursor)
                .map(|u| (u.id.clone(), u.name.clone()));
            if let Some((id, name)) = selected {
                app.overlay = Overlay::ConfirmDelete(DeleteTarget::User(id, name));
            }
        }
        _ => {}
    }
}

// ── Account panel ────────────────────────────────────────────────────

fn handle_account_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.account.cursor + 1 < ACCOUNT_TOGGLE_COUNT {
                app.account.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.account.cursor = app.account.cursor.saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.account.toggle_current();
        }
        _ => {}
    }
}

fn handle_help_key(app: &mut AppState, key: KeyEvent) {
    if let KeyCode::Char('e') = key.code {
        app.overlay = Overlay::ErrorHistory;
        app.error_scroll = 0;
    }
}

// ── Admin form overlays ──────────────────────────────────────────────

fn handle_strategy_form(app: &mut AppState, key: KeyEvent) {
    let Overlay::StrategyForm(form) = &mut app.overlay else {
        return;
    };
    if form.submitting {
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Backspace => {
            form.text_buffer().pop();
        }
        KeyCode::Char(c) => {
            form.text_buffer().push(c);
        }
        KeyCode::Enter => {
            if let Some(valid) = form.validate() {
                form.submitting = true;
                let _ = app
                    .worker_tx
                    .send(WorkerCommand::Mutate(Mutation::SaveStrategy(valid)));
                app.set_status("Saving strategy...");
            }
        }
        _ => {}
    }
}

fn handle_user_form(app: &mut AppState, key: KeyEvent) {
    let Overlay::UserForm(form) = &mut app.overlay else {
        return;
    };
    if form.submitting {
        return;
    }
    let on_choice_field = matches!(
        form.current_field(),
        crate::forms::UserField::Status | crate::forms::UserField::Admin
    );

    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
        }
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left => form.cycle_choice(false),
        KeyCode::Right => form.cycle_choice(true),
        KeyCode::Backspace => {
            if let Some(buffer) = form.text_buffer() {
                buffer.pop();
            }
        }
        KeyCode::Char(' ') if on_choice_field => {
            form.cycle_choice(true);
        }
        KeyCode::Char(c) => {
            if let Some(buffer) = form.text_buffer() {
                buffer.push(c);
            }
        }
        KeyCode::Enter => {
            if let Some(valid) = form.validate() {
                form.submitting = true;
                let _ = app
                    .worker_tx
                    .send(WorkerCommand::Mutate(Mutation::UpdateUser(valid)));
                app.set_status("Saving user...");
            }
        }
        _ => {}
    }
}

fn handle_confirm_delete(app: &mut AppState, key: KeyEvent) {
    let Overlay::ConfirmDelete(target) = &app.overlay else {
        return;
    };

    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            let mutation = match target {
                DeleteTarget::Strategy(id, _) => Mutation::DeleteStrategy(id.clone()),
                DeleteTarget::User(id, _) => Mutation::DeleteUser(id.clone()),
            };
            let description = target.describe();
            let _ = app.worker_tx.send(WorkerCommand::Mutate(mutation));
            app.overlay = Overlay::None;
            app.set_status(format!("Deleting {description}..."));
        }
        KeyCode::Char('n') | KeyCode::Esc | KeyCode::Char('q') => {
            app.overlay = Overlay::None;
        }
        _ => {}
    }
}
