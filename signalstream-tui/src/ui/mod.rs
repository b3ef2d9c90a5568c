//! Top-level UI layout — seven-panel frame with status bar.

pub mod account_panel;
pub mod broadcast_panel;
pub mod dashboard_panel;
pub mod help_panel;
pub mod overlays;
pub mod signals_panel;
pub mod status_bar;
pub mod strategies_panel;
pub mod users_panel;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    // Draw the active panel.
    draw_panel(f, main_area, app);

    // Draw status bar.
    status_bar::render(f, status_area, app);

    // Draw overlays on top.
    match &app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::SignalDetail(signal) => overlays::render_signal_detail(f, main_area, signal),
        Overlay::StrategyDetail(strategy) => {
            overlays::render_strategy_detail(f, main_area, strategy)
        }
        Overlay::StrategyForm(form) => overlays::render_strategy_form(f, main_area, form),
        Overlay::UserForm(form) => overlays::render_user_form(f, main_area, form),
        Overlay::ConfirmDelete(target) => overlays::render_confirm_delete(f, main_area, target),
        Overlay::None => {}
    }
}

/// Draw a single panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;
    let is_active = true; // always active since we show only one

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(is_active))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(is_active));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Signals => signals_panel::render(f, inner, app),
        Panel::Strategies => strategies_panel::render(f, inner, app),
        Panel::Broadcast => broadcast_panel::render(f, inner, app),
        Panel::Users => users_panel::render(f, inner, app),
        Panel::Dashboard => dashboard_panel::render(f, inner, app),
        Panel::Account => account_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner, app),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Trim a cell value to a column width.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}.")
    }
}
