//! Panel 7 — Help: keyboard shortcuts and documentation.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-7", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "r", "Refresh the active panel's data");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 1 — Signals");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "f", "Focus the next filter (asset, strategy, dates)");
    key(&mut lines, "h / l", "Step the focused filter value");
    key(&mut lines, "c", "Clear all filters at once");
    key(&mut lines, "Enter", "Open signal detail");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 — Strategies");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "h / l", "Cycle category filter");
    key(&mut lines, "s", "Cycle sort (Default → Win Rate → Profit Factor)");
    key(&mut lines, "c", "Clear filter and sort");
    key(&mut lines, "Enter", "Open strategy detail");
    key(&mut lines, "a / e / d", "Add / edit / delete a strategy");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 3 — Broadcast");
    key(&mut lines, "Up / Down", "Move between form fields");
    key(&mut lines, "Left / Right", "Cycle strategy or direction");
    key(&mut lines, "Enter", "Validate and send the signal");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 4 — Users");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "/", "Search by name or email");
    key(&mut lines, "c", "Clear the search");
    key(&mut lines, "e / Enter", "Edit the selected user");
    key(&mut lines, "d", "Delete the selected user");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 5 — Dashboard");
    key(&mut lines, "", "Headline stats and recent activity; r to refresh");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 6 — Account");
    key(&mut lines, "j / k", "Move between notification toggles");
    key(&mut lines, "Space / Enter", "Flip the selected toggle");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 7 — Help (this panel)");
    key(&mut lines, "e", "Open error history overlay");
    lines.push(Line::from(""));

    section(&mut lines, "Forms");
    key(&mut lines, "Tab / Down", "Next field");
    key(&mut lines, "Shift+Tab / Up", "Previous field");
    key(&mut lines, "Enter", "Validate and save");
    key(&mut lines, "Esc", "Cancel without saving");

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
