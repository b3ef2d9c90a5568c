//! Panel 4 — Users: searchable roster with edit/delete.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::truncate;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let u = &app.users;
    let mut lines: Vec<Line> = Vec::new();

    // Search line doubles as an input field while searching.
    let mut search_spans = vec![Span::styled("Search: ", theme::muted())];
    if u.searching {
        search_spans.push(Span::styled(u.search.as_str(), theme::accent_bold()));
        search_spans.push(Span::styled("_", theme::accent()));
        search_spans.push(Span::styled(
            "  [Enter]apply [Esc]cancel",
            theme::muted(),
        ));
    } else {
        let shown = if u.search.is_empty() { "(none)" } else { u.search.as_str() };
        search_spans.push(Span::styled(shown, theme::accent()));
        search_spans.push(Span::styled(
            "  [/]search [c]lear [e]dit [d]elete",
            theme::muted(),
        ));
    }
    lines.push(Line::from(search_spans));
    lines.push(Line::from(""));

    if u.loading {
        lines.push(Line::from(Span::styled("Loading users...", theme::neutral())));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }
    if let Some(banner) = &u.banner {
        lines.push(Line::from(Span::styled(banner.as_str(), theme::negative())));
        lines.push(Line::from(Span::styled("Press r to retry.", theme::muted())));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    let rows = app.visible_users();
    if rows.is_empty() {
        let message = if u.search.is_empty() {
            "No users in the roster."
        } else {
            "No users match the search. Press c to clear it."
        };
        lines.push(Line::from(Span::styled(message, theme::muted())));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    lines.push(Line::from(Span::styled(
        format!(
            "{:<20} {:<28} {:<9} {:<6} {:<10}",
            "Name", "Email", "Status", "Admin", "Joined"
        ),
        theme::accent_bold(),
    )));

    let visible_height = area.height.saturating_sub(3) as usize;
    let start = u.cursor.saturating_sub(visible_height.saturating_sub(1));
    let end = (start + visible_height).min(rows.len());

    for (i, user) in rows.iter().enumerate().take(end).skip(start) {
        let is_cursor = i == u.cursor;
        let style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::secondary()
        };
        let status_style = if is_cursor {
            style
        } else {
            theme::subscription_style(user.subscription_status)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:<20} ", truncate(&user.name, 20)), style),
            Span::styled(format!("{:<28} ", truncate(&user.email, 28)), style),
            Span::styled(
                format!("{:<9} ", user.subscription_status.label()),
                status_style,
            ),
            Span::styled(
                format!("{:<6} ", if user.is_admin { "yes" } else { "no" }),
                style,
            ),
            Span::styled(
                format!("{}", user.joined_date.format("%Y-%m-%d")),
                style,
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}
