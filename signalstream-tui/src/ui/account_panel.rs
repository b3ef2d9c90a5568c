//! Panel 6 — Account: the session profile plus local notification toggles.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let a = &app.account;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled("Profile", theme::accent_bold())));
    match &a.user {
        Some(user) => {
            profile_line(&mut lines, "Name", &user.name);
            profile_line(&mut lines, "Email", &user.email);
            lines.push(Line::from(vec![
                Span::styled(format!("  {:>14}: ", "Subscription"), theme::muted()),
                Span::styled(
                    user.subscription_status.label(),
                    theme::subscription_style(user.subscription_status),
                ),
            ]));
            profile_line(
                &mut lines,
                "Plan",
                user.plan_name.as_deref().unwrap_or("-"),
            );
            profile_line(
                &mut lines,
                "Member since",
                &user.joined_date.format("%Y-%m-%d").to_string(),
            );
        }
        None => {
            lines.push(Line::from(Span::styled(
                "  Profile not loaded yet. Press r to fetch.",
                theme::muted(),
            )));
        }
    }
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("Notifications", theme::accent_bold()),
        Span::styled("  [j/k]move [Space]toggle", theme::muted()),
    ]));
    toggle_line(
        &mut lines,
        "Signal alerts",
        a.notify_signal_alerts,
        a.cursor == 0,
    );
    toggle_line(
        &mut lines,
        "Product news",
        a.notify_product_news,
        a.cursor == 1,
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Toggles live in local preferences and survive restarts.",
        theme::muted(),
    )));

    f.render_widget(Paragraph::new(lines), area);
}

fn profile_line<'a>(lines: &mut Vec<Line<'a>>, label: &'a str, value: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>14}: "), theme::muted()),
        Span::styled(value.to_string(), theme::secondary()),
    ]));
}

fn toggle_line<'a>(lines: &mut Vec<Line<'a>>, label: &'a str, on: bool, focused: bool) {
    let marker = if focused { "> " } else { "  " };
    let box_style = if on { theme::positive() } else { theme::muted() };
    let label_style = if focused {
        theme::accent().add_modifier(Modifier::BOLD)
    } else {
        theme::secondary()
    };
    lines.push(Line::from(vec![
        Span::styled(marker, theme::accent()),
        Span::styled(if on { "[x] " } else { "[ ] " }, box_style),
        Span::styled(label, label_style),
    ]));
}
