//! Panel 5 — Dashboard: headline stats and the recent-activity feed.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use signalstream_core::domain::ActivityKind;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let d = &app.dashboard;
    let mut lines: Vec<Line> = Vec::new();

    if d.loading {
        lines.push(Line::from(Span::styled(
            "Loading dashboard...",
            theme::neutral(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }
    if let Some(banner) = &d.banner {
        lines.push(Line::from(Span::styled(banner.as_str(), theme::negative())));
        lines.push(Line::from(Span::styled("Press r to retry.", theme::muted())));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }
    let Some(snapshot) = &d.snapshot else {
        lines.push(Line::from(Span::styled(
            "No dashboard data. Press r to fetch.",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    };

    let stats = &snapshot.stats;
    stat_lines(
        &mut lines,
        "Total Users",
        stats.total_users,
        &stats.total_users_caption,
    );
    stat_lines(
        &mut lines,
        "Active Subscriptions",
        stats.active_subscriptions,
        &stats.active_subscriptions_caption,
    );
    stat_lines(
        &mut lines,
        "Signals Sent Today",
        stats.signals_sent_today,
        &stats.signals_sent_today_caption,
    );

    lines.push(Line::from(Span::styled(
        "Recent Activity",
        theme::accent_bold(),
    )));
    if snapshot.recent_activity.is_empty() {
        lines.push(Line::from(Span::styled("  (nothing yet)", theme::muted())));
    }
    for entry in &snapshot.recent_activity {
        let kind_style = match entry.kind {
            ActivityKind::Signup => theme::positive(),
            ActivityKind::Broadcast => theme::accent(),
            ActivityKind::Subscription => theme::neutral(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<22} ", entry.kind.label()), kind_style),
            Span::styled(entry.description.as_str(), theme::secondary()),
            Span::styled(format!("  ({})", entry.age), theme::muted()),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn stat_lines<'a>(lines: &mut Vec<Line<'a>>, label: &'a str, value: u64, caption: &'a str) {
    lines.push(Line::from(vec![
        Span::styled(format!("{label:<22} "), theme::muted()),
        Span::styled(format!("{value}"), theme::accent_bold()),
    ]));
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(caption, theme::muted()),
    ]));
    lines.push(Line::from(""));
}
