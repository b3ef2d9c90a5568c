//! Panel 1 — Signals: filterable newest-first feed with drill-down.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, SignalFilterField};
use crate::theme;
use crate::ui::truncate;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let s = &app.signals;
    let mut lines: Vec<Line> = Vec::new();

    // Filter bar: the focused criterion is highlighted, [f] moves focus.
    let mut filter_spans: Vec<Span> = Vec::new();
    for (i, field) in [
        SignalFilterField::Asset,
        SignalFilterField::Strategy,
        SignalFilterField::StartDate,
        SignalFilterField::EndDate,
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            filter_spans.push(Span::raw("  "));
        }
        let value = match field {
            SignalFilterField::Asset => s.query.asset.clone().unwrap_or_else(|| "All".into()),
            SignalFilterField::Strategy => s
                .query
                .strategy_id
                .as_ref()
                .map(|id| id.as_str().to_string())
                .unwrap_or_else(|| "All".into()),
            SignalFilterField::StartDate => s
                .query
                .start_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into()),
            SignalFilterField::EndDate => s
                .query
                .end_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into()),
        };
        let style = if field == s.filter_focus {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        filter_spans.push(Span::styled(format!("{}: {value}", field.label()), style));
    }
    filter_spans.push(Span::styled(
        "  [f]focus [h/l]change [c]lear [r]efresh",
        theme::muted(),
    ));
    lines.push(Line::from(filter_spans));
    lines.push(Line::from(""));

    if s.loading {
        lines.push(Line::from(Span::styled(
            "Loading signals...",
            theme::neutral(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }
    if let Some(banner) = &s.banner {
        lines.push(Line::from(Span::styled(banner.as_str(), theme::negative())));
        lines.push(Line::from(Span::styled(
            "Press r to retry.",
            theme::muted(),
        )));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    let rows = app.visible_signals();
    if rows.is_empty() {
        let message = if s.query.is_filtered() {
            "No signals match the current filters. Press c to clear them."
        } else {
            "No signals in the feed yet."
        };
        lines.push(Line::from(Span::styled(message, theme::muted())));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    // Column headers
    lines.push(Line::from(Span::styled(
        format!(
            "{:<17} {:<7} {:>4} {:>10} {:>10} {:>10}  {}",
            "Time (UTC)", "Asset", "Dir", "Entry", "Stop", "Target", "Strategy"
        ),
        theme::accent_bold(),
    )));

    // Keep the cursor on screen.
    let visible_height = area.height.saturating_sub(3) as usize;
    let start = s.cursor.saturating_sub(visible_height.saturating_sub(1));
    let end = (start + visible_height).min(rows.len());

    for (i, signal) in rows.iter().enumerate().take(end).skip(start) {
        let is_cursor = i == s.cursor;
        let style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::secondary()
        };
        let dir_style = if is_cursor {
            style
        } else {
            theme::direction_style(signal.direction)
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<17} ", signal.timestamp.format("%Y-%m-%d %H:%M")),
                style,
            ),
            Span::styled(format!("{:<7} ", truncate(&signal.asset, 7)), style),
            Span::styled(format!("{:>4} ", signal.direction.label()), dir_style),
            Span::styled(format!("{:>10.2} ", signal.entry_price), style),
            Span::styled(format!("{:>10.2} ", signal.stop_loss), style),
            Span::styled(format!("{:>10.2}  ", signal.target_price), style),
            Span::styled(truncate(signal.strategy_id.as_str(), 24), style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}
