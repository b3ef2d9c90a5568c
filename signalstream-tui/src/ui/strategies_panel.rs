//! Panel 2 — Strategies: catalog with category filter, sort cycling, CRUD.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::truncate;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let s = &app.strategies;
    let mut lines: Vec<Line> = Vec::new();

    // Header: category filter + sort order + key hints.
    let category = s.query.category.as_deref().unwrap_or("All");
    lines.push(Line::from(vec![
        Span::styled("Category: ", theme::muted()),
        Span::styled(category, theme::accent()),
        Span::styled("  Sort: ", theme::muted()),
        Span::styled(s.query.sort.label(), theme::accent()),
        Span::styled(
            "  [h/l]category [s]ort [c]lear [a]dd [e]dit [d]elete",
            theme::muted(),
        ),
    ]));
    lines.push(Line::from(""));

    if s.loading {
        lines.push(Line::from(Span::styled(
            "Loading strategies...",
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

    let rows = app.visible_strategies();
    if rows.is_empty() {
        let message = if s.query.category.is_some() {
            "No strategies in this category. Press c to clear the filter."
        } else {
            "The strategy catalog is empty. Press a to add one."
        };
        lines.push(Line::from(Span::styled(message, theme::muted())));
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    lines.push(Line::from(Span::styled(
        format!(
            "{:<26} {:<18} {:>6} {:>6} {:>7} {:>7}",
            "Name", "Category", "Win%", "PF", "Sharpe", "MaxDD%"
        ),
        theme::accent_bold(),
    )));

    let visible_height = area.height.saturating_sub(3) as usize;
    let start = s.cursor.saturating_sub(visible_height.saturating_sub(1));
    let end = (start + visible_height).min(rows.len());

    for (i, strategy) in rows.iter().enumerate().take(end).skip(start) {
        let is_cursor = i == s.cursor;
        let style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::secondary()
        };
        let p = &strategy.performance;
        let wr_style = if is_cursor {
            style
        } else {
            theme::win_rate_style(p.win_rate)
        };
        let pf_style = if is_cursor {
            style
        } else {
            theme::profit_factor_style(p.profit_factor)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:<26} ", truncate(&strategy.name, 26)), style),
            Span::styled(
                format!(
                    "{:<18} ",
                    truncate(strategy.category.as_deref().unwrap_or("-"), 18)
                ),
                style,
            ),
            Span::styled(format!("{:>6.1} ", p.win_rate), wr_style),
            Span::styled(format!("{:>6.2} ", p.profit_factor), pf_style),
            Span::styled(format_optional(p.sharpe_ratio, 7), style),
            Span::styled(format_optional(p.max_drawdown, 7), style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn format_optional(value: Option<f64>, width: usize) -> String {
    match value {
        Some(v) => format!("{v:>width$.2} "),
        None => format!("{:>width$} ", "-"),
    }
}
