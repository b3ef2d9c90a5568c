//! Overlay widgets — welcome, detail drill-downs, admin forms, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use signalstream_core::domain::{TradingSignal, TradingStrategy};

use crate::app::{AppState, DeleteTarget};
use crate::forms::{StrategyField, StrategyFormState, UserField, UserFormState};
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to SignalStream ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Press 1 for the signal feed; f and h/l drive the filters",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Press 2 to browse strategies; s cycles the sort order",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. Press 3 to broadcast a signal of your own",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  4. Panels 4 and 5 hold the admin roster and dashboard",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "All data is generated in memory. Press any key to dismiss...",
            theme::neutral(),
        )),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for i in start..end {
        let err = &app.error_history[i];
        let is_active = i == app.error_scroll;
        let style = if is_active {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(&err.message, style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(&err.context, theme::muted()),
            ]));
        }
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, inner);
}

/// Signal drill-down overlay, indicator readings included.
pub fn render_signal_detail(f: &mut Frame, area: Rect, signal: &TradingSignal) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Signal Detail [Esc]close ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>14}: ", "Asset"), theme::muted()),
        Span::styled(signal.asset.clone(), theme::accent_bold()),
        Span::raw("  "),
        Span::styled(
            signal.direction.label().to_string(),
            theme::direction_style(signal.direction),
        ),
    ]));
    detail_line(&mut lines, "Time (UTC)", &signal.timestamp.format("%Y-%m-%d %H:%M:%S").to_string());
    detail_line(&mut lines, "Strategy", signal.strategy_id.as_str());
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Levels", theme::accent_bold())));
    detail_line(&mut lines, "Entry", &format!("{:.2}", signal.entry_price));
    detail_line(&mut lines, "Stop loss", &format!("{:.2}", signal.stop_loss));
    detail_line(&mut lines, "Target", &format!("{:.2}", signal.target_price));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Indicators", theme::accent_bold())));
    let readings = signal.sorted_indicators();
    if readings.is_empty() {
        lines.push(Line::from(Span::styled("  (none recorded)", theme::muted())));
    }
    for (name, value) in readings {
        detail_line(&mut lines, name, &format!("{value:.2}"));
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, inner);
}

/// Strategy drill-down overlay.
pub fn render_strategy_detail(f: &mut Frame, area: Rect, strategy: &TradingStrategy) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Strategy Detail [Esc]close ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let p = &strategy.performance;
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        strategy.name.clone(),
        theme::accent_bold(),
    )));
    detail_line(&mut lines, "Id", strategy.id.as_str());
    detail_line(
        &mut lines,
        "Category",
        strategy.category.as_deref().unwrap_or("-"),
    );
    detail_line(
        &mut lines,
        "Indicators",
        strategy.indicators_used.as_deref().unwrap_or("-"),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        strategy.description.clone(),
        theme::secondary(),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Performance", theme::accent_bold())));
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>14}: ", "Win rate"), theme::muted()),
        Span::styled(format!("{:.1}%", p.win_rate), theme::win_rate_style(p.win_rate)),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>14}: ", "Profit factor"), theme::muted()),
        Span::styled(
            format!("{:.2}", p.profit_factor),
            theme::profit_factor_style(p.profit_factor),
        ),
    ]));
    detail_line(
        &mut lines,
        "Sharpe ratio",
        &p.sharpe_ratio.map_or("-".to_string(), |v| format!("{v:.2}")),
    );
    detail_line(
        &mut lines,
        "Max drawdown",
        &p.max_drawdown.map_or("-".to_string(), |v| format!("{v:.1}%")),
    );

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(para, inner);
}

/// Strategy add/edit form overlay.
pub fn render_strategy_form(f: &mut Frame, area: Rect, form: &StrategyFormState) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {} [Enter]save [Esc]cancel ", form.title()))
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in StrategyField::ALL.into_iter().enumerate() {
        let value = match field {
            StrategyField::Name => &form.draft.name,
            StrategyField::Description => &form.draft.description,
            StrategyField::Category => &form.draft.category,
            StrategyField::Indicators => &form.draft.indicators_used,
            StrategyField::WinRate => &form.draft.win_rate,
            StrategyField::ProfitFactor => &form.draft.profit_factor,
            StrategyField::SharpeRatio => &form.draft.sharpe_ratio,
            StrategyField::MaxDrawdown => &form.draft.max_drawdown,
        };
        form_field_lines(
            &mut lines,
            field.label(),
            value,
            i == form.field && !form.submitting,
            form.errors.get(field.error_key()),
        );
    }

    lines.push(Line::from(""));
    if form.submitting {
        lines.push(Line::from(Span::styled("Saving...", theme::warning())));
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, inner);
}

/// User edit form overlay.
pub fn render_user_form(f: &mut Frame, area: Rect, form: &UserFormState) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Edit User [Enter]save [Esc]cancel ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<14}: ", "Id"), theme::muted()),
        Span::styled(form.draft.id.as_str().to_string(), theme::muted()),
    ]));

    for (i, field) in UserField::ALL.into_iter().enumerate() {
        let value = match field {
            UserField::Name => form.draft.name.clone(),
            UserField::Email => form.draft.email.clone(),
            UserField::Status => form
                .draft
                .subscription_status
                .map(|s| s.label().to_string())
                .unwrap_or_else(|| "(select)".into()),
            UserField::Admin => if form.draft.is_admin { "yes" } else { "no" }.to_string(),
        };
        form_field_lines(
            &mut lines,
            field.label(),
            &value,
            i == form.field && !form.submitting,
            form.errors.get(field.error_key()),
        );
    }

    lines.push(Line::from(""));
    if form.submitting {
        lines.push(Line::from(Span::styled("Saving...", theme::warning())));
    } else {
        lines.push(Line::from(Span::styled(
            "Left/Right cycles subscription; Space flips admin.",
            theme::muted(),
        )));
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, inner);
}

/// Delete confirmation overlay.
pub fn render_confirm_delete(f: &mut Frame, area: Rect, target: &DeleteTarget) {
    let popup = centered_rect(50, 25, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(" Confirm Delete ")
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Delete ", theme::secondary()),
            Span::styled(target.describe(), theme::negative()),
            Span::styled("?", theme::secondary()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "This cannot be undone in this session.",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", theme::negative()),
            Span::styled(" delete   ", theme::secondary()),
            Span::styled("[n]", theme::accent()),
            Span::styled(" keep", theme::secondary()),
        ]),
    ];

    let para = Paragraph::new(text).wrap(Wrap { trim: true });
    f.render_widget(para, inner);
}

fn detail_line<'a>(lines: &mut Vec<Line<'a>>, label: &str, value: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>14}: "), theme::muted()),
        Span::styled(value.to_string(), theme::accent()),
    ]));
}

fn form_field_lines<'a>(
    lines: &mut Vec<Line<'a>>,
    label: &str,
    value: &str,
    focused: bool,
    error: Option<&str>,
) {
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        theme::accent_bold()
    } else {
        theme::muted()
    };
    let value_style = if focused {
        theme::accent()
    } else {
        theme::secondary()
    };

    let mut spans = vec![
        Span::styled(marker.to_string(), theme::accent()),
        Span::styled(format!("{label:<14}: "), label_style),
        Span::styled(value.to_string(), value_style),
    ];
    if focused {
        spans.push(Span::styled("_", theme::accent()));
    }
    lines.push(Line::from(spans));

    if let Some(message) = error {
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(message.to_string(), theme::negative()),
        ]));
    }
}
