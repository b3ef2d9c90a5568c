//! Panel 3 — Broadcast: signal entry form with inline validation.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use signalstream_core::domain::Direction;

use crate::app::AppState;
use crate::forms::BroadcastField;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let form = &app.broadcast;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "Broadcast a new trading signal to all subscribers.",
        theme::secondary(),
    )));
    lines.push(Line::from(Span::styled(
        "[Up/Down]field [Left/Right]choice [Enter]send",
        theme::muted(),
    )));
    lines.push(Line::from(""));

    for (i, field) in BroadcastField::ALL.into_iter().enumerate() {
        let focused = i == form.field && !form.submitting;
        let marker = if focused { "> " } else { "  " };

        let value = match field {
            BroadcastField::Strategy => {
                if form.draft.strategy_id.is_empty() {
                    "(select with Left/Right)".to_string()
                } else {
                    form.draft.strategy_id.clone()
                }
            }
            BroadcastField::Asset => form.draft.asset.clone(),
            BroadcastField::Direction => match form.draft.direction {
                Some(Direction::Buy) => "Buy".to_string(),
                Some(Direction::Sell) => "Sell".to_string(),
                None => "(select)".to_string(),
            },
            BroadcastField::EntryPrice => form.draft.entry_price.clone(),
            BroadcastField::StopLoss => form.draft.stop_loss.clone(),
            BroadcastField::TargetPrice => form.draft.target_price.clone(),
            BroadcastField::Notes => form.draft.additional_notes.clone(),
        };

        let label_style = if focused {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        let value_style = match field {
            BroadcastField::Direction => match form.draft.direction {
                Some(d) => theme::direction_style(d),
                None => theme::muted(),
            },
            _ if focused => theme::accent(),
            _ => theme::secondary(),
        };

        let mut spans = vec![
            Span::styled(marker, theme::accent()),
            Span::styled(format!("{:<13}: ", field.label()), label_style),
            Span::styled(value, value_style),
        ];
        if focused {
            spans.push(Span::styled("_", theme::accent()));
        }
        lines.push(Line::from(spans));

        // Validation message stays pinned under its field.
        if let Some(message) = form.errors.get(field.error_key()) {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(message.to_string(), theme::negative()),
            ]));
        }
    }

    lines.push(Line::from(""));
    if form.submitting {
        lines.push(Line::from(Span::styled(
            "Broadcasting...",
            theme::warning(),
        )));
    } else if !form.errors.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{} field(s) need attention.", form.errors.len()),
            theme::negative(),
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}
