//! Neon-on-dark style tokens for the SignalStream TUI.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, highlights)
//! - **Positive**: Neon green (Buy, active subscriptions, strong win rates)
//! - **Negative**: Hot pink (Sell, expired subscriptions, errors)
//! - **Warning**: Neon orange (alerts, weak metrics)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (hints, disabled)

use ratatui::style::{Color, Modifier, Style};

use signalstream_core::domain::{Direction, SubscriptionStatus};

const ACCENT: Color = Color::Rgb(0, 255, 255);
const POSITIVE: Color = Color::Rgb(0, 255, 128);
const NEGATIVE: Color = Color::Rgb(255, 20, 147);
const WARNING: Color = Color::Rgb(255, 140, 0);
const NEUTRAL: Color = Color::Rgb(147, 112, 219);
const MUTED: Color = Color::Rgb(100, 149, 237);
const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn panel_border(active: bool) -> Style {
    if active { accent() } else { muted() }
}

pub fn panel_title(active: bool) -> Style {
    if active { accent_bold() } else { muted() }
}

/// Buy renders green, Sell renders pink.
pub fn direction_style(direction: Direction) -> Style {
    match direction {
        Direction::Buy => positive(),
        Direction::Sell => negative(),
    }
}

pub fn subscription_style(status: SubscriptionStatus) -> Style {
    match status {
        SubscriptionStatus::Active => positive(),
        SubscriptionStatus::Trial => accent(),
        SubscriptionStatus::Inactive => muted(),
        SubscriptionStatus::Expired => negative(),
    }
}

/// Gradient for win rates on the 0–100 scale.
pub fn win_rate_style(win_rate: f64) -> Style {
    match win_rate {
        w if w >= 60.0 => positive(),
        w if w >= 50.0 => accent(),
        w if w >= 40.0 => neutral(),
        _ => warning(),
    }
}

/// Profit factor above 1.0 is making money; below is losing it.
pub fn profit_factor_style(profit_factor: f64) -> Style {
    match profit_factor {
        p if p >= 1.5 => positive(),
        p if p >= 1.0 => accent(),
        _ => negative(),
    }
}
