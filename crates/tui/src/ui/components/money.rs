use engine::{Currency, Money};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Creates a styled span for a money amount with semantic coloring.
///
/// - Positive amounts: green with `+` prefix
/// - Negative amounts: red (the sign comes from the formatted value)
/// - Zero: neutral text color
#[must_use]
pub fn styled_amount(amount: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    let formatted = amount.format(currency);

    let (color, prefix) = if amount.is_positive() {
        (theme.positive, "+")
    } else if amount.is_negative() {
        (theme.negative, "")
    } else {
        (theme.text, "")
    };

    Span::styled(format!("{prefix}{formatted}"), Style::default().fg(color))
}

/// Bold variant for totals.
#[must_use]
pub fn styled_amount_bold(amount: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    let mut span = styled_amount(amount, currency, theme);
    span.style = span.style.add_modifier(Modifier::BOLD);
    span
}

/// Formats a percentage change as `▲ +0,3%` (green) or `▼ -1,5%` (red).
#[must_use]
pub fn styled_percentage_change(change: f64, theme: &Theme) -> Span<'static> {
    let (arrow, color) = if change >= 0.0 {
        ("▲", theme.positive)
    } else {
        ("▼", theme.negative)
    };

    let sign = if change >= 0.0 { "+" } else { "" };
    let text = format!("{arrow} {sign}{change:.1}%").replace('.', ",");
    Span::styled(text, Style::default().fg(color))
}
