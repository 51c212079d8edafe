use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use engine::{Currency, Money, User};

use crate::{
    app::{ACCOUNT_BALANCE, AppState},
    client::QuotePayload,
    ui::{
        components::{
            card::{Card, StatCard},
            money::styled_percentage_change,
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, user: Option<&User>) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Greeting
            Constraint::Length(3), // Balance card
            Constraint::Min(5),    // Quotes card
        ])
        .split(area);

    render_greeting(frame, layout[0], user, &theme);
    render_balance(frame, layout[1], state, &theme);
    render_quotes(frame, layout[2], state, &theme);
}

fn render_greeting(frame: &mut Frame<'_>, area: Rect, user: Option<&User>, theme: &Theme) {
    let name = user.map_or("Usuário", |user| user.name.as_str());
    let line = Line::from(vec![
        Span::styled("Olá, ", Style::default().fg(theme.text_muted)),
        Span::styled(name, Style::default().fg(theme.text)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_balance(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let value = if state.home.balance_visible {
        ACCOUNT_BALANCE.format(Currency::Brl)
    } else {
        "••••••••".to_string()
    };
    StatCard::new("Saldo em conta", value, theme).render(frame, area);
}

fn render_quotes(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card = Card::new("Câmbio", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if let Some(message) = &state.home.quotes_error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            inner,
        );
        return;
    }

    if state.home.quotes.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Sem cotações no momento.",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = state
        .home
        .quotes
        .iter()
        .take(inner.height as usize)
        .map(|quote| quote_row(quote, theme))
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn quote_row<'a>(quote: &'a QuotePayload, theme: &Theme) -> ListItem<'a> {
    let mut spans = vec![
        Span::raw(format!("{} ", currency_icon(&quote.code))),
        Span::styled(quote.name.as_str(), Style::default().fg(theme.text_muted)),
        Span::raw("  "),
    ];

    match bid_amount(&quote.bid) {
        Some(bid) => spans.push(Span::styled(
            bid.format(Currency::Brl),
            Style::default().fg(theme.positive),
        )),
        None => spans.push(Span::styled("-", Style::default().fg(theme.dim))),
    }

    if let Ok(change) = quote.pct_change.parse::<f64>() {
        spans.push(Span::raw(" "));
        spans.push(styled_percentage_change(change, theme));
    }

    ListItem::new(Line::from(spans))
}

/// Quotes arrive with four fraction digits; round to centavos for display.
fn bid_amount(bid: &str) -> Option<Money> {
    let value: f64 = bid.parse().ok()?;
    Some(Money::new((value * 100.0).round() as i64))
}

fn currency_icon(code: &str) -> &'static str {
    match code {
        "USD" => "💵",
        "EUR" => "💶",
        "BTC" => "🪙",
        _ => "💰",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bids_round_to_centavos() {
        assert_eq!(bid_amount("5.4321").unwrap().minor(), 543);
        assert_eq!(bid_amount("5.4399").unwrap().minor(), 544);
        assert!(bid_amount("n/a").is_none());
    }

    #[test]
    fn icons_cover_the_default_pairs() {
        assert_eq!(currency_icon("USD"), "💵");
        assert_eq!(currency_icon("EUR"), "💶");
        assert_eq!(currency_icon("BTC"), "🪙");
        assert_eq!(currency_icon("GBP"), "💰");
    }
}
