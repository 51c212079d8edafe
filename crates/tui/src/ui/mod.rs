pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use engine::User;

use crate::app::{AppState, Screen, Section, TransactionsMode};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState, user: Option<&User>) {
    let area = frame.area();
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Home => render_shell(frame, area, state, user),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState, user: Option<&User>) {
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], user, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Home => screens::home::render(frame, layout[2], state, user),
        Section::Transactions => screens::transactions::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, user: Option<&User>, theme: &Theme) {
    let email = user.map_or("-", |user| user.email.as_str());

    let line = Line::from(vec![
        Span::styled(
            "Carteira",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Conta", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {email}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context_hints = get_context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("o", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" sair"));
    parts.push(Span::raw("  "));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" fechar"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Context-specific keyboard hints for the current section and mode.
fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    match state.section {
        Section::Home => vec![
            Span::styled("b", Style::default().fg(theme.accent)),
            Span::raw(" saldo  "),
            Span::styled("r", Style::default().fg(theme.accent)),
            Span::raw(" atualizar  "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" nova"),
        ],
        Section::Transactions => match state.transactions.mode {
            TransactionsMode::List => vec![
                Span::styled("n", Style::default().fg(theme.accent)),
                Span::raw(" nova  "),
                Span::styled("e", Style::default().fg(theme.accent)),
                Span::raw(" editar  "),
                Span::styled("j/k", Style::default().fg(theme.accent)),
                Span::raw(" navegar  "),
                Span::styled("r", Style::default().fg(theme.accent)),
                Span::raw(" atualizar"),
            ],
            TransactionsMode::Form => vec![
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" salvar  "),
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(" cancelar"),
            ],
        },
    }
}
