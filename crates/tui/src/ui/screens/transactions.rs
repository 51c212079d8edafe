use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use engine::{Currency, Money, RecordKind, TransactionRecord};

use crate::{
    app::{AppState, FormField, FormUiState, TransactionsMode},
    ui::{
        components::money::{styled_amount, styled_amount_bold},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    match state.transactions.mode {
        TransactionsMode::List => render_list(frame, area, state, &theme),
        TransactionsMode::Form => render_form(frame, area, &state.transactions.form, &theme),
    }
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], state, theme);

    let items = state
        .transactions
        .items
        .iter()
        .map(|record| record_row(record, theme))
        .collect::<Vec<_>>();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nenhuma transação cadastrada.",
                Style::default().fg(theme.dim),
            ))
            .block(Block::default().borders(Borders::ALL)),
            layout[1],
        );
        return;
    }

    let mut list_state = ListState::default();
    list_state.select(Some(state.transactions.selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, layout[1], &mut list_state);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut income = Money::ZERO;
    let mut expenses = Money::ZERO;
    for record in &state.transactions.items {
        match record.kind {
            RecordKind::Income => income += record.amount,
            RecordKind::Expense => expenses += record.amount,
        }
    }

    let mut line = vec![
        Span::styled("Receitas", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        styled_amount_bold(income, Currency::Brl, theme),
        Span::raw("   "),
        Span::styled("Despesas", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        styled_amount_bold(-expenses, Currency::Brl, theme),
    ];

    if let Some(message) = &state.transactions.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(
            message.as_str(),
            Style::default().fg(theme.error),
        ));
    }

    let block = Block::default().borders(Borders::ALL).title("Transações");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn record_row<'a>(record: &'a TransactionRecord, theme: &Theme) -> ListItem<'a> {
    let (kind_label, kind_color, signed) = match record.kind {
        RecordKind::Income => ("▲ Receita", theme.positive, record.amount),
        RecordKind::Expense => ("▼ Despesa", theme.negative, -record.amount),
    };

    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:<10}", record.date.as_str()),
            Style::default().fg(theme.dim),
        ),
        Span::raw("  "),
        Span::styled(format!("{kind_label:<10}"), Style::default().fg(kind_color)),
        styled_amount(signed, Currency::Brl, theme),
        Span::raw("  "),
        Span::styled(
            format!("#{}", record.category.name()),
            Style::default().fg(theme.accent),
        ),
        Span::raw(" "),
        Span::styled(
            record.description.as_str(),
            Style::default().fg(theme.text),
        ),
    ]))
}

fn render_form(frame: &mut Frame<'_>, area: Rect, form: &FormUiState, theme: &Theme) {
    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tipo
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Descrição
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Valor
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Data
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Categoria
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Message
            Constraint::Min(0),
            Constraint::Length(1), // Hints
        ])
        .margin(1)
        .split(inner);

    render_kind_row(frame, rows[0], form, theme);
    render_text_row(
        frame,
        rows[2],
        FormField::Description,
        &form.fields.description,
        form,
        theme,
    );
    render_text_row(frame, rows[4], FormField::Amount, &form.fields.amount, form, theme);
    render_text_row(frame, rows[6], FormField::Date, &form.fields.date, form, theme);
    render_category_row(frame, rows[8], form, theme);

    if let Some(message) = &form.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            rows[10],
        );
    }

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Tab campo · ◂ ▸ alternar · Enter salvar · Esc cancelar",
            Style::default().fg(theme.dim),
        )),
        rows[12],
    );
}

fn label_style(field: FormField, form: &FormUiState, theme: &Theme) -> Style {
    if form.focus == field {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    }
}

fn render_kind_row(frame: &mut Frame<'_>, area: Rect, form: &FormUiState, theme: &Theme) {
    let mut spans = vec![
        Span::styled(
            format!("{}: ", FormField::Kind.label()),
            label_style(FormField::Kind, form, theme),
        ),
    ];
    spans.extend(kind_segment("Despesa", form.fields.kind == RecordKind::Expense, theme));
    spans.push(Span::raw("  "));
    spans.extend(kind_segment("Receita", form.fields.kind == RecordKind::Income, theme));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn kind_segment(label: &'static str, active: bool, theme: &Theme) -> Vec<Span<'static>> {
    if active {
        vec![
            Span::styled("[", Style::default().fg(theme.accent)),
            Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("]", Style::default().fg(theme.accent)),
        ]
    } else {
        vec![Span::styled(label, Style::default().fg(theme.text_muted))]
    }
}

fn render_text_row(
    frame: &mut Frame<'_>,
    area: Rect,
    field: FormField,
    value: &str,
    form: &FormUiState,
    theme: &Theme,
) {
    let focused = form.focus == field;
    let cursor = if focused { "│" } else { "" };
    let value_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let line = Line::from(vec![
        Span::styled(format!("{}: ", field.label()), label_style(field, form, theme)),
        Span::styled(format!("{value}{cursor}"), value_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_category_row(frame: &mut Frame<'_>, area: Rect, form: &FormUiState, theme: &Theme) {
    let mut spans = vec![Span::styled(
        format!("{}: ", FormField::Category.label()),
        label_style(FormField::Category, form, theme),
    )];

    if form.fields.category.is_empty() {
        spans.push(Span::styled(
            "◂ selecione ▸",
            Style::default().fg(theme.dim),
        ));
    } else {
        spans.push(Span::styled("◂ ", Style::default().fg(theme.dim)));
        spans.push(Span::styled(
            form.fields.category.as_str(),
            Style::default().fg(theme.text),
        ));
        spans.push(Span::styled(" ▸", Style::default().fg(theme.dim)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
