use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};

use engine::{
    AuthError, Category, EngineError, FormState, Money, RecordKind, Session, StoreError,
    SubmitOutcome, TransactionRecord, UuidSource, form,
};

use crate::{
    client::{Client, QuotePayload},
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

/// The dashboard balance is a fixed showcase value; no balance endpoint exists.
pub const ACCOUNT_BALANCE: Money = Money::new(100_000_000_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Transactions,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Minha Conta",
            Self::Transactions => "Transações",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct HomeState {
    pub quotes: Vec<QuotePayload>,
    pub quotes_error: Option<String>,
    pub balance_visible: bool,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            quotes: Vec::new(),
            quotes_error: None,
            balance_visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionsMode {
    List,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Kind,
    Description,
    Amount,
    Date,
    Category,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Kind => "Tipo",
            Self::Description => "Descrição",
            Self::Amount => "Valor",
            Self::Date => "Data (DD/MM/AAAA)",
            Self::Category => "Categoria",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Kind => Self::Description,
            Self::Description => Self::Amount,
            Self::Amount => Self::Date,
            Self::Date => Self::Category,
            Self::Category => Self::Kind,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Kind => Self::Category,
            Self::Description => Self::Kind,
            Self::Amount => Self::Description,
            Self::Date => Self::Amount,
            Self::Category => Self::Date,
        }
    }
}

#[derive(Debug)]
pub struct FormUiState {
    pub fields: FormState,
    pub focus: FormField,
    pub editing: Option<TransactionRecord>,
    pub message: Option<String>,
    pub category_cursor: Option<usize>,
}

impl FormUiState {
    fn new() -> Self {
        Self {
            fields: FormState::default(),
            focus: FormField::Description,
            editing: None,
            message: None,
            category_cursor: None,
        }
    }

    fn for_edit(record: TransactionRecord) -> Self {
        Self {
            fields: FormState::from_record(&record),
            focus: FormField::Description,
            message: None,
            category_cursor: Category::ALL.iter().position(|c| *c == record.category),
            editing: Some(record),
        }
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            "Editar Transação"
        } else {
            "Nova Transação"
        }
    }
}

#[derive(Debug)]
pub struct TransactionsState {
    pub items: Vec<TransactionRecord>,
    pub error: Option<String>,
    pub selected: usize,
    pub mode: TransactionsMode,
    pub form: FormUiState,
}

impl Default for TransactionsState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
            selected: 0,
            mode: TransactionsMode::List,
            form: FormUiState::new(),
        }
    }
}

impl TransactionsState {
    fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    created: Instant,
}

impl ToastState {
    fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.created.elapsed() > Duration::from_secs(3)
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub login: LoginState,
    pub section: Section,
    pub home: HomeState,
    pub transactions: TransactionsState,
    pub toast: Option<ToastState>,
}

pub struct App {
    config: AppConfig,
    client: Client,
    session: Session,
    ids: UuidSource,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url, &config.quotes_url)?;
        let mut session = Session::new();
        session.subscribe(|phase| tracing::debug!(?phase, "session transition"));

        let state = AppState {
            screen: Screen::Login,
            login: LoginState {
                email: config.username.clone(),
                password: String::new(),
                focus: LoginField::Email,
                message: None,
            },
            section: Section::Home,
            home: HomeState::default(),
            transactions: TransactionsState::default(),
            toast: None,
        };

        Ok(Self {
            config,
            client,
            session,
            ids: UuidSource,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Look for a session left behind by the auth service before showing
        // the login screen.
        if let Err(err) = self.session.restore(&self.client).await {
            tracing::warn!(%err, "session restore failed");
        }
        if self.session.is_authenticated() {
            self.state.screen = Screen::Home;
            self.enter_home().await;
        }

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            if self.state.toast.as_ref().is_some_and(ToastState::expired) {
                self.state.toast = None;
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state, self.session.user()))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        match self.state.screen {
            Screen::Login => self.handle_login_key(action).await,
            Screen::Home => {
                if self.state.section == Section::Transactions
                    && self.state.transactions.mode == TransactionsMode::Form
                {
                    self.handle_form_key(action).await
                } else {
                    self.handle_shell_key(action).await
                }
            }
        }
    }

    async fn handle_login_key(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::Input(ch) => {
                self.active_login_field_mut().push(ch);
            }
            AppAction::Backspace => {
                self.active_login_field_mut().pop();
            }
            AppAction::NextField | AppAction::Down | AppAction::Up => {
                self.state.login.focus = match self.state.login.focus {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
            }
            AppAction::Submit => self.attempt_login().await?,
            _ => {}
        }
        Ok(())
    }

    fn active_login_field_mut(&mut self) -> &mut String {
        match self.state.login.focus {
            LoginField::Email => &mut self.state.login.email,
            LoginField::Password => &mut self.state.login.password,
        }
    }

    async fn attempt_login(&mut self) -> Result<()> {
        let email = self.state.login.email.trim().to_string();
        let password = self.state.login.password.trim().to_string();

        if email.is_empty() || password.is_empty() {
            self.state.login.message = Some("Preencha todos os campos!".to_string());
            return Ok(());
        }

        match self.session.login(&self.client, &email, &password).await {
            Ok(()) => {
                self.state.login.message = None;
                self.state.login.password.clear();
                self.state.screen = Screen::Home;
                self.state.section = Section::Home;
                self.enter_home().await;
            }
            Err(err) => {
                self.state.login.message = Some(login_message_for_error(&err));
            }
        }

        Ok(())
    }

    async fn enter_home(&mut self) {
        self.load_quotes().await;
        self.load_transactions().await;
    }

    async fn handle_shell_key(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::Input(ch) => self.handle_shell_char(ch).await?,
            AppAction::Up => {
                if self.state.section == Section::Transactions {
                    self.state.transactions.select_prev();
                }
            }
            AppAction::Down => {
                if self.state.section == Section::Transactions {
                    self.state.transactions.select_next();
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_shell_char(&mut self, ch: char) -> Result<()> {
        match ch {
            'q' | 'Q' => {
                self.should_quit = true;
            }
            'h' | 'H' => {
                self.state.section = Section::Home;
            }
            't' | 'T' => {
                self.state.section = Section::Transactions;
                if self.state.transactions.items.is_empty() {
                    self.load_transactions().await;
                }
            }
            'n' | 'N' => {
                self.state.section = Section::Transactions;
                self.state.transactions.mode = TransactionsMode::Form;
                self.state.transactions.form = FormUiState::new();
            }
            'e' | 'E' => {
                if self.state.section == Section::Transactions {
                    let selected = self
                        .state
                        .transactions
                        .items
                        .get(self.state.transactions.selected)
                        .cloned();
                    match selected {
                        Some(record) => {
                            self.state.transactions.mode = TransactionsMode::Form;
                            self.state.transactions.form = FormUiState::for_edit(record);
                        }
                        None => {
                            self.state.toast = Some(ToastState::new(
                                "Nenhuma transação para editar.",
                                ToastLevel::Error,
                            ));
                        }
                    }
                }
            }
            'b' | 'B' => {
                if self.state.section == Section::Home {
                    self.state.home.balance_visible = !self.state.home.balance_visible;
                }
            }
            'r' | 'R' => match self.state.section {
                Section::Home => self.load_quotes().await,
                Section::Transactions => self.load_transactions().await,
            },
            'o' | 'O' => self.logout().await,
            'j' | 'J' => {
                if self.state.section == Section::Transactions {
                    self.state.transactions.select_next();
                }
            }
            'k' | 'K' => {
                if self.state.section == Section::Transactions {
                    self.state.transactions.select_prev();
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_form_key(&mut self, action: AppAction) -> Result<()> {
        match action {
            AppAction::Cancel => {
                // Cancel: close without a "changed" signal, nothing refreshes.
                self.state.transactions.mode = TransactionsMode::List;
                self.state.transactions.form = FormUiState::new();
            }
            AppAction::NextField | AppAction::Down => {
                let form = &mut self.state.transactions.form;
                form.focus = form.focus.next();
            }
            AppAction::Up => {
                let form = &mut self.state.transactions.form;
                form.focus = form.focus.prev();
            }
            AppAction::Left => self.adjust_choice(-1),
            AppAction::Right => self.adjust_choice(1),
            AppAction::Submit => self.save_form().await?,
            AppAction::Backspace => {
                if let Some(field) = self.active_form_field_mut() {
                    field.pop();
                }
            }
            AppAction::Input(ch) => {
                let focus = self.state.transactions.form.focus;
                if focus == FormField::Kind && ch == ' ' {
                    self.toggle_kind();
                } else if let Some(field) = self.active_form_field_mut() {
                    field.push(ch);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn active_form_field_mut(&mut self) -> Option<&mut String> {
        let form = &mut self.state.transactions.form;
        match form.focus {
            FormField::Description => Some(&mut form.fields.description),
            FormField::Amount => Some(&mut form.fields.amount),
            FormField::Date => Some(&mut form.fields.date),
            FormField::Kind | FormField::Category => None,
        }
    }

    fn toggle_kind(&mut self) {
        let fields = &mut self.state.transactions.form.fields;
        fields.kind = match fields.kind {
            RecordKind::Expense => RecordKind::Income,
            RecordKind::Income => RecordKind::Expense,
        };
    }

    fn adjust_choice(&mut self, step: isize) {
        match self.state.transactions.form.focus {
            FormField::Kind => self.toggle_kind(),
            FormField::Category => {
                let form = &mut self.state.transactions.form;
                let len = Category::ALL.len() as isize;
                let next = match form.category_cursor {
                    None => 0,
                    Some(current) => (current as isize + step).rem_euclid(len) as usize,
                };
                form.category_cursor = Some(next);
                form.fields.category = Category::ALL[next].name().to_string();
            }
            _ => {}
        }
    }

    async fn save_form(&mut self) -> Result<()> {
        let existing = self.state.transactions.form.editing.clone();
        let outcome = form::save(
            &self.state.transactions.form.fields,
            existing.as_ref(),
            &mut self.ids,
            &self.client,
        )
        .await;

        match outcome {
            Ok(outcome) => {
                let message = match outcome {
                    SubmitOutcome::Created(_) => "Transação cadastrada com sucesso!",
                    SubmitOutcome::Updated(_) => "Transação alterada com sucesso!",
                };
                self.state.toast = Some(ToastState::new(message, ToastLevel::Success));
                self.state.transactions.mode = TransactionsMode::List;
                self.state.transactions.form = FormUiState::new();
                // The save changed the backing data; refresh the list.
                self.load_transactions().await;
            }
            Err(EngineError::InvalidInput(_)) => {
                self.state.transactions.form.message =
                    Some("Preencha todos os campos corretamente!".to_string());
            }
            Err(EngineError::InvalidDateFormat(_)) => {
                self.state.transactions.form.message =
                    Some("Por favor, insira a data no formato DD/MM/AAAA.".to_string());
            }
            Err(err) => {
                tracing::warn!(%err, "record dispatch failed");
                self.state.transactions.form.message =
                    Some("Ocorreu um erro ao salvar a transação.".to_string());
            }
        }

        Ok(())
    }

    async fn load_quotes(&mut self) {
        match self.client.quotes(&self.config.quote_pairs).await {
            Ok(quotes) => {
                self.state.home.quotes = quotes;
                self.state.home.quotes_error = None;
            }
            Err(err) => {
                tracing::warn!(%err, "quote fetch failed");
                self.state.home.quotes_error =
                    Some("Não foi possível carregar as cotações.".to_string());
            }
        }
    }

    async fn load_transactions(&mut self) {
        match self.client.transactions().await {
            Ok(mut items) => {
                items.sort_by(|a, b| b.date.to_naive_date().cmp(&a.date.to_naive_date()));
                let len = items.len();
                self.state.transactions.items = items;
                self.state.transactions.error = None;
                if self.state.transactions.selected >= len {
                    self.state.transactions.selected = len.saturating_sub(1);
                }
            }
            Err(err) => {
                tracing::warn!(%err, "transaction list failed");
                self.state.transactions.error = Some(store_message_for_error(&err));
            }
        }
    }

    async fn logout(&mut self) {
        if let Err(err) = self.session.logout(&self.client).await {
            tracing::warn!(%err, "logout call failed");
        }
        self.state.screen = Screen::Login;
        self.state.section = Section::Home;
        self.state.login.password.clear();
        self.state.login.message = None;
        self.state.home = HomeState::default();
        self.state.transactions = TransactionsState::default();
        self.state.toast = None;
    }
}

fn login_message_for_error(err: &AuthError) -> String {
    match err {
        AuthError::InvalidCredentials => "Email ou senha inválidos.".to_string(),
        AuthError::Server(message) => format!("Erro no servidor: {message}"),
        AuthError::Transport(_) => "Servidor não acessível.".to_string(),
    }
}

fn store_message_for_error(err: &StoreError) -> String {
    match err {
        StoreError::Unauthorized => "Sessão expirada. Entre novamente.".to_string(),
        StoreError::NotFound => "Registro não encontrado.".to_string(),
        StoreError::Conflict(message) => format!("Conflito: {message}"),
        StoreError::Validation(message) => format!("Erro de validação: {message}"),
        StoreError::Server(message) => format!("Erro no servidor: {message}"),
        StoreError::Transport(_) => "Servidor não acessível.".to_string(),
    }
}
