//! The logged-in user's expenses.

use chrono::NaiveDate;

use crate::api::Api;
use crate::error::{ApiError, ApiResult, CONNECT_MESSAGE};
use crate::filter::{filter_expenses, top_category, ExpenseFilter, ExpenseSort};
use crate::models::{Category, CategoryTotal, Expense, ExpensePayload, ExpenseStats, SessionUser};
use crate::storage::SessionStore;
use crate::validate::{ExpenseField, ExpenseForm, FieldErrors};

use super::{Controller, Effect, Env, Route, ToastId, Toasts};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this expense?";

/// The add/edit dialog. Editing owns the target id, so closing the dialog
/// always forgets it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ExpenseModal {
    #[default]
    Closed,
    Create,
    Edit { id: String },
}

impl ExpenseModal {
    pub fn is_open(&self) -> bool {
        !matches!(self, ExpenseModal::Closed)
    }

    pub fn title(&self) -> &'static str {
        match self {
            ExpenseModal::Edit { .. } => "Edit Expense",
            _ => "Add Expense",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            ExpenseModal::Edit { .. } => "Update Expense",
            _ => "Save Expense",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardPage {
    pub user: Option<SessionUser>,
    pub expenses: Vec<Expense>,
    pub stats: Option<ExpenseStats>,
    pub filter: ExpenseFilter,
    pub modal: ExpenseModal,
    pub form: ExpenseForm,
    pub errors: FieldErrors<ExpenseField>,
    /// Expense waiting for delete confirmation.
    pub confirm_delete: Option<String>,
    pub busy: bool,
    pub loading: bool,
    toasts: Toasts,
}

#[derive(Debug)]
pub enum DashboardAction {
    Start,
    SessionRestored(Option<SessionUser>),
    ExpensesLoaded(ApiResult<Vec<Expense>>),
    StatsLoaded(ApiResult<ExpenseStats>),
    Search(String),
    FilterCategory(String),
    SortBy(ExpenseSort),
    OpenCreate { today: NaiveDate },
    OpenEdit(String),
    CloseModal,
    Input(ExpenseField, String),
    Submit,
    Saved(ApiResult<Option<String>>),
    RequestDelete(String),
    CancelDelete,
    ConfirmDelete,
    Deleted(ApiResult<Option<String>>),
    Logout,
    LoggedOut,
    ToastExpired(ToastId),
}

#[derive(Debug, PartialEq)]
pub enum DashboardRequest {
    RestoreSession,
    LoadExpenses(String),
    LoadStats(String),
    Save { id: Option<String>, expense: ExpensePayload },
    Delete(String),
    ClearSession,
}

impl DashboardPage {
    pub fn new(toast_ms: u32) -> Self {
        Self {
            user: None,
            expenses: Vec::new(),
            stats: None,
            filter: ExpenseFilter::default(),
            modal: ExpenseModal::Closed,
            form: ExpenseForm::default(),
            errors: FieldErrors::default(),
            confirm_delete: None,
            busy: false,
            loading: false,
            toasts: Toasts::new(toast_ms),
        }
    }

    pub fn visible(&self) -> Vec<&Expense> {
        filter_expenses(&self.expenses, &self.filter)
    }

    pub fn top_category(&self) -> Option<(&str, &CategoryTotal)> {
        self.stats.as_ref().and_then(top_category)
    }

    fn user_id(&self) -> Option<String> {
        self.user.as_ref().map(|user| user.id.clone())
    }

    fn reload(&mut self) -> Vec<Effect<DashboardRequest>> {
        match self.user_id() {
            Some(id) => {
                self.loading = true;
                vec![Effect::Request(DashboardRequest::LoadExpenses(id))]
            }
            None => vec![],
        }
    }

    fn close_modal(&mut self) {
        self.modal = ExpenseModal::Closed;
        self.errors = FieldErrors::default();
    }

    fn load_failed(&mut self, err: &ApiError) -> Effect<DashboardRequest> {
        if err.is_connectivity() {
            self.toasts.error(CONNECT_MESSAGE)
        } else {
            self.toasts.error("Failed to load expenses")
        }
    }
}

impl Controller for DashboardPage {
    type Action = DashboardAction;
    type Request = DashboardRequest;

    fn start() -> Option<DashboardAction> {
        Some(DashboardAction::Start)
    }

    fn toast_expired(id: ToastId) -> DashboardAction {
        DashboardAction::ToastExpired(id)
    }

    fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    fn update(&mut self, action: DashboardAction) -> Vec<Effect<DashboardRequest>> {
        match action {
            DashboardAction::Start => vec![Effect::Request(DashboardRequest::RestoreSession)],
            DashboardAction::SessionRestored(None) => {
                tracing::info!("no session, sending to login");
                vec![Effect::navigate(Route::Login)]
            }
            DashboardAction::SessionRestored(Some(user)) => {
                self.user = Some(user);
                self.reload()
            }
            DashboardAction::ExpensesLoaded(Ok(expenses)) => {
                self.loading = false;
                tracing::debug!(count = expenses.len(), "expenses loaded");
                self.expenses = expenses;
                match self.user_id() {
                    Some(id) => vec![Effect::Request(DashboardRequest::LoadStats(id))],
                    None => vec![],
                }
            }
            DashboardAction::ExpensesLoaded(Err(err)) => {
                self.loading = false;
                tracing::warn!(%err, "loading expenses failed");
                vec![self.load_failed(&err)]
            }
            DashboardAction::StatsLoaded(Ok(stats)) => {
                self.stats = Some(stats);
                vec![]
            }
            DashboardAction::StatsLoaded(Err(err)) => {
                tracing::warn!(%err, "loading expense statistics failed");
                vec![]
            }
            DashboardAction::Search(term) => {
                self.filter.search = term;
                vec![]
            }
            DashboardAction::FilterCategory(raw) => {
                self.filter.category = Category::parse(&raw);
                vec![]
            }
            DashboardAction::SortBy(sort) => {
                self.filter.sort = sort;
                vec![]
            }
            DashboardAction::OpenCreate { today } => {
                self.errors = FieldErrors::default();
                self.form = ExpenseForm::dated(today);
                self.modal = ExpenseModal::Create;
                vec![]
            }
            DashboardAction::OpenEdit(id) => {
                if let Some(expense) = self.expenses.iter().find(|e| e.id == id) {
                    self.errors = FieldErrors::default();
                    self.form = ExpenseForm::from_expense(expense);
                    self.modal = ExpenseModal::Edit { id };
                }
                vec![]
            }
            DashboardAction::CloseModal => {
                self.close_modal();
                vec![]
            }
            DashboardAction::Input(field, value) => {
                self.form.set(field, value);
                vec![]
            }
            DashboardAction::Submit => {
                if self.busy || !self.modal.is_open() {
                    return vec![];
                }
                let Some(user_id) = self.user_id() else {
                    return vec![];
                };
                match self.form.validate(&user_id) {
                    Ok(expense) => {
                        self.errors = FieldErrors::default();
                        self.busy = true;
                        let id = match &self.modal {
                            ExpenseModal::Edit { id } => Some(id.clone()),
                            _ => None,
                        };
                        vec![Effect::Request(DashboardRequest::Save { id, expense })]
                    }
                    Err(errors) => {
                        self.errors = errors;
                        vec![]
                    }
                }
            }
            DashboardAction::Saved(Ok(message)) => {
                self.busy = false;
                self.close_modal();
                let mut effects = vec![self
                    .toasts
                    .success(message.unwrap_or_else(|| "Expense saved".to_string()))];
                effects.extend(self.reload());
                effects
            }
            DashboardAction::Saved(Err(err)) => {
                self.busy = false;
                tracing::warn!(%err, "saving expense failed");
                vec![self.toasts.error(err.user_message("Operation failed", CONNECT_MESSAGE))]
            }
            DashboardAction::RequestDelete(id) => {
                if self.expenses.iter().any(|e| e.id == id) {
                    self.confirm_delete = Some(id);
                }
                vec![]
            }
            DashboardAction::CancelDelete => {
                self.confirm_delete = None;
                vec![]
            }
            DashboardAction::ConfirmDelete => {
                if self.busy {
                    return vec![];
                }
                match self.confirm_delete.take() {
                    Some(id) => {
                        self.busy = true;
                        vec![Effect::Request(DashboardRequest::Delete(id))]
                    }
                    None => vec![],
                }
            }
            DashboardAction::Deleted(Ok(_)) => {
                self.busy = false;
                let mut effects = vec![self.toasts.success("Expense deleted successfully")];
                effects.extend(self.reload());
                effects
            }
            DashboardAction::Deleted(Err(err)) => {
                self.busy = false;
                tracing::warn!(%err, "deleting expense failed");
                vec![self.toasts.error(err.user_message("Delete failed", CONNECT_MESSAGE))]
            }
            DashboardAction::Logout => vec![Effect::Request(DashboardRequest::ClearSession)],
            DashboardAction::LoggedOut => {
                tracing::info!("logged out");
                self.user = None;
                vec![Effect::navigate(Route::Login)]
            }
            DashboardAction::ToastExpired(id) => {
                self.toasts.dismiss(id);
                vec![]
            }
        }
    }

    async fn perform<A: Api, S: SessionStore>(env: &Env<A, S>, request: DashboardRequest) -> DashboardAction {
        match request {
            DashboardRequest::RestoreSession => DashboardAction::SessionRestored(env.session.load()),
            DashboardRequest::LoadExpenses(user_id) => {
                DashboardAction::ExpensesLoaded(env.api.list_expenses(&user_id).await)
            }
            DashboardRequest::LoadStats(user_id) => {
                DashboardAction::StatsLoaded(env.api.expense_stats(&user_id).await)
            }
            DashboardRequest::Save { id: Some(id), expense } => {
                DashboardAction::Saved(env.api.update_expense(&id, &expense).await)
            }
            DashboardRequest::Save { id: None, expense } => {
                DashboardAction::Saved(env.api.create_expense(&expense).await)
            }
            DashboardRequest::Delete(id) => DashboardAction::Deleted(env.api.delete_expense(&id).await),
            DashboardRequest::ClearSession => {
                env.session.clear();
                DashboardAction::LoggedOut
            }
        }
    }
}
