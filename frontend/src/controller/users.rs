use crate::api::Api;
use crate::error::{ApiResult, CONNECT_MESSAGE};
use crate::filter::{filter_users, latest_user, UserFilter, UserSort};
use crate::models::{User, UserPayload, UserStats};
use crate::storage::SessionStore;
use crate::validate::{FieldErrors, UserField, UserForm, UserFormMode};

use super::{Controller, Effect, Env, ToastId, Toasts};

/// At most one dialog is open. Both variants carry the user they are about.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum UserModal {
    #[default]
    Closed,
    Details { id: String },
    Edit { id: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct UsersPage {
    pub users: Vec<User>,
    pub stats: Option<UserStats>,
    pub filter: UserFilter,
    pub modal: UserModal,
    pub form: UserForm,
    pub errors: FieldErrors<UserField>,
    pub confirm_delete: Option<String>,
    pub busy: bool,
    pub loading: bool,
    toasts: Toasts,
}

#[derive(Debug)]
pub enum UsersAction {
    Start,
    UsersLoaded(ApiResult<Vec<User>>),
    StatsLoaded(ApiResult<UserStats>),
    Search(String),
    SortBy(UserSort),
    ViewDetails(String),
    OpenEdit(String),
    CloseModal,
    Input(UserField, String),
    Submit,
    Updated(ApiResult<Option<String>>),
    RequestDelete(String),
    CancelDelete,
    ConfirmDelete,
    Deleted(ApiResult<Option<String>>),
    ToastExpired(ToastId),
}

#[derive(Debug, PartialEq)]
pub enum UsersRequest {
    LoadUsers,
    LoadStats,
    Update { id: String, user: UserPayload },
    Delete(String),
}

impl UsersPage {
    pub fn new(toast_ms: u32) -> Self {
        Self {
            users: Vec::new(),
            stats: None,
            filter: UserFilter::default(),
            modal: UserModal::Closed,
            form: UserForm::default(),
            errors: FieldErrors::default(),
            confirm_delete: None,
            busy: false,
            loading: false,
            toasts: Toasts::new(toast_ms),
        }
    }

    pub fn visible(&self) -> Vec<&User> {
        filter_users(&self.users, &self.filter)
    }

    pub fn latest(&self) -> Option<&User> {
        latest_user(&self.users)
    }

    fn find(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn details(&self) -> Option<&User> {
        match &self.modal {
            UserModal::Details { id } => self.find(id),
            _ => None,
        }
    }

    pub fn delete_prompt(&self) -> Option<String> {
        let id = self.confirm_delete.as_deref()?;
        let user = self.find(id)?;
        Some(format!("Are you sure you want to delete {}?", user.name))
    }

    fn reload(&mut self) -> Effect<UsersRequest> {
        self.loading = true;
        Effect::Request(UsersRequest::LoadUsers)
    }

    fn close_modal(&mut self) {
        self.modal = UserModal::Closed;
        self.errors = FieldErrors::default();
    }
}

impl Controller for UsersPage {
    type Action = UsersAction;
    type Request = UsersRequest;

    fn start() -> Option<UsersAction> {
        Some(UsersAction::Start)
    }

    fn toast_expired(id: ToastId) -> UsersAction {
        UsersAction::ToastExpired(id)
    }

    fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    fn update(&mut self, action: UsersAction) -> Vec<Effect<UsersRequest>> {
        match action {
            UsersAction::Start => vec![self.reload()],
            UsersAction::UsersLoaded(Ok(users)) => {
                self.loading = false;
                tracing::debug!(count = users.len(), "users loaded");
                self.users = users;
                vec![Effect::Request(UsersRequest::LoadStats)]
            }
            UsersAction::UsersLoaded(Err(err)) => {
                self.loading = false;
                tracing::warn!(%err, "loading users failed");
                let message = if err.is_connectivity() {
                    CONNECT_MESSAGE
                } else {
                    "Failed to load users"
                };
                vec![self.toasts.error(message)]
            }
            UsersAction::StatsLoaded(Ok(stats)) => {
                self.stats = Some(stats);
                vec![]
            }
            UsersAction::StatsLoaded(Err(err)) => {
                tracing::warn!(%err, "loading user statistics failed");
                vec![]
            }
            UsersAction::Search(term) => {
                self.filter.search = term;
                vec![]
            }
            UsersAction::SortBy(sort) => {
                self.filter.sort = sort;
                vec![]
            }
            UsersAction::ViewDetails(id) => {
                if self.find(&id).is_some() {
                    self.modal = UserModal::Details { id };
                }
                vec![]
            }
            UsersAction::OpenEdit(id) => {
                if let Some(user) = self.find(&id) {
                    self.form = UserForm::from_user(user);
                    self.errors = FieldErrors::default();
                    self.modal = UserModal::Edit { id };
                }
                vec![]
            }
            UsersAction::CloseModal => {
                self.close_modal();
                vec![]
            }
            UsersAction::Input(field, value) => {
                self.form.set(field, value);
                vec![]
            }
            UsersAction::Submit => {
                let UserModal::Edit { id } = &self.modal else {
                    return vec![];
                };
                if self.busy {
                    return vec![];
                }
                let id = id.clone();
                match self.form.validate(UserFormMode::Edit) {
                    Ok(user) => {
                        self.errors = FieldErrors::default();
                        self.busy = true;
                        vec![Effect::Request(UsersRequest::Update { id, user })]
                    }
                    Err(errors) => {
                        self.errors = errors;
                        vec![]
                    }
                }
            }
            UsersAction::Updated(Ok(_)) => {
                self.busy = false;
                self.close_modal();
                vec![self.toasts.success("User updated successfully"), self.reload()]
            }
            UsersAction::Updated(Err(err)) => {
                self.busy = false;
                tracing::warn!(%err, "updating user failed");
                vec![self.toasts.error(err.user_message("Update failed", CONNECT_MESSAGE))]
            }
            UsersAction::RequestDelete(id) => {
                if self.find(&id).is_some() {
                    self.confirm_delete = Some(id);
                }
                vec![]
            }
            UsersAction::CancelDelete => {
                self.confirm_delete = None;
                vec![]
            }
            UsersAction::ConfirmDelete => {
                if self.busy {
                    return vec![];
                }
                match self.confirm_delete.take() {
                    Some(id) => {
                        self.busy = true;
                        vec![Effect::Request(UsersRequest::Delete(id))]
                    }
                    None => vec![],
                }
            }
            UsersAction::Deleted(Ok(_)) => {
                self.busy = false;
                vec![self.toasts.success("User deleted successfully"), self.reload()]
            }
            UsersAction::Deleted(Err(err)) => {
                self.busy = false;
                tracing::warn!(%err, "deleting user failed");
                vec![self.toasts.error(err.user_message("Delete failed", CONNECT_MESSAGE))]
            }
            UsersAction::ToastExpired(id) => {
                self.toasts.dismiss(id);
                vec![]
            }
        }
    }

    async fn perform<A: Api, S: SessionStore>(env: &Env<A, S>, request: UsersRequest) -> UsersAction {
        match request {
            UsersRequest::LoadUsers => UsersAction::UsersLoaded(env.api.list_users().await),
            UsersRequest::LoadStats => UsersAction::StatsLoaded(env.api.user_stats().await),
            UsersRequest::Update { id, user } => UsersAction::Updated(env.api.update_user(&id, &user).await),
            UsersRequest::Delete(id) => UsersAction::Deleted(env.api.delete_user(&id).await),
        }
    }
}
