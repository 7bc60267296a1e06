//! Page state machines.
//!
//! A page never touches the DOM or the network directly. `update` folds an
//! action into the page state and answers with effects; the host (the yew
//! layer in the app, a synchronous driver in tests) runs those effects and
//! feeds the resulting actions back in.

pub mod auth;
pub mod dashboard;
pub mod register;
pub mod users;

use crate::api::Api;
use crate::storage::SessionStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Login,
    SignUp,
    RegisterUser,
    Users,
    Dashboard,
}

impl Route {
    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Sign In",
            Route::SignUp => "Create Account",
            Route::RegisterUser => "Register User",
            Route::Users => "User Management",
            Route::Dashboard => "Dashboard",
        }
    }
}

/// What a page needs from the outside world.
pub struct Env<A, S> {
    pub api: A,
    pub session: S,
}

#[derive(Debug, PartialEq)]
pub enum Effect<R> {
    Request(R),
    ExpireToast { id: ToastId, after_ms: u32 },
    /// `after_ms == 0` switches pages right away.
    Navigate { to: Route, after_ms: u32 },
}

impl<R> Effect<R> {
    pub fn navigate(to: Route) -> Self {
        Effect::Navigate { to, after_ms: 0 }
    }
}

pub type ToastId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
}

/// Transient notices. Each push hands back the timer that removes it.
#[derive(Clone, Debug, PartialEq)]
pub struct Toasts {
    ttl_ms: u32,
    next_id: ToastId,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new(ttl_ms: u32) -> Self {
        Self {
            ttl_ms,
            next_id: 1,
            items: Vec::new(),
        }
    }

    pub fn push<R>(&mut self, kind: ToastKind, message: impl Into<String>) -> Effect<R> {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        Effect::ExpireToast {
            id,
            after_ms: self.ttl_ms,
        }
    }

    pub fn success<R>(&mut self, message: impl Into<String>) -> Effect<R> {
        self.push(ToastKind::Success, message)
    }

    pub fn error<R>(&mut self, message: impl Into<String>) -> Effect<R> {
        self.push(ToastKind::Error, message)
    }

    pub fn dismiss(&mut self, id: ToastId) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[allow(async_fn_in_trait)]
pub trait Controller: 'static {
    type Action: 'static;
    type Request: 'static;

    /// Action dispatched once when the page mounts.
    fn start() -> Option<Self::Action> {
        None
    }

    fn toast_expired(id: ToastId) -> Self::Action;

    fn toasts(&self) -> &Toasts;

    fn update(&mut self, action: Self::Action) -> Vec<Effect<Self::Request>>;

    async fn perform<A: Api, S: SessionStore>(env: &Env<A, S>, request: Self::Request) -> Self::Action;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_get_increasing_ids_and_timers() {
        let mut toasts = Toasts::new(3000);
        let first: Effect<()> = toasts.success("saved");
        let second: Effect<()> = toasts.error("failed");
        assert_eq!(first, Effect::ExpireToast { id: 1, after_ms: 3000 });
        assert_eq!(second, Effect::ExpireToast { id: 2, after_ms: 3000 });
        assert_eq!(toasts.items().len(), 2);

        toasts.dismiss(1);
        assert_eq!(toasts.items()[0].message, "failed");
        assert_eq!(toasts.items()[0].kind, ToastKind::Error);

        toasts.dismiss(42);
        assert_eq!(toasts.items().len(), 1);
    }
}
