use crate::api::Api;
use crate::error::{ApiResult, CONNECT_RETRY_MESSAGE};
use crate::models::{Credentials, SessionUser, SignUp};
use crate::storage::SessionStore;
use crate::validate::{required_on_blur, FieldErrors, LoginField, LoginForm, SignUpField, SignUpForm};

use super::{Controller, Effect, Env, Route, ToastId, Toasts};

const LOGIN_REDIRECT_MS: u32 = 1000;
const SIGN_UP_REDIRECT_MS: u32 = 1500;

#[derive(Clone, Debug, PartialEq)]
pub struct LoginPage {
    pub form: LoginForm,
    pub errors: FieldErrors<LoginField>,
    pub busy: bool,
    toasts: Toasts,
}

#[derive(Debug)]
pub enum LoginAction {
    Input(LoginField, String),
    Blur(LoginField),
    Submit,
    LoggedIn(ApiResult<SessionUser>),
    ToastExpired(ToastId),
}

pub enum LoginRequest {
    Login(Credentials),
}

impl LoginPage {
    pub fn new(toast_ms: u32) -> Self {
        Self {
            form: LoginForm::default(),
            errors: FieldErrors::default(),
            busy: false,
            toasts: Toasts::new(toast_ms),
        }
    }
}

impl Controller for LoginPage {
    type Action = LoginAction;
    type Request = LoginRequest;

    fn toast_expired(id: ToastId) -> LoginAction {
        LoginAction::ToastExpired(id)
    }

    fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    fn update(&mut self, action: LoginAction) -> Vec<Effect<LoginRequest>> {
        match action {
            LoginAction::Input(field, value) => {
                if !value.trim().is_empty() {
                    self.errors.clear(&field);
                }
                self.form.set(field, value);
                vec![]
            }
            LoginAction::Blur(field) => {
                match required_on_blur(field.label(), self.form.value(field)) {
                    Some(message) => self.errors.set(field, message),
                    None => self.errors.clear(&field),
                }
                vec![]
            }
            LoginAction::Submit => {
                if self.busy {
                    return vec![];
                }
                match self.form.validate() {
                    Ok(credentials) => {
                        self.errors = FieldErrors::default();
                        self.busy = true;
                        vec![Effect::Request(LoginRequest::Login(credentials))]
                    }
                    Err(errors) => {
                        self.errors = errors;
                        vec![]
                    }
                }
            }
            LoginAction::LoggedIn(result) => {
                self.busy = false;
                match result {
                    Ok(user) => {
                        tracing::info!(user_id = %user.id, "logged in");
                        vec![
                            self.toasts.success("Login successful! Redirecting..."),
                            Effect::Navigate {
                                to: Route::Users,
                                after_ms: LOGIN_REDIRECT_MS,
                            },
                        ]
                    }
                    Err(err) => {
                        tracing::warn!(%err, "login failed");
                        vec![self.toasts.error(err.user_message("Login failed", CONNECT_RETRY_MESSAGE))]
                    }
                }
            }
            LoginAction::ToastExpired(id) => {
                self.toasts.dismiss(id);
                vec![]
            }
        }
    }

    async fn perform<A: Api, S: SessionStore>(env: &Env<A, S>, request: LoginRequest) -> LoginAction {
        match request {
            LoginRequest::Login(credentials) => {
                let result = env.api.login(&credentials).await;
                if let Ok(user) = &result {
                    env.session.save(user);
                }
                LoginAction::LoggedIn(result)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SignUpPage {
    pub form: SignUpForm,
    pub errors: FieldErrors<SignUpField>,
    pub busy: bool,
    toasts: Toasts,
}

#[derive(Debug)]
pub enum SignUpAction {
    Input(SignUpField, String),
    Blur(SignUpField),
    Submit,
    SignedUp(ApiResult<Option<String>>),
    ToastExpired(ToastId),
}

pub enum SignUpRequest {
    SignUp(SignUp),
}

impl SignUpPage {
    pub fn new(toast_ms: u32) -> Self {
        Self {
            form: SignUpForm::default(),
            errors: FieldErrors::default(),
            busy: false,
            toasts: Toasts::new(toast_ms),
        }
    }
}

impl Controller for SignUpPage {
    type Action = SignUpAction;
    type Request = SignUpRequest;

    fn toast_expired(id: ToastId) -> SignUpAction {
        SignUpAction::ToastExpired(id)
    }

    fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    fn update(&mut self, action: SignUpAction) -> Vec<Effect<SignUpRequest>> {
        match action {
            SignUpAction::Input(field, value) => {
                if !value.trim().is_empty() {
                    self.errors.clear(&field);
                }
                self.form.set(field, value);
                vec![]
            }
            SignUpAction::Blur(field) => {
                match required_on_blur(field.label(), self.form.value(field)) {
                    Some(message) => self.errors.set(field, message),
                    None => self.errors.clear(&field),
                }
                vec![]
            }
            SignUpAction::Submit => {
                if self.busy {
                    return vec![];
                }
                match self.form.validate() {
                    Ok(account) => {
                        self.errors = FieldErrors::default();
                        self.busy = true;
                        vec![Effect::Request(SignUpRequest::SignUp(account))]
                    }
                    Err(errors) => {
                        self.errors = errors;
                        vec![]
                    }
                }
            }
            SignUpAction::SignedUp(Ok(_)) => {
                self.busy = false;
                tracing::info!(username = %self.form.username.trim(), "account created");
                vec![
                    self.toasts.success("Registration successful! Redirecting to login..."),
                    Effect::Navigate {
                        to: Route::Login,
                        after_ms: SIGN_UP_REDIRECT_MS,
                    },
                ]
            }
            SignUpAction::SignedUp(Err(err)) => {
                self.busy = false;
                tracing::warn!(%err, "sign-up failed");
                vec![self.toasts.error(err.user_message("Registration failed", CONNECT_RETRY_MESSAGE))]
            }
            SignUpAction::ToastExpired(id) => {
                self.toasts.dismiss(id);
                vec![]
            }
        }
    }

    async fn perform<A: Api, S: SessionStore>(env: &Env<A, S>, request: SignUpRequest) -> SignUpAction {
        match request {
            SignUpRequest::SignUp(account) => SignUpAction::SignedUp(env.api.sign_up(&account).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::harness::{drive, env, messages};
    use crate::controller::ToastKind;
    use crate::error::ApiError;

    fn account() -> SessionUser {
        SessionUser {
            id: "u1".into(),
            username: Some("johnny".into()),
            name: None,
            email: Some("john@example.com".into()),
        }
    }

    fn filled_login() -> LoginPage {
        let mut page = LoginPage::new(3000);
        page.update(LoginAction::Input(LoginField::Email, " john@example.com ".into()));
        page.update(LoginAction::Input(LoginField::Password, "secret".into()));
        page
    }

    #[test]
    fn empty_login_is_blocked_before_the_network() {
        let env = env();
        let mut page = LoginPage::new(3000);
        let outcome = drive(&mut page, &env, LoginAction::Submit);

        assert!(env.api.calls().is_empty());
        assert_eq!(page.errors.get(&LoginField::Email), Some("Email is required"));
        assert_eq!(page.errors.get(&LoginField::Password), Some("Password is required"));
        assert!(outcome.navigations.is_empty());
        assert!(!page.busy);
    }

    #[test]
    fn login_stores_session_and_redirects_to_users() {
        let env = env();
        *env.api.account.borrow_mut() = Some(account());
        let mut page = filled_login();

        let outcome = drive(&mut page, &env, LoginAction::Submit);

        assert_eq!(env.api.calls(), ["POST /users/login"]);
        assert_eq!(env.session.load(), Some(account()));
        assert_eq!(outcome.navigations, [(Route::Users, 1000)]);
        assert_eq!(
            messages(&page),
            [(ToastKind::Success, "Login successful! Redirecting...".to_string())]
        );
        assert!(!page.busy);
    }

    #[test]
    fn rejected_login_shows_server_error_and_keeps_no_session() {
        let env = env();
        let mut page = filled_login();

        let outcome = drive(&mut page, &env, LoginAction::Submit);

        assert_eq!(env.session.load(), None);
        assert!(outcome.navigations.is_empty());
        assert_eq!(
            messages(&page),
            [(ToastKind::Error, "Invalid email or password".to_string())]
        );
    }

    #[test]
    fn offline_login_shows_one_connectivity_toast_and_reenables() {
        let env = env();
        env.api.go_offline();
        let mut page = filled_login();

        drive(&mut page, &env, LoginAction::Submit);

        assert_eq!(messages(&page), [(ToastKind::Error, CONNECT_RETRY_MESSAGE.to_string())]);
        assert!(!page.busy);
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut page = filled_login();
        assert_eq!(page.update(LoginAction::Submit).len(), 1);
        assert!(page.busy);
        assert!(page.update(LoginAction::Submit).is_empty());
    }

    #[test]
    fn toast_expiry_removes_it() {
        let env = env();
        env.api.go_offline();
        let mut page = filled_login();
        let outcome = drive(&mut page, &env, LoginAction::Submit);

        page.update(LoginAction::ToastExpired(outcome.timers[0]));
        assert!(page.toasts().items().is_empty());
    }

    #[test]
    fn login_blur_flags_empty_field_and_typing_clears_it() {
        let mut page = LoginPage::new(3000);

        page.update(LoginAction::Blur(LoginField::Email));
        assert_eq!(page.errors.get(&LoginField::Email), Some("Email is required"));

        page.update(LoginAction::Input(LoginField::Email, "   ".into()));
        assert_eq!(page.errors.get(&LoginField::Email), Some("Email is required"));

        page.update(LoginAction::Input(LoginField::Email, "j".into()));
        assert_eq!(page.errors.get(&LoginField::Email), None);

        page.update(LoginAction::Blur(LoginField::Password));
        assert_eq!(page.errors.get(&LoginField::Password), Some("Password is required"));
        page.update(LoginAction::Input(LoginField::Password, "x".into()));
        page.update(LoginAction::Blur(LoginField::Password));
        assert!(page.errors.is_empty());
    }

    fn filled_sign_up(confirm: &str) -> SignUpPage {
        let mut page = SignUpPage::new(3000);
        for (field, value) in [
            (SignUpField::Username, "johnny"),
            (SignUpField::Email, "john@example.com"),
            (SignUpField::Password, "secret1"),
            (SignUpField::ConfirmPassword, confirm),
        ] {
            page.update(SignUpAction::Input(field, value.into()));
        }
        page
    }

    #[test]
    fn sign_up_redirects_to_login() {
        let env = env();
        let mut page = filled_sign_up("secret1");

        let outcome = drive(&mut page, &env, SignUpAction::Submit);

        assert_eq!(env.api.calls(), ["POST /users/register"]);
        assert_eq!(outcome.navigations, [(Route::Login, 1500)]);
        assert_eq!(
            messages(&page),
            [(ToastKind::Success, "Registration successful! Redirecting to login...".to_string())]
        );
    }

    #[test]
    fn mismatched_passwords_block_sign_up() {
        let env = env();
        let mut page = filled_sign_up("secret2");

        drive(&mut page, &env, SignUpAction::Submit);

        assert!(env.api.calls().is_empty());
        assert_eq!(page.errors.get(&SignUpField::ConfirmPassword), Some("Passwords do not match"));
    }

    #[test]
    fn rejected_sign_up_without_reason_uses_fallback() {
        let env = env();
        env.api.fail("POST /users/register", ApiError::Rejected(None));
        let mut page = filled_sign_up("secret1");

        let outcome = drive(&mut page, &env, SignUpAction::Submit);

        assert!(outcome.navigations.is_empty());
        assert_eq!(messages(&page), [(ToastKind::Error, "Registration failed".to_string())]);
        assert!(!page.busy);
    }

    #[test]
    fn sign_up_blur_uses_field_labels() {
        let mut page = SignUpPage::new(3000);

        for field in [SignUpField::Username, SignUpField::ConfirmPassword] {
            page.update(SignUpAction::Blur(field));
        }
        assert_eq!(page.errors.get(&SignUpField::Username), Some("Username is required"));
        assert_eq!(
            page.errors.get(&SignUpField::ConfirmPassword),
            Some("Confirm Password is required")
        );

        page.update(SignUpAction::Input(SignUpField::ConfirmPassword, "secret1".into()));
        assert_eq!(page.errors.get(&SignUpField::ConfirmPassword), None);
        assert_eq!(page.errors.len(), 1);
    }
}
