use crate::api::Api;
use crate::error::{ApiResult, CONNECT_RETRY_MESSAGE};
use crate::models::UserPayload;
use crate::storage::SessionStore;
use crate::validate::{
    mobile_hint, required_on_blur, sanitize_mobile_input, FieldErrors, HintTone, UserField, UserForm,
    UserFormMode,
};

use super::{Controller, Effect, Env, Route, ToastId, Toasts};

const REDIRECT_MS: u32 = 1500;

/// Registration of a managed user (not a login account).
#[derive(Clone, Debug, PartialEq)]
pub struct RegisterUserPage {
    pub form: UserForm,
    pub errors: FieldErrors<UserField>,
    pub busy: bool,
    toasts: Toasts,
}

#[derive(Debug)]
pub enum RegisterAction {
    Input(UserField, String),
    Blur(UserField),
    Submit,
    Registered(ApiResult<Option<String>>),
    ToastExpired(ToastId),
}

#[derive(Debug, PartialEq)]
pub enum RegisterRequest {
    Create(UserPayload),
}

impl RegisterUserPage {
    pub fn new(toast_ms: u32) -> Self {
        Self {
            form: UserForm::default(),
            errors: FieldErrors::default(),
            busy: false,
            toasts: Toasts::new(toast_ms),
        }
    }

    pub fn mobile_hint(&self) -> (String, HintTone) {
        mobile_hint(&self.form.mobile)
    }
}

impl Controller for RegisterUserPage {
    type Action = RegisterAction;
    type Request = RegisterRequest;

    fn toast_expired(id: ToastId) -> RegisterAction {
        RegisterAction::ToastExpired(id)
    }

    fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    fn update(&mut self, action: RegisterAction) -> Vec<Effect<RegisterRequest>> {
        match action {
            RegisterAction::Input(UserField::Mobile, value) => {
                self.form.mobile = sanitize_mobile_input(&value);
                vec![]
            }
            RegisterAction::Input(field, value) => {
                if !value.trim().is_empty() {
                    self.errors.clear(&field);
                }
                self.form.set(field, value);
                vec![]
            }
            // the mobile field has its own live hint
            RegisterAction::Blur(UserField::Mobile) => vec![],
            RegisterAction::Blur(field) => {
                match required_on_blur(field.label(), self.form.value(field)) {
                    Some(message) => self.errors.set(field, message),
                    None => self.errors.clear(&field),
                }
                vec![]
            }
            RegisterAction::Submit => {
                if self.busy {
                    return vec![];
                }
                match self.form.validate(UserFormMode::Register) {
                    Ok(payload) => {
                        self.errors = FieldErrors::default();
                        self.busy = true;
                        vec![Effect::Request(RegisterRequest::Create(payload))]
                    }
                    Err(errors) => {
                        tracing::debug!(invalid = errors.len(), "registration form rejected");
                        self.errors = errors;
                        vec![]
                    }
                }
            }
            RegisterAction::Registered(Ok(_)) => {
                self.busy = false;
                self.form = UserForm::default();
                tracing::info!("user registered");
                vec![
                    self.toasts.success("User registered successfully!"),
                    Effect::Navigate {
                        to: Route::Users,
                        after_ms: REDIRECT_MS,
                    },
                ]
            }
            RegisterAction::Registered(Err(err)) => {
                self.busy = false;
                tracing::warn!(%err, "user registration failed");
                vec![self.toasts.error(err.user_message("Registration failed", CONNECT_RETRY_MESSAGE))]
            }
            RegisterAction::ToastExpired(id) => {
                self.toasts.dismiss(id);
                vec![]
            }
        }
    }

    async fn perform<A: Api, S: SessionStore>(env: &Env<A, S>, request: RegisterRequest) -> RegisterAction {
        match request {
            RegisterRequest::Create(user) => RegisterAction::Registered(env.api.create_user(&user).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::harness::{drive, env, messages};
    use crate::controller::ToastKind;
    use crate::error::ApiError;

    fn filled() -> RegisterUserPage {
        let mut page = RegisterUserPage::new(3000);
        for (field, value) in [
            (UserField::Name, "Grace Hopper"),
            (UserField::Email, "grace@navy.mil"),
            (UserField::Mobile, "(555) 010-2030"),
            (UserField::Age, "45"),
            (UserField::Address, "1 Arlington Way"),
        ] {
            page.update(RegisterAction::Input(field, value.into()));
        }
        page
    }

    #[test]
    fn mobile_input_is_filtered_live() {
        let mut page = RegisterUserPage::new(3000);
        page.update(RegisterAction::Input(UserField::Mobile, "55a5-01".into()));
        assert_eq!(page.form.mobile, "55501");
        assert_eq!(page.mobile_hint(), ("5/10 digits entered".to_string(), HintTone::Warning));

        page.update(RegisterAction::Input(UserField::Mobile, "123-456-7890-99".into()));
        assert_eq!(page.form.mobile, "1234567890");
        assert_eq!(page.mobile_hint().1, HintTone::Success);
    }

    #[test]
    fn blur_flags_empty_field_and_typing_clears_it() {
        let mut page = RegisterUserPage::new(3000);
        page.update(RegisterAction::Blur(UserField::Name));
        assert_eq!(page.errors.get(&UserField::Name), Some("Full Name is required"));

        page.update(RegisterAction::Input(UserField::Name, "G".into()));
        assert_eq!(page.errors.get(&UserField::Name), None);

        page.update(RegisterAction::Blur(UserField::Mobile));
        assert!(page.errors.get(&UserField::Mobile).is_none());
    }

    #[test]
    fn missing_fields_block_submission() {
        let env = env();
        let mut page = RegisterUserPage::new(3000);
        page.update(RegisterAction::Input(UserField::Name, "Grace".into()));

        drive(&mut page, &env, RegisterAction::Submit);

        assert!(env.api.calls().is_empty());
        assert_eq!(page.errors.get(&UserField::Mobile), Some("Mobile number is required"));
        assert_eq!(page.errors.get(&UserField::Address), Some("Address must be at least 5 characters"));
        assert!(page.errors.get(&UserField::Name).is_none());
    }

    #[test]
    fn success_resets_form_and_redirects() {
        let env = env();
        let mut page = filled();

        let outcome = drive(&mut page, &env, RegisterAction::Submit);

        assert_eq!(env.api.calls(), ["POST /users"]);
        assert_eq!(env.api.users.borrow()[0].mobile, "5550102030");
        assert_eq!(page.form, UserForm::default());
        assert_eq!(outcome.navigations, [(Route::Users, 1500)]);
        assert_eq!(
            messages(&page),
            [(ToastKind::Success, "User registered successfully!".to_string())]
        );
    }

    #[test]
    fn server_rejection_keeps_the_form() {
        let env = env();
        env.api.fail("POST /users", ApiError::Rejected(Some("Email already exists".into())));
        let mut page = filled();

        let outcome = drive(&mut page, &env, RegisterAction::Submit);

        assert!(outcome.navigations.is_empty());
        assert_eq!(page.form.name, "Grace Hopper");
        assert_eq!(messages(&page), [(ToastKind::Error, "Email already exists".to_string())]);
        assert!(!page.busy);
    }

    #[test]
    fn network_failure_gives_one_toast_and_reenables_submit() {
        let env = env();
        env.api.go_offline();
        let mut page = filled();

        let outcome = drive(&mut page, &env, RegisterAction::Submit);

        assert_eq!(outcome.timers.len(), 1);
        assert_eq!(messages(&page), [(ToastKind::Error, CONNECT_RETRY_MESSAGE.to_string())]);
        assert!(!page.busy);
    }
}
