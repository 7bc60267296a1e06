use yew::prelude::*;

use crate::controller::auth::{LoginAction, LoginPage, SignUpAction, SignUpPage};
use crate::controller::{Controller, Route};
use crate::validate::{LoginField, SignUpField};

use super::hooks::{use_app, use_controller};
use super::widgets::{form_field, input_value, submit_button, ToastStack, INPUT_CLASS};

fn auth_card(heading: &'static str, subtitle: &'static str, form: Html, footer: Html) -> Html {
    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ heading }</h1>
                    <p class="text-sm text-muted-foreground mt-2">{ subtitle }</p>
                </div>
                { form }
                <div class="mt-6 text-center text-sm text-muted-foreground">{ footer }</div>
            </div>
        </div>
    }
}

fn switch_link(prompt: &'static str, label: &'static str, to: Route, navigate: Callback<Route>) -> Html {
    html! {
        <>
            { prompt }
            <button type="button" class="ml-2 text-primary font-semibold" onclick={Callback::from(move |_| navigate.emit(to))}>
                { label }
            </button>
        </>
    }
}

#[function_component(LoginScreen)]
pub fn login_screen() -> Html {
    let app = use_app();
    let page = use_controller(|config| LoginPage::new(config.toast_ms));
    let state = page.state();

    let on_submit = page.callback(|e: SubmitEvent| {
        e.prevent_default();
        LoginAction::Submit
    });
    let input = |field: LoginField| page.callback(move |e: InputEvent| LoginAction::Input(field, input_value(e)));
    let blur = |field: LoginField| page.callback(move |_: FocusEvent| LoginAction::Blur(field));

    let form = html! {
        <form class="space-y-4" onsubmit={on_submit} novalidate={true}>
            { form_field("Email", html! {
                <input type="email" class={INPUT_CLASS} placeholder="you@example.com"
                    value={state.form.email.clone()} oninput={input(LoginField::Email)} onblur={blur(LoginField::Email)} />
            }, state.errors.get(&LoginField::Email)) }
            { form_field("Password", html! {
                <input type="password" class={INPUT_CLASS}
                    value={state.form.password.clone()} oninput={input(LoginField::Password)} onblur={blur(LoginField::Password)} />
            }, state.errors.get(&LoginField::Password)) }
            { submit_button("Login", state.busy) }
        </form>
    };

    html! {
        <>
            <ToastStack toasts={state.toasts().items().to_vec()} />
            { auth_card(
                "Welcome back",
                "Sign in to continue.",
                form,
                switch_link("No account?", "Sign up", Route::SignUp, app.navigate.clone()),
            ) }
        </>
    }
}

#[function_component(SignUpScreen)]
pub fn sign_up_screen() -> Html {
    let app = use_app();
    let page = use_controller(|config| SignUpPage::new(config.toast_ms));
    let state = page.state();

    let on_submit = page.callback(|e: SubmitEvent| {
        e.prevent_default();
        SignUpAction::Submit
    });
    let input = |field: SignUpField| page.callback(move |e: InputEvent| SignUpAction::Input(field, input_value(e)));
    let blur = |field: SignUpField| page.callback(move |_: FocusEvent| SignUpAction::Blur(field));

    let form = html! {
        <form class="space-y-4" onsubmit={on_submit} novalidate={true}>
            { form_field("Username", html! {
                <input type="text" class={INPUT_CLASS}
                    value={state.form.username.clone()} oninput={input(SignUpField::Username)} onblur={blur(SignUpField::Username)} />
            }, state.errors.get(&SignUpField::Username)) }
            { form_field("Email", html! {
                <input type="email" class={INPUT_CLASS}
                    value={state.form.email.clone()} oninput={input(SignUpField::Email)} onblur={blur(SignUpField::Email)} />
            }, state.errors.get(&SignUpField::Email)) }
            { form_field("Password", html! {
                <input type="password" class={INPUT_CLASS}
                    value={state.form.password.clone()} oninput={input(SignUpField::Password)} onblur={blur(SignUpField::Password)} />
            }, state.errors.get(&SignUpField::Password)) }
            { form_field("Confirm Password", html! {
                <input type="password" class={INPUT_CLASS}
                    value={state.form.confirm_password.clone()} oninput={input(SignUpField::ConfirmPassword)} onblur={blur(SignUpField::ConfirmPassword)} />
            }, state.errors.get(&SignUpField::ConfirmPassword)) }
            { submit_button("Sign up", state.busy) }
        </form>
    };

    html! {
        <>
            <ToastStack toasts={state.toasts().items().to_vec()} />
            { auth_card(
                "Create account",
                "Start tracking your expenses.",
                form,
                switch_link("Already have an account?", "Login", Route::Login, app.navigate.clone()),
            ) }
        </>
    }
}
