use yew::prelude::*;

use crate::controller::register::{RegisterAction, RegisterUserPage};
use crate::controller::Controller;
use crate::validate::{UserField, MOBILE_DIGITS};

use super::hooks::use_controller;
use super::widgets::{
    form_field, hint, input_value, page_shell, submit_button, textarea_value, ToastStack, INPUT_CLASS,
};

#[function_component(RegisterUserScreen)]
pub fn register_user_screen() -> Html {
    let page = use_controller(|config| RegisterUserPage::new(config.toast_ms));
    let state = page.state();

    let on_submit = page.callback(|e: SubmitEvent| {
        e.prevent_default();
        RegisterAction::Submit
    });
    let input = |field: UserField| page.callback(move |e: InputEvent| RegisterAction::Input(field, input_value(e)));
    let blur = |field: UserField| page.callback(move |_: FocusEvent| RegisterAction::Blur(field));
    let field_error = |field: UserField| state.errors.get(&field);
    let (mobile_hint, mobile_tone) = state.mobile_hint();

    let text_input = |field: UserField, kind: &'static str, placeholder: &'static str| {
        html! {
            <input type={kind} class={INPUT_CLASS} placeholder={placeholder}
                value={state.form.value(field).to_string()}
                oninput={input(field)} onblur={blur(field)} />
        }
    };

    let form = html! {
        <form class="bg-card border border-border rounded-2xl shadow-sm p-6 space-y-4 max-w-2xl" onsubmit={on_submit} novalidate={true}>
            { form_field("Full Name *", text_input(UserField::Name, "text", "Jane Doe"), field_error(UserField::Name)) }
            { form_field("Email Address *", text_input(UserField::Email, "email", "jane@example.com"), field_error(UserField::Email)) }
            <div class="space-y-1">
                <label class="text-sm font-medium text-foreground">{"Mobile Number *"}</label>
                <input type="tel" inputmode="numeric" maxlength={MOBILE_DIGITS.to_string()} class={INPUT_CLASS}
                    placeholder="1234567890"
                    value={state.form.mobile.clone()} oninput={input(UserField::Mobile)} />
                <div class="text-xs text-red-500 min-h-[1rem]">{ field_error(UserField::Mobile).unwrap_or_default().to_string() }</div>
                { hint(mobile_hint, mobile_tone) }
            </div>
            { form_field("Age *", text_input(UserField::Age, "number", "30"), field_error(UserField::Age)) }
            { form_field("Address *", html! {
                <textarea class={INPUT_CLASS} rows="3" placeholder="Street, city"
                    value={state.form.address.clone()}
                    oninput={page.callback(|e: InputEvent| RegisterAction::Input(UserField::Address, textarea_value(e)))}
                    onblur={blur(UserField::Address)} />
            }, field_error(UserField::Address)) }
            { submit_button("Register User", state.busy) }
        </form>
    };

    html! {
        <>
            <ToastStack toasts={state.toasts().items().to_vec()} />
            { page_shell("Register User", html! {}, form) }
        </>
    }
}
