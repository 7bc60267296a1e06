use yew::prelude::*;

use crate::controller::users::{UserModal, UsersAction, UsersPage};
use crate::controller::Controller;
use crate::filter::UserSort;
use crate::format::{format_average, format_date, pluralize};
use crate::render::{user_details, user_list};
use crate::validate::UserField;

use super::hooks::{use_controller, UseController};
use super::widgets::{
    clicked_action, confirm_dialog, input_value, modal_shell, node_to_html, page_shell, select_value,
    textarea_value, StatCard, StatIcon, ToastStack, INPUT_CLASS, PRIMARY_BUTTON, SECONDARY_BUTTON,
};

fn stat_cards(state: &UsersPage) -> Html {
    let (total, average) = match &state.stats {
        Some(stats) => (stats.total_users, format_average(stats.average_age)),
        None => (state.users.len() as u32, format_average(0.0)),
    };
    let (latest, joined) = match state.latest() {
        Some(user) => (
            user.name.clone(),
            user.created_at()
                .map(|at| format!("Joined {}", format_date(at.date())))
                .unwrap_or_default(),
        ),
        None => ("-".to_string(), String::new()),
    };

    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <StatCard title="TOTAL USERS" value={total.to_string()} caption={pluralize(total, "registered user")} icon={StatIcon::Users} />
            <StatCard title="AVERAGE AGE" value={average} caption={"years"} icon={StatIcon::Cake} />
            <StatCard title="LATEST USER" value={latest} caption={joined} icon={StatIcon::Sparkle} />
        </div>
    }
}

fn toolbar(page: &UseController<UsersPage>, state: &UsersPage) -> Html {
    html! {
        <div class="flex flex-col md:flex-row gap-3">
            <input type="search" class={INPUT_CLASS} placeholder="Search by name, email or mobile..."
                value={state.filter.search.clone()}
                oninput={page.callback(|e: InputEvent| UsersAction::Search(input_value(e)))} />
            <select class={INPUT_CLASS}
                onchange={page.filter_callback(|e: Event| select_value(e).parse().ok().map(UsersAction::SortBy))}>
                { for UserSort::ALL.iter().map(|sort| html! {
                    <option value={sort.as_str()} selected={*sort == state.filter.sort}>{ sort.label() }</option>
                }) }
            </select>
        </div>
    }
}

fn edit_modal(page: &UseController<UsersPage>, state: &UsersPage) -> Html {
    let close = page.callback(|_: MouseEvent| UsersAction::CloseModal);
    let control = |field: UserField| {
        let value = state.form.value(field).to_string();
        match field {
            UserField::Address => html! {
                <textarea class={INPUT_CLASS} rows="3" value={value}
                    oninput={page.callback(|e: InputEvent| UsersAction::Input(UserField::Address, textarea_value(e)))} />
            },
            _ => {
                let kind = match field {
                    UserField::Email => "email",
                    UserField::Mobile => "tel",
                    UserField::Age => "number",
                    _ => "text",
                };
                html! {
                    <input type={kind} class={INPUT_CLASS} value={value}
                        oninput={page.callback(move |e: InputEvent| UsersAction::Input(field, input_value(e)))} />
                }
            }
        }
    };

    let body = html! {
        <form class="space-y-4" novalidate={true}
            onsubmit={page.callback(|e: SubmitEvent| { e.prevent_default(); UsersAction::Submit })}>
            { for UserField::ALL.iter().map(|field| {
                let label = format!("{} *", field.label());
                html! {
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{ label }</label>
                        { control(*field) }
                        <div class="text-xs text-red-500 min-h-[1rem]">
                            { state.errors.get(field).unwrap_or_default().to_string() }
                        </div>
                    </div>
                }
            }) }
            <div class="flex justify-end gap-3 pt-2">
                <button type="button" class={SECONDARY_BUTTON} onclick={close.clone()}>{"Cancel"}</button>
                <button type="submit" class={PRIMARY_BUTTON} disabled={state.busy}>
                    { if state.busy { "Saving..." } else { "Save Changes" } }
                </button>
            </div>
        </form>
    };

    modal_shell("Edit User", close, body)
}

fn details_modal(page: &UseController<UsersPage>, state: &UsersPage) -> Html {
    let Some(user) = state.details() else {
        return html! {};
    };
    let id = user.id.clone();
    let body = html! {
        <div class="space-y-6">
            { node_to_html(&user_details(user)) }
            <div class="flex justify-end">
                <button type="button" class={PRIMARY_BUTTON}
                    onclick={page.callback(move |_: MouseEvent| UsersAction::OpenEdit(id.clone()))}>
                    {"Edit User"}
                </button>
            </div>
        </div>
    };
    modal_shell("User Details", page.callback(|_: MouseEvent| UsersAction::CloseModal), body)
}

#[function_component(UsersScreen)]
pub fn users_screen() -> Html {
    let page = use_controller(|config| UsersPage::new(config.toast_ms));
    let state = page.state();

    let on_list_click = page.filter_callback(|e: MouseEvent| match clicked_action(&e)? {
        (action, id) if action == "view" => Some(UsersAction::ViewDetails(id)),
        (action, id) if action == "edit" => Some(UsersAction::OpenEdit(id)),
        (action, id) if action == "delete" => Some(UsersAction::RequestDelete(id)),
        _ => None,
    });

    let list = if state.loading && state.users.is_empty() {
        html! { <div class="py-16 text-center text-muted-foreground">{"Loading users..."}</div> }
    } else {
        node_to_html(&user_list(&state.visible()))
    };

    let modal = match state.modal {
        UserModal::Closed => html! {},
        UserModal::Details { .. } => details_modal(&page, &state),
        UserModal::Edit { .. } => edit_modal(&page, &state),
    };

    let confirm = match state.delete_prompt() {
        Some(prompt) => confirm_dialog(
            prompt,
            page.callback(|_: MouseEvent| UsersAction::ConfirmDelete),
            page.callback(|_: MouseEvent| UsersAction::CancelDelete),
        ),
        None => html! {},
    };

    let content = html! {
        <>
            { stat_cards(&state) }
            { toolbar(&page, &state) }
            <div class="bg-card border border-border rounded-[10px] shadow-sm" onclick={on_list_click}>
                { list }
            </div>
        </>
    };

    html! {
        <>
            <ToastStack toasts={state.toasts().items().to_vec()} />
            { page_shell("User Management", html! {}, content) }
            { modal }
            { confirm }
        </>
    }
}
