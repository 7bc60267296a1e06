use yew::prelude::*;

use crate::controller::dashboard::{DashboardAction, DashboardPage, DELETE_PROMPT};
use crate::controller::Controller;
use crate::filter::ExpenseSort;
use crate::format::{format_currency, initial, pluralize};
use crate::models::Category;
use crate::render::{category_icon, expense_list};
use crate::validate::ExpenseField;

use super::hooks::{use_controller, UseController};
use super::widgets::{
    clicked_action, confirm_dialog, form_field, icon_log_out, icon_plus, input_value, modal_shell, node_to_html,
    page_shell, select_value, textarea_value, StatCard, StatIcon, ToastStack, INPUT_CLASS, PRIMARY_BUTTON,
    SECONDARY_BUTTON,
};

fn stat_cards(state: &DashboardPage) -> Html {
    let (total, count, monthly, monthly_count) = match &state.stats {
        Some(stats) => (
            format_currency(stats.total_amount),
            pluralize(stats.total_expenses, "expense"),
            format_currency(stats.monthly_total),
            pluralize(stats.monthly_count, "expense"),
        ),
        None => ("$0.00".into(), pluralize(0, "expense"), "$0.00".into(), pluralize(0, "expense")),
    };
    let (top, top_amount) = match state.top_category() {
        Some((name, totals)) => (
            format!("{} {}", category_icon(&Category::from(name.to_string())), name),
            format_currency(totals.total),
        ),
        None => ("-".to_string(), "$0.00".to_string()),
    };

    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <StatCard title="TOTAL EXPENSES" value={total} caption={count} icon={StatIcon::Wallet} />
            <StatCard title="THIS MONTH" value={monthly} caption={monthly_count} icon={StatIcon::Calendar} />
            <StatCard title="TOP CATEGORY" value={top} caption={top_amount} icon={StatIcon::Chart} />
        </div>
    }
}

fn filters(page: &UseController<DashboardPage>, state: &DashboardPage) -> Html {
    let selected_category = state
        .filter
        .category
        .as_ref()
        .map(|c| c.to_string())
        .unwrap_or_default();

    html! {
        <div class="flex flex-col md:flex-row gap-3">
            <input type="search" class={INPUT_CLASS} placeholder="Search expenses..."
                value={state.filter.search.clone()}
                oninput={page.callback(|e: InputEvent| DashboardAction::Search(input_value(e)))} />
            <select class={INPUT_CLASS}
                onchange={page.callback(|e: Event| DashboardAction::FilterCategory(select_value(e)))}>
                <option value="" selected={selected_category.is_empty()}>{"All Categories"}</option>
                { for Category::ALL.iter().map(|category| html! {
                    <option value={category.to_string()} selected={selected_category == category.as_str()}>
                        { format!("{} {}", category_icon(category), category) }
                    </option>
                }) }
            </select>
            <select class={INPUT_CLASS}
                onchange={page.filter_callback(|e: Event| select_value(e).parse().ok().map(DashboardAction::SortBy))}>
                { for ExpenseSort::ALL.iter().map(|sort| html! {
                    <option value={sort.as_str()} selected={*sort == state.filter.sort}>{ sort.label() }</option>
                }) }
            </select>
        </div>
    }
}

fn expense_modal(page: &UseController<DashboardPage>, state: &DashboardPage) -> Html {
    if !state.modal.is_open() {
        return html! {};
    }
    let input = |field: ExpenseField| page.callback(move |e: InputEvent| DashboardAction::Input(field, input_value(e)));
    let error = |field: ExpenseField| state.errors.get(&field);
    let close = page.callback(|_: MouseEvent| DashboardAction::CloseModal);

    let body = html! {
        <form class="space-y-4" novalidate={true}
            onsubmit={page.callback(|e: SubmitEvent| { e.prevent_default(); DashboardAction::Submit })}>
            { form_field("Title *", html! {
                <input type="text" class={INPUT_CLASS} value={state.form.title.clone()} oninput={input(ExpenseField::Title)} />
            }, error(ExpenseField::Title)) }
            <div class="grid grid-cols-2 gap-4">
                { form_field("Amount *", html! {
                    <input type="number" step="0.01" min="0" class={INPUT_CLASS}
                        value={state.form.amount.clone()} oninput={input(ExpenseField::Amount)} />
                }, error(ExpenseField::Amount)) }
                { form_field("Date *", html! {
                    <input type="date" class={INPUT_CLASS} value={state.form.date.clone()} oninput={input(ExpenseField::Date)} />
                }, error(ExpenseField::Date)) }
            </div>
            { form_field("Category *", html! {
                <select class={INPUT_CLASS}
                    onchange={page.callback(|e: Event| DashboardAction::Input(ExpenseField::Category, select_value(e)))}>
                    <option value="" selected={state.form.category.is_empty()}>{"Select a category"}</option>
                    { for Category::ALL.iter().map(|category| html! {
                        <option value={category.to_string()} selected={state.form.category == category.as_str()}>
                            { format!("{} {}", category_icon(category), category) }
                        </option>
                    }) }
                </select>
            }, error(ExpenseField::Category)) }
            { form_field("Description", html! {
                <textarea class={INPUT_CLASS} rows="3" value={state.form.description.clone()}
                    oninput={page.callback(|e: InputEvent| DashboardAction::Input(ExpenseField::Description, textarea_value(e)))} />
            }, error(ExpenseField::Description)) }
            <div class="flex justify-end gap-3 pt-2">
                <button type="button" class={SECONDARY_BUTTON} onclick={close.clone()}>{"Cancel"}</button>
                <button type="submit" class={PRIMARY_BUTTON} disabled={state.busy}>
                    { if state.busy { "Saving..." } else { state.modal.submit_label() } }
                </button>
            </div>
        </form>
    };

    modal_shell(state.modal.title(), close, body)
}

#[function_component(DashboardScreen)]
pub fn dashboard_screen() -> Html {
    let page = use_controller(|config| DashboardPage::new(config.toast_ms));
    let state = page.state();

    let Some(user) = state.user.as_ref() else {
        return html! {
            <div class="min-h-[50vh] flex items-center justify-center text-muted-foreground">
                {"Checking session..."}
            </div>
        };
    };
    let name = user.display_name().to_string();

    let actions = html! {
        <div class="flex items-center gap-3">
            <div class="flex items-center gap-2">
                <div class="w-9 h-9 rounded-full bg-[#173E63] text-white font-bold flex items-center justify-center">
                    { initial(&name) }
                </div>
                <span class="text-sm font-semibold text-foreground">{ name.clone() }</span>
            </div>
            <button type="button" class={format!("{PRIMARY_BUTTON} flex items-center gap-2")}
                onclick={page.callback(|_: MouseEvent| DashboardAction::OpenCreate {
                    today: chrono::Local::now().date_naive(),
                })}>
                { icon_plus() }<span>{"Add Expense"}</span>
            </button>
            <button type="button" class={format!("{SECONDARY_BUTTON} flex items-center gap-2")}
                onclick={page.callback(|_: MouseEvent| DashboardAction::Logout)}>
                { icon_log_out() }<span>{"Logout"}</span>
            </button>
        </div>
    };

    let on_list_click = page.filter_callback(|e: MouseEvent| match clicked_action(&e)? {
        (action, id) if action == "edit" => Some(DashboardAction::OpenEdit(id)),
        (action, id) if action == "delete" => Some(DashboardAction::RequestDelete(id)),
        _ => None,
    });

    let list = if state.loading && state.expenses.is_empty() {
        html! { <div class="py-16 text-center text-muted-foreground">{"Loading expenses..."}</div> }
    } else {
        node_to_html(&expense_list(&state.visible()))
    };

    let confirm = match state.confirm_delete {
        Some(_) => confirm_dialog(
            DELETE_PROMPT.to_string(),
            page.callback(|_: MouseEvent| DashboardAction::ConfirmDelete),
            page.callback(|_: MouseEvent| DashboardAction::CancelDelete),
        ),
        None => html! {},
    };

    let content = html! {
        <>
            { stat_cards(&state) }
            { filters(&page, &state) }
            <div class="bg-card border border-border rounded-[10px] shadow-sm" onclick={on_list_click}>
                { list }
            </div>
        </>
    };

    html! {
        <>
            <ToastStack toasts={state.toasts().items().to_vec()} />
            { page_shell("My Expenses", actions, content) }
            { expense_modal(&page, &state) }
            { confirm }
        </>
    }
}

