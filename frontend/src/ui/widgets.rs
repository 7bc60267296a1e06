use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew::virtual_dom::{VNode, VTag, VText};

use crate::controller::{Toast, ToastKind};
use crate::render::Node;
use crate::validate::HintTone;

pub const INPUT_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";
pub const PRIMARY_BUTTON: &str = "bg-primary text-primary-foreground px-4 py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity disabled:opacity-60";
pub const SECONDARY_BUTTON: &str = "bg-secondary text-secondary-foreground px-4 py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity";

pub fn node_to_html(node: &Node) -> Html {
    match node {
        Node::Text(value) => VNode::from(VText::new(value.clone())),
        Node::Element(element) => {
            let mut tag = VTag::new(element.tag);
            for (name, value) in &element.attrs {
                tag.add_attribute(*name, value.clone());
            }
            for child in &element.children {
                tag.add_child(node_to_html(child));
            }
            VNode::from(tag)
        }
    }
}

/// `(data-action, data-id)` of the row control that received a click.
pub fn clicked_action(event: &MouseEvent) -> Option<(String, String)> {
    let target: web_sys::Element = event.target_dyn_into()?;
    let control = target.closest("[data-action]").ok().flatten()?;
    Some((control.get_attribute("data-action")?, control.get_attribute("data-id")?))
}

pub fn input_value(event: InputEvent) -> String {
    let input: HtmlInputElement = event.target_unchecked_into();
    input.value()
}

pub fn textarea_value(event: InputEvent) -> String {
    let input: HtmlTextAreaElement = event.target_unchecked_into();
    input.value()
}

pub fn select_value(event: Event) -> String {
    let select: HtmlSelectElement = event.target_unchecked_into();
    select.value()
}

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex flex-wrap items-center justify-between gap-3 pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

/// Label, control and the inline error slot below it.
pub fn form_field(label: &'static str, control: Html, error: Option<&str>) -> Html {
    html! {
        <div class="space-y-1">
            <label class="text-sm font-medium text-foreground">{ label }</label>
            { control }
            <div class="text-xs text-red-500 min-h-[1rem]">{ error.unwrap_or_default().to_string() }</div>
        </div>
    }
}

pub fn hint(text: String, tone: HintTone) -> Html {
    let class_name = match tone {
        HintTone::Neutral => "text-xs text-muted-foreground",
        HintTone::Warning => "text-xs text-[#f59e0b]",
        HintTone::Success => "text-xs text-[#10b981]",
    };
    html! { <div class={class_name}>{ text }</div> }
}

pub fn submit_button(label: &'static str, busy: bool) -> Html {
    html! {
        <button type="submit" class={format!("{PRIMARY_BUTTON} w-full")} disabled={busy}>
            { if busy { "Please wait..." } else { label } }
        </button>
    }
}

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    Wallet,
    Calendar,
    Chart,
    Users,
    Cake,
    Sparkle,
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: &'static str,
    pub value: String,
    pub caption: String,
    pub icon: StatIcon,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start">
            <div class="min-w-0">
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ props.title }</p>
                <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight truncate">{ props.value.clone() }</h3>
                <p class="text-xs text-muted-foreground mt-1">{ props.caption.clone() }</p>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::Wallet => icon_wallet(),
                        StatIcon::Calendar => icon_calendar(),
                        StatIcon::Chart => icon_bar_chart(),
                        StatIcon::Users => icon_users(),
                        StatIcon::Cake => icon_cake(),
                        StatIcon::Sparkle => icon_sparkle(),
                    }
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="fixed top-4 right-4 z-50 space-y-2 w-80">
            { for props.toasts.iter().map(|toast| {
                let class_name = match toast.kind {
                    ToastKind::Success => "px-4 py-3 rounded-lg shadow-lg text-sm font-medium bg-green-50 text-green-700 border border-green-200",
                    ToastKind::Error => "px-4 py-3 rounded-lg shadow-lg text-sm font-medium bg-red-50 text-red-700 border border-red-200",
                };
                html! { <div key={toast.id} class={class_name}>{ toast.message.clone() }</div> }
            }) }
        </div>
    }
}

/// Dialog over a dimmed backdrop. Clicking the backdrop closes it, clicks
/// inside the panel do not reach the backdrop.
pub fn modal_shell(title: &'static str, on_close: Callback<MouseEvent>, body: Html) -> Html {
    let stop = Callback::from(|event: MouseEvent| event.stop_propagation());
    html! {
        <div class="fixed inset-0 z-40 bg-black/40 flex items-center justify-center p-4" onclick={on_close.clone()}>
            <div class="w-full max-w-lg bg-card border border-border rounded-2xl shadow-lg max-h-[90vh] overflow-y-auto" onclick={stop}>
                <div class="flex items-center justify-between px-6 py-4 border-b border-border">
                    <h2 class="text-lg font-bold text-foreground">{ title }</h2>
                    <button type="button" class="p-1 rounded-lg hover:bg-secondary" onclick={on_close}>
                        { icon_x() }
                    </button>
                </div>
                <div class="p-6">{ body }</div>
            </div>
        </div>
    }
}

pub fn confirm_dialog(message: String, on_confirm: Callback<MouseEvent>, on_cancel: Callback<MouseEvent>) -> Html {
    modal_shell(
        "Please Confirm",
        on_cancel.clone(),
        html! {
            <div class="space-y-6">
                <p class="text-sm text-foreground">{ message }</p>
                <div class="flex justify-end gap-3">
                    <button type="button" class={SECONDARY_BUTTON} onclick={on_cancel}>{"Cancel"}</button>
                    <button type="button" class="bg-red-600 text-white px-4 py-2 rounded-lg font-semibold hover:opacity-90" onclick={on_confirm}>
                        {"Delete"}
                    </button>
                </div>
            </div>
        },
    )
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_users() -> Html {
    icon_base("M17 21v-2a4 4 0 00-4-4H5a4 4 0 00-4 4v2M9 11a4 4 0 100-8 4 4 0 000 8zM23 21v-2a4 4 0 00-3-3.87M16 3.13a4 4 0 010 7.75")
}
pub fn icon_user_plus() -> Html {
    icon_base("M16 21v-2a4 4 0 00-4-4H5a4 4 0 00-4 4v2M8.5 11a4 4 0 100-8 4 4 0 000 8zM20 8v6M23 11h-6")
}
pub fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
pub fn icon_calendar() -> Html {
    icon_base("M3 5h18v16H3zM16 3v4M8 3v4M3 10h18")
}
pub fn icon_bar_chart() -> Html {
    icon_base("M4 20V10M10 20V4M16 20v-6M22 20H2")
}
pub fn icon_cake() -> Html {
    icon_base("M4 21h16v-8H4zM4 16h16M12 13V9M12 5v.01")
}
pub fn icon_sparkle() -> Html {
    icon_base("M12 3l2 6 6 2-6 2-2 6-2-6-6-2 6-2z")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_menu() -> Html {
    icon_base("M3 6h18M3 12h18M3 18h18")
}
pub fn icon_x() -> Html {
    icon_base("M18 6L6 18M6 6l12 12")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{el, text};

    #[test]
    fn text_reaches_yew_as_a_text_node_verbatim() {
        match node_to_html(&text("<script>alert(1)</script>")) {
            VNode::VText(leaf) => assert_eq!(leaf.text.as_str(), "<script>alert(1)</script>"),
            _ => panic!("text must stay a text node"),
        }
    }

    #[test]
    fn elements_keep_their_tag() {
        let node: Node = el("span").attr("data-id", "\"><img src=x>").text("x").into();
        match node_to_html(&node) {
            VNode::VTag(tag) => assert_eq!(tag.tag(), "span"),
            _ => panic!("element must become a tag"),
        }
    }
}
