//! List and detail views as plain node trees.
//!
//! Rows never carry event handlers. Clickable parts are tagged with
//! `data-action` and `data-id`, and the page listens once on the list
//! container. User-supplied strings only ever become `Node::Text` leaves or
//! attribute values; the yew conversion turns those into text nodes and
//! attributes, so they are never parsed as markup.

use crate::format::{format_currency, format_date, format_timestamp, initial};
use crate::models::{Category, Expense, User};

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

pub fn text(value: impl Into<String>) -> Node {
    Node::Text(value.into())
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, value: &str) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(text(value))
    }

    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

pub fn category_icon(category: &Category) -> &'static str {
    match category {
        Category::Food => "🍔",
        Category::Transport => "🚗",
        Category::Shopping => "🛍️",
        Category::Entertainment => "🎬",
        Category::Bills => "📄",
        Category::Health => "🏥",
        Category::Other | Category::Custom(_) => "📦",
    }
}

fn empty_state(icon: &str, title: &str, hint: &str) -> Node {
    el("div")
        .class("flex flex-col items-center justify-center py-16 text-center text-muted-foreground")
        .attr("data-empty", "true")
        .child(el("div").class("text-4xl mb-3").text(icon))
        .child(el("h3").class("font-bold text-foreground text-lg").text(title))
        .child(el("p").class("text-sm mt-1").text(hint))
        .into()
}

fn age_text(age: Option<u32>, unit: &str) -> String {
    match age {
        Some(age) => format!("{age} {unit}"),
        None => "Age unknown".to_string(),
    }
}

fn icon_button(action: &str, id: &str, title: &str, glyph: &str, tone: &str) -> Element {
    el("button")
        .attr("type", "button")
        .class(&format!("p-2 rounded-lg transition-colors {tone}"))
        .attr("title", title)
        .attr("data-action", action)
        .attr("data-id", id)
        .text(glyph)
}

pub fn expense_list(expenses: &[&Expense]) -> Node {
    if expenses.is_empty() {
        return empty_state("🧾", "No expenses found", "Add an expense or change the filters.");
    }

    el("div")
        .class("divide-y divide-border")
        .children(expenses.iter().map(|expense| expense_item(expense)))
        .into()
}

fn expense_item(expense: &Expense) -> Element {
    let mut meta = el("div")
        .class("flex flex-wrap gap-4 text-xs text-muted-foreground mt-1")
        .child(el("span").text(format!("📅 {}", format_date(expense.date))));
    if let Some(description) = expense.description() {
        meta = meta.child(el("span").text(format!("📝 {description}")));
    }

    el("div")
        .class("flex items-center justify-between px-6 py-4 hover:bg-muted/30 transition-colors")
        .attr("data-id", &expense.id)
        .child(
            el("div")
                .class("min-w-0")
                .child(
                    el("div")
                        .class("flex items-center gap-3")
                        .child(
                            el("span")
                                .class("bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold")
                                .text(format!("{} {}", category_icon(&expense.category), expense.category)),
                        )
                        .child(el("h4").class("font-semibold text-foreground truncate").text(&expense.title)),
                )
                .child(meta),
        )
        .child(
            el("div")
                .class("flex items-center gap-2")
                .child(
                    el("span")
                        .class("font-bold text-[#1D617A] mr-2")
                        .text(format_currency(expense.amount)),
                )
                .child(icon_button("edit", &expense.id, "Edit expense", "✏️", "hover:bg-secondary"))
                .child(icon_button("delete", &expense.id, "Delete expense", "🗑️", "hover:bg-red-50")),
        )
}

pub fn user_list(users: &[&User]) -> Node {
    if users.is_empty() {
        return empty_state("👥", "No users found", "Register a user or try another search.");
    }

    el("div")
        .class("divide-y divide-border")
        .children(users.iter().map(|user| user_item(user)))
        .into()
}

fn avatar(name: &str, size: &str) -> Element {
    el("div")
        .class(&format!(
            "{size} shrink-0 rounded-full bg-[#173E63] text-white font-bold flex items-center justify-center"
        ))
        .text(initial(name))
}

fn user_item(user: &User) -> Element {
    el("div")
        .class("flex items-start gap-4 px-6 py-4 cursor-pointer hover:bg-muted/30 transition-colors")
        .attr("data-action", "view")
        .attr("data-id", &user.id)
        .child(avatar(&user.name, "w-12 h-12 text-lg"))
        .child(
            el("div")
                .class("flex-1 min-w-0")
                .child(
                    el("div")
                        .class("flex items-center gap-2")
                        .child(el("h4").class("font-semibold text-foreground").text(&user.name))
                        .child(
                            el("span")
                                .class("bg-green-100 text-green-700 px-2 py-0.5 rounded-full text-[10px] font-bold")
                                .text("Active"),
                        ),
                )
                .child(
                    el("div")
                        .class("flex flex-wrap gap-4 text-xs text-muted-foreground mt-1")
                        .child(el("span").text(format!("📧 {}", user.email)))
                        .child(el("span").text(format!("📱 {}", user.mobile)))
                        .child(el("span").text(format!("🎂 {}", age_text(user.age, "years")))),
                )
                .child(
                    el("div")
                        .class("text-xs text-muted-foreground mt-1")
                        .child(el("span").text(format!("📍 {}", user.address))),
                )
                .child(
                    el("div")
                        .class("text-[10px] text-slate-400 mt-1")
                        .child(el("span").class("font-bold mr-1").text("ID:"))
                        .child(el("span").class("font-mono").text(&user.id)),
                ),
        )
        .child(
            el("div")
                .class("flex items-center gap-1")
                .child(icon_button("view", &user.id, "View Details", "👁️", "hover:bg-secondary"))
                .child(icon_button("edit", &user.id, "Edit User", "✏️", "hover:bg-secondary"))
                .child(icon_button("delete", &user.id, "Delete User", "🗑️", "hover:bg-red-50")),
        )
}

fn detail(label: &str, value: impl Into<Node>) -> Element {
    el("div")
        .class("space-y-1")
        .child(el("label").class("text-[10px] font-bold uppercase tracking-widest text-muted-foreground").text(label))
        .child(el("div").class("text-sm text-foreground").child(value))
}

pub fn user_details(user: &User) -> Node {
    let registered = user
        .created_at()
        .map(format_timestamp)
        .unwrap_or_else(|| user.created_at.clone());

    el("div")
        .class("space-y-4")
        .child(
            el("div")
                .class("flex justify-center")
                .child(avatar(&user.name, "w-20 h-20 text-3xl")),
        )
        .child(detail("Full Name", text(&user.name)))
        .child(detail("Email Address", text(&user.email)))
        .child(detail("Mobile Number", text(&user.mobile)))
        .child(detail("Age", text(age_text(user.age, "years old"))))
        .child(detail("Address", text(&user.address)))
        .child(detail("User ID", el("span").class("font-mono text-xs").text(&user.id)))
        .child(detail("Registered On", text(registered)))
        .child(detail(
            "Status",
            el("span")
                .class("bg-green-100 text-green-700 px-3 py-1 rounded-full text-xs font-bold")
                .text("Active"),
        ))
        .into()
}

#[cfg(test)]
impl Element {
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
impl Node {
    /// Concatenated text content, markup stripped.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(value) => value.clone(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, Node::Element(e) if e.get_attr("data-empty").is_some())
    }

    fn walk<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        if let Node::Element(element) = self {
            for child in &element.children {
                child.walk(out);
            }
        }
    }

    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.walk(&mut out);
        out
    }

    pub fn elements(&self) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter_map(|node| match node {
                Node::Element(element) => Some(element),
                Node::Text(_) => None,
            })
            .collect()
    }

    pub fn has_text_leaf(&self, raw: &str) -> bool {
        self.descendants()
            .into_iter()
            .any(|node| matches!(node, Node::Text(value) if value.contains(raw)))
    }

    /// `(data-action, data-id)` of every clickable control, in document order.
    pub fn actions(&self) -> Vec<(&str, &str)> {
        self.elements()
            .into_iter()
            .filter_map(|e| Some((e.get_attr("data-action")?, e.get_attr("data-id")?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn expense(title: &str, description: Option<&str>, category: Category) -> Expense {
        Expense {
            id: "e-1".into(),
            user_id: "u-1".into(),
            title: title.into(),
            amount: Decimal::new(1250, 2),
            category,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            description: description.map(str::to_string),
        }
    }

    fn user(name: &str) -> User {
        User {
            id: "u-1".into(),
            name: name.into(),
            email: "x@y.io".into(),
            mobile: "1234567890".into(),
            age: Some(30),
            address: "7 Elm Road".into(),
            created_at: "2024-01-05T21:07:00".into(),
        }
    }

    #[test]
    fn markup_in_user_text_stays_a_text_leaf() {
        let e = expense("<script>alert(1)</script>", Some("\"quoted\" & 'single'"), Category::Food);
        let node = expense_list(&[&e]);
        assert!(node.elements().iter().all(|element| element.tag != "script"));
        assert!(node.has_text_leaf("<script>alert(1)</script>"));
        assert!(node.has_text_leaf("\"quoted\" & 'single'"));
    }

    #[test]
    fn hostile_ids_stay_attribute_values() {
        let mut e = expense("Lunch", None, Category::Food);
        e.id = "\"><img src=x>".into();
        let node = expense_list(&[&e]);
        assert!(node.elements().iter().all(|element| element.tag != "img"));
        assert_eq!(
            node.actions(),
            vec![("edit", "\"><img src=x>"), ("delete", "\"><img src=x>")]
        );
    }

    #[test]
    fn empty_lists_render_the_empty_panel() {
        let node = expense_list(&[]);
        assert!(node.is_empty_state());
        assert!(node.text_content().contains("No expenses found"));
        assert!(user_list(&[]).is_empty_state());
    }

    #[test]
    fn expense_row_content() {
        let e = expense("Pizza night", None, Category::Food);
        let node = expense_list(&[&e]);
        assert!(!node.is_empty_state());
        let content = node.text_content();
        assert!(content.contains("🍔 Food"));
        assert!(content.contains("📅 Jan 5, 2024"));
        assert!(content.contains("$12.50"));
        assert!(!content.contains("📝"));
        assert_eq!(node.actions(), vec![("edit", "e-1"), ("delete", "e-1")]);
    }

    #[test]
    fn unknown_categories_get_the_fallback_icon() {
        assert_eq!(category_icon(&Category::Custom("Pets".into())), "📦");
        assert_eq!(category_icon(&Category::Other), "📦");
        assert_eq!(category_icon(&Category::Health), "🏥");
        let e = expense("Vet visit", Some("annual"), Category::Custom("Pets".into()));
        assert!(expense_list(&[&e]).text_content().contains("📦 Pets"));
    }

    #[test]
    fn user_rows_and_details() {
        let u = user("zoe <b>");
        let list = user_list(&[&u]);
        assert!(list.has_text_leaf("zoe <b>"));
        assert!(list.elements().iter().all(|element| element.tag != "b"));
        assert_eq!(
            list.actions(),
            vec![("view", "u-1"), ("view", "u-1"), ("edit", "u-1"), ("delete", "u-1")]
        );
        assert!(user_list(&[&u]).text_content().contains("🎂 30 years"));

        let details = user_details(&u).text_content();
        assert!(details.contains("Z"));
        assert!(details.contains("30 years old"));
        assert!(details.contains("January 5, 2024 at 09:07 PM"));
    }

    #[test]
    fn unknown_age_is_spelled_out() {
        let mut u = user("Ann");
        u.age = None;
        assert!(user_list(&[&u]).text_content().contains("🎂 Age unknown"));
        assert!(user_details(&u).text_content().contains("Age unknown"));
    }
}
