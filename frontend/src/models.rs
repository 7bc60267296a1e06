use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, PickFirst};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Entertainment,
    Bills,
    Health,
    Other,
    /// A value the server sent that this client does not know about.
    Custom(String),
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Bills,
        Category::Health,
        Category::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Health => "Health",
            Self::Other => "Other",
            Self::Custom(name) => name,
        }
    }

    /// `None` for the empty "all categories" / "please select" option.
    pub fn parse(raw: &str) -> Option<Category> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else {
            Some(Category::from(raw.to_string()))
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::ALL
            .into_iter()
            .find(|known| known.as_str() == raw)
            .unwrap_or(Category::Custom(raw))
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    // the backend keeps users in CSV and echoes ages back as strings; a blank
    // or garbled cell reads as unknown instead of failing the whole list
    #[serde_as(as = "DefaultOnError<Option<PickFirst<(_, DisplayFromStr)>>>")]
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub created_at: String,
}

impl User {
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

impl Expense {
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// Public profile of the logged-in account, kept in local storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl SessionUser {
    pub fn display_name(&self) -> &str {
        [&self.username, &self.name, &self.email]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
            .unwrap_or("User")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CategoryTotal {
    pub total: Decimal,
    pub count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExpenseStats {
    pub total_amount: Decimal,
    pub total_expenses: u32,
    pub monthly_total: Decimal,
    pub monthly_count: u32,
    pub categories: BTreeMap<String, CategoryTotal>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub total_users: u32,
    pub average_age: f64,
    pub age_distribution: BTreeMap<String, u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignUp {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub age: u32,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpensePayload {
    pub user_id: String,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    pub description: String,
}
