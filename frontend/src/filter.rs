//! Search, category filter and ordering over the in-memory lists. Inputs are
//! never modified; results borrow from them.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::{Category, CategoryTotal, Expense, ExpenseStats, User};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpenseSort {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl ExpenseSort {
    pub const ALL: [ExpenseSort; 4] = [
        ExpenseSort::DateDesc,
        ExpenseSort::DateAsc,
        ExpenseSort::AmountDesc,
        ExpenseSort::AmountAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::AmountDesc => "amount-desc",
            Self::AmountAsc => "amount-asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DateDesc => "Newest first",
            Self::DateAsc => "Oldest first",
            Self::AmountDesc => "Highest amount",
            Self::AmountAsc => "Lowest amount",
        }
    }

    fn compare(self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            Self::DateDesc => b.date.cmp(&a.date),
            Self::DateAsc => a.date.cmp(&b.date),
            Self::AmountDesc => b.amount.cmp(&a.amount),
            Self::AmountAsc => a.amount.cmp(&b.amount),
        }
    }
}

impl FromStr for ExpenseSort {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == s).ok_or(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserSort {
    #[default]
    DateDesc,
    DateAsc,
    NameAsc,
    NameDesc,
    AgeAsc,
    AgeDesc,
}

impl UserSort {
    pub const ALL: [UserSort; 6] = [
        UserSort::DateDesc,
        UserSort::DateAsc,
        UserSort::NameAsc,
        UserSort::NameDesc,
        UserSort::AgeAsc,
        UserSort::AgeDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::AgeAsc => "age-asc",
            Self::AgeDesc => "age-desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DateDesc => "Newest first",
            Self::DateAsc => "Oldest first",
            Self::NameAsc => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::AgeAsc => "Youngest first",
            Self::AgeDesc => "Oldest age first",
        }
    }

    fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            Self::DateDesc => b.created_at().cmp(&a.created_at()),
            Self::DateAsc => a.created_at().cmp(&b.created_at()),
            Self::NameAsc => compare_names(&a.name, &b.name),
            Self::NameDesc => compare_names(&b.name, &a.name),
            Self::AgeAsc => a.age.cmp(&b.age),
            Self::AgeDesc => b.age.cmp(&a.age),
        }
    }
}

impl FromStr for UserSort {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|sort| sort.as_str() == s).ok_or(())
    }
}

// case-insensitive first so "alice" sits next to "Alice"
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseFilter {
    pub search: String,
    pub category: Option<Category>,
    pub sort: ExpenseSort,
}

pub fn filter_expenses<'a>(all: &'a [Expense], filter: &ExpenseFilter) -> Vec<&'a Expense> {
    let needle = filter.search.to_lowercase();
    let mut matches: Vec<&Expense> = all
        .iter()
        .filter(|expense| {
            let text_match = contains_folded(&expense.title, &needle)
                || expense
                    .description
                    .as_deref()
                    .is_some_and(|d| contains_folded(d, &needle));
            let category_match = filter
                .category
                .as_ref()
                .map_or(true, |category| &expense.category == category);
            text_match && category_match
        })
        .collect();
    matches.sort_by(|a, b| filter.sort.compare(a, b));
    matches
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserFilter {
    pub search: String,
    pub sort: UserSort,
}

pub fn filter_users<'a>(all: &'a [User], filter: &UserFilter) -> Vec<&'a User> {
    let needle = filter.search.to_lowercase();
    let mut matches: Vec<&User> = all
        .iter()
        .filter(|user| {
            contains_folded(&user.name, &needle)
                || contains_folded(&user.email, &needle)
                || contains_folded(&user.mobile, &needle)
        })
        .collect();
    matches.sort_by(|a, b| filter.sort.compare(a, b));
    matches
}

/// Category with the largest server-reported total. Ties go to the
/// alphabetically first name.
pub fn top_category(stats: &ExpenseStats) -> Option<(&str, &CategoryTotal)> {
    stats
        .categories
        .iter()
        .fold(None, |best: Option<(&String, &CategoryTotal)>, (name, total)| match best {
            Some((_, top)) if top.total >= total.total => best,
            _ => Some((name, total)),
        })
        .map(|(name, total)| (name.as_str(), total))
}

/// Most recently created user; the earlier entry wins a tie.
pub fn latest_user(users: &[User]) -> Option<&User> {
    users.iter().fold(None, |latest: Option<&User>, user| match latest {
        Some(current) if current.created_at() >= user.created_at() => latest,
        _ => Some(user),
    })
}
