//! Form validation. Nothing here touches the network or the DOM: every form
//! turns its raw input strings into either a request body or a set of
//! per-field messages.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::models::{Category, Credentials, Expense, ExpensePayload, SignUp, User, UserPayload};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub const MOBILE_DIGITS: usize = 10;

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Registration insists on exactly ten digits while the edit form accepts
/// ten or more. Both rules are kept until the intended one is confirmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MobileRule {
    Exactly10,
    AtLeast10,
}

pub fn validate_mobile(mobile: &str, rule: MobileRule) -> bool {
    let count = digits_only(mobile).len();
    match rule {
        MobileRule::Exactly10 => count == MOBILE_DIGITS,
        MobileRule::AtLeast10 => count >= MOBILE_DIGITS,
    }
}

/// Live filter for the registration mobile input.
pub fn sanitize_mobile_input(raw: &str) -> String {
    digits_only(raw).chars().take(MOBILE_DIGITS).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintTone {
    Neutral,
    Warning,
    Success,
}

pub fn mobile_hint(value: &str) -> (String, HintTone) {
    match value.len() {
        0 => ("Enter exactly 10 digits".to_string(), HintTone::Neutral),
        n if n < MOBILE_DIGITS => (format!("{n}/10 digits entered"), HintTone::Warning),
        MOBILE_DIGITS => ("✓ 10 digits entered".to_string(), HintTone::Success),
        _ => ("Enter exactly 10 digits".to_string(), HintTone::Neutral),
    }
}

/// Blur-time check of a required input.
pub fn required_on_blur(label: &str, value: &str) -> Option<String> {
    value
        .trim()
        .is_empty()
        .then(|| format!("{} is required", label.trim_end_matches(" *")))
}

/// Messages keyed by field. Submission goes ahead only when this is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldErrors<F: Ord>(BTreeMap<F, String>);

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<F: Ord> FieldErrors<F> {
    pub fn set(&mut self, field: F, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: &F) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &F) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn check_email<F: Ord>(errors: &mut FieldErrors<F>, field: F, email: &str) {
    if email.is_empty() {
        errors.set(field, "Email is required");
    } else if !validate_email(email) {
        errors.set(field, "Invalid email format");
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoginField {
    Email,
    Password,
}

impl LoginField {
    pub fn label(self) -> &'static str {
        match self {
            LoginField::Email => "Email",
            LoginField::Password => "Password",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    pub fn set(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }

    pub fn validate(&self) -> Result<Credentials, FieldErrors<LoginField>> {
        let mut errors = FieldErrors::default();
        let email = self.email.trim();
        check_email(&mut errors, LoginField::Email, email);
        if self.password.is_empty() {
            errors.set(LoginField::Password, "Password is required");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Credentials {
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SignUpField {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

impl SignUpField {
    pub fn label(self) -> &'static str {
        match self {
            SignUpField::Username => "Username",
            SignUpField::Email => "Email",
            SignUpField::Password => "Password",
            SignUpField::ConfirmPassword => "Confirm Password",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn value(&self, field: SignUpField) -> &str {
        match field {
            SignUpField::Username => &self.username,
            SignUpField::Email => &self.email,
            SignUpField::Password => &self.password,
            SignUpField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn set(&mut self, field: SignUpField, value: String) {
        match field {
            SignUpField::Username => self.username = value,
            SignUpField::Email => self.email = value,
            SignUpField::Password => self.password = value,
            SignUpField::ConfirmPassword => self.confirm_password = value,
        }
    }

    pub fn validate(&self) -> Result<SignUp, FieldErrors<SignUpField>> {
        let mut errors = FieldErrors::default();
        let username = self.username.trim();
        let email = self.email.trim();

        if username.chars().count() < 3 {
            errors.set(SignUpField::Username, "Username must be at least 3 characters");
        }
        check_email(&mut errors, SignUpField::Email, email);
        if self.password.chars().count() < 6 {
            errors.set(SignUpField::Password, "Password must be at least 6 characters");
        }
        if self.password != self.confirm_password {
            errors.set(SignUpField::ConfirmPassword, "Passwords do not match");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(SignUp {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum UserField {
    Name,
    Email,
    Mobile,
    Age,
    Address,
}

impl UserField {
    pub const ALL: [UserField; 5] = [
        UserField::Name,
        UserField::Email,
        UserField::Mobile,
        UserField::Age,
        UserField::Address,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UserField::Name => "Full Name",
            UserField::Email => "Email Address",
            UserField::Mobile => "Mobile Number",
            UserField::Age => "Age",
            UserField::Address => "Address",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserFormMode {
    Register,
    Edit,
}

impl UserFormMode {
    pub fn mobile_rule(self) -> MobileRule {
        match self {
            Self::Register => MobileRule::Exactly10,
            Self::Edit => MobileRule::AtLeast10,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub age: String,
    pub address: String,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            mobile: user.mobile.clone(),
            age: user.age.map(|age| age.to_string()).unwrap_or_default(),
            address: user.address.clone(),
        }
    }

    pub fn value(&self, field: UserField) -> &str {
        match field {
            UserField::Name => &self.name,
            UserField::Email => &self.email,
            UserField::Mobile => &self.mobile,
            UserField::Age => &self.age,
            UserField::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: UserField, value: String) {
        match field {
            UserField::Name => self.name = value,
            UserField::Email => self.email = value,
            UserField::Mobile => self.mobile = value,
            UserField::Age => self.age = value,
            UserField::Address => self.address = value,
        }
    }

    pub fn validate(&self, mode: UserFormMode) -> Result<UserPayload, FieldErrors<UserField>> {
        let mut errors = FieldErrors::default();
        let name = self.name.trim();
        let email = self.email.trim();
        let mobile = self.mobile.trim();
        let address = self.address.trim();

        if name.chars().count() < 2 {
            errors.set(UserField::Name, "Name must be at least 2 characters");
        }

        match mode {
            UserFormMode::Register => check_email(&mut errors, UserField::Email, email),
            UserFormMode::Edit => {
                if !validate_email(email) {
                    errors.set(UserField::Email, "Invalid email address");
                }
            }
        }

        let mobile_ok = !mobile.is_empty() && validate_mobile(mobile, mode.mobile_rule());
        match mode {
            _ if mobile_ok => {}
            UserFormMode::Register if mobile.is_empty() => {
                errors.set(UserField::Mobile, "Mobile number is required");
            }
            UserFormMode::Register => {
                let entered = digits_only(mobile).len();
                let message = if entered < MOBILE_DIGITS {
                    format!("Mobile number must be exactly 10 digits (you entered {entered})")
                } else {
                    "Mobile number must be exactly 10 digits".to_string()
                };
                errors.set(UserField::Mobile, message);
            }
            UserFormMode::Edit => errors.set(UserField::Mobile, "Invalid mobile number"),
        }

        let age = self
            .age
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|age| (1..=150).contains(age));
        if age.is_none() {
            errors.set(UserField::Age, "Age must be between 1 and 150");
        }

        if address.chars().count() < 5 {
            errors.set(UserField::Address, "Address must be at least 5 characters");
        }

        match age {
            Some(age) if errors.is_empty() => Ok(UserPayload {
                name: name.to_string(),
                email: email.to_string(),
                mobile: mobile.to_string(),
                age,
                address: address.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExpenseField {
    Title,
    Amount,
    Category,
    Date,
    Description,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseForm {
    pub title: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub description: String,
}

impl ExpenseForm {
    /// Blank form with the date preset, as the "add" modal opens.
    pub fn dated(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            title: expense.title.clone(),
            amount: expense.amount.normalize().to_string(),
            category: expense.category.to_string(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            description: expense.description.clone().unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: ExpenseField, value: String) {
        match field {
            ExpenseField::Title => self.title = value,
            ExpenseField::Amount => self.amount = value,
            ExpenseField::Category => self.category = value,
            ExpenseField::Date => self.date = value,
            ExpenseField::Description => self.description = value,
        }
    }

    pub fn validate(&self, user_id: &str) -> Result<ExpensePayload, FieldErrors<ExpenseField>> {
        let mut errors = FieldErrors::default();
        let title = self.title.trim();

        if title.chars().count() < 3 {
            errors.set(ExpenseField::Title, "Title must be at least 3 characters");
        }

        let raw_amount = self.amount.trim();
        // number inputs may hand over exponent forms such as "1e3"
        let amount = raw_amount
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(raw_amount))
            .ok()
            .filter(|amount| amount.is_sign_positive() && !amount.is_zero());
        if amount.is_none() {
            errors.set(ExpenseField::Amount, "Amount must be greater than 0");
        }

        let category = Category::parse(&self.category);
        if category.is_none() {
            errors.set(ExpenseField::Category, "Please select a category");
        }

        let raw_date = self.date.trim();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").ok();
        if raw_date.is_empty() {
            errors.set(ExpenseField::Date, "Date is required");
        } else if date.is_none() {
            errors.set(ExpenseField::Date, "Enter a valid date");
        }

        match (amount, category, date) {
            (Some(amount), Some(category), Some(date)) if errors.is_empty() => Ok(ExpensePayload {
                user_id: user_id.to_string(),
                title: title.to_string(),
                amount,
                category,
                date,
                description: self.description.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@b.com", true)]
    #[case("first.last+tag@mail.example.org", true)]
    #[case("abc", false)]
    #[case("a@b", false)]
    #[case("a b@c.com", false)]
    #[case("@b.com", false)]
    #[case("", false)]
    fn email_shape(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(validate_email(input), expected);
    }

    #[rstest]
    #[case("123-456-7890", MobileRule::Exactly10, true)]
    #[case("(123) 456 7890", MobileRule::Exactly10, true)]
    #[case("123456789", MobileRule::Exactly10, false)]
    #[case("+1 123 456 7890", MobileRule::Exactly10, false)]
    #[case("+1 123 456 7890", MobileRule::AtLeast10, true)]
    #[case("12345", MobileRule::AtLeast10, false)]
    fn mobile_rules(#[case] input: &str, #[case] rule: MobileRule, #[case] expected: bool) {
        assert_eq!(validate_mobile(input, rule), expected);
    }

    #[test]
    fn mobile_digits_are_stripped() {
        assert_eq!(digits_only("123-456-7890"), "1234567890");
        assert_eq!(sanitize_mobile_input("98a7-65 43210 99"), "9876543210");
    }

    #[test]
    fn mobile_hint_tracks_progress() {
        assert_eq!(mobile_hint("").1, HintTone::Neutral);
        assert_eq!(mobile_hint("1234"), ("4/10 digits entered".to_string(), HintTone::Warning));
        assert_eq!(mobile_hint("1234567890").1, HintTone::Success);
    }

    #[test]
    fn blur_check_strips_required_marker() {
        assert_eq!(required_on_blur("Full Name *", "  "), Some("Full Name is required".to_string()));
        assert_eq!(required_on_blur("Email", "x"), None);
    }

    #[test]
    fn login_reports_every_missing_field() {
        let errors = LoginForm::default().validate().unwrap_err();
        assert_eq!(errors.get(&LoginField::Email), Some("Email is required"));
        assert_eq!(errors.get(&LoginField::Password), Some("Password is required"));

        let errors = LoginForm {
            email: "not-an-email".into(),
            password: "secret".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get(&LoginField::Email), Some("Invalid email format"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn login_trims_email_but_not_password() {
        let creds = LoginForm {
            email: "  a@b.com ".into(),
            password: " pw ".into(),
        }
        .validate()
        .unwrap();
        assert_eq!(creds.email, "a@b.com");
        assert_eq!(creds.password, " pw ");
    }

    #[test]
    fn sign_up_rules() {
        let errors = SignUpForm {
            username: "ab".into(),
            email: "ab@cd.io".into(),
            password: "12345".into(),
            confirm_password: "54321".into(),
        }
        .validate()
        .unwrap_err();
        assert!(errors.get(&SignUpField::Username).is_some());
        assert!(errors.get(&SignUpField::Email).is_none());
        assert_eq!(
            errors.get(&SignUpField::Password),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(errors.get(&SignUpField::ConfirmPassword), Some("Passwords do not match"));
    }

    fn user_form() -> UserForm {
        UserForm {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            mobile: "1234567890".into(),
            age: "36".into(),
            address: "12 St James Sq".into(),
        }
    }

    #[test]
    fn valid_user_form_builds_payload() {
        let payload = user_form().validate(UserFormMode::Register).unwrap();
        assert_eq!(payload.age, 36);
        assert_eq!(payload.mobile, "1234567890");
    }

    #[rstest]
    #[case("1e3", Decimal::new(1000, 0))]
    #[case("2.5E1", Decimal::new(25, 0))]
    #[case("12.40", Decimal::new(1240, 2))]
    fn amounts_accept_exponent_forms(#[case] raw: &str, #[case] expected: Decimal) {
        let form = ExpenseForm {
            title: "Groceries".into(),
            amount: raw.into(),
            category: "Food".into(),
            date: "2024-05-01".into(),
            description: String::new(),
        };
        assert_eq!(form.validate("u1").unwrap().amount, expected);
    }

    #[rstest]
    #[case("0")]
    #[case("151")]
    #[case("")]
    #[case("thirty")]
    fn age_out_of_range(#[case] age: &str) {
        let form = UserForm {
            age: age.into(),
            ..user_form()
        };
        let errors = form.validate(UserFormMode::Register).unwrap_err();
        assert_eq!(errors.get(&UserField::Age), Some("Age must be between 1 and 150"));
    }

    #[test]
    fn register_and_edit_disagree_on_long_mobiles() {
        let form = UserForm {
            mobile: "+44 1234 567890".into(),
            ..user_form()
        };
        let errors = form.validate(UserFormMode::Register).unwrap_err();
        assert_eq!(
            errors.get(&UserField::Mobile),
            Some("Mobile number must be exactly 10 digits")
        );
        assert!(form.validate(UserFormMode::Edit).is_ok());
    }

    #[test]
    fn register_reports_short_mobile_count() {
        let form = UserForm {
            mobile: "555-01".into(),
            ..user_form()
        };
        let errors = form.validate(UserFormMode::Register).unwrap_err();
        assert_eq!(
            errors.get(&UserField::Mobile),
            Some("Mobile number must be exactly 10 digits (you entered 5)")
        );
        let errors = form.validate(UserFormMode::Edit).unwrap_err();
        assert_eq!(errors.get(&UserField::Mobile), Some("Invalid mobile number"));
    }

    #[test]
    fn edit_uses_its_own_email_message() {
        let form = UserForm {
            email: String::new(),
            ..user_form()
        };
        assert_eq!(
            form.validate(UserFormMode::Edit).unwrap_err().get(&UserField::Email),
            Some("Invalid email address")
        );
        assert_eq!(
            form.validate(UserFormMode::Register).unwrap_err().get(&UserField::Email),
            Some("Email is required")
        );
    }

    #[test]
    fn empty_expense_form_flags_all_required_fields() {
        let errors = ExpenseForm::default().validate("u1").unwrap_err();
        assert_eq!(errors.get(&ExpenseField::Title), Some("Title must be at least 3 characters"));
        assert_eq!(errors.get(&ExpenseField::Amount), Some("Amount must be greater than 0"));
        assert_eq!(errors.get(&ExpenseField::Category), Some("Please select a category"));
        assert_eq!(errors.get(&ExpenseField::Date), Some("Date is required"));
        assert!(errors.get(&ExpenseField::Description).is_none());
    }

    #[rstest]
    #[case("0")]
    #[case("-4.50")]
    #[case("abc")]
    #[case("-1e2")]
    fn non_positive_amounts_rejected(#[case] amount: &str) {
        let form = ExpenseForm {
            title: "Groceries".into(),
            amount: amount.into(),
            category: "Food".into(),
            date: "2024-05-01".into(),
            description: String::new(),
        };
        let errors = form.validate("u1").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get(&ExpenseField::Amount).is_some());
    }

    #[test]
    fn expense_form_round_trips_an_expense() {
        let expense = Expense {
            id: "e1".into(),
            user_id: "u1".into(),
            title: "Bus pass".into(),
            amount: Decimal::new(4500, 2),
            category: Category::Transport,
            date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            description: Some("monthly".into()),
        };
        let form = ExpenseForm::from_expense(&expense);
        assert_eq!(form.amount, "45");
        assert_eq!(form.date, "2024-04-02");
        let payload = form.validate("u1").unwrap();
        assert_eq!(payload.amount, expense.amount);
        assert_eq!(payload.category, Category::Transport);
        assert_eq!(payload.description, "monthly");
    }

    #[test]
    fn add_form_is_dated_today() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(ExpenseForm::dated(today).date, "2024-12-31");
    }
}
