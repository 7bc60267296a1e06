//! REST calls to the expense backend.
//!
//! Every endpoint answers with `{success, data?, message?, error?}`. One
//! attempt per call: no retry, no timeout.

use gloo_net::http::Request;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Credentials, Expense, ExpensePayload, ExpenseStats, SessionUser, SignUp, User, UserPayload, UserStats,
};

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn into_data(self) -> ApiResult<T> {
        if !self.success {
            return Err(ApiError::Rejected(self.error));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("successful response without data".to_string()))
    }

    /// Success message of a write; `data` is not needed.
    pub fn into_ack(self) -> ApiResult<Option<String>> {
        if self.success {
            Ok(self.message)
        } else {
            Err(ApiError::Rejected(self.error))
        }
    }
}

/// The backend surface used by the pages.
#[allow(async_fn_in_trait)]
pub trait Api {
    async fn login(&self, credentials: &Credentials) -> ApiResult<SessionUser>;
    async fn sign_up(&self, account: &SignUp) -> ApiResult<Option<String>>;

    async fn list_users(&self) -> ApiResult<Vec<User>>;
    async fn create_user(&self, user: &UserPayload) -> ApiResult<Option<String>>;
    async fn update_user(&self, id: &str, user: &UserPayload) -> ApiResult<Option<String>>;
    async fn delete_user(&self, id: &str) -> ApiResult<Option<String>>;
    async fn user_stats(&self) -> ApiResult<UserStats>;

    async fn list_expenses(&self, user_id: &str) -> ApiResult<Vec<Expense>>;
    async fn create_expense(&self, expense: &ExpensePayload) -> ApiResult<Option<String>>;
    async fn update_expense(&self, id: &str, expense: &ExpensePayload) -> ApiResult<Option<String>>;
    async fn delete_expense(&self, id: &str) -> ApiResult<Option<String>>;
    async fn expense_stats(&self, user_id: &str) -> ApiResult<ExpenseStats>;
}

#[derive(Clone, Copy)]
enum Write {
    Post,
    Put,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpApi {
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        method: &str,
        url: &str,
        request: Result<Request, gloo_net::Error>,
    ) -> ApiResult<Envelope<T>> {
        let request = request.map_err(|err| ApiError::Decode(err.to_string()))?;
        tracing::debug!(method, url, "sending request");

        let response = request.send().await.map_err(|err| {
            tracing::warn!(method, url, %err, "request failed");
            ApiError::Network(err.to_string())
        })?;

        let status = response.status();
        response.json::<Envelope<T>>().await.map_err(|err| {
            tracing::warn!(method, url, status, %err, "response is not a JSON envelope");
            ApiError::Decode(format!("HTTP {status}: {err}"))
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Envelope<T>> {
        let url = self.url(path);
        self.exchange("GET", &url, Request::get(&url).build()).await
    }

    async fn get_for_user<T: DeserializeOwned>(&self, path: &str, user_id: &str) -> ApiResult<Envelope<T>> {
        let url = self.url(path);
        let request = Request::get(&url).query([("user_id", user_id)]).build();
        self.exchange("GET", &url, request).await
    }

    async fn write<T: DeserializeOwned, B: Serialize>(
        &self,
        verb: Write,
        path: &str,
        body: &B,
    ) -> ApiResult<Envelope<T>> {
        let url = self.url(path);
        let (method, builder) = match verb {
            Write::Post => ("POST", Request::post(&url)),
            Write::Put => ("PUT", Request::put(&url)),
        };
        self.exchange(method, &url, builder.json(body)).await
    }

    async fn delete(&self, path: &str) -> ApiResult<Envelope<IgnoredAny>> {
        let url = self.url(path);
        self.exchange("DELETE", &url, Request::delete(&url).build()).await
    }
}

impl Api for HttpApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<SessionUser> {
        self.write(Write::Post, "/users/login", credentials).await?.into_data()
    }

    async fn sign_up(&self, account: &SignUp) -> ApiResult<Option<String>> {
        self.write::<IgnoredAny, _>(Write::Post, "/users/register", account)
            .await?
            .into_ack()
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.get("/users").await?.into_data()
    }

    async fn create_user(&self, user: &UserPayload) -> ApiResult<Option<String>> {
        self.write::<IgnoredAny, _>(Write::Post, "/users", user).await?.into_ack()
    }

    async fn update_user(&self, id: &str, user: &UserPayload) -> ApiResult<Option<String>> {
        self.write::<IgnoredAny, _>(Write::Put, &format!("/users/{id}"), user)
            .await?
            .into_ack()
    }

    async fn delete_user(&self, id: &str) -> ApiResult<Option<String>> {
        self.delete(&format!("/users/{id}")).await?.into_ack()
    }

    async fn user_stats(&self) -> ApiResult<UserStats> {
        self.get("/users/stats/summary").await?.into_data()
    }

    async fn list_expenses(&self, user_id: &str) -> ApiResult<Vec<Expense>> {
        self.get_for_user("/expenses", user_id).await?.into_data()
    }

    async fn create_expense(&self, expense: &ExpensePayload) -> ApiResult<Option<String>> {
        self.write::<IgnoredAny, _>(Write::Post, "/expenses", expense)
            .await?
            .into_ack()
    }

    async fn update_expense(&self, id: &str, expense: &ExpensePayload) -> ApiResult<Option<String>> {
        self.write::<IgnoredAny, _>(Write::Put, &format!("/expenses/{id}"), expense)
            .await?
            .into_ack()
    }

    async fn delete_expense(&self, id: &str) -> ApiResult<Option<String>> {
        self.delete(&format!("/expenses/{id}")).await?.into_ack()
    }

    async fn expense_stats(&self, user_id: &str) -> ApiResult<ExpenseStats> {
        self.get(&format!("/expenses/stats/{user_id}")).await?.into_data()
    }
}


#[cfg(test)]
pub(crate) mod fake {
    //! In-memory backend for driving the pages in tests.

    use std::cell::RefCell;

    use super::*;

    #[derive(Default)]
    pub struct FakeApi {
        pub users: RefCell<Vec<User>>,
        pub expenses: RefCell<Vec<Expense>>,
        pub expense_stats: RefCell<ExpenseStats>,
        pub user_stats: RefCell<UserStats>,
        pub account: RefCell<Option<SessionUser>>,
        /// `(call prefix, error)`; the first matching entry fails the call.
        pub failures: RefCell<Vec<(String, ApiError)>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeApi {
        pub fn fail(&self, prefix: &str, error: ApiError) {
            self.failures.borrow_mut().push((prefix.to_string(), error));
        }

        pub fn go_offline(&self) {
            self.fail("", ApiError::Network("connection refused".into()));
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: String) -> ApiResult<()> {
            let failure = self
                .failures
                .borrow()
                .iter()
                .find(|(prefix, _)| call.starts_with(prefix.as_str()))
                .map(|(_, err)| err.clone());
            self.calls.borrow_mut().push(call);
            failure.map_or(Ok(()), Err)
        }

        fn to_expense(id: String, payload: &ExpensePayload) -> Expense {
            Expense {
                id,
                user_id: payload.user_id.clone(),
                title: payload.title.clone(),
                amount: payload.amount,
                category: payload.category.clone(),
                date: payload.date,
                description: Some(payload.description.clone()),
            }
        }
    }

    impl Api for FakeApi {
        async fn login(&self, credentials: &Credentials) -> ApiResult<SessionUser> {
            self.record("POST /users/login".into())?;
            self.account
                .borrow()
                .clone()
                .filter(|account| account.email.as_deref() == Some(credentials.email.as_str()))
                .ok_or_else(|| ApiError::Rejected(Some("Invalid email or password".into())))
        }

        async fn sign_up(&self, _account: &SignUp) -> ApiResult<Option<String>> {
            self.record("POST /users/register".into())?;
            Ok(Some("Account created".into()))
        }

        async fn list_users(&self) -> ApiResult<Vec<User>> {
            self.record("GET /users".into())?;
            Ok(self.users.borrow().clone())
        }

        async fn create_user(&self, user: &UserPayload) -> ApiResult<Option<String>> {
            self.record("POST /users".into())?;
            let id = format!("u{}", self.users.borrow().len() + 1);
            self.users.borrow_mut().push(User {
                id,
                name: user.name.clone(),
                email: user.email.clone(),
                mobile: user.mobile.clone(),
                age: Some(user.age),
                address: user.address.clone(),
                created_at: "2024-06-01T10:00:00".into(),
            });
            Ok(Some("User created successfully".into()))
        }

        async fn update_user(&self, id: &str, user: &UserPayload) -> ApiResult<Option<String>> {
            self.record(format!("PUT /users/{id}"))?;
            let mut users = self.users.borrow_mut();
            let existing = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| ApiError::Rejected(Some("User not found".into())))?;
            existing.name = user.name.clone();
            existing.email = user.email.clone();
            existing.mobile = user.mobile.clone();
            existing.age = Some(user.age);
            existing.address = user.address.clone();
            Ok(Some("User updated successfully".into()))
        }

        async fn delete_user(&self, id: &str) -> ApiResult<Option<String>> {
            self.record(format!("DELETE /users/{id}"))?;
            self.users.borrow_mut().retain(|u| u.id != id);
            Ok(Some("User deleted successfully".into()))
        }

        async fn user_stats(&self) -> ApiResult<UserStats> {
            self.record("GET /users/stats/summary".into())?;
            Ok(self.user_stats.borrow().clone())
        }

        async fn list_expenses(&self, user_id: &str) -> ApiResult<Vec<Expense>> {
            self.record(format!("GET /expenses?user_id={user_id}"))?;
            Ok(self
                .expenses
                .borrow()
                .iter()
                .filter(|e| e.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn create_expense(&self, expense: &ExpensePayload) -> ApiResult<Option<String>> {
            self.record("POST /expenses".into())?;
            let id = format!("e{}", self.expenses.borrow().len() + 1);
            self.expenses.borrow_mut().push(Self::to_expense(id, expense));
            Ok(Some("Expense added successfully".into()))
        }

        async fn update_expense(&self, id: &str, expense: &ExpensePayload) -> ApiResult<Option<String>> {
            self.record(format!("PUT /expenses/{id}"))?;
            let mut expenses = self.expenses.borrow_mut();
            let existing = expenses
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| ApiError::Rejected(Some("Expense not found".into())))?;
            *existing = Self::to_expense(id.to_string(), expense);
            Ok(Some("Expense updated successfully".into()))
        }

        async fn delete_expense(&self, id: &str) -> ApiResult<Option<String>> {
            self.record(format!("DELETE /expenses/{id}"))?;
            self.expenses.borrow_mut().retain(|e| e.id != id);
            Ok(Some("Expense deleted successfully".into()))
        }

        async fn expense_stats(&self, user_id: &str) -> ApiResult<ExpenseStats> {
            self.record(format!("GET /expenses/stats/{user_id}"))?;
            Ok(self.expense_stats.borrow().clone())
        }
    }
}
