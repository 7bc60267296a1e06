//! Failures of a backend call.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Shown on the login, sign-up and registration forms.
pub const CONNECT_RETRY_MESSAGE: &str = "Unable to connect to server. Please try again.";
/// Shown on the dashboard and user management pages.
pub const CONNECT_MESSAGE: &str = "Unable to connect to server";

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// A response arrived but was not the expected JSON envelope.
    #[error("unreadable response: {0}")]
    Decode(String),

    /// The backend answered with `success: false`.
    #[error("rejected by server: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),
}

impl ApiError {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Decode(_))
    }

    /// Text for a toast. `fallback` replaces a rejection without a reason,
    /// `connect` replaces transport and parse failures.
    pub fn user_message(&self, fallback: &str, connect: &str) -> String {
        match self {
            Self::Rejected(Some(reason)) if !reason.trim().is_empty() => reason.clone(),
            Self::Rejected(_) => fallback.to_string(),
            Self::Network(_) | Self::Decode(_) => connect.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_reason_wins() {
        let err = ApiError::Rejected(Some("Email already registered".into()));
        assert_eq!(
            err.user_message("Registration failed", CONNECT_RETRY_MESSAGE),
            "Email already registered"
        );
    }

    #[test]
    fn missing_or_blank_reason_uses_fallback() {
        assert_eq!(
            ApiError::Rejected(None).user_message("Delete failed", CONNECT_MESSAGE),
            "Delete failed"
        );
        assert_eq!(
            ApiError::Rejected(Some("  ".into())).user_message("Delete failed", CONNECT_MESSAGE),
            "Delete failed"
        );
    }

    #[test]
    fn transport_and_parse_failures_read_as_connectivity() {
        for err in [
            ApiError::Network("refused".into()),
            ApiError::Decode("expected value at line 1".into()),
        ] {
            assert!(err.is_connectivity());
            assert_eq!(err.user_message("Login failed", CONNECT_RETRY_MESSAGE), CONNECT_RETRY_MESSAGE);
        }
    }

    #[test]
    fn display() {
        assert_eq!(ApiError::Rejected(None).to_string(), "rejected by server: no reason given");
        assert_eq!(ApiError::Network("down".into()).to_string(), "network error: down");
    }
}
