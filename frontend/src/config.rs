use serde::{Deserialize, Serialize};

const CONFIG_KEY: &str = "client_config";

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// Client-side settings. Everything has a default; a JSON override may be
/// placed in local storage under `client_config`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// How long a toast stays on screen.
    pub toast_ms: u32,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            toast_ms: 3000,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn load() -> Self {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                if let Ok(Some(raw)) = storage.get_item(CONFIG_KEY) {
                    return Self::from_json(&raw);
                }
            }
        }
        Self::default()
    }

    fn from_json(raw: &str) -> Self {
        let mut config = serde_json::from_str::<ClientConfig>(raw).unwrap_or_default();
        // "http://host/api/" and "http://host/api" must build the same URLs
        while config.api_base_url.ends_with('/') {
            config.api_base_url.pop();
        }
        if config.api_base_url.is_empty() {
            config.api_base_url = DEFAULT_API_BASE_URL.to_string();
        }
        config
    }

    pub fn level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = ClientConfig::from_json(r#"{"toast_ms": 500}"#);
        assert_eq!(config.toast_ms, 500);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn malformed_override_falls_back() {
        assert_eq!(ClientConfig::from_json("{not json"), ClientConfig::default());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ClientConfig::from_json(r#"{"api_base_url": "http://10.0.0.2:5000/api/"}"#);
        assert_eq!(config.api_base_url, "http://10.0.0.2:5000/api");
    }

    #[test]
    fn unknown_level_defaults_to_info() {
        let config = ClientConfig {
            log_level: "chatty".into(),
            ..ClientConfig::default()
        };
        assert_eq!(config.level(), tracing::Level::INFO);
        let config = ClientConfig {
            log_level: "debug".into(),
            ..ClientConfig::default()
        };
        assert_eq!(config.level(), tracing::Level::DEBUG);
    }
}
