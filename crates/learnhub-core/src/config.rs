//! Client configuration

use serde::{Deserialize, Serialize};

use crate::reconciler::ReconcilePolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_LOG_CAPACITY: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// REST API root, without trailing slash
    pub api_base_url: String,
    pub policy: ReconcilePolicy,
    /// Lines kept by the in-memory log buffer
    pub log_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            policy: ReconcilePolicy::default(),
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Override the API root when a value is given (e.g. a build-time env var)
    pub fn with_api_base_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ClientConfig::from_json(r#"{"policy": "server-authoritative"}"#).unwrap();
        assert_eq!(config.policy, ReconcilePolicy::ServerAuthoritative);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.log_capacity, 500);
    }

    #[test]
    fn test_api_override() {
        let config = ClientConfig::default().with_api_base_url(Some("https://api.example.org/"));
        assert_eq!(config.api_base_url, "https://api.example.org");
        let config = ClientConfig::default().with_api_base_url(Some("  "));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
