//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Root configuration for the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedirectorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Site URL and internal content links.
    pub site: SiteConfig,

    /// Redirect resolution settings.
    pub redirects: RedirectsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Site configuration used to build absolute redirect URLs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public base URL of the site (e.g., "https://www.example.com/").
    pub base_url: String,

    /// Internal content references mapped to site links,
    /// e.g. `contact = "/contact-us/"`.
    pub pages: BTreeMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".to_string(),
            pages: BTreeMap::new(),
        }
    }
}

/// What the HTTP layer does when the rule repository fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepositoryErrorPolicy {
    /// Respond 500 Internal Server Error.
    #[default]
    Fail,
    /// Behave as if no rules were configured.
    NotFound,
}

/// Redirect resolution settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectsConfig {
    /// Status code for rules without their own. Unset or non-positive means 301.
    pub default_redirect_code: Option<i64>,

    /// Rules file (TOML, or JSON with a `.json` extension).
    pub rules_path: Option<PathBuf>,

    /// Reload the rules file when it changes.
    pub watch_rules: bool,

    /// Redirect `.../pages/default.aspx` to its parent when no rule matched.
    pub legacy_fixup: bool,

    pub on_repository_error: RepositoryErrorPolicy,
}

impl Default for RedirectsConfig {
    fn default() -> Self {
        Self {
            default_redirect_code: None,
            rules_path: None,
            watch_rules: false,
            legacy_fixup: true,
            on_repository_error: RepositoryErrorPolicy::Fail,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config: RedirectorConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.redirects.legacy_fixup);
        assert_eq!(config.redirects.default_redirect_code, None);
        assert_eq!(config.redirects.on_repository_error, RepositoryErrorPolicy::Fail);
    }

    #[test]
    fn test_full_config() {
        let config: RedirectorConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [site]
            base_url = "https://www.example.com/"

            [site.pages]
            contact = "/contact-us/"

            [redirects]
            default_redirect_code = 308
            rules_path = "rules.toml"
            watch_rules = true
            legacy_fixup = false
            on_repository_error = "not_found"

            [timeouts]
            request_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.site.pages["contact"], "/contact-us/");
        assert_eq!(config.redirects.default_redirect_code, Some(308));
        assert_eq!(config.redirects.rules_path, Some(PathBuf::from("rules.toml")));
        assert_eq!(config.redirects.on_repository_error, RepositoryErrorPolicy::NotFound);
        assert_eq!(config.timeouts.request_secs, 5);
    }
}
