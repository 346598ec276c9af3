//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, redirect codes are 3xx)
//! - Check settings that depend on each other
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RedirectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::RedirectorConfig;
use crate::site::SiteLinks;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("site.base_url: {0}")]
    BaseUrl(String),

    #[error("redirects.default_redirect_code {0} is not a 3xx status")]
    DefaultRedirectCode(i64),

    #[error("redirects.watch_rules requires redirects.rules_path")]
    WatchWithoutRules,

    #[error("timeouts.request_secs must be greater than 0")]
    RequestTimeout,
}

/// Check a parsed configuration.
pub fn validate_config(config: &RedirectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if let Err(e) = SiteLinks::from_config(&config.site) {
        errors.push(ValidationError::BaseUrl(e.to_string()));
    }

    if let Some(code) = config.redirects.default_redirect_code {
        // Non-positive means "unset".
        if code > 0 && !(300..=399).contains(&code) {
            errors.push(ValidationError::DefaultRedirectCode(code));
        }
    }

    if config.redirects.watch_rules && config.redirects.rules_path.is_none() {
        errors.push(ValidationError::WatchWithoutRules);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RedirectorConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RedirectorConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.site.base_url = "ftp://files.test/".into();
        config.redirects.default_redirect_code = Some(200);
        config.redirects.watch_rules = true;
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors[2], ValidationError::DefaultRedirectCode(200));
    }

    #[test]
    fn test_non_positive_default_code_means_unset() {
        let mut config = RedirectorConfig::default();
        config.redirects.default_redirect_code = Some(0);
        assert!(validate_config(&config).is_ok());
        config.redirects.default_redirect_code = Some(-1);
        assert!(validate_config(&config).is_ok());
    }
}
