//! Content references and absolute URLs.
//!
//! # Design Decisions
//! - Absolute URLs (anything with a scheme) are passed through untouched
//! - `/`-rooted links resolve against the site origin
//! - Other links resolve against the base URL, which always ends in `/`
//! - No path normalization: links are concatenated, not joined
//! - Site paths always stay on the site origin, whatever they look like

use std::collections::BTreeMap;
use thiserror::Error;
use url::Url;

use crate::config::schema::SiteConfig;

/// Resolves content references and relative links for redirect destinations.
pub trait LinkResolver: Send + Sync {
    /// Link for an internal content reference, if it is known.
    fn internal_link(&self, reference: &str) -> Option<String>;

    /// Absolute URL for a link.
    fn absolute_url(&self, link: &str) -> String;

    /// Absolute URL for a path on this site. Never leaves the site origin.
    fn site_url(&self, path: &str) -> String;
}

/// Errors building the site's link table.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL {0:?} must use http or https")]
    UnsupportedScheme(String),
}

/// Link resolution from the `[site]` configuration.
#[derive(Debug, Clone)]
pub struct SiteLinks {
    base_url: Url,
    pages: BTreeMap<String, String>,
}

impl SiteLinks {
    pub fn new(base_url: &str, pages: BTreeMap<String, String>) -> Result<Self, SiteError> {
        let mut url = Url::parse(base_url).map_err(|source| SiteError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(SiteError::UnsupportedScheme(base_url.to_string()));
        }

        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base_url: url,
            pages,
        })
    }

    pub fn from_config(config: &SiteConfig) -> Result<Self, SiteError> {
        Self::new(&config.base_url, config.pages.clone())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl LinkResolver for SiteLinks {
    fn internal_link(&self, reference: &str) -> Option<String> {
        self.pages.get(reference.trim()).cloned()
    }

    fn absolute_url(&self, link: &str) -> String {
        if Url::parse(link).is_ok() {
            return link.to_string();
        }
        if link.starts_with("//") {
            return format!("{}:{}", self.base_url.scheme(), link);
        }
        if link.starts_with('/') {
            return format!("{}{}", self.base_url.origin().ascii_serialization(), link);
        }
        format!("{}{}", self.base_url, link)
    }

    fn site_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.origin().ascii_serialization(),
            path.trim_start_matches(['/', '\\'])
        )
    }
}
