//! Redirect rule definitions.

use serde::{Deserialize, Serialize};

/// How a rule's `to` field is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RedirectionType {
    /// `to` is a content reference resolved through the site's link table.
    #[default]
    Internal,
    /// `to` is an absolute URL used verbatim.
    External,
}

/// A stored redirect rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RedirectRule {
    /// Path pattern, always rooted at `/`. May end in the `/*` wildcard marker.
    pub from_base: String,

    /// Required query parameters, query-string encoded (e.g. `lang=en&page=`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_querystring: Option<String>,

    /// Destination. Ends in `/*` to propagate the unmatched path suffix.
    pub to: String,

    #[serde(default)]
    pub redirection_type: RedirectionType,

    /// Per-rule status code override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_code: Option<i64>,
}

/// Marker terminating a wildcard base or destination.
pub const WILDCARD_SUFFIX: &str = "/*";

impl RedirectRule {
    /// Create an external rule with no querystring constraint.
    pub fn external(from_base: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from_base: from_base.into(),
            from_querystring: None,
            to: to.into(),
            redirection_type: RedirectionType::External,
            redirect_code: None,
        }
    }

    /// Create an internal rule with no querystring constraint.
    pub fn internal(from_base: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            redirection_type: RedirectionType::Internal,
            ..Self::external(from_base, to)
        }
    }

    pub fn with_querystring(mut self, querystring: impl Into<String>) -> Self {
        self.from_querystring = Some(querystring.into());
        self
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.redirect_code = Some(code);
        self
    }

    /// The querystring constraint, or `None` when absent or blank.
    pub fn querystring(&self) -> Option<&str> {
        self.from_querystring
            .as_deref()
            .map(str::trim)
            .filter(|qs| !qs.is_empty())
    }

    /// Bring `from_base` into the form lookups compare against:
    /// lowercase (ASCII), rooted at `/`, no trailing slash.
    pub fn normalized(mut self) -> Self {
        self.from_base = normalize_base(&self.from_base);
        self
    }
}

/// Normalize a stored base path. The root stays `/` and the wildcard marker is kept.
pub fn normalize_base(base: &str) -> String {
    let lowered = base.trim().to_ascii_lowercase();
    let trimmed = lowered.trim_matches('/');
    format!("/{}", trimmed)
}
