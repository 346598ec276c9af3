//! Redirect resolution for unmatched requests.
//!
//! # Flow
//! ```text
//! path + query
//!     → normalize.rs (lowercase, trim)
//!     → candidates.rs (exact, then wildcard deepest → shallowest)
//!     → matcher.rs (first candidate whose querystring is satisfied)
//!     → destination.rs + code.rs → Resolution::Redirect
//! no candidate:
//!     → legacy.rs (pages/default.aspx) → Resolution::Redirect
//!     → Resolution::NoMatch
//! ```
//!
//! Resolution is synchronous and side-effect free. Repository errors are
//! returned to the caller untouched.

use serde::Serialize;

use crate::config::schema::RedirectsConfig;
use crate::redirect::candidates::generate_candidates;
use crate::redirect::code::redirect_code;
use crate::redirect::destination::resolve_destination;
use crate::redirect::legacy::legacy_fixup;
use crate::redirect::matcher::first_match;
use crate::redirect::normalize::{normalize_query, RequestPath};
use crate::redirect::query::QueryMap;
use crate::rules::repository::{RepositoryError, RuleRepository};
use crate::site::LinkResolver;

/// Where to send the client, and with which status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectDecision {
    pub destination_url: String,
    pub status_code: u16,
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Redirect(RedirectDecision),
    /// No rule applies; the caller carries on with its not-found handling.
    NoMatch,
}

impl Resolution {
    pub fn decision(&self) -> Option<&RedirectDecision> {
        match self {
            Resolution::Redirect(decision) => Some(decision),
            Resolution::NoMatch => None,
        }
    }
}

/// Resolves unmatched requests against a rule repository.
#[derive(Debug, Clone)]
pub struct RedirectResolver<L> {
    links: L,
    default_redirect_code: Option<i64>,
    legacy_fixup: bool,
}

impl<L: LinkResolver> RedirectResolver<L> {
    pub fn new(links: L) -> Self {
        Self {
            links,
            default_redirect_code: None,
            legacy_fixup: true,
        }
    }

    pub fn from_config(links: L, config: &RedirectsConfig) -> Self {
        Self::new(links)
            .with_default_code(config.default_redirect_code)
            .with_legacy_fixup(config.legacy_fixup)
    }

    pub fn with_default_code(mut self, code: Option<i64>) -> Self {
        self.default_redirect_code = code;
        self
    }

    pub fn with_legacy_fixup(mut self, enabled: bool) -> Self {
        self.legacy_fixup = enabled;
        self
    }

    /// Decide whether the request at `request_path` with `request_query`
    /// should be redirected.
    ///
    /// `request_query` is the request's query as received; matching uses a
    /// lowercased copy while the destination re-attaches the original.
    pub fn resolve<R: RuleRepository + ?Sized>(
        &self,
        repo: &R,
        request_path: &str,
        request_query: &QueryMap,
    ) -> Result<Resolution, RepositoryError> {
        let path = RequestPath::new(request_path);
        let query = normalize_query(request_query);

        let candidates = generate_candidates(repo, &path)?;
        if let Some(candidate) = first_match(&candidates, &query) {
            let decision = RedirectDecision {
                destination_url: resolve_destination(candidate, request_query, &self.links),
                status_code: redirect_code(Some(candidate.rule()), self.default_redirect_code),
            };
            tracing::debug!(
                path = %request_path,
                rule = %candidate.rule().from_base,
                destination = %decision.destination_url,
                status = decision.status_code,
                "Redirect rule matched"
            );
            return Ok(Resolution::Redirect(decision));
        }

        if self.legacy_fixup {
            if let Some(link) = legacy_fixup(&path) {
                let decision = RedirectDecision {
                    destination_url: self.links.site_url(&link),
                    status_code: redirect_code(None, self.default_redirect_code),
                };
                tracing::debug!(
                    path = %request_path,
                    destination = %decision.destination_url,
                    "Legacy path redirected"
                );
                return Ok(Resolution::Redirect(decision));
            }
        }

        tracing::trace!(path = %request_path, candidates = candidates.len(), "No redirect");
        Ok(Resolution::NoMatch)
    }
}
