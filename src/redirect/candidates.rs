//! Candidate generation.
//!
//! # Ordering
//! ```text
//! exact rules for /<path>            (constrained first)
//! wildcard rules for /<path minus 1>/*
//! ...
//! wildcard rules for /*              (root)
//! ```
//! Exact rules always precede wildcard rules, deeper prefixes precede
//! shallower ones, and within a group the repository order is kept.
//! No deduplication: a rule found in several groups is tested once per group.

use std::sync::Arc;

use crate::redirect::normalize::RequestPath;
use crate::rules::model::{RedirectRule, RedirectionType, WILDCARD_SUFFIX};
use crate::rules::repository::{RepositoryError, RuleRepository};

/// A rule considered for one request.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    rule: Arc<RedirectRule>,
    /// Destination rewritten with this request's trailing path.
    expanded_to: Option<String>,
}

impl MatchCandidate {
    pub fn new(rule: Arc<RedirectRule>) -> Self {
        Self {
            rule,
            expanded_to: None,
        }
    }

    fn expanded(rule: Arc<RedirectRule>, to: String) -> Self {
        Self {
            rule,
            expanded_to: Some(to),
        }
    }

    pub fn rule(&self) -> &RedirectRule {
        &self.rule
    }

    pub fn is_wildcard_expanded(&self) -> bool {
        self.expanded_to.is_some()
    }

    /// The destination to redirect to, before link resolution.
    pub fn destination(&self) -> &str {
        self.expanded_to.as_deref().unwrap_or(&self.rule.to)
    }
}

/// Wildcard base for a normalized prefix: `/<prefix>/*`, or `/*` at the root.
pub fn wildcard_base(prefix: &str) -> String {
    if prefix.is_empty() {
        WILDCARD_SUFFIX.to_string()
    } else {
        format!("/{}{}", prefix, WILDCARD_SUFFIX)
    }
}

/// Build the ordered candidate list for `path`.
pub fn generate_candidates<R: RuleRepository + ?Sized>(
    repo: &R,
    path: &RequestPath,
) -> Result<Vec<MatchCandidate>, RepositoryError> {
    let mut candidates: Vec<MatchCandidate> = repo
        .find_by_exact_base(&path.exact_base())?
        .into_iter()
        .map(MatchCandidate::new)
        .collect();
    let exact_count = candidates.len();

    let segments = path.segments();
    for pos in (0..segments.len()).rev() {
        let prefix = segments[..pos].join("/");
        for rule in repo.find_by_wildcard_base(&wildcard_base(&prefix))? {
            candidates.push(expand_wildcard(rule, path, &prefix));
        }
    }

    tracing::trace!(
        path = %path.normalized(),
        exact = exact_count,
        wildcard = candidates.len() - exact_count,
        "Redirect candidates generated"
    );
    Ok(candidates)
}

fn expand_wildcard(rule: Arc<RedirectRule>, path: &RequestPath, prefix: &str) -> MatchCandidate {
    if rule.redirection_type != RedirectionType::External {
        return MatchCandidate::new(rule);
    }
    match rule.to.strip_suffix(WILDCARD_SUFFIX) {
        Some(head) => {
            let to = format!("{}{}", head, path.remainder_after(prefix));
            MatchCandidate::expanded(rule, to)
        }
        None => MatchCandidate::new(rule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;

    fn destinations(candidates: &[MatchCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.destination()).collect()
    }

    #[test]
    fn test_wildcard_base() {
        assert_eq!(wildcard_base(""), "/*");
        assert_eq!(wildcard_base("a/b"), "/a/b/*");
    }

    #[test]
    fn test_order_exact_then_deep_to_shallow() {
        let set = RuleSet::new(vec![
            RedirectRule::external("/*", "https://root.test"),
            RedirectRule::external("/a/*", "https://a.test"),
            RedirectRule::external("/a/b/*", "https://ab.test"),
            RedirectRule::external("/a/b/c", "https://exact.test"),
            RedirectRule::external("/a/b/c/*", "https://never.test"),
        ]);

        let candidates = generate_candidates(&set, &RequestPath::new("/A/B/C/")).unwrap();
        assert_eq!(
            destinations(&candidates),
            vec![
                "https://exact.test",
                "https://ab.test",
                "https://a.test",
                "https://root.test",
            ]
        );
    }

    #[test]
    fn test_external_wildcard_expansion() {
        let set = RuleSet::new(vec![RedirectRule::external("/old/*", "https://new.example/*")]);

        let candidates = generate_candidates(&set, &RequestPath::new("/old/Page1/Sub")).unwrap();
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].is_wildcard_expanded());
        assert_eq!(candidates[0].destination(), "https://new.example/Page1/Sub");
    }

    #[test]
    fn test_internal_wildcard_not_expanded() {
        let set = RuleSet::new(vec![RedirectRule::internal("/old/*", "archive/*")]);

        let candidates = generate_candidates(&set, &RequestPath::new("/old/page1")).unwrap();
        assert!(!candidates[0].is_wildcard_expanded());
        assert_eq!(candidates[0].destination(), "archive/*");
    }

    #[test]
    fn test_root_wildcard_expansion() {
        let set = RuleSet::new(vec![RedirectRule::external("/*", "https://new.example/*")]);

        let candidates = generate_candidates(&set, &RequestPath::new("/Some/Page")).unwrap();
        assert_eq!(candidates[0].destination(), "https://new.example/Some/Page");

        let candidates = generate_candidates(&set, &RequestPath::new("/")).unwrap();
        assert_eq!(candidates[0].destination(), "https://new.example/");
    }

    #[test]
    fn test_wildcard_does_not_match_own_prefix() {
        let set = RuleSet::new(vec![RedirectRule::external("/old/*", "https://new.example/*")]);
        let candidates = generate_candidates(&set, &RequestPath::new("/old")).unwrap();
        assert!(candidates.is_empty());
    }
}
