//! Rule lookup.
//!
//! # Responsibilities
//! - Answer exact-base and wildcard-base lookups
//! - Order each result with querystring-constrained rules first
//!
//! # Design Decisions
//! - Results are pre-ordered; callers never sort or filter
//! - Buckets are sorted by `from_querystring` descending, absent last,
//!   keeping file order for ties
//! - `RuleSet` is immutable and shared through `Arc`

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::rules::model::{RedirectRule, WILDCARD_SUFFIX};

/// Errors surfaced by a rule repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    #[error("rule store unavailable: {0}")]
    Unavailable(String),
}

/// Source of redirect rules consulted by the resolver.
pub trait RuleRepository: Send + Sync {
    /// Rules whose `from_base` equals `base`.
    fn find_by_exact_base(&self, base: &str) -> Result<Vec<Arc<RedirectRule>>, RepositoryError>;

    /// Rules whose `from_base` equals `base`, which must end in `/*`.
    fn find_by_wildcard_base(&self, base: &str)
        -> Result<Vec<Arc<RedirectRule>>, RepositoryError>;
}

/// In-memory rule set indexed by normalized `from_base`.
#[derive(Debug, Default)]
pub struct RuleSet {
    by_base: HashMap<String, Vec<Arc<RedirectRule>>>,
    len: usize,
}

impl RuleSet {
    /// Build a rule set. Every rule's base is normalized on the way in.
    pub fn new(rules: impl IntoIterator<Item = RedirectRule>) -> Self {
        let mut by_base: HashMap<String, Vec<Arc<RedirectRule>>> = HashMap::new();
        let mut len = 0;

        for rule in rules {
            let rule = rule.normalized();
            by_base
                .entry(rule.from_base.clone())
                .or_default()
                .push(Arc::new(rule));
            len += 1;
        }

        for bucket in by_base.values_mut() {
            bucket.sort_by(|a, b| b.querystring().cmp(&a.querystring()));
        }

        Self { by_base, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn lookup(&self, base: &str) -> Vec<Arc<RedirectRule>> {
        self.by_base.get(base).cloned().unwrap_or_default()
    }
}

impl RuleRepository for RuleSet {
    fn find_by_exact_base(&self, base: &str) -> Result<Vec<Arc<RedirectRule>>, RepositoryError> {
        Ok(self.lookup(base))
    }

    fn find_by_wildcard_base(
        &self,
        base: &str,
    ) -> Result<Vec<Arc<RedirectRule>>, RepositoryError> {
        if !base.ends_with(WILDCARD_SUFFIX) {
            return Ok(Vec::new());
        }
        Ok(self.lookup(base))
    }
}
