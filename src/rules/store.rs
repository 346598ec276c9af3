//! Hot-swappable rule storage.

use std::sync::Arc;
use arc_swap::ArcSwap;

use crate::rules::repository::{RuleRepository, RuleSet};

/// Hands out the repository one request resolves against.
pub trait RuleSource: Send + Sync {
    fn current(&self) -> Arc<dyn RuleRepository>;
}

/// Holds the rule set currently in service.
///
/// Readers take a snapshot per request; a reload swaps the whole set without
/// blocking readers, so one resolution always sees one consistent set.
#[derive(Debug, Default)]
pub struct RuleStore {
    current: ArcSwap<RuleSet>,
}

impl RuleStore {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            current: ArcSwap::from_pointee(rules),
        }
    }

    /// The rule set in service right now.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.current.load_full()
    }

    /// Replace the rule set in service.
    pub fn replace(&self, rules: RuleSet) {
        let count = rules.len();
        self.current.store(Arc::new(rules));
        tracing::info!(rules = count, "Redirect rules swapped in");
    }
}

impl RuleSource for RuleStore {
    fn current(&self) -> Arc<dyn RuleRepository> {
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RedirectRule;

    #[test]
    fn test_snapshot_survives_replace() {
        let store = RuleStore::new(RuleSet::new(vec![RedirectRule::external(
            "/a",
            "https://first.test",
        )]));

        let before = store.snapshot();
        store.replace(RuleSet::new(vec![RedirectRule::external(
            "/a",
            "https://second.test",
        )]));
        let after = store.snapshot();

        assert_eq!(before.find_by_exact_base("/a").unwrap()[0].to, "https://first.test");
        assert_eq!(after.find_by_exact_base("/a").unwrap()[0].to, "https://second.test");
    }

    #[test]
    fn test_current_follows_replace() {
        let store = RuleStore::default();
        assert!(store.current().find_by_exact_base("/a").unwrap().is_empty());

        store.replace(RuleSet::new(vec![RedirectRule::external("/a", "https://a.test")]));
        assert_eq!(store.current().find_by_exact_base("/a").unwrap().len(), 1);
    }
}
