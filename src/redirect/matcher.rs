//! Querystring compatibility.
//!
//! # Responsibilities
//! - Decide whether a request's query satisfies a rule's constraint
//! - Pick the first candidate that does
//!
//! # Design Decisions
//! - Subset semantics: extra request parameters are ignored
//! - A falsy required value (`""`, `"0"`, empty map) accepts anything,
//!   including an absent parameter
//! - Constraints are parsed leniently; malformed pairs are dropped, so a
//!   constraint with nothing usable matches every request
//! - First match wins, no scoring

use crate::redirect::candidates::MatchCandidate;
use crate::redirect::normalize::normalize_query;
use crate::redirect::query::{parse_query, QueryMap};
use crate::rules::model::RedirectRule;

/// Returns true if `request_query` (already normalized) satisfies the rule.
pub fn querystring_matches(rule: &RedirectRule, request_query: &QueryMap) -> bool {
    let Some(constraint) = rule.querystring() else {
        return true;
    };

    let required = normalize_query(&parse_query(constraint));
    required.iter().all(|(key, expected)| {
        expected.is_falsy() || request_query.get(key) == Some(expected)
    })
}

/// The first candidate whose querystring constraint is satisfied.
pub fn first_match<'a>(
    candidates: &'a [MatchCandidate],
    request_query: &QueryMap,
) -> Option<&'a MatchCandidate> {
    candidates
        .iter()
        .find(|candidate| querystring_matches(candidate.rule(), request_query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn request(query: &str) -> QueryMap {
        normalize_query(&parse_query(query))
    }

    fn rule(constraint: &str) -> RedirectRule {
        RedirectRule::external("/a", "https://x.test").with_querystring(constraint)
    }

    #[test]
    fn test_no_constraint_always_matches() {
        let rule = RedirectRule::external("/a", "https://x.test");
        assert!(querystring_matches(&rule, &request("")));
        assert!(querystring_matches(&rule, &request("anything=1")));
    }

    #[test]
    fn test_subset_semantics() {
        let rule = rule("lang=en");
        assert!(querystring_matches(&rule, &request("lang=en&other=x")));
        assert!(querystring_matches(&rule, &request("LANG=EN")));
        assert!(!querystring_matches(&rule, &request("lang=fr")));
        assert!(!querystring_matches(&rule, &request("other=x")));
    }

    #[test]
    fn test_empty_required_value_is_wildcard() {
        let any_lang = rule("lang=");
        assert!(querystring_matches(&any_lang, &request("")));
        assert!(querystring_matches(&any_lang, &request("lang=fr")));

        let any_lang_page_two = rule("lang=&page=2");
        assert!(querystring_matches(&any_lang_page_two, &request("page=2")));
        assert!(!querystring_matches(&any_lang_page_two, &request("lang=en")));
    }

    #[test]
    fn test_constraint_case_insensitive() {
        let rule = rule("Campaign=Spring");
        assert!(querystring_matches(&rule, &request("campaign=SPRING")));
    }

    #[test]
    fn test_nested_constraint() {
        let rule = rule("filter[lang]=en");
        assert!(querystring_matches(&rule, &request("filter[lang]=en")));
        assert!(!querystring_matches(&rule, &request("filter[lang]=fr")));
        assert!(!querystring_matches(&rule, &request("filter=en")));
    }

    #[test]
    fn test_malformed_constraint_matches() {
        let rule = rule("=&[broken]=x");
        assert!(querystring_matches(&rule, &request("")));
    }

    #[test]
    fn test_first_match_wins() {
        let candidates = vec![
            MatchCandidate::new(Arc::new(
                RedirectRule::external("/a", "https://en.test").with_querystring("lang=en"),
            )),
            MatchCandidate::new(Arc::new(RedirectRule::external(
                "/a",
                "https://any.test",
            ))),
            MatchCandidate::new(Arc::new(RedirectRule::external(
                "/a",
                "https://later.test",
            ))),
        ];

        let hit = first_match(&candidates, &request("lang=en")).unwrap();
        assert_eq!(hit.destination(), "https://en.test");

        let hit = first_match(&candidates, &request("lang=de")).unwrap();
        assert_eq!(hit.destination(), "https://any.test");
    }
}
