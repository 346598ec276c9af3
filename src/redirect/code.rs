//! Redirect status code selection.

use crate::rules::model::RedirectRule;

/// Used when neither the rule nor the configuration sets a code.
pub const FALLBACK_REDIRECT_CODE: u16 = 301;

/// Status code for a redirect: the rule's code, else the configured default,
/// else 301. Non-positive values count as unset.
pub fn redirect_code(rule: Option<&RedirectRule>, default_code: Option<i64>) -> u16 {
    rule.and_then(|r| r.redirect_code)
        .and_then(positive_code)
        .or_else(|| default_code.and_then(positive_code))
        .unwrap_or(FALLBACK_REDIRECT_CODE)
}

fn positive_code(code: i64) -> Option<u16> {
    u16::try_from(code).ok().filter(|c| *c > 0)
}
