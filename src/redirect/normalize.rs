//! Request normalization.
//!
//! Case folding is ASCII-only. Non-ASCII bytes are left untouched, which also
//! keeps byte offsets identical between the original and normalized path.

use crate::redirect::query::{QueryMap, QueryValue};

/// A request path in both its original and normalized forms.
///
/// Neither form carries the leading `/`; the normalized form is lowercased and
/// has no trailing `/`. The normalized form is always a byte-for-byte prefix of
/// the lowercased original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    original: String,
    normalized: String,
}

impl RequestPath {
    pub fn new(raw: &str) -> Self {
        let original = raw.trim().trim_start_matches('/').to_string();
        let normalized = original
            .to_ascii_lowercase()
            .trim_end_matches('/')
            .to_string();
        Self {
            original,
            normalized,
        }
    }

    /// The path as requested, minus the leading `/`.
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Base path used for exact-match lookups.
    pub fn exact_base(&self) -> String {
        format!("/{}", self.normalized)
    }

    pub fn segments(&self) -> Vec<&str> {
        self.normalized.split('/').collect()
    }

    /// The part of the original path beyond `prefix`, starting with `/`.
    ///
    /// `prefix` is a normalized prefix as produced from `segments()`; the
    /// original casing of the remainder is preserved.
    pub fn remainder_after(&self, prefix: &str) -> String {
        if prefix.is_empty() {
            return format!("/{}", self.original);
        }
        self.original.get(prefix.len()..).unwrap_or("").to_string()
    }
}

/// Recursively lowercase keys and scalar values (ASCII only).
pub fn normalize_query(query: &QueryMap) -> QueryMap {
    query
        .iter()
        .map(|(key, value)| (key.to_ascii_lowercase(), normalize_value(value)))
        .collect()
}

fn normalize_value(value: &QueryValue) -> QueryValue {
    match value {
        QueryValue::Scalar(s) => QueryValue::Scalar(s.to_ascii_lowercase()),
        QueryValue::Map(children) => QueryValue::Map(normalize_query(children)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::query::parse_query;

    #[test]
    fn test_path_forms() {
        let path = RequestPath::new("/Old/Page1/");
        assert_eq!(path.original(), "Old/Page1/");
        assert_eq!(path.normalized(), "old/page1");
        assert_eq!(path.exact_base(), "/old/page1");
        assert_eq!(path.segments(), vec!["old", "page1"]);
    }

    #[test]
    fn test_root_path() {
        let path = RequestPath::new("/");
        assert_eq!(path.normalized(), "");
        assert_eq!(path.exact_base(), "/");
        assert_eq!(path.segments(), vec![""]);
    }

    #[test]
    fn test_remainder_keeps_original_case() {
        let path = RequestPath::new("/Old/Page1");
        assert_eq!(path.remainder_after("old"), "/Page1");
        assert_eq!(path.remainder_after(""), "/Old/Page1");
    }

    #[test]
    fn test_non_ascii_untouched() {
        let path = RequestPath::new("/Ärger/ÜBER");
        assert_eq!(path.normalized(), "Ärger/Über");
        assert_eq!(path.remainder_after("Ärger"), "/ÜBER");
    }

    #[test]
    fn test_normalize_query_recursive() {
        let q = normalize_query(&parse_query("Lang=EN&Filter[Sort]=DESC"));
        assert_eq!(q["lang"].as_str(), Some("en"));
        let QueryValue::Map(filter) = &q["filter"] else {
            panic!("filter should be a map");
        };
        assert_eq!(filter["sort"].as_str(), Some("desc"));
    }
}
