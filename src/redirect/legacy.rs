//! Fallback for legacy `pages/default.aspx` URLs.

use crate::redirect::normalize::RequestPath;

/// Trailing segment left over from the previous site's URL scheme.
pub const LEGACY_SUFFIX: &str = "pages/default.aspx";

/// Link for a request ending in the legacy suffix, with the suffix stripped
/// from the original path. Query parameters are not carried over.
pub fn legacy_fixup(path: &RequestPath) -> Option<String> {
    if !path.normalized().ends_with(LEGACY_SUFFIX) {
        return None;
    }

    let original = path.original().trim_end_matches('/');
    let cut = original.len().checked_sub(LEGACY_SUFFIX.len())?;
    original.get(..cut).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_suffix_any_case() {
        assert_eq!(
            legacy_fixup(&RequestPath::new("/site/pages/default.aspx")).as_deref(),
            Some("site/")
        );
        assert_eq!(
            legacy_fixup(&RequestPath::new("/Site/Pages/Default.ASPX")).as_deref(),
            Some("Site/")
        );
        assert_eq!(
            legacy_fixup(&RequestPath::new("/pages/default.aspx")).as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_other_paths_untouched() {
        assert_eq!(legacy_fixup(&RequestPath::new("/site/pages/other.aspx")), None);
        assert_eq!(legacy_fixup(&RequestPath::new("/totally/unknown")), None);
    }

    #[test]
    fn test_suffix_inside_segment() {
        assert_eq!(
            legacy_fixup(&RequestPath::new("/mypages/default.aspx")).as_deref(),
            Some("my")
        );
    }
}
