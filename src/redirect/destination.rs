//! Destination computation for a matched candidate.

use crate::redirect::candidates::MatchCandidate;
use crate::redirect::query::{build_query, QueryMap};
use crate::rules::model::RedirectionType;
use crate::site::LinkResolver;

/// Absolute redirect target for `candidate`.
///
/// The original (not lowercased) request query is re-attached verbatim; it is
/// not merged with any query the destination already carries.
pub fn resolve_destination<L: LinkResolver + ?Sized>(
    candidate: &MatchCandidate,
    original_query: &QueryMap,
    links: &L,
) -> String {
    let target = candidate.destination();
    let mut destination = match candidate.rule().redirection_type {
        RedirectionType::External => target.to_string(),
        RedirectionType::Internal => links.internal_link(target).unwrap_or_else(|| {
            tracing::debug!(reference = %target, "Unknown content reference, using it as a link");
            target.to_string()
        }),
    };

    if !original_query.is_empty() {
        destination.push('?');
        destination.push_str(&build_query(original_query));
    }

    links.absolute_url(&destination)
}
