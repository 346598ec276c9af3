//! Redirect matching subsystem.
//!
//! # Data Flow
//! ```text
//! Unmatched request (path, query)
//!     → normalize.rs (lowercase path and query, ASCII only)
//!     → candidates.rs (ordered lookups against the rule repository)
//!     → matcher.rs (querystring compatibility, first match wins)
//!     → destination.rs + code.rs (target URL, status)
//!     → legacy.rs (fallback when nothing matched)
//!     → Return: Resolution::Redirect or Resolution::NoMatch
//! ```
//!
//! # Design Decisions
//! - Exact rules before wildcard rules, deeper wildcards before shallower
//! - Querystring-constrained rules first only within one group
//! - Deterministic: same rules and request always give the same outcome
//! - No I/O of its own; the repository is the only collaborator that can fail

pub mod candidates;
pub mod code;
pub mod destination;
pub mod legacy;
pub mod matcher;
pub mod normalize;
pub mod query;
pub mod resolver;

pub use candidates::MatchCandidate;
pub use query::{parse_query, QueryMap, QueryValue};
pub use resolver::{RedirectDecision, RedirectResolver, Resolution};
