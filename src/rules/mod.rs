//! Redirect rule storage subsystem.
//!
//! # Data Flow
//! ```text
//! rules file (TOML/JSON)
//!     → loader.rs (parse, normalize, validate)
//!     → repository.rs (RuleSet indexed by from_base, constrained rules first)
//!     → store.rs (ArcSwap<RuleSet>, one snapshot per request)
//!
//! On file change:
//!     watcher.rs detects change, waits for writes to settle
//!     → loader.rs loads new rules
//!     → store.rs atomically swaps the RuleSet
//! ```
//!
//! # Design Decisions
//! - Rule sets are immutable once built; a reload replaces the whole set
//! - Lookups are exact string matches on the normalized base path
//! - A failed reload never clears the rules currently in service

pub mod loader;
pub mod model;
pub mod repository;
pub mod store;
pub mod watcher;

pub use model::{RedirectRule, RedirectionType};
pub use repository::{RepositoryError, RuleRepository, RuleSet};
pub use store::{RuleSource, RuleStore};
