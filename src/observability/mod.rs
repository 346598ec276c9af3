//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!
//! Consumers:
//!     → stdout, filtered by RUST_LOG or observability.log_level
//! ```
//!
//! # Design Decisions
//! - Structured fields, not formatted strings
//! - Request ID flows through log events from the HTTP layer
//! - Individual redirects log at debug; there is no hit analytics

pub mod logging;

pub use logging::init_logging;
