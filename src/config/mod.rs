//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RedirectorConfig (validated, immutable)
//!     → shared with the HTTP server and resolver at startup
//! ```
//!
//! Redirect rules live in their own file and reload independently
//! (see `crate::rules`); the service configuration itself does not.
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::RedirectorConfig;
pub use schema::ListenerConfig;
pub use schema::SiteConfig;
pub use schema::RedirectsConfig;
pub use schema::RepositoryErrorPolicy;
