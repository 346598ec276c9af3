//! Site link resolution.
//!
//! Turns internal content references into links and links into absolute URLs.
//! The redirect resolver only sees the `LinkResolver` trait.

pub mod links;

pub use links::{LinkResolver, SiteError, SiteLinks};
