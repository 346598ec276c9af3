//! Redirect resolution for requests that would otherwise return 404.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod redirect;
pub mod rules;
pub mod site;

pub use config::schema::RedirectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use redirect::{RedirectDecision, RedirectResolver, Resolution};
