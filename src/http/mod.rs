//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID, path and query extraction)
//!     → application routes, or the not-found fallback
//!     → middleware/not_found.rs (404 → redirect resolution)
//!     → response.rs (redirect or not-found response)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::not_found::{redirect_on_not_found, RedirectState};
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
