//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) when the client sent none
//! - Extract the path and parsed query used for redirect resolution
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The path is matched as received (percent-encoded), never decoded

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Uri};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::redirect::query::{parse_query, QueryMap};

/// Header carrying the request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// The request ID, or `"unknown"` when missing or not valid UTF-8.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Path and parsed query of a request URI.
pub fn redirect_target(uri: &Uri) -> (&str, QueryMap) {
    let query = uri.query().map(parse_query).unwrap_or_default();
    (uri.path(), query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_request_id() {
        let req = Request::builder().body(()).unwrap();
        let id = MakeRequestUuid.make_request_id(&req).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(value).is_ok());
    }

    #[test]
    fn test_request_id_fallback() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_id(&headers), "unknown");
        headers.insert(X_REQUEST_ID, HeaderValue::from_static("abc"));
        assert_eq!(request_id(&headers), "abc");
    }

    #[test]
    fn test_redirect_target() {
        let uri: Uri = "http://example.com/Old/Page?Lang=EN&x=1".parse().unwrap();
        let (path, query) = redirect_target(&uri);
        assert_eq!(path, "/Old/Page");
        assert_eq!(query["Lang"].as_str(), Some("EN"));

        let uri: Uri = "/plain".parse().unwrap();
        assert!(redirect_target(&uri).1.is_empty());
    }
}
