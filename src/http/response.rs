//! Response construction.
//!
//! # Responsibilities
//! - Turn a redirect decision into a response with a `Location` header
//! - Produce the plain not-found response
//!
//! # Design Decisions
//! - Status codes that do not parse fall back to 301
//! - A destination that is not a valid header value is reported, not sent

use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
};

use crate::redirect::code::FALLBACK_REDIRECT_CODE;
use crate::redirect::RedirectDecision;

/// Build the redirect response for `decision`.
pub fn redirect_response(
    decision: &RedirectDecision,
) -> Result<Response<Body>, header::InvalidHeaderValue> {
    let location = HeaderValue::from_str(&decision.destination_url)?;
    let status = StatusCode::from_u16(decision.status_code)
        .or_else(|_| StatusCode::from_u16(FALLBACK_REDIRECT_CODE))
        .unwrap_or(StatusCode::MOVED_PERMANENTLY);

    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response.headers_mut().insert(header::LOCATION, location);
    Ok(response)
}

/// Fallback handler for requests no route claimed.
pub async fn not_found() -> Response<Body> {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
