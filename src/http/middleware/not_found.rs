//! Not-found redirect middleware.
//! Gives redirect rules a chance before a 404 reaches the client.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::config::RepositoryErrorPolicy;
use crate::http::request::{redirect_target, request_id};
use crate::http::response::redirect_response;
use crate::redirect::{RedirectResolver, Resolution};
use crate::rules::RuleSource;
use crate::site::SiteLinks;

/// State shared by the middleware.
#[derive(Clone)]
pub struct RedirectState {
    pub rules: Arc<dyn RuleSource>,
    pub resolver: Arc<RedirectResolver<SiteLinks>>,
    pub on_repository_error: RepositoryErrorPolicy,
}

/// Runs the inner service; a 404 from it is replaced by a redirect when a
/// rule applies. Any other response passes through untouched.
pub async fn redirect_on_not_found(
    State(state): State<RedirectState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let uri = req.uri().clone();
    let request_id = request_id(req.headers()).to_string();

    let response = next.run(req).await;
    if response.status() != StatusCode::NOT_FOUND {
        return response;
    }

    let (path, query) = redirect_target(&uri);
    // One snapshot per request; a concurrent reload cannot change it.
    let rules = state.rules.current();

    match state.resolver.resolve(rules.as_ref(), path, &query) {
        Ok(Resolution::Redirect(decision)) => match redirect_response(&decision) {
            Ok(redirect) => redirect,
            Err(e) => {
                warn!(
                    request_id = %request_id,
                    destination = %decision.destination_url,
                    error = %e,
                    "Redirect destination is not a valid Location header"
                );
                response
            }
        },
        Ok(Resolution::NoMatch) => response,
        Err(e) => {
            error!(request_id = %request_id, path = %path, error = %e, "Redirect lookup failed");
            match state.on_repository_error {
                RepositoryErrorPolicy::Fail => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Redirect rules unavailable")
                        .into_response()
                }
                RepositoryErrorPolicy::NotFound => response,
            }
        }
    }
}
