//! Session guard middleware.
//!
//! Anonymous requests to guarded pages are sent back to the login page.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::app::AppState;
use crate::error::ApiError;

/// Path anonymous visitors are redirected to.
pub const LOGIN_PATH: &str = "/login";

/// Middleware that requires an authenticated session.
///
/// Responds `303 See Other` to `/login` while the session is anonymous;
/// otherwise stores the session user in request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match state.session.current_user() {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "Anonymous request, redirecting to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

/// Fallback for paths no route matches.
///
/// Anonymous visitors are redirected to the login page like on any guarded
/// page; signed-in users get a 404.
pub async fn unmatched_route(State(state): State<AppState>, req: Request<Body>) -> Response {
    if state.session.is_authenticated() {
        tracing::debug!(path = %req.uri().path(), "No route for path");
        ApiError::NotFound("routeNotFound".to_string()).into_response()
    } else {
        Redirect::to(LOGIN_PATH).into_response()
    }
}
