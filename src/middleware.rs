use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the shared link token
pub const LINK_TOKEN_HEADER: &str = "X-Link-Token";

/// Middleware that only lets requests with the configured link token through
///
/// The request must carry an `X-Link-Token` header equal to the token in
/// `AppState`. When no token is configured every request is rejected.
pub async fn require_link_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.link_token.as_deref() else {
        tracing::warn!(
            path = request.uri().path(),
            "rejecting request: no link token configured"
        );
        return Err(AppError::Unauthorized);
    };

    let provided = headers
        .get(LINK_TOKEN_HEADER)
        .map(|value| value.as_bytes())
        .unwrap_or_default();

    if !constant_time_eq(provided, expected.as_bytes()) {
        tracing::warn!(
            path = request.uri().path(),
            "rejecting request: invalid or missing link token"
        );
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Compares two byte strings without short-circuiting on the first mismatch
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
