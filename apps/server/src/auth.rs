//! Bearer-token capability check.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::state::AppState;

/// Every API call must present the configured bearer token; the token is the
/// caller's capability, there is no session or user model behind it.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token == state.api_token)
        .unwrap_or(false);

    if !authorized {
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(request).await)
}
