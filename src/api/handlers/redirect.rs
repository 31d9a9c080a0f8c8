//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a token to its destination URL and counts the view.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// # Request Flow
///
/// 1. Decode the token into a storage key
/// 2. Look up the link
/// 3. Increment its view counter (failures are logged, never returned)
/// 4. Return 302 Found with the destination in `Location`
///
/// # Errors
///
/// Returns 400 Bad Request if the token is malformed.
/// Returns 404 Not Found if no link was issued for the token.
/// Returns 500 Internal Server Error if the lookup fails.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resolution = state.resolver_service.resolve(&token).await?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, resolution.destination)],
    ))
}
