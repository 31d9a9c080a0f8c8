//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/page" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "key": 0,
///   "token": "a",
///   "short_url": "http://localhost:3000/a",
///   "destination": "http://example.com/page"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is empty, invalid or too long.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.create_link(&payload.url).await?;
    let token = state.link_service.token(link.key);
    let short_url = state.link_service.short_url(&token);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            key: link.key,
            token,
            short_url,
            destination: link.destination,
        }),
    ))
}
