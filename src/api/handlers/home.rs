//! Handler for the service root.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Sends visitors of the bare short domain to the main website.
///
/// # Endpoint
///
/// `GET /`
///
/// Returns 302 Found to `WEBSITE_URL`, or 404 Not Found when it is not configured.
pub async fn home_handler(State(state): State<AppState>) -> Response {
    match state.website_url {
        Some(url) => (StatusCode::FOUND, [(header::LOCATION, url)]).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
