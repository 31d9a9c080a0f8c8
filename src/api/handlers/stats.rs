//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the destination and view count of a short link.
///
/// # Endpoint
///
/// `GET /api/stats/{token}`
///
/// Reading statistics does not count as a view.
///
/// # Errors
///
/// Returns 400 Bad Request if the token is malformed.
/// Returns 404 Not Found if no link was issued for the token.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let link = state.link_service.get_stats(&token).await?;

    Ok(Json(StatsResponse {
        token,
        key: link.key,
        destination: link.destination,
        views: link.views,
    }))
}
