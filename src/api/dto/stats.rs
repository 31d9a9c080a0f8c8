//! DTOs for link statistics.

use serde::Serialize;

/// Destination and view count of a short link.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub token: String,
    pub key: u64,
    pub destination: String,
    pub views: u64,
}
