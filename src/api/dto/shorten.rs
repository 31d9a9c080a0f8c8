//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// Emptiness and URL syntax are checked by the link service so they map to
/// their own error kinds; only the size limit is enforced here.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Destination URL; a missing scheme defaults to `http`.
    #[validate(length(max = 2048, message = "URL must be at most 2048 characters"))]
    pub url: String,
}

/// A newly created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub key: u64,
    pub token: String,
    pub short_url: String,
    pub destination: String,
}
