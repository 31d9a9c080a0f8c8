//! Link creation and statistics service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::token_codec::TokenCodec;
use crate::utils::url_normalizer::normalize_url;

/// Service for creating links and reading their statistics.
///
/// Owns the mapping between storage keys and public tokens for everything
/// except redirects, which go through
/// [`ResolverService`](super::ResolverService) with the same codec.
pub struct LinkService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    link_repository: Arc<L>,
    codec: TokenCodec,
    base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the public origin short URLs are built from.
    pub fn new(link_repository: Arc<L>, codec: TokenCodec, base_url: impl Into<String>) -> Self {
        Self {
            link_repository,
            codec,
            base_url: base_url.into(),
        }
    }

    /// Validates and stores a destination URL.
    ///
    /// Inputs without a scheme are stored with `http://` prepended. Every call
    /// creates a new record, even for a destination that was stored before.
    ///
    /// # Errors
    ///
    /// - [`AppError::EmptyUrl`] for blank input
    /// - [`AppError::InvalidUrl`] or [`AppError::Parse`] for unusable URLs
    /// - [`AppError::Storage`] on storage errors
    pub async fn create_link(&self, url: &str) -> Result<Link, AppError> {
        let destination = normalize_url(url)?;

        let link = self
            .link_repository
            .create(NewLink { destination })
            .await?;

        metrics::counter!("links_created_total").increment(1);
        tracing::info!(key = link.key, destination = %link.destination, "link created");

        Ok(link)
    }

    /// Looks up a link by token without touching its view counter.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidToken`] if the token cannot be decoded
    /// - [`AppError::NotFound`] if no link has the decoded key
    /// - [`AppError::Storage`] on storage errors
    pub async fn get_stats(&self, token: &str) -> Result<Link, AppError> {
        let key = self.codec.decode(token)?;

        self.link_repository
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::not_found(token))
    }

    /// Returns the public token for a storage key.
    pub fn token(&self, key: u64) -> String {
        self.codec.encode(key)
    }

    /// Builds the full short URL for a token.
    pub fn short_url(&self, token: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), token)
    }
}
