//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, ResolverService};
use crate::domain::repositories::LinkRepository;
use crate::utils::token_codec::TokenCodec;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub resolver_service: Arc<ResolverService>,
    pub link_repository: Arc<dyn LinkRepository>,
    /// Target of `GET /`, if configured.
    pub website_url: Option<String>,
}

impl AppState {
    /// Wires both services to one repository and one codec.
    ///
    /// Sharing the codec guarantees that redirects and statistics decode
    /// tokens the same way.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        codec: TokenCodec,
        base_url: impl Into<String>,
        website_url: Option<String>,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(
            link_repository.clone(),
            codec,
            base_url,
        ));
        let resolver_service = Arc::new(ResolverService::new(link_repository.clone(), codec));

        Self {
            link_service,
            resolver_service,
            link_repository,
            website_url,
        }
    }
}
