//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`resolution`] - Outcome of resolving a token
//!
//! # Resolution Flow
//!
//! 1. HTTP handler receives the token from the request path
//! 2. The token is decoded into a key by [`crate::utils::token_codec::TokenCodec`]
//! 3. The link is looked up via [`repositories::LinkRepository::find_by_key`]
//! 4. Its counter is bumped via [`repositories::LinkRepository::increment_views`]
//! 5. The destination is returned even if step 4 misbehaves

pub mod entities;
pub mod repositories;
pub mod resolution;
