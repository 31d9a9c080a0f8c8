//! Utility functions shared across layers.
//!
//! - [`token_codec`] - Key/token conversion for short links
//! - [`url_normalizer`] - Destination URL validation and scheme defaulting

pub mod token_codec;
pub mod url_normalizer;
