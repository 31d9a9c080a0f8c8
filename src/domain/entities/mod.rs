//! Core domain entities.
//!
//! - [`Link`] - A stored destination URL with its view counter
//! - [`NewLink`] - Input for creating a link

pub mod link;

pub use link::{Link, NewLink};
