//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation and statistics
//! - [`services::resolver_service::ResolverService`] - Token resolution with view counting

pub mod services;
