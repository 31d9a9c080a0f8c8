//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for stored links.
///
/// Storage owns key assignment: keys are handed out in increasing order
/// starting at `0` and are never reused.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link with zero views and returns it with its assigned key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if no link was ever stored under `key`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on storage errors.
    async fn find_by_key(&self, key: u64) -> Result<Option<Link>, AppError>;

    /// Adds one to the view counter of `key` in a single atomic operation.
    ///
    /// Returns the number of rows the update touched. Anything other than `1`
    /// means the record vanished or the key is not unique.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on storage errors.
    async fn increment_views(&self, key: u64) -> Result<u64, AppError>;

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on storage errors.
    async fn count(&self) -> Result<u64, AppError>;

    /// Checks that the storage backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if it is not.
    async fn ping(&self) -> Result<(), AppError>;
}
