//! In-process implementation of link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(Debug, Clone)]
struct Entry {
    destination: String,
    views: u64,
}

/// In-memory link storage backed by `DashMap`.
///
/// Keys are handed out from an atomic counter starting at `0`. The view
/// increment happens under the shard write lock of its entry, which makes it
/// atomic with respect to other increments of the same key. Contents are lost
/// on restart.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    links: DashMap<u64, Entry>,
    next_key: AtomicU64,
}

impl MemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let key = self.next_key.fetch_add(1, Ordering::SeqCst);

        self.links.insert(
            key,
            Entry {
                destination: new_link.destination.clone(),
                views: 0,
            },
        );

        Ok(Link::new(key, new_link.destination, 0))
    }

    async fn find_by_key(&self, key: u64) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .get(&key)
            .map(|entry| Link::new(key, entry.destination.clone(), entry.views)))
    }

    async fn increment_views(&self, key: u64) -> Result<u64, AppError> {
        match self.links.get_mut(&key) {
            Some(mut entry) => {
                entry.views += 1;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.links.len() as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
