//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and view counting.
///
/// Keys come from the `links_id_seq` sequence, which starts at `0`. Views are
/// incremented with a single `UPDATE ... SET views = views + 1`, so concurrent
/// resolutions never lose an update.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    destination: String,
    views: i64,
}

impl TryFrom<LinkRow> for Link {
    type Error = AppError;

    fn try_from(row: LinkRow) -> Result<Self, Self::Error> {
        let key = u64::try_from(row.id)
            .map_err(|_| AppError::storage(format!("negative link id {}", row.id)))?;
        let views = u64::try_from(row.views)
            .map_err(|_| AppError::storage(format!("negative view count for link {}", row.id)))?;

        Ok(Link::new(key, row.destination, views))
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (destination, views)
            VALUES ($1, 0)
            RETURNING id, destination, views
            "#,
        )
        .bind(new_link.destination)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_key(&self, key: u64) -> Result<Option<Link>, AppError> {
        // The id column is signed; larger keys were never assigned.
        let Ok(id) = i64::try_from(key) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT id, destination, views FROM links WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::try_from).transpose()
    }

    async fn increment_views(&self, key: u64) -> Result<u64, AppError> {
        let Ok(id) = i64::try_from(key) else {
            return Ok(0);
        };

        let result = sqlx::query("UPDATE links SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
