//! Token resolution with view counting.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::repositories::LinkRepository;
use crate::domain::resolution::{IncrementAnomaly, Resolution};
use crate::error::AppError;
use crate::utils::token_codec::TokenCodec;

/// Resolves public tokens to destinations and counts the views.
///
/// Holds no per-link state between calls; concurrent resolutions only meet
/// in storage, where the increment is a single atomic update.
pub struct ResolverService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    link_repository: Arc<L>,
    codec: TokenCodec,
}

impl<L: LinkRepository + ?Sized> ResolverService<L> {
    /// Creates a new resolver service.
    pub fn new(link_repository: Arc<L>, codec: TokenCodec) -> Self {
        Self {
            link_repository,
            codec,
        }
    }

    /// Resolves `token` to its destination and records one view.
    ///
    /// The increment outcome never affects the result: once the link is found
    /// its destination is returned, and a failed or irregular increment is
    /// only logged and counted under `link_view_increment_anomalies_total`.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidToken`] if the token cannot be decoded (no lookup is made)
    /// - [`AppError::NotFound`] if no link has the decoded key
    /// - [`AppError::Storage`] if the lookup itself fails
    pub async fn resolve(&self, token: &str) -> Result<Resolution, AppError> {
        let key = match self.codec.decode(token) {
            Ok(key) => key,
            Err(e) => {
                metrics::counter!("link_resolution_failures_total", "reason" => "invalid_token")
                    .increment(1);
                debug!(token, error = %e, "rejected malformed token");
                return Err(e.into());
            }
        };

        let link = match self.link_repository.find_by_key(key).await {
            Ok(Some(link)) => link,
            Ok(None) => {
                metrics::counter!("link_resolution_failures_total", "reason" => "not_found")
                    .increment(1);
                return Err(AppError::not_found(token));
            }
            Err(e) => {
                metrics::counter!("link_resolution_failures_total", "reason" => "storage")
                    .increment(1);
                return Err(e);
            }
        };

        match check_increment(key, self.link_repository.increment_views(key).await) {
            None => debug!(key, "view counted"),
            Some(anomaly) => report_anomaly(anomaly),
        }

        metrics::counter!("links_resolved_total").increment(1);

        Ok(Resolution {
            key,
            destination: link.destination,
            views_before_increment: link.views,
        })
    }
}

/// Classifies the outcome of a view increment; `None` means exactly one row changed.
fn check_increment(key: u64, outcome: Result<u64, AppError>) -> Option<IncrementAnomaly> {
    match outcome {
        Ok(1) => None,
        Ok(rows) => Some(IncrementAnomaly::UnexpectedRowCount { key, rows }),
        Err(e) => Some(IncrementAnomaly::Failed {
            key,
            message: e.to_string(),
        }),
    }
}

fn report_anomaly(anomaly: IncrementAnomaly) {
    metrics::counter!("link_view_increment_anomalies_total", "kind" => anomaly.kind())
        .increment(1);

    match &anomaly {
        IncrementAnomaly::UnexpectedRowCount { key, rows } => {
            warn!(key, rows, "{anomaly}")
        }
        IncrementAnomaly::Failed { key, .. } => error!(key, "{anomaly}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::token_codec::CodecError;

    fn resolver(repo: MockLinkRepository) -> ResolverService<MockLinkRepository> {
        ResolverService::new(Arc::new(repo), TokenCodec::default())
    }

    fn example_link(key: u64, views: u64) -> Link {
        Link::new(key, "http://example.com".to_string(), views)
    }

    #[test]
    fn test_check_increment_clean() {
        assert!(check_increment(7, Ok(1)).is_none());
    }

    #[test]
    fn test_check_increment_unexpected_row_counts() {
        for rows in [0, 2] {
            let anomaly = check_increment(7, Ok(rows)).unwrap();

            assert_eq!(anomaly.kind(), "row_count");
            assert!(matches!(
                anomaly,
                IncrementAnomaly::UnexpectedRowCount { key: 7, rows: r } if r == rows
            ));
        }
    }

    #[test]
    fn test_check_increment_failure() {
        let anomaly = check_increment(7, Err(AppError::storage("deadlock detected"))).unwrap();

        assert_eq!(anomaly.kind(), "storage");
        match anomaly {
            IncrementAnomaly::Failed { key, message } => {
                assert_eq!(key, 7);
                assert!(message.contains("deadlock detected"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_key()
            .withf(|key| *key == 0)
            .times(1)
            .returning(|key| Ok(Some(example_link(key, 0))));
        mock_repo
            .expect_increment_views()
            .withf(|key| *key == 0)
            .times(1)
            .returning(|_| Ok(1));

        let resolution = resolver(mock_repo).resolve("a").await.unwrap();

        assert_eq!(resolution.key, 0);
        assert_eq!(resolution.destination, "http://example.com");
        assert_eq!(resolution.views_before_increment, 0);
    }

    #[tokio::test]
    async fn test_resolve_invalid_token_skips_lookup() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_key().times(0);
        mock_repo.expect_increment_views().times(0);

        let result = resolver(mock_repo).resolve("a_b").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidToken(CodecError::InvalidCharacter { character: '_', .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_overflowing_token() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_key().times(0);

        let result = resolver(mock_repo).resolve(&"9".repeat(20)).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidToken(CodecError::Overflow(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_key()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_increment_views().times(0);

        let result = resolver(mock_repo).resolve("bcd").await;

        match result.unwrap_err() {
            AppError::NotFound { token } => assert_eq!(token, "bcd"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_resolve_lookup_storage_error() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_key()
            .times(1)
            .returning(|_| Err(AppError::storage("pool timed out")));
        mock_repo.expect_increment_views().times(0);

        let result = resolver(mock_repo).resolve("b").await;

        assert!(matches!(result.unwrap_err(), AppError::Storage { .. }));
    }

    #[tokio::test]
    async fn test_resolve_returns_destination_when_increment_fails() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_key()
            .times(1)
            .returning(|key| Ok(Some(example_link(key, 41))));
        mock_repo
            .expect_increment_views()
            .times(1)
            .returning(|_| Err(AppError::storage("deadlock detected")));

        let resolution = resolver(mock_repo).resolve("b").await.unwrap();

        assert_eq!(resolution.destination, "http://example.com");
        assert_eq!(resolution.views_before_increment, 41);
    }

    #[tokio::test]
    async fn test_resolve_returns_destination_when_no_row_updated() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_key()
            .times(1)
            .returning(|key| Ok(Some(example_link(key, 2))));
        mock_repo
            .expect_increment_views()
            .times(1)
            .returning(|_| Ok(0));

        let resolution = resolver(mock_repo).resolve("c").await.unwrap();

        assert_eq!(resolution.key, 2);
        assert_eq!(resolution.destination, "http://example.com");
    }

    #[tokio::test]
    async fn test_resolve_returns_destination_when_many_rows_updated() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_key()
            .times(1)
            .returning(|key| Ok(Some(example_link(key, 2))));
        mock_repo
            .expect_increment_views()
            .times(1)
            .returning(|_| Ok(2));

        assert!(resolver(mock_repo).resolve("c").await.is_ok());
    }
}
