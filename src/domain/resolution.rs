//! Outcome types of resolving a token.

/// Result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub key: u64,
    pub destination: String,
    /// View count read during lookup, before this resolution's increment.
    pub views_before_increment: u64,
}

/// A view increment that did not complete cleanly.
///
/// Never returned to callers; the redirect is delivered regardless and the
/// anomaly is only logged and counted.
#[derive(Debug, thiserror::Error)]
pub enum IncrementAnomaly {
    #[error("view increment for key {key} affected {rows} rows, expected 1")]
    UnexpectedRowCount { key: u64, rows: u64 },

    #[error("view increment for key {key} failed: {message}")]
    Failed { key: u64, message: String },
}

impl IncrementAnomaly {
    /// Label value used for the anomaly metric.
    pub fn kind(&self) -> &'static str {
        match self {
            IncrementAnomaly::UnexpectedRowCount { .. } => "row_count",
            IncrementAnomaly::Failed { .. } => "storage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_kinds() {
        let rows = IncrementAnomaly::UnexpectedRowCount { key: 4, rows: 0 };
        let failed = IncrementAnomaly::Failed {
            key: 4,
            message: "timeout".to_string(),
        };

        assert_eq!(rows.kind(), "row_count");
        assert_eq!(failed.kind(), "storage");
        assert_eq!(
            rows.to_string(),
            "view increment for key 4 affected 0 rows, expected 1"
        );
    }
}
