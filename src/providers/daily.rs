use crate::core::error::Result;
use crate::core::feed::FeedClient;
use crate::core::rates::RateTable;
use crate::store::snapshot::SnapshotFile;
use std::sync::Arc;
use tracing::{debug, warn};

/// Pulls a fresh daily feed and keeps the on-disk snapshot up to date.
pub struct DailySource {
    client: Arc<dyn FeedClient>,
    url: String,
    snapshot: SnapshotFile,
}

impl DailySource {
    pub fn new(client: Arc<dyn FeedClient>, url: &str, snapshot: SnapshotFile) -> Self {
        DailySource {
            client,
            url: url.to_string(),
            snapshot,
        }
    }

    /// Fetches and parses the feed. The raw body is persisted only once it
    /// has parsed, so a malformed response never replaces a good snapshot.
    /// Persistence failures are logged and otherwise ignored.
    pub async fn fetch(&self) -> Result<RateTable> {
        let body = self.client.fetch(&self.url).await?;
        let table = RateTable::from_slice(&body)?;

        match self.snapshot.write(&body).await {
            Ok(()) => debug!("Persisted feed snapshot to {}", self.snapshot.path().display()),
            Err(e) => warn!(
                "Failed to persist feed snapshot to {}: {}",
                self.snapshot.path().display(),
                e
            ),
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ExchangeError;
    use async_trait::async_trait;
    use std::time::Duration;
    use tempfile::tempdir;

    struct StaticFeed(&'static str);

    #[async_trait]
    impl FeedClient for StaticFeed {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    const FEED: &str = r#"{"Valute": {"USD": {"Nominal": 1, "Value": 90.0}}}"#;

    #[tokio::test]
    async fn test_fetch_persists_snapshot() {
        let dir = tempdir().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("daily.json"), Duration::from_secs(60));
        let source = DailySource::new(Arc::new(StaticFeed(FEED)), "http://feed", snapshot.clone());

        let table = source.fetch().await.unwrap();

        assert_eq!(table.unit_rate("USD").unwrap(), 90.0);
        assert_eq!(snapshot.read().await.unwrap(), FEED.as_bytes());
    }

    #[tokio::test]
    async fn test_malformed_feed_is_not_persisted() {
        let dir = tempdir().unwrap();
        let snapshot = SnapshotFile::new(dir.path().join("daily.json"), Duration::from_secs(60));
        snapshot.write(FEED.as_bytes()).await.unwrap();
        let source = DailySource::new(
            Arc::new(StaticFeed("<html>maintenance</html>")),
            "http://feed",
            snapshot.clone(),
        );

        let result = source.fetch().await;

        assert!(matches!(result, Err(ExchangeError::ExternalSource(_))));
        assert_eq!(snapshot.read().await.unwrap(), FEED.as_bytes());
    }

    #[tokio::test]
    async fn test_persist_failure_is_soft() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let snapshot = SnapshotFile::new(blocker.join("daily.json"), Duration::from_secs(60));
        let source = DailySource::new(Arc::new(StaticFeed(FEED)), "http://feed", snapshot);

        let table = source.fetch().await.unwrap();
        assert_eq!(table.unit_rate("usd").unwrap(), 90.0);
    }
}
