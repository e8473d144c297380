//! Rate resolution and conversion.

use crate::core::config::ResolverConfig;
use crate::core::currency::{CurrencyCode, CurrencyRateProvider};
use crate::core::error::{ExchangeError, Result};
use crate::core::feed::FeedClient;
use crate::core::rates::RateTable;
use crate::providers::{DailySource, HttpFeedClient};
use crate::store::SnapshotFile;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Converts between currencies using a rate table that is loaded on first use
/// and then shared by every later call.
///
/// The table comes from the on-disk snapshot while it is younger than the
/// configured TTL, otherwise from the remote feed. Concurrent first callers
/// wait on a single load.
pub struct RateResolver {
    config: ResolverConfig,
    snapshot: SnapshotFile,
    source: DailySource,
    table: OnceCell<Arc<RateTable>>,
}

impl RateResolver {
    /// Creates a resolver that talks to the configured feed over HTTP.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let client = HttpFeedClient::new(&config)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    pub fn with_client(config: ResolverConfig, client: Arc<dyn FeedClient>) -> Self {
        let snapshot = SnapshotFile::new(&config.cache_path, config.ttl());
        let source = DailySource::new(client, &config.source_url, snapshot.clone());
        RateResolver {
            config,
            snapshot,
            source,
            table: OnceCell::new(),
        }
    }

    /// Returns the memoized rate table, loading it if needed. A failed load
    /// is not memoized.
    pub async fn rates(&self) -> Result<Arc<RateTable>> {
        self.table
            .get_or_try_init(|| async { self.load().await.map(Arc::new) })
            .await
            .cloned()
    }

    async fn load(&self) -> Result<RateTable> {
        if self.snapshot.is_valid().await {
            // The file may disappear between the check and the read
            if let Some(bytes) = self.snapshot.read().await {
                debug!("Loading rates from snapshot {}", self.snapshot.path().display());
                let table = RateTable::from_slice(&bytes)?;
                info!(currencies = table.len(), "Loaded cached rate table");
                return Ok(table);
            }
        }

        debug!("Snapshot missing or stale, fetching {}", self.config.source_url);
        let table = self.source.fetch().await?;
        info!(currencies = table.len(), "Loaded fresh rate table");
        Ok(table)
    }

    /// Units of `to` equal to one unit of `from`.
    pub async fn exchange_rate(
        &self,
        from: impl Into<CurrencyCode>,
        to: impl Into<CurrencyCode>,
    ) -> Result<f64> {
        let (from, to) = (from.into(), to.into());
        let table = self.rates().await?;

        let rate = table.unit_rate(from.as_str())? / table.unit_rate(to.as_str())?;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ExchangeError::external(format!(
                "Rate {from}/{to} is out of range"
            )));
        }
        debug!(%from, %to, rate, "Resolved exchange rate");
        Ok(rate)
    }

    /// Converts `amount` of `from` into `to`. Any finite amount is accepted,
    /// including zero and negative values.
    pub async fn convert(
        &self,
        amount: f64,
        from: impl Into<CurrencyCode>,
        to: impl Into<CurrencyCode>,
    ) -> Result<f64> {
        if !amount.is_finite() {
            return Err(ExchangeError::InvalidAmount(amount));
        }
        Ok(amount * self.exchange_rate(from, to).await?)
    }
}

#[async_trait]
impl CurrencyRateProvider for RateResolver {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64> {
        self.exchange_rate(from, to).await
    }
}
