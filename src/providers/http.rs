use crate::core::config::ResolverConfig;
use crate::core::error::{ExchangeError, Result};
use crate::core::feed::FeedClient;
use crate::providers::util::with_retry;
use async_trait::async_trait;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("currency-exchange/", env!("CARGO_PKG_VERSION"));

/// [`FeedClient`] backed by `reqwest`.
pub struct HttpFeedClient {
    client: reqwest::Client,
    retries: usize,
    retry_delay_ms: u64,
}

impl HttpFeedClient {
    pub fn new(config: &ResolverConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ExchangeError::external(format!("Failed to build HTTP client: {e}")))?;

        Ok(HttpFeedClient {
            client,
            retries: config.retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }
}

fn transport_error(err: reqwest::Error, url: &str) -> ExchangeError {
    if err.is_timeout() {
        ExchangeError::external(format!("Request timed out for URL: {url}"))
    } else {
        ExchangeError::external(format!("Request error: {err} for URL: {url}"))
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    #[instrument(name = "FeedFetch", skip(self), fields(url = %url))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Requesting rate feed from {}", url);

        let response = with_retry(
            || async { self.client.get(url).send().await },
            self.retries,
            self.retry_delay_ms,
        )
        .await
        .map_err(|e| transport_error(e, url))?;

        debug!(status = %response.status(), "Received feed response");

        if !response.status().is_success() {
            return Err(ExchangeError::external(format!(
                "HTTP error: {} for URL: {}",
                response.status(),
                url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, url))?;
        Ok(body.to_vec())
    }
}
