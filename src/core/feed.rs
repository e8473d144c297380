//! Transport abstraction for the remote rate feed

use crate::core::error::Result;
use async_trait::async_trait;

/// Fetches a raw document from a URL. Any non-success outcome, including a
/// timeout, must be reported as [`ExchangeError::ExternalSource`].
///
/// [`ExchangeError::ExternalSource`]: crate::core::error::ExchangeError::ExternalSource
#[async_trait]
pub trait FeedClient: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
