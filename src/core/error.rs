//! Error types returned by rate resolution and conversion.

use thiserror::Error;

/// Errors surfaced by the exchange library.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The requested currency code has no entry in the rate table.
    #[error("Unknown currency code: {0}")]
    CurrencyCode(String),

    /// The remote source failed, or its payload (fetched or cached) is malformed.
    #[error("External source error: {0}")]
    ExternalSource(String),

    /// The amount to convert is NaN or infinite.
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
}

impl ExchangeError {
    pub fn external(msg: impl Into<String>) -> Self {
        ExchangeError::ExternalSource(msg.into())
    }
}

/// Result type for exchange operations.
pub type Result<T> = std::result::Result<T, ExchangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ExchangeError::CurrencyCode("XYZ".to_string()).to_string(),
            "Unknown currency code: XYZ"
        );
        assert_eq!(
            ExchangeError::external("HTTP error: 500").to_string(),
            "External source error: HTTP error: 500"
        );
        assert_eq!(
            ExchangeError::InvalidAmount(f64::INFINITY).to_string(),
            "Invalid amount: inf"
        );
    }
}
