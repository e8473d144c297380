//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod error;
pub mod feed;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use currency::{CurrencyCode, CurrencyRateProvider, RateEntry};
pub use error::{ExchangeError, Result};
pub use feed::FeedClient;
pub use rates::{BASE_CURRENCY, RateTable};
