//! Currency codes and conversion abstractions

use crate::core::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::Display;
use std::str::FromStr;

/// An uppercase currency identifier such as `USD` or `TRY`.
///
/// Input is trimmed and upper-cased on construction, so `"usd"`, `" Usd "` and
/// `"USD"` all produce the same code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: &str) -> Self {
        CurrencyCode(code.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let code = CurrencyCode::new(s);
        if code.0.is_empty() || !code.0.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(anyhow::anyhow!("Invalid currency code: {}", s));
        }
        Ok(code)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        CurrencyCode::new(code)
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        CurrencyCode::new(&code)
    }
}

impl From<&CurrencyCode> for CurrencyCode {
    fn from(code: &CurrencyCode) -> Self {
        code.clone()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl Borrow<str> for CurrencyCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One quoted currency: `nominal` units of `code` equal `value` units of the
/// base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub code: CurrencyCode,
    pub nominal: f64,
    pub value: f64,
    pub name: Option<String>,
}

impl RateEntry {
    /// Base-currency units per single unit of this currency.
    pub fn unit_rate(&self) -> f64 {
        self.value / self.nominal
    }
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_is_normalized() {
        assert_eq!(CurrencyCode::new("usd").as_str(), "USD");
        assert_eq!(CurrencyCode::from(" Try ").to_string(), "TRY");
        assert_eq!(CurrencyCode::from("eur"), CurrencyCode::from("EUR"));
    }

    #[test]
    fn test_currency_code_from_str() {
        assert_eq!("gbp".parse::<CurrencyCode>().unwrap().as_str(), "GBP");
        assert!("".parse::<CurrencyCode>().is_err());
        assert!("U$D".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_currency_code_serde_normalizes() {
        let code: CurrencyCode = serde_json::from_str(r#""chf""#).unwrap();
        assert_eq!(code.as_str(), "CHF");
        assert_eq!(serde_json::to_string(&code).unwrap(), r#""CHF""#);
    }

    #[test]
    fn test_unit_rate() {
        let entry = RateEntry {
            code: CurrencyCode::new("TRY"),
            nominal: 10.0,
            value: 16.85,
            name: None,
        };
        assert!((entry.unit_rate() - 1.685).abs() < 1e-12);
    }
}
