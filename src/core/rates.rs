//! Rate table built from the daily feed payload.

use crate::core::currency::{CurrencyCode, RateEntry};
use crate::core::error::{ExchangeError, Result};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Currency every feed value is quoted against.
pub const BASE_CURRENCY: &str = "RUB";
const BASE_CURRENCY_NAME: &str = "Российский рубль";

#[derive(Debug, Deserialize)]
struct DailyFeed {
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Valute")]
    valute: HashMap<String, FeedEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FeedEntry {
    value: f64,
    nominal: f64,
    name: Option<String>,
}

/// Unit rates for every quoted currency plus the base currency.
#[derive(Debug, Clone)]
pub struct RateTable {
    entries: HashMap<CurrencyCode, RateEntry>,
    date: Option<DateTime<FixedOffset>>,
}

impl RateTable {
    /// Parses a raw feed body. Fails with [`ExchangeError::ExternalSource`] if
    /// the payload is not the expected shape or holds a non-positive rate.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let feed: DailyFeed = serde_json::from_slice(bytes)
            .map_err(|e| ExchangeError::external(format!("Failed to parse rate feed: {e}")))?;

        let date = feed.date.as_deref().and_then(|raw| {
            DateTime::parse_from_rfc3339(raw)
                .inspect_err(|e| debug!("Ignoring unparsable feed date '{}': {}", raw, e))
                .ok()
        });

        let mut entries = Vec::with_capacity(feed.valute.len());
        for (code, item) in feed.valute {
            if !is_positive(item.value) || !is_positive(item.nominal) {
                return Err(ExchangeError::external(format!(
                    "Malformed rate for {code}: value={}, nominal={}",
                    item.value, item.nominal
                )));
            }
            entries.push(RateEntry {
                code: CurrencyCode::new(&code),
                nominal: item.nominal,
                value: item.value,
                name: item.name,
            });
        }

        Ok(Self::from_entries(entries, date))
    }

    /// Builds a table from already validated entries. The base currency entry
    /// is always added last so it replaces any quoted one.
    pub fn from_entries(
        entries: impl IntoIterator<Item = RateEntry>,
        date: Option<DateTime<FixedOffset>>,
    ) -> Self {
        let mut entries: HashMap<CurrencyCode, RateEntry> = entries
            .into_iter()
            .map(|entry| (entry.code.clone(), entry))
            .collect();

        let base = CurrencyCode::new(BASE_CURRENCY);
        entries.insert(
            base.clone(),
            RateEntry {
                code: base,
                nominal: 1.0,
                value: 1.0,
                name: Some(BASE_CURRENCY_NAME.to_string()),
            },
        );

        RateTable { entries, date }
    }

    /// Looks up a code case-insensitively.
    pub fn get(&self, code: &str) -> Result<&RateEntry> {
        let code = CurrencyCode::new(code);
        self.entries
            .get(code.as_str())
            .ok_or_else(|| ExchangeError::CurrencyCode(code.to_string()))
    }

    pub fn unit_rate(&self, code: &str) -> Result<f64> {
        self.get(code).map(RateEntry::unit_rate)
    }

    /// Publication time reported by the feed, if any.
    pub fn date(&self) -> Option<DateTime<FixedOffset>> {
        self.date
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries ordered by code.
    pub fn entries(&self) -> Vec<&RateEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        entries
    }
}

fn is_positive(n: f64) -> bool {
    n.is_finite() && n > 0.0
}
