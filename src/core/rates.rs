//! Daily currency rate snapshot and the seam to the external rate source.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use thiserror::Error;

/// The base currency every rate is expressed in.
pub const RUB: &str = "RUB";

const RUB_NAME: &str = "Russian Ruble";

/// A single currency quote from the daily snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyInfo {
    pub code: String,
    pub name: String,
    /// Value of one unit expressed in RUB.
    pub rate: f64,
}

/// Ordered snapshot of daily rates. Entry order follows the source document,
/// with the synthetic RUB entry appended last. Built fresh for every query
/// and discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    entries: Vec<CurrencyInfo>,
    index: HashMap<String, usize>,
    as_of: Option<DateTime<FixedOffset>>,
}

impl RateTable {
    pub fn new(as_of: Option<DateTime<FixedOffset>>) -> Self {
        RateTable {
            entries: Vec::new(),
            index: HashMap::new(),
            as_of,
        }
    }

    /// Appends a quote, replacing any earlier entry with the same code in
    /// place.
    pub fn insert(&mut self, info: CurrencyInfo) {
        match self.index.get(&info.code) {
            Some(&position) => self.entries[position] = info,
            None => {
                self.index.insert(info.code.clone(), self.entries.len());
                self.entries.push(info);
            }
        }
    }

    /// Appends the synthetic RUB entry. The source document quotes every
    /// currency in rubles and never lists the ruble itself.
    pub fn insert_rub(&mut self) {
        self.insert(CurrencyInfo {
            code: RUB.to_string(),
            name: RUB_NAME.to_string(),
            rate: 1.0,
        });
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Value of one unit of `code` in RUB.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.index.get(code).map(|&position| self.entries[position].rate)
    }

    /// Quotes in snapshot order.
    pub fn entries(&self) -> &[CurrencyInfo] {
        &self.entries
    }

    /// Timestamp of the snapshot as published by the source.
    pub fn as_of(&self) -> Option<DateTime<FixedOffset>> {
        self.as_of
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Failure to produce the daily snapshot. Not recoverable by the engine;
/// propagates to the caller as-is.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("rate source request failed: {0}")]
    Unavailable(#[from] reqwest::Error),
    #[error("rate source returned a malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Produces a fresh rate snapshot on demand. One fetch per query, no caching
/// and no retries at this seam.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable, SourceError>;
}
