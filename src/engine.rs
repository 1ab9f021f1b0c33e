//! The public query engine: syntactic validation, a fresh rate fetch,
//! semantic validation, then calculation.

use crate::core::messages;
use crate::core::query::Query;
use crate::core::rates::{RateProvider, RateTable, SourceError};
use tracing::debug;

/// Outcome of a query. Rejections come back as rendered text rather than
/// errors: the caller prints either arm and recovers nothing itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The computed price, rounded to two decimals.
    Price(f64),
    /// A rejected query with its user-facing explanation.
    Invalid(String),
}

pub struct PriceEngine<P> {
    provider: P,
}

impl<P: RateProvider> PriceEngine<P> {
    pub fn new(provider: P) -> Self {
        PriceEngine { provider }
    }

    /// Answers a raw free-text query. Grammar failures short-circuit before
    /// the snapshot is fetched; only a source failure is a hard error.
    pub async fn get_price(&self, raw: &str) -> Result<Reply, SourceError> {
        let query = match Query::parse(raw) {
            Ok(query) => query,
            Err(error) => {
                return Ok(Reply::Invalid(messages::render_query_error(&error, None)));
            }
        };
        debug!("Parsed query: {query:?}");

        let rates = self.provider.fetch_rates().await?;

        if let Err(error) = query.validate_against(&rates) {
            return Ok(Reply::Invalid(messages::render_query_error(
                &error,
                Some(&rates),
            )));
        }

        match query.price(&rates) {
            Ok(price) => Ok(Reply::Price(price)),
            Err(error) => Ok(Reply::Invalid(messages::render_query_error(
                &error,
                Some(&rates),
            ))),
        }
    }

    /// Ordered (code, name) pairs for the listing surfaces. Fetches a fresh
    /// snapshot unless the caller already holds one.
    pub async fn list_entries(
        &self,
        rates: Option<&RateTable>,
    ) -> Result<Vec<(String, String)>, SourceError> {
        let pairs = |rates: &RateTable| {
            rates
                .entries()
                .iter()
                .map(|info| (info.code.clone(), info.name.clone()))
                .collect()
        };

        match rates {
            Some(rates) => Ok(pairs(rates)),
            None => Ok(pairs(&self.provider.fetch_rates().await?)),
        }
    }

    /// Fetches a fresh snapshot from the provider.
    pub async fn fetch_rates(&self) -> Result<RateTable, SourceError> {
        self.provider.fetch_rates().await
    }
}
