use crate::core::rates::{CurrencyInfo, RateProvider, RateTable, SourceError};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::{debug, instrument};

/// The public mirror of the Bank of Russia daily rates document.
pub const DEFAULT_BASE_URL: &str = "https://www.cbr-xml-daily.ru";

/// Fetches the daily snapshot from a CBR-compatible endpoint. The base URL
/// is injected so tests can point at a mock server.
pub struct CbrProvider {
    base_url: String,
}

impl CbrProvider {
    pub fn new(base_url: &str) -> Self {
        CbrProvider {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DailyRatesResponse {
    #[serde(rename = "Date")]
    date: Option<DateTime<FixedOffset>>,
    // serde_json's preserve_order keeps the document's key order here.
    #[serde(rename = "Valute")]
    valute: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DailyQuote {
    #[serde(rename = "CharCode")]
    char_code: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Value")]
    value: f64,
}

#[async_trait]
impl RateProvider for CbrProvider {
    #[instrument(name = "CbrRatesFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<RateTable, SourceError> {
        let url = format!("{}/daily_json.js", self.base_url);
        debug!("Requesting daily rates from {}", url);

        let client = reqwest::Client::builder().user_agent("kurs/0.1").build()?;
        let response = client.get(&url).send().await?.error_for_status()?;
        let text = response.text().await?;

        let daily: DailyRatesResponse = serde_json::from_str(&text)?;

        let mut rates = RateTable::new(daily.date);
        for (_, quote) in daily.valute {
            let quote: DailyQuote = serde_json::from_value(quote)?;
            rates.insert(CurrencyInfo {
                code: quote.char_code,
                name: quote.name,
                rate: quote.value,
            });
        }
        rates.insert_rub();

        debug!("Fetched {} currencies", rates.len());
        Ok(rates)
    }
}
