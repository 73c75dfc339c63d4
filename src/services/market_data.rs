use chrono::DateTime;
use serde_json::Value;

use crate::config::AppConfig;
use crate::models::Bar;
use crate::utils::{date, Logger, Timer};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum MarketDataError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed chart payload: {0}")]
    InvalidResponse(String),
    #[error("no data returned for symbol")]
    NoData,
}

/// Thin client over a Yahoo-style chart endpoint.
///
/// Fetches the trailing one-year daily window for a symbol. A failed fetch
/// surfaces as an error for that instrument only; there are no retries, the
/// caller skips the instrument and moves on.
pub struct MarketDataClient {
    client: reqwest::Client,
    base_url: String,
    logger: Logger,
}

impl MarketDataClient {
    pub fn new(config: &AppConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.data_base_url.clone(),
            logger: Logger::new("MARKET_DATA"),
        })
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the trailing 1-year daily bar series for `symbol`, ascending by
    /// date.
    pub async fn fetch_daily_history(&self, symbol: &str) -> Result<Vec<Bar>, MarketDataError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let timer = Timer::start("history fetch");

        let response = self
            .client
            .get(&url)
            .query(&[("range", "1y"), ("interval", "1d")])
            .header("Accept", "application/json, text/plain, */*")
            .header("User-Agent", USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;
        let bars = parse_chart_response(&payload)?;

        if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
            self.logger.debug(&format!(
                "🌐 {}: {} bars ({} to {}) in {:.1}ms",
                symbol,
                bars.len(),
                date::format_date(first.date),
                date::format_date(last.date),
                timer.elapsed_ms()
            ));
        }

        Ok(bars)
    }
}

/// Parse the columnar chart payload into a sorted bar series.
///
/// The payload carries parallel arrays under `timestamp` and
/// `indicators.quote[0]`; rows with null close or volume (halted days) are
/// skipped.
fn parse_chart_response(payload: &Value) -> Result<Vec<Bar>, MarketDataError> {
    let result = payload
        .pointer("/chart/result/0")
        .ok_or(MarketDataError::NoData)?;

    let timestamps = result
        .get("timestamp")
        .and_then(|v| v.as_array())
        .ok_or_else(|| MarketDataError::InvalidResponse("missing timestamp array".to_string()))?;

    let quote = result
        .pointer("/indicators/quote/0")
        .ok_or_else(|| MarketDataError::InvalidResponse("missing quote block".to_string()))?;

    for key in ["close", "volume"] {
        if quote.get(key).is_none() {
            return Err(MarketDataError::InvalidResponse(format!(
                "missing key: {}",
                key
            )));
        }
    }

    let closes = quote["close"]
        .as_array()
        .ok_or_else(|| MarketDataError::InvalidResponse("invalid close array".to_string()))?;
    let volumes = quote["volume"]
        .as_array()
        .ok_or_else(|| MarketDataError::InvalidResponse("invalid volume array".to_string()))?;

    if closes.len() != timestamps.len() || volumes.len() != timestamps.len() {
        return Err(MarketDataError::InvalidResponse(
            "inconsistent array lengths".to_string(),
        ));
    }

    let mut bars = Vec::with_capacity(timestamps.len());
    for i in 0..timestamps.len() {
        let timestamp = timestamps[i].as_i64().ok_or_else(|| {
            MarketDataError::InvalidResponse(format!("invalid timestamp at index {}", i))
        })?;
        let date = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| {
                MarketDataError::InvalidResponse(format!(
                    "timestamp {} out of range at index {}",
                    timestamp, i
                ))
            })?
            .date_naive();

        // Null rows mark days without a quote; skip them.
        let (close, volume) = match (closes[i].as_f64(), volumes[i].as_f64()) {
            (Some(close), Some(volume)) => (close, volume),
            _ => continue,
        };

        bars.push(Bar::new(date, close, volume));
    }

    if bars.is_empty() {
        return Err(MarketDataError::NoData);
    }

    bars.sort_by_key(|b| b.date);
    Ok(bars)
}
