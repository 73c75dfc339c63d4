//! Batch runner: resolves a ticker list, fetches and evaluates every
//! instrument, renders charts for detected events, and writes the reports.

use std::path::PathBuf;

use futures::StreamExt;
use tracing::info;

use crate::analysis;
use crate::config::AppConfig;
use crate::models::{Bar, ScanMode, Signal, TickerSignal, TickerSource};
use crate::services::{
    market_data::MarketDataError, ChartRenderer, ListingService, MarketDataClient, ReportPaths,
    ReportWriter,
};
use crate::utils::{Logger, Timer};

/// One scan invocation: where the tickers come from and where output lands.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub source: TickerSource,
    pub output_dir: PathBuf,
    pub concurrency: usize,
}

/// Aggregate outcome of a batch.
#[derive(Debug)]
pub struct ScanSummary {
    pub mode: ScanMode,
    pub signals: Vec<TickerSignal>,
    pub golden: usize,
    pub death: usize,
    /// Evaluated instruments with no confirmed crossover.
    pub quiet: usize,
    /// Instruments with fewer than the required bars.
    pub insufficient: usize,
    /// Instruments whose fetch failed and was skipped.
    pub failed: usize,
    pub reports: Option<ReportPaths>,
    pub charts: Vec<PathBuf>,
}

/// Run one scan to completion. Per-instrument failures (fetch errors,
/// insufficient data) are logged and counted without aborting the batch;
/// only setup problems (unresolvable ticker list, unwritable output dir)
/// surface as errors.
pub async fn run_scan(app: &AppConfig, config: &ScanConfig) -> anyhow::Result<ScanSummary> {
    let logger = Logger::new("SCAN");
    let listing = ListingService::new(app)?;
    let market = MarketDataClient::new(app)?;
    let charts = ChartRenderer::new(&config.output_dir)?;
    let reports = ReportWriter::new(&config.output_dir)?;

    let tickers = listing.resolve(&config.source, &config.output_dir).await?;
    let mode = config.source.mode();
    let concurrency = config.concurrency.max(1);

    info!(
        tickers = tickers.len(),
        concurrency,
        mode = mode.as_str(),
        "Starting crossover scan"
    );
    let timer = Timer::start("crossover scan");

    // Fetches overlap up to `concurrency`; evaluation itself is pure and
    // cheap, so it happens inline as results stream back in input order.
    let market_ref = &market;
    let fetched: Vec<(String, Result<Vec<Bar>, MarketDataError>)> =
        futures::stream::iter(tickers.into_iter().map(|ticker| async move {
            let result = market_ref.fetch_daily_history(&ticker).await;
            (ticker, result)
        }))
        .buffered(concurrency)
        .collect()
        .await;

    let mut summary = ScanSummary {
        mode,
        signals: Vec::new(),
        golden: 0,
        death: 0,
        quiet: 0,
        insufficient: 0,
        failed: 0,
        reports: None,
        charts: Vec::new(),
    };

    for (ticker, result) in fetched {
        let bars = match result {
            Ok(bars) => bars,
            Err(e) => {
                logger.warn_with_error(&format!("⚠️ Skipping {}", ticker), &e);
                summary.failed += 1;
                continue;
            }
        };

        let evaluation = analysis::evaluate(&bars);
        match (evaluation.signal, evaluation.reading) {
            (Signal::InsufficientData, _) | (_, None) => {
                logger.debug(&format!(
                    "{}: insufficient data ({} bars)",
                    ticker,
                    bars.len()
                ));
                summary.insufficient += 1;
            }
            (Signal::None, Some(_)) => {
                summary.quiet += 1;
            }
            (signal, Some(reading)) => {
                logger.info(&format!(
                    "📌 {}: {} (SMA50 {:.2} vs SMA150 {:.2})",
                    ticker,
                    signal.label(),
                    reading.sma50,
                    reading.sma150
                ));

                // A chart failure loses the artifact, not the signal.
                match charts.render(&ticker, &bars, signal) {
                    Ok(path) => summary.charts.push(path),
                    Err(e) => logger.warn(&format!("chart for {} failed: {:#}", ticker, e)),
                }

                if signal == Signal::Bullish {
                    summary.golden += 1;
                } else {
                    summary.death += 1;
                }
                summary.signals.push(TickerSignal {
                    ticker,
                    signal,
                    volume_trend: reading.volume_trend_text().to_string(),
                });
            }
        }
    }

    summary.reports = reports.write(mode, &summary.signals)?;

    info!(
        golden = summary.golden,
        death = summary.death,
        quiet = summary.quiet,
        insufficient = summary.insufficient,
        failed = summary.failed,
        elapsed_ms = timer.elapsed_ms(),
        "Scan complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Chart payload for a series that golden-crosses on the last bar with
    /// rising volume (mirrors the evaluator's synthetic construction).
    fn bullish_chart_payload() -> serde_json::Value {
        let mut closes: Vec<f64> = vec![100.0; 110];
        closes.extend(std::iter::repeat(99.0).take(49));
        closes.push(200.0);

        let mut volumes: Vec<f64> = vec![1000.0; 155];
        volumes.extend([2000.0, 3000.0, 4000.0, 5000.0, 6000.0]);

        let base = 1_700_000_000_i64;
        let timestamps: Vec<i64> = (0..160).map(|i| base + i * 86_400).collect();

        json!({
            "chart": {
                "result": [{
                    "timestamp": timestamps,
                    "indicators": { "quote": [{ "close": closes, "volume": volumes }] }
                }],
                "error": null
            }
        })
    }

    #[tokio::test]
    async fn batch_continues_past_failures_and_writes_artifacts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(bullish_chart_payload()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/BAD"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut app = AppConfig::default();
        app.data_base_url = server.uri();

        let dir = tempfile::tempdir().unwrap();
        let config = ScanConfig {
            source: TickerSource::Manual(vec!["AAPL".to_string(), "BAD".to_string()]),
            output_dir: dir.path().to_path_buf(),
            concurrency: 2,
        };

        let summary = run_scan(&app, &config).await.unwrap();

        assert_eq!(summary.golden, 1);
        assert_eq!(summary.death, 0);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.signals.len(), 1);
        assert_eq!(summary.signals[0].ticker, "AAPL");
        assert_eq!(summary.signals[0].signal, Signal::Bullish);

        let reports = summary.reports.expect("reports written for signals");
        assert!(reports.text.exists());
        assert!(reports.csv.exists());
        assert_eq!(summary.charts.len(), 1);
        assert!(summary.charts[0].exists());
    }

    #[tokio::test]
    async fn short_series_counts_as_insufficient_and_writes_nothing() {
        let payload = json!({
            "chart": {
                "result": [{
                    "timestamp": [1_700_000_000_i64, 1_700_086_400_i64],
                    "indicators": { "quote": [{ "close": [10.0, 11.0], "volume": [100, 110] }] }
                }],
                "error": null
            }
        });

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v8/finance/chart/TINY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload))
            .mount(&server)
            .await;

        let mut app = AppConfig::default();
        app.data_base_url = server.uri();

        let dir = tempfile::tempdir().unwrap();
        let config = ScanConfig {
            source: TickerSource::Manual(vec!["TINY".to_string()]),
            output_dir: dir.path().to_path_buf(),
            concurrency: 1,
        };

        let summary = run_scan(&app, &config).await.unwrap();
        assert_eq!(summary.insufficient, 1);
        assert!(summary.signals.is_empty());
        assert!(summary.reports.is_none());
    }
}
