use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use regex::Regex;

use crate::config::AppConfig;
use crate::models::TickerSource;
use crate::utils::Logger;

/// Resolves a [`TickerSource`] into a cleaned list of symbols.
///
/// Remote listings are constituents CSV files with a `Symbol` column; local
/// files hold one symbol per line. Every source goes through the same shape
/// filter: entries are uppercased and kept only when fully alphabetic, so a
/// malformed row is dropped instead of failing the scan.
pub struct ListingService {
    client: reqwest::Client,
    sp500_url: String,
    nasdaq_url: String,
    symbol_re: Regex,
    logger: Logger,
}

impl ListingService {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            sp500_url: config.sp500_listing_url.clone(),
            nasdaq_url: config.nasdaq_listing_url.clone(),
            symbol_re: Regex::new(r"^[A-Z]+$").context("symbol pattern")?,
            logger: Logger::new("LISTING"),
        })
    }

    /// Resolve the source into symbols. Remote listings are also persisted to
    /// `<output_dir>/<name>_tickers.txt`, one symbol per line.
    pub async fn resolve(
        &self,
        source: &TickerSource,
        output_dir: &Path,
    ) -> anyhow::Result<Vec<String>> {
        let tickers = match source {
            TickerSource::Sp500 => {
                self.fetch_constituents(&self.sp500_url, "sp500", output_dir)
                    .await?
            }
            TickerSource::Nasdaq => {
                self.fetch_constituents(&self.nasdaq_url, "nasdaq", output_dir)
                    .await?
            }
            TickerSource::File(path) => self.from_file(path)?,
            TickerSource::Manual(symbols) => self.sanitize(symbols.iter().cloned()),
        };

        if tickers.is_empty() {
            anyhow::bail!("no valid tickers resolved from {:?}", source.mode());
        }

        self.logger
            .info(&format!("Resolved {} tickers", tickers.len()));
        Ok(tickers)
    }

    async fn fetch_constituents(
        &self,
        url: &str,
        name: &str,
        output_dir: &Path,
    ) -> anyhow::Result<Vec<String>> {
        self.logger
            .info(&format!("🌐 Downloading {} listing", name));

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
            .with_context(|| format!("reading {} listing body", name))?;

        let symbols = self.sanitize(extract_symbol_column(&body)?);

        if !symbols.is_empty() {
            let path = output_dir.join(format!("{}_tickers.txt", name));
            self.persist_listing(&path, &symbols)
                .with_context(|| format!("writing {}", path.display()))?;
            self.logger.info(&format!(
                "✅ {} listing saved: {} symbols -> {}",
                name,
                symbols.len(),
                path.display()
            ));
        }

        Ok(symbols)
    }

    fn from_file(&self, path: &Path) -> anyhow::Result<Vec<String>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading ticker file {}", path.display()))?;
        Ok(self.sanitize(content.lines().map(|line| line.to_string())))
    }

    /// Uppercase, trim, and keep only fully-alphabetic symbols.
    fn sanitize(&self, raw: impl IntoIterator<Item = String>) -> Vec<String> {
        raw.into_iter()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| self.symbol_re.is_match(s))
            .collect()
    }

    fn persist_listing(&self, path: &Path, symbols: &[String]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        for symbol in symbols {
            writeln!(file, "{}", symbol)?;
        }
        Ok(())
    }
}

/// Pull the `Symbol` column out of a constituents CSV.
fn extract_symbol_column(csv_text: &str) -> anyhow::Result<Vec<String>> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let headers = reader.headers().context("reading listing header")?;
    let column = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("symbol"))
        .context("listing has no Symbol column")?;

    let mut symbols = Vec::new();
    for record in reader.records() {
        let record = record.context("reading listing row")?;
        if let Some(symbol) = record.get(column) {
            symbols.push(symbol.to_string());
        }
    }
    Ok(symbols)
}
