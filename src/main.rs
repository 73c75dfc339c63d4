use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crosswatch::config::AppConfig;
use crosswatch::init_logger;
use crosswatch::models::TickerSource;
use crosswatch::scan::{run_scan, ScanConfig};

#[derive(Parser)]
#[command(name = "crosswatch")]
#[command(about = "Golden/death cross scanner with volume confirmation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a ticker list for SMA crossover events
    Scan {
        /// Where the ticker list comes from
        #[arg(short, long, value_enum)]
        source: SourceArg,
        /// Ticker file, one symbol per line (with --source file)
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Comma-separated ticker symbols (with --source manual)
        #[arg(short, long)]
        tickers: Option<String>,
        /// Directory for reports, charts, and saved listings
        #[arg(short, long, env = "OUTPUT_DIR", default_value = "output_files")]
        output_dir: PathBuf,
        /// Concurrent history fetches
        #[arg(short, long)]
        concurrency: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    Sp500,
    Nasdaq,
    File,
    Manual,
}

fn build_source(
    source: SourceArg,
    file: Option<PathBuf>,
    tickers: Option<String>,
) -> anyhow::Result<TickerSource> {
    match source {
        SourceArg::Sp500 => Ok(TickerSource::Sp500),
        SourceArg::Nasdaq => Ok(TickerSource::Nasdaq),
        SourceArg::File => {
            let path = file.ok_or_else(|| anyhow::anyhow!("--source file requires --file"))?;
            Ok(TickerSource::File(path))
        }
        SourceArg::Manual => {
            let list = tickers
                .ok_or_else(|| anyhow::anyhow!("--source manual requires --tickers"))?;
            Ok(TickerSource::Manual(
                list.split(',').map(|s| s.to_string()).collect(),
            ))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = AppConfig::from_env();
    init_logger()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan {
            source,
            file,
            tickers,
            output_dir,
            concurrency,
        } => {
            let config = ScanConfig {
                source: build_source(source, file, tickers)?,
                output_dir,
                concurrency: concurrency.unwrap_or(app.fetch_concurrency),
            };

            let summary = run_scan(&app, &config).await?;

            if summary.signals.is_empty() {
                println!("No crossover signals detected.");
            } else {
                println!("\n📊 Stocks with crossover signals:");
                for signal in &summary.signals {
                    println!(
                        "📌 {}  {}  ({})",
                        signal.ticker,
                        signal.signal.label(),
                        signal.volume_trend
                    );
                }
                println!("\n✅ Total Golden Crosses: {}", summary.golden);
                println!("❌ Total Death Crosses: {}", summary.death);
            }

            if let Some(reports) = &summary.reports {
                println!("Report: {}", reports.text.display());
                println!("CSV:    {}", reports.csv.display());
            }
            for chart in &summary.charts {
                println!("Chart:  {}", chart.display());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_source_requires_tickers() {
        assert!(build_source(SourceArg::Manual, None, None).is_err());
        let source =
            build_source(SourceArg::Manual, None, Some("aapl,msft".to_string())).unwrap();
        assert!(matches!(source, TickerSource::Manual(ref v) if v.len() == 2));
    }

    #[test]
    fn file_source_requires_a_path() {
        assert!(build_source(SourceArg::File, None, None).is_err());
        let source = build_source(SourceArg::File, Some("stocks.txt".into()), None).unwrap();
        assert!(matches!(source, TickerSource::File(_)));
    }
}
