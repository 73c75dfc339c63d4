use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;

use crate::models::{ScanMode, Signal, TickerSignal};
use crate::utils::{date, Logger};

/// Paths of the two artifacts produced for one batch.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub text: PathBuf,
    pub csv: PathBuf,
}

/// Writes the aggregate text and CSV reports for a completed scan.
pub struct ReportWriter {
    output_dir: PathBuf,
    logger: Logger,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("creating output dir {}", output_dir.display()))?;

        Ok(Self {
            output_dir,
            logger: Logger::new("REPORT"),
        })
    }

    /// Write both reports, named `<mode>_<timestamp>.{txt,csv}`. A batch with
    /// no signals writes nothing and returns `None`.
    pub fn write(
        &self,
        mode: ScanMode,
        signals: &[TickerSignal],
    ) -> anyhow::Result<Option<ReportPaths>> {
        if signals.is_empty() {
            self.logger.warn("No results to save");
            return Ok(None);
        }

        let stamp = date::report_timestamp(chrono::Utc::now());
        let text = self
            .output_dir
            .join(format!("{}_{}.txt", mode.as_str(), stamp));
        let csv = self
            .output_dir
            .join(format!("{}_{}.csv", mode.as_str(), stamp));

        self.write_text(&text, signals)
            .with_context(|| format!("writing {}", text.display()))?;
        self.write_csv(&csv, signals)
            .with_context(|| format!("writing {}", csv.display()))?;

        self.logger
            .info(&format!("✅ Results saved to: {}", text.display()));
        self.logger
            .info(&format!("✅ CSV file saved to: {}", csv.display()));

        Ok(Some(ReportPaths { text, csv }))
    }

    fn write_text(&self, path: &PathBuf, signals: &[TickerSignal]) -> anyhow::Result<()> {
        let golden: Vec<&str> = signals
            .iter()
            .filter(|s| s.signal == Signal::Bullish)
            .map(|s| s.ticker.as_str())
            .collect();
        let death: Vec<&str> = signals
            .iter()
            .filter(|s| s.signal == Signal::Bearish)
            .map(|s| s.ticker.as_str())
            .collect();

        let mut file = File::create(path)?;
        writeln!(file, "📊 STOCK CROSSOVER REPORT")?;
        writeln!(file, "{}", "-".repeat(40))?;

        if !golden.is_empty() {
            writeln!(file, "\n🟢 GOLDEN CROSSES ({})", golden.len())?;
            for ticker in &golden {
                writeln!(file, "- {}", ticker)?;
            }
        }

        if !death.is_empty() {
            writeln!(file, "\n🔴 DEATH CROSSES ({})", death.len())?;
            for ticker in &death {
                writeln!(file, "- {}", ticker)?;
            }
        }

        writeln!(file, "\n✅ End of Report")?;
        Ok(())
    }

    fn write_csv(&self, path: &PathBuf, signals: &[TickerSignal]) -> anyhow::Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for signal in signals {
            writer.serialize(signal)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_signals() -> Vec<TickerSignal> {
        vec![
            TickerSignal {
                ticker: "AAPL".to_string(),
                signal: Signal::Bullish,
                volume_trend: "Volume: Up".to_string(),
            },
            TickerSignal {
                ticker: "MSFT".to_string(),
                signal: Signal::Bullish,
                volume_trend: "Volume: Up".to_string(),
            },
            TickerSignal {
                ticker: "XOM".to_string(),
                signal: Signal::Bearish,
                volume_trend: "Volume: Up".to_string(),
            },
        ]
    }

    #[test]
    fn writes_text_and_csv_reports() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();

        let paths = writer
            .write(ScanMode::Manual, &sample_signals())
            .unwrap()
            .unwrap();

        let text = fs::read_to_string(&paths.text).unwrap();
        assert!(text.contains("STOCK CROSSOVER REPORT"));
        assert!(text.contains("GOLDEN CROSSES (2)"));
        assert!(text.contains("- AAPL"));
        assert!(text.contains("DEATH CROSSES (1)"));
        assert!(text.contains("- XOM"));
        assert!(text.contains("End of Report"));

        let csv = fs::read_to_string(&paths.csv).unwrap();
        assert!(csv.starts_with("ticker,signal,volume_trend\n"));
        assert!(csv.contains("AAPL,bullish,Volume: Up"));
        assert!(csv.contains("XOM,bearish,Volume: Up"));

        assert!(paths
            .text
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("Manual_"));
    }

    #[test]
    fn empty_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path()).unwrap();
        assert!(writer.write(ScanMode::Sp500, &[]).unwrap().is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
