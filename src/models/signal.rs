use serde::{Deserialize, Serialize};

/// Classification of the latest bar of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// SMA50 crossed up through SMA150 with rising volume.
    Bullish,
    /// SMA50 crossed down through SMA150 with rising volume.
    Bearish,
    /// No confirmed crossover on the latest bar.
    None,
    /// Series shorter than the longest lookback; no evaluation possible.
    InsufficientData,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Bullish => "bullish",
            Signal::Bearish => "bearish",
            Signal::None => "none",
            Signal::InsufficientData => "insufficient_data",
        }
    }

    /// Display label used in console output and chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Bullish => "GOLDEN CROSS (BULLISH)",
            Signal::Bearish => "DEATH CROSS (BEARISH)",
            Signal::None => "NO SIGNAL",
            Signal::InsufficientData => "INSUFFICIENT DATA",
        }
    }

    /// True for the two classifications that produce report rows and charts.
    pub fn is_event(&self) -> bool {
        matches!(self, Signal::Bullish | Signal::Bearish)
    }
}

/// The derived values at the last two indices of a series, captured so report
/// and chart collaborators can render exactly what the evaluator compared.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossoverReading {
    pub sma50: f64,
    pub prev_sma50: f64,
    pub sma150: f64,
    pub prev_sma150: f64,
    pub vol_avg5: f64,
    pub prev_vol_avg5: f64,
    pub vol_avg10: f64,
}

impl CrossoverReading {
    /// Volume confirmation: short-term volume above the longer-term average
    /// and rising versus the previous bar.
    pub fn volume_rising(&self) -> bool {
        self.vol_avg5 > self.vol_avg10 && self.vol_avg5 > self.prev_vol_avg5
    }

    pub fn volume_trend_text(&self) -> &'static str {
        if self.volume_rising() {
            "Volume: Up"
        } else {
            "Volume: Down"
        }
    }
}

/// Full evaluator output: the classification plus the numeric comparisons
/// that produced it. `reading` is `None` only for `InsufficientData`.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub signal: Signal,
    pub reading: Option<CrossoverReading>,
}

/// One row of the batch outcome, serialized as-is into the CSV report.
#[derive(Debug, Clone, Serialize)]
pub struct TickerSignal {
    pub ticker: String,
    pub signal: Signal,
    pub volume_trend: String,
}
