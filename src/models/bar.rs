use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day for a single instrument.
///
/// Series are kept ascending by date, one entry per trading day. The date is
/// used for ordering and labelling only; the crossover arithmetic operates on
/// close and volume alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(date: NaiveDate, close: f64, volume: f64) -> Self {
        Self {
            date,
            close,
            volume,
        }
    }
}

/// Extract the close series from a bar series.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Extract the volume series from a bar series.
pub fn volumes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume).collect()
}
