//! Crossover evaluator: classifies the latest bar of a daily series as a
//! volume-confirmed golden cross, death cross, or neither.

use crate::analysis::rolling::{rolling_mean, rolling_mean_min1};
use crate::models::{bar, Bar, CrossoverReading, Evaluation, Signal};

/// SMA150 and VolAvg10 need the longest lookback; anything shorter than this
/// is reported as insufficient data rather than evaluated.
pub const MIN_BARS: usize = 150;

const SMA_FAST: usize = 50;
const SMA_SLOW: usize = 150;
const VOL_FAST: usize = 5;
const VOL_SLOW: usize = 10;

/// Evaluate a bar series (ascending by date, one entry per trading day).
///
/// Pure function of the input: no I/O, no state. A series shorter than
/// [`MIN_BARS`] yields `InsufficientData` with no reading; that is a normal
/// negative result, not an error.
///
/// The price averages use a minimum period of 1 (early indices hold partial
/// averages); the volume averages are undefined until their window fills.
/// A bar where SMA50 equals SMA150 counts as having crossed from whichever
/// side the previous bar was on; the `>=`/`<=` comparators are intentional.
pub fn evaluate(bars: &[Bar]) -> Evaluation {
    if bars.len() < MIN_BARS {
        return Evaluation {
            signal: Signal::InsufficientData,
            reading: None,
        };
    }

    let closes = bar::closes(bars);
    let volumes = bar::volumes(bars);

    let sma50 = rolling_mean_min1(&closes, SMA_FAST);
    let sma150 = rolling_mean_min1(&closes, SMA_SLOW);
    let vol_avg5 = rolling_mean(&volumes, VOL_FAST);
    let vol_avg10 = rolling_mean(&volumes, VOL_SLOW);

    let i = bars.len() - 1;
    let reading = CrossoverReading {
        sma50: sma50[i],
        prev_sma50: sma50[i - 1],
        sma150: sma150[i],
        prev_sma150: sma150[i - 1],
        vol_avg5: vol_avg5[i],
        prev_vol_avg5: vol_avg5[i - 1],
        vol_avg10: vol_avg10[i],
    };

    let bullish_cross = reading.prev_sma50 < reading.prev_sma150 && reading.sma50 >= reading.sma150;
    let bearish_cross = reading.prev_sma50 > reading.prev_sma150 && reading.sma50 <= reading.sma150;
    let volume_up = reading.volume_rising();

    let signal = if bullish_cross && volume_up {
        Signal::Bullish
    } else if bearish_cross && volume_up {
        Signal::Bearish
    } else {
        Signal::None
    };

    Evaluation {
        signal,
        reading: Some(reading),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bars_from(closes: &[f64], volumes: &[f64]) -> Vec<Bar> {
        assert_eq!(closes.len(), volumes.len());
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .zip(volumes.iter())
            .enumerate()
            .map(|(i, (&close, &volume))| {
                Bar::new(start + chrono::Duration::days(i as i64), close, volume)
            })
            .collect()
    }

    /// 160 bars: 110 at `old`, 49 at `recent`, then `last`. Lets a single
    /// final bar push SMA50 across SMA150 in either direction.
    fn step_closes(old: f64, recent: f64, last: f64) -> Vec<f64> {
        let mut closes = vec![old; 110];
        closes.extend(std::iter::repeat(recent).take(49));
        closes.push(last);
        closes
    }

    /// Flat volume with an increasing burst over the last five bars, which
    /// satisfies both legs of the confirmation rule.
    fn rising_volumes(len: usize) -> Vec<f64> {
        let mut volumes = vec![1000.0; len - 5];
        volumes.extend([2000.0, 3000.0, 4000.0, 5000.0, 6000.0]);
        volumes
    }

    #[test]
    fn short_series_is_insufficient_data() {
        let bars = bars_from(&vec![100.0; 149], &vec![1000.0; 149]);
        let eval = evaluate(&bars);
        assert_eq!(eval.signal, Signal::InsufficientData);
        assert!(eval.reading.is_none());
    }

    #[test]
    fn empty_series_is_insufficient_data() {
        assert_eq!(evaluate(&[]).signal, Signal::InsufficientData);
    }

    #[test]
    fn constant_close_never_crosses() {
        // Both SMAs sit on the constant, so neither strict prior-side
        // condition holds even with rising volume.
        let closes = vec![100.0; 160];
        let bars = bars_from(&closes, &rising_volumes(160));
        let eval = evaluate(&bars);
        assert_eq!(eval.signal, Signal::None);
        let reading = eval.reading.unwrap();
        assert_eq!(reading.sma50, 100.0);
        assert_eq!(reading.sma150, 100.0);
    }

    #[test]
    fn confirmed_bullish_cross_on_last_bar() {
        let closes = step_closes(100.0, 99.0, 200.0);
        let bars = bars_from(&closes, &rising_volumes(160));
        let eval = evaluate(&bars);
        assert_eq!(eval.signal, Signal::Bullish);

        let reading = eval.reading.unwrap();
        assert!(reading.prev_sma50 < reading.prev_sma150);
        assert!(reading.sma50 >= reading.sma150);
        assert!((reading.sma50 - 101.02).abs() < 1e-9);
        assert!((reading.vol_avg5 - 4000.0).abs() < 1e-9);
        assert!((reading.vol_avg10 - 2500.0).abs() < 1e-9);
        assert!(reading.volume_rising());
    }

    #[test]
    fn confirmed_bearish_cross_on_last_bar() {
        let closes = step_closes(100.0, 101.0, 10.0);
        let bars = bars_from(&closes, &rising_volumes(160));
        let eval = evaluate(&bars);
        assert_eq!(eval.signal, Signal::Bearish);

        let reading = eval.reading.unwrap();
        assert!(reading.prev_sma50 > reading.prev_sma150);
        assert!(reading.sma50 <= reading.sma150);
    }

    #[test]
    fn cross_without_volume_confirmation_is_none() {
        let closes = step_closes(100.0, 99.0, 200.0);
        let bars = bars_from(&closes, &vec![1000.0; 160]);
        let eval = evaluate(&bars);
        assert_eq!(eval.signal, Signal::None);
        assert!(!eval.reading.unwrap().volume_rising());
    }

    #[test]
    fn equal_smas_on_last_bar_count_as_crossed() {
        // last = 149 lands both averages on exactly 100.0; coming from below
        // the >= comparator still fires.
        let closes = step_closes(100.0, 99.0, 149.0);
        let bars = bars_from(&closes, &rising_volumes(160));
        let eval = evaluate(&bars);
        let reading = eval.reading.unwrap();
        assert_eq!(reading.sma50, reading.sma150);
        assert_eq!(eval.signal, Signal::Bullish);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let closes = step_closes(100.0, 99.0, 200.0);
        let bars = bars_from(&closes, &rising_volumes(160));
        assert_eq!(evaluate(&bars), evaluate(&bars));
    }
}
