//! Trailing-window means over a daily series.
//!
//! Window sums are recomputed from the slice at each index rather than kept
//! as a running total, so integer-valued inputs stay exact in f64.

/// Trailing mean over up to `window` values, minimum period 1.
///
/// Early indices hold the partial average of however many values exist, so
/// the output is defined at every index of a non-empty input.
pub fn rolling_mean_min1(values: &[f64], window: usize) -> Vec<f64> {
    debug_assert!(window > 0);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            let slice = &values[start..=i];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Trailing mean over exactly `window` values, `NAN` until that many exist.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    debug_assert!(window > 0);
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                f64::NAN
            } else {
                values[i + 1 - window..=i].iter().sum::<f64>() / window as f64
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min1_mean_uses_partial_windows_early() {
        let values = [2.0, 4.0, 6.0, 8.0];
        let out = rolling_mean_min1(&values, 3);
        assert_eq!(out, vec![2.0, 3.0, 4.0, 6.0]);
    }

    #[test]
    fn min1_mean_of_empty_series_is_empty() {
        assert!(rolling_mean_min1(&[], 50).is_empty());
    }

    #[test]
    fn strict_mean_is_nan_during_warmup() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = rolling_mean(&values, 3);
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_eq!(out[2], 2.0);
        assert_eq!(out[3], 3.0);
        assert_eq!(out[4], 4.0);
    }

    #[test]
    fn window_of_one_reproduces_the_series() {
        let values = [3.0, 1.0, 4.0];
        assert_eq!(rolling_mean(&values, 1), values.to_vec());
        assert_eq!(rolling_mean_min1(&values, 1), values.to_vec());
    }
}
