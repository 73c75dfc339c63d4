use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use plotters::element::Polygon;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::analysis::rolling::rolling_mean_min1;
use crate::models::{bar, Bar, Signal};
use crate::utils::Logger;

const CHART_SIZE: (u32, u32) = (1280, 720);

/// Renders one chart artifact per detected crossover, keyed by ticker.
///
/// The chart shows the close price, both SMAs (dashed), a shaded band between
/// the averages on the signal side, and a marker on the crossover bar.
pub struct ChartRenderer {
    plots_dir: PathBuf,
    logger: Logger,
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let plots_dir = output_dir.into().join("plots");
        fs::create_dir_all(&plots_dir)
            .with_context(|| format!("creating plots dir {}", plots_dir.display()))?;

        Ok(Self {
            plots_dir,
            logger: Logger::new("CHART"),
        })
    }

    /// Render `<plots_dir>/<TICKER>_chart.svg` for a detected event.
    pub fn render(&self, ticker: &str, bars: &[Bar], signal: Signal) -> anyhow::Result<PathBuf> {
        anyhow::ensure!(signal.is_event(), "no crossover event to chart");
        anyhow::ensure!(bars.len() >= 2, "series too short to chart");

        let bullish = signal == Signal::Bullish;
        let closes = bar::closes(bars);
        let sma50 = rolling_mean_min1(&closes, 50);
        let sma150 = rolling_mean_min1(&closes, 150);

        let path = self.plots_dir.join(format!("{}_chart.svg", ticker));
        let cross_label = if bullish { "Golden Cross" } else { "Death Cross" };

        {
            let root = SVGBackend::new(&path, CHART_SIZE).into_drawing_area();
            root.fill(&WHITE)?;

            let n = bars.len();
            let (y_min, y_max) = value_bounds(&[&closes, &sma50, &sma150]);

            let mut chart = ChartBuilder::on(&root)
                .caption(
                    format!("{} - {} Detected", ticker, cross_label),
                    ("sans-serif", 28),
                )
                .margin(12)
                .x_label_area_size(44)
                .y_label_area_size(64)
                .build_cartesian_2d(0i32..(n as i32 - 1), y_min..y_max)?;

            chart
                .configure_mesh()
                .x_labels(12)
                .x_label_formatter(&|x: &i32| {
                    bars.get(*x as usize)
                        .map(|b| b.date.format("%b %Y").to_string())
                        .unwrap_or_default()
                })
                .y_desc("Price ($)")
                .draw()?;

            // Shade the band between the averages wherever the signal side
            // of the crossing holds.
            let band_color = if bullish { GREEN } else { RED };
            for run in signal_side_runs(&sma50, &sma150, bullish) {
                let mut points: Vec<(i32, f64)> =
                    run.iter().map(|&i| (i as i32, sma50[i])).collect();
                points.extend(run.iter().rev().map(|&i| (i as i32, sma150[i])));
                chart.draw_series(std::iter::once(Polygon::new(points, band_color.mix(0.25))))?;
            }

            chart
                .draw_series(LineSeries::new(
                    closes.iter().enumerate().map(|(i, &c)| (i as i32, c)),
                    BLACK.stroke_width(2),
                ))?
                .label("Close Price")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

            chart
                .draw_series(DashedLineSeries::new(
                    sma50.iter().enumerate().map(|(i, &v)| (i as i32, v)),
                    8,
                    4,
                    BLUE.stroke_width(2),
                ))?
                .label("SMA50")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

            chart
                .draw_series(DashedLineSeries::new(
                    sma150.iter().enumerate().map(|(i, &v)| (i as i32, v)),
                    8,
                    4,
                    RED.stroke_width(2),
                ))?
                .label("SMA150")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

            // Mark the crossover bar itself.
            chart.draw_series(std::iter::once(Circle::new(
                ((n - 1) as i32, sma50[n - 1]),
                5,
                band_color.filled(),
            )))?;

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;

            root.present()?;
        }

        self.logger
            .info(&format!("📊 Plot saved: {}", path.display()));
        Ok(path)
    }
}

/// Min/max across several series, padded so lines don't sit on the frame.
fn value_bounds(series: &[&Vec<f64>]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for values in series {
        for &v in values.iter() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.02).max(1.0);
    (min - pad, max + pad)
}

/// Contiguous index runs where the fast average is on the signal side of the
/// slow one. Single-index runs are skipped; a polygon needs width.
fn signal_side_runs(sma50: &[f64], sma150: &[f64], bullish: bool) -> Vec<Vec<usize>> {
    let on_side = |i: usize| {
        if bullish {
            sma50[i] >= sma150[i]
        } else {
            sma50[i] <= sma150[i]
        }
    };

    let mut runs = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    for i in 0..sma50.len() {
        if on_side(i) {
            current.push(i);
        } else if current.len() > 1 {
            runs.push(std::mem::take(&mut current));
        } else {
            current.clear();
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}
