//! # crosswatch
//!
//! Golden cross / death cross scanner for equity tickers:
//! - trailing 1-year daily history per instrument
//! - 50/150-day simple moving averages with 5/10-day volume confirmation
//! - a chart artifact per detected event
//! - aggregate text and CSV reports per scan
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crosswatch::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = AppConfig::from_env();
//!     let config = ScanConfig {
//!         source: TickerSource::Manual(vec!["AAPL".to_string()]),
//!         output_dir: "output_files".into(),
//!         concurrency: 4,
//!     };
//!     let summary = run_scan(&app, &config).await?;
//!     println!("{} golden, {} death", summary.golden, summary.death);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod models;
pub mod scan;
pub mod services;
pub mod utils;

pub mod prelude {
    //! Convenient imports for library users.

    pub use crate::analysis::{evaluate, MIN_BARS};
    pub use crate::config::AppConfig;
    pub use crate::models::{Bar, CrossoverReading, Evaluation, Signal, TickerSignal, TickerSource};
    pub use crate::scan::{run_scan, ScanConfig, ScanSummary};
}

pub use utils::init_logger;
