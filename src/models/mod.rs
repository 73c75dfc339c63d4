pub mod bar;
pub mod signal;
pub mod ticker;

pub use bar::Bar;
pub use signal::{CrossoverReading, Evaluation, Signal, TickerSignal};
pub use ticker::{ScanMode, TickerSource};
