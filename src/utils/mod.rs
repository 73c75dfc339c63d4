pub mod date;
pub mod logger;

pub use logger::{init_logger, Logger, Timer};
