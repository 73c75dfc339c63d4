pub mod crossover;
pub mod rolling;

pub use crossover::{evaluate, MIN_BARS};
