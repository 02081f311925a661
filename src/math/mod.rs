//! Numeric helpers: robust summaries, smoothing and the trend slope.

pub mod regression;
pub mod smoothing;
pub mod stats;

pub use regression::*;
pub use smoothing::*;
pub use stats::*;
