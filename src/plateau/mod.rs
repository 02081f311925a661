//! Weight plateau detection.
//!
//! Responsibilities:
//!
//! - clean loosely-typed records into sorted samples (`clean`)
//! - trailing window arithmetic (`window`)
//! - smoothing, slope, median split, gating and the sodium overlay (`detector`)

pub mod clean;
pub mod detector;
pub mod window;

pub use clean::*;
pub use detector::*;
pub use window::*;
