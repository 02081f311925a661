//! Domain types used throughout the detector.
//!
//! This module defines:
//!
//! - loosely-typed input records and the strict `Sample` (`types`)
//! - detector tunables (`params`)
//! - the report emitted per evaluation (`report`)

pub mod params;
pub mod report;
pub mod types;

pub use params::*;
pub use report::*;
pub use types::*;
