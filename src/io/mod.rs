//! Input/output helpers.
//!
//! - weigh-in / sodium record files, JSON or CSV (`ingest`)
//! - MyFitnessPal nutrition summary rollup (`nutrition`)
//! - report JSON output (`export`)

pub mod export;
pub mod ingest;
pub mod nutrition;

pub use export::*;
pub use ingest::*;
pub use nutrition::*;
