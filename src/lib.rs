//! `weight-plateau` library crate.
//!
//! The binary (`plateau`) is a thin wrapper around this library so that:
//!
//! - the detector is testable without spawning processes
//! - the detector can be embedded in a request handler that already holds
//!   the weigh-in rows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plateau;
pub mod report;

pub use domain::{PlateauParams, PlateauReport, SodiumRecord, WeighInRecord};
pub use error::{AppError, PlateauError};
pub use plateau::detect_plateau;
