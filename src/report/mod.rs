//! Terminal rendering of plateau reports.

pub mod format;

pub use format::*;
