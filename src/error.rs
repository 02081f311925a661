//! Error taxonomy.
//!
//! Two layers:
//!
//! - [`PlateauError`] is raised by the pure detector. It only covers integration
//!   mistakes (a date member of a kind we cannot interpret, nonsensical
//!   parameters). Malformed rows and thin data are *not* errors; they are
//!   filtered out or reported through the report's `reason`.
//! - [`AppError`] is what the binary deals in: a message plus the process exit
//!   code to use.

use thiserror::Error;

/// Hard failures from the plateau detector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlateauError {
    #[error("Unsupported date type in `{field}`: {kind}")]
    UnsupportedDateType { field: &'static str, kind: String },

    #[error("Invalid plateau parameters: {reason}")]
    InvalidParams { reason: String },

    #[error("Median split produced an empty {half} half")]
    EmptyHalf { half: &'static str },
}

/// Application-level error carrying an exit code.
///
/// Exit codes:
/// - `2`: bad arguments or unreadable input files
/// - `3`: no usable data
/// - `4`: detector/internal failure
#[derive(Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl From<PlateauError> for AppError {
    fn from(err: PlateauError) -> Self {
        AppError::new(4, err.to_string())
    }
}
