//! Shared `detect` workflow, independent of how the result is printed.
//!
//! load weigh-ins -> load sodium (file or nutrition rollup) -> detect

use tracing::info;

use crate::domain::{PlateauReport, RunConfig, SodiumRecord, WeighInRecord};
use crate::error::AppError;
use crate::io::{load_nutrition_summary, load_records};
use crate::plateau::detect_plateau;

/// All computed outputs of a single `plateau detect` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub report: PlateauReport,
    pub weighins_read: usize,
    pub weighins_loaded: usize,
    pub row_errors: usize,
    /// Sodium entries supplied, if any source was given.
    pub sodium_days: Option<usize>,
}

/// Execute the detection pipeline.
pub fn run_detect(config: &RunConfig) -> Result<RunOutput, AppError> {
    let weighins = load_records::<WeighInRecord>(&config.weighins_path)?;
    if weighins.records.is_empty() {
        return Err(AppError::new(
            3,
            format!("No weigh-ins found in '{}'.", config.weighins_path.display()),
        ));
    }

    let sodium = load_sodium(config)?;
    let report = detect_plateau(&weighins.records, sodium.as_deref(), &config.params)?;

    info!(
        detected = report.detected(),
        severity = report.severity().map(|s| s.as_str()),
        reason = report.reason().map(|r| r.as_str()),
        "plateau evaluated"
    );

    Ok(RunOutput {
        report,
        weighins_read: weighins.rows_read,
        weighins_loaded: weighins.records.len(),
        row_errors: weighins.row_errors.len(),
        sodium_days: sodium.as_ref().map(Vec::len),
    })
}

fn load_sodium(config: &RunConfig) -> Result<Option<Vec<SodiumRecord>>, AppError> {
    if let Some(path) = &config.sodium_path {
        return Ok(Some(load_records::<SodiumRecord>(path)?.records));
    }
    if let Some(path) = &config.nutrition_csv {
        return Ok(Some(load_nutrition_summary(path)?.sodium_records()));
    }
    Ok(None)
}
