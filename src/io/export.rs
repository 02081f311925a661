//! Report output.
//!
//! Reports are wrapped as `{"plateau": <report>}`, the response body shape
//! consumers of the analytics endpoint already parse.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::PlateauReport;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct PlateauResponse<'a> {
    pub plateau: &'a PlateauReport,
}

/// Render the response envelope as pretty JSON.
pub fn report_json(report: &PlateauReport) -> Result<String, AppError> {
    serde_json::to_string_pretty(&PlateauResponse { plateau: report })
        .map_err(|e| AppError::new(4, format!("Failed to serialize report: {e}")))
}

/// Write the response envelope to `path`.
pub fn write_report_json(path: &Path, report: &PlateauReport) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;
    let body = report_json(report)?;
    writeln!(file, "{body}").map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlateauParams;
    use crate::plateau::detect_plateau;

    #[test]
    fn wraps_report_in_plateau_envelope() {
        let report = detect_plateau(&[], None, &PlateauParams::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report_json(&report).unwrap()).unwrap();
        assert_eq!(json["plateau"]["reason"], "no_weighins");
        assert_eq!(json["plateau"]["detected"], false);
    }
}
