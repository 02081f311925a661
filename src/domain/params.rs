//! Detector tunables and the resolved run configuration.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::PlateauError;

/// All knobs of the plateau detector. Defaults match the CLI defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateauParams {
    /// Trailing calendar-day span, anchored at the latest weigh-in.
    pub window_days: u32,
    /// Minimum weigh-ins inside the window (never less than 2 in practice).
    pub min_weighins: usize,
    /// Rolling-mean width in samples (also the EWMA span).
    pub ma_window_points: usize,

    pub slope_flat_lbs_per_week: f64,
    pub net_change_lbs: f64,
    pub strong_slope_lbs_per_week: f64,
    pub strong_net_change_lbs: f64,

    /// Fall back to EWMA when the rolling mean yields fewer than 2 points.
    pub use_ewma_if_sparse: bool,

    /// Daily sodium (mg) at or above which a day counts as a spike.
    pub sodium_spike_mg: f64,
    /// Spike days needed to attach the water-retention flag.
    pub sodium_spike_days_flag: usize,
}

impl Default for PlateauParams {
    fn default() -> Self {
        Self {
            window_days: 14,
            min_weighins: 10,
            ma_window_points: 7,
            slope_flat_lbs_per_week: 0.25,
            net_change_lbs: 0.5,
            strong_slope_lbs_per_week: 0.15,
            strong_net_change_lbs: 0.3,
            use_ewma_if_sparse: true,
            sodium_spike_mg: 2300.0,
            sodium_spike_days_flag: 4,
        }
    }
}

impl PlateauParams {
    /// Effective sufficiency threshold for the window.
    pub fn required_weighins(&self) -> usize {
        self.min_weighins.max(2)
    }

    pub fn validate(&self) -> Result<(), PlateauError> {
        if self.window_days == 0 {
            return Err(invalid("window_days must be >= 1"));
        }
        if self.ma_window_points == 0 {
            return Err(invalid("ma_window_points must be >= 1"));
        }
        let thresholds = [
            ("slope_flat_lbs_per_week", self.slope_flat_lbs_per_week),
            ("net_change_lbs", self.net_change_lbs),
            ("strong_slope_lbs_per_week", self.strong_slope_lbs_per_week),
            ("strong_net_change_lbs", self.strong_net_change_lbs),
            ("sodium_spike_mg", self.sodium_spike_mg),
        ];
        for (name, v) in thresholds {
            if !v.is_finite() {
                return Err(invalid(format!("{name} must be finite (got {v})")));
            }
        }
        Ok(())
    }
}

/// How `plateau detect` prints its report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{"plateau": <report>}` as pretty JSON.
    Json,
    /// Terminal summary.
    Text,
}

/// A full `detect` run as understood by the pipeline.
///
/// Built once from CLI flags, environment and defaults; nothing downstream
/// reads the environment again.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub weighins_path: PathBuf,
    pub sodium_path: Option<PathBuf>,
    pub nutrition_csv: Option<PathBuf>,
    pub params: PlateauParams,
    pub format: OutputFormat,
    pub export: Option<PathBuf>,
}

fn invalid(reason: impl Into<String>) -> PlateauError {
    PlateauError::InvalidParams {
        reason: reason.into(),
    }
}
