//! Detector output.
//!
//! The report serializes to the JSON shape consumers already parse: early
//! exits carry `reason` plus window context, full evaluations carry every
//! intermediate statistic. Key order is part of that shape.

use chrono::NaiveDate;
use serde::Serialize;

/// Smoothing actually applied before the slope fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMethod {
    RollingMean,
    Ewma,
}

impl SmoothingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SmoothingMethod::RollingMean => "rolling_mean",
            SmoothingMethod::Ewma => "ewma",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Strong,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Strong => "strong",
        }
    }
}

/// Advisory tags attached after the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFlag {
    PossibleWaterRetentionHighSodium,
}

impl ReportFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportFlag::PossibleWaterRetentionHighSodium => "possible_water_retention_high_sodium",
        }
    }
}

/// Why no statistics were computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoWeighins,
    InsufficientWeighins,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NoWeighins => "no_weighins",
            SkipReason::InsufficientWeighins => "insufficient_weighins",
        }
    }
}

/// Window context reported alongside `insufficient_weighins`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowContext {
    pub window_days: u32,
    pub weighins_count: usize,
    pub required_min: usize,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

/// Early-exit report. `detected` is always `false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedReport {
    pub detected: bool,
    pub reason: SkipReason,
    #[serde(flatten)]
    pub context: Option<WindowContext>,
}

/// Full evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluatedReport {
    pub detected: bool,
    pub window_days: u32,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub weighins_count: usize,
    pub smoothing: SmoothingMethod,
    /// Rounded to 3 decimals.
    pub slope_lbs_per_week: f64,
    /// Rounded to 2 decimals (as are the next two).
    pub first_half_median: f64,
    pub last_half_median: f64,
    pub net_change_lbs: f64,
    pub flat_trend: bool,
    pub small_change: bool,
    pub severity: Option<Severity>,
    pub flags: Vec<ReportFlag>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlateauReport {
    Skipped(SkippedReport),
    Evaluated(EvaluatedReport),
}

impl PlateauReport {
    pub(crate) fn no_weighins() -> Self {
        PlateauReport::Skipped(SkippedReport {
            detected: false,
            reason: SkipReason::NoWeighins,
            context: None,
        })
    }

    pub(crate) fn insufficient(context: WindowContext) -> Self {
        PlateauReport::Skipped(SkippedReport {
            detected: false,
            reason: SkipReason::InsufficientWeighins,
            context: Some(context),
        })
    }

    pub fn detected(&self) -> bool {
        match self {
            PlateauReport::Skipped(_) => false,
            PlateauReport::Evaluated(r) => r.detected,
        }
    }

    pub fn reason(&self) -> Option<SkipReason> {
        match self {
            PlateauReport::Skipped(r) => Some(r.reason),
            PlateauReport::Evaluated(_) => None,
        }
    }

    pub fn severity(&self) -> Option<Severity> {
        match self {
            PlateauReport::Skipped(_) => None,
            PlateauReport::Evaluated(r) => r.severity,
        }
    }

    pub fn evaluated(&self) -> Option<&EvaluatedReport> {
        match self {
            PlateauReport::Evaluated(r) => Some(r),
            PlateauReport::Skipped(_) => None,
        }
    }
}
