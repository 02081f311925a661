//! Plateau detection.
//!
//! Pipeline per call:
//!
//! clean & sort -> window -> sufficiency gate -> smooth -> slope ->
//! median split -> gates/severity -> sodium overlay -> report
//!
//! The function is pure: same input, same report.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{
    EvaluatedReport, PlateauParams, PlateauReport, ReportFlag, Sample, Severity, SmoothingMethod, SodiumRecord,
    WeighInRecord, WindowContext,
};
use crate::error::PlateauError;
use crate::math::{ewma, linear_regression_slope, median, rolling_mean, round_to};
use crate::plateau::clean::clean_series;
use crate::plateau::window::Window;

/// Smoothed trend input, aligned with its dates.
#[derive(Debug, Clone, PartialEq)]
pub struct Smoothed {
    pub method: SmoothingMethod,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

/// Median comparison of the first and last part of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetChange {
    pub first_half_median: f64,
    pub last_half_median: f64,
}

impl NetChange {
    pub fn net(&self) -> f64 {
        self.last_half_median - self.first_half_median
    }
}

/// Evaluate whether the weigh-ins have plateaued over the trailing window.
///
/// `sodium`, when given and non-empty, only contributes advisory flags.
pub fn detect_plateau(
    weighins: &[WeighInRecord],
    sodium: Option<&[SodiumRecord]>,
    params: &PlateauParams,
) -> Result<PlateauReport, PlateauError> {
    params.validate()?;

    let cleaned = clean_series(weighins)?;
    let Some(latest) = cleaned.last() else {
        return Ok(PlateauReport::no_weighins());
    };

    let window = Window::ending_at(latest.date, params.window_days);
    let points = window.select(&cleaned);
    let n = points.len();

    if n < params.required_weighins() {
        debug!(count = n, required = params.required_weighins(), "not enough weigh-ins in window");
        return Ok(PlateauReport::insufficient(WindowContext {
            window_days: params.window_days,
            weighins_count: n,
            required_min: params.min_weighins,
            window_start: window.start,
            window_end: window.end,
        }));
    }

    let smoothed = smooth(&points, params.ma_window_points, params.use_ewma_if_sparse);
    let slope_lbs_per_week = trend_slope_per_day(&smoothed) * 7.0;
    let halves = net_change(&points, &window)?;
    let net = halves.net();

    let flat_trend = slope_lbs_per_week.abs() < params.slope_flat_lbs_per_week;
    let small_change = net.abs() < params.net_change_lbs;
    let detected = flat_trend && small_change;

    let severity = detected.then(|| {
        if slope_lbs_per_week.abs() < params.strong_slope_lbs_per_week && net.abs() < params.strong_net_change_lbs {
            Severity::Strong
        } else {
            Severity::Mild
        }
    });

    debug!(
        smoothing = smoothed.method.as_str(),
        slope_lbs_per_week,
        net,
        flat_trend,
        small_change,
        "plateau gates evaluated"
    );

    let mut flags = Vec::new();
    if let Some(sodium) = sodium.filter(|s| !s.is_empty()) {
        let spike_days = count_sodium_spikes(sodium, &window, params.sodium_spike_mg)?;
        if detected && spike_days >= params.sodium_spike_days_flag {
            flags.push(ReportFlag::PossibleWaterRetentionHighSodium);
        }
    }

    Ok(PlateauReport::Evaluated(EvaluatedReport {
        detected,
        window_days: params.window_days,
        window_start: window.start,
        window_end: window.end,
        weighins_count: n,
        smoothing: smoothed.method,
        slope_lbs_per_week: round_to(slope_lbs_per_week, 3),
        first_half_median: round_to(halves.first_half_median, 2),
        last_half_median: round_to(halves.last_half_median, 2),
        net_change_lbs: round_to(net, 2),
        flat_trend,
        small_change,
        severity,
        flags,
    }))
}

/// Rolling mean over `ma_window_points` samples, falling back to EWMA when
/// that leaves fewer than two points and `use_ewma_if_sparse` is set.
pub fn smooth(points: &[Sample], ma_window_points: usize, use_ewma_if_sparse: bool) -> Smoothed {
    let weights: Vec<f64> = points.iter().map(|s| s.value).collect();

    let (dates, values): (Vec<NaiveDate>, Vec<f64>) = rolling_mean(&weights, ma_window_points)
        .into_iter()
        .zip(points)
        .filter_map(|(v, s)| v.map(|v| (s.date, v)))
        .unzip();

    if values.len() >= 2 || !use_ewma_if_sparse {
        return Smoothed {
            method: SmoothingMethod::RollingMean,
            dates,
            values,
        };
    }

    Smoothed {
        method: SmoothingMethod::Ewma,
        dates: points.iter().map(|s| s.date).collect(),
        values: ewma(&weights, ma_window_points),
    }
}

/// OLS slope (per day) of the smoothed values against whole days since the
/// first smoothed date.
pub fn trend_slope_per_day(smoothed: &Smoothed) -> f64 {
    let Some(&d0) = smoothed.dates.first() else {
        return 0.0;
    };
    let xs: Vec<f64> = smoothed.dates.iter().map(|d| (*d - d0).num_days() as f64).collect();
    linear_regression_slope(&xs, &smoothed.values)
}

/// Split raw values at the window midpoint and compare medians.
///
/// If either side is empty (sparse data), fall back to an index split; a
/// one-sample "half" is accepted as is.
pub fn net_change(points: &[Sample], window: &Window) -> Result<NetChange, PlateauError> {
    let mid = window.midpoint();
    let (first, last): (Vec<&Sample>, Vec<&Sample>) = points.iter().partition(|s| s.date <= mid);
    let mut first: Vec<f64> = first.into_iter().map(|s| s.value).collect();
    let mut last: Vec<f64> = last.into_iter().map(|s| s.value).collect();

    if first.is_empty() || last.is_empty() {
        let weights: Vec<f64> = points.iter().map(|s| s.value).collect();
        let n = weights.len();
        let half = n / 2;
        first = if half > 0 { weights[..half].to_vec() } else { weights[..n.min(1)].to_vec() };
        last = if half < n { weights[half..].to_vec() } else { weights[n.saturating_sub(1)..].to_vec() };
        debug!(first = first.len(), last = last.len(), "date split left a half empty; using index split");
    }

    let first_half_median = median(&first).ok_or(PlateauError::EmptyHalf { half: "first" })?;
    let last_half_median = median(&last).ok_or(PlateauError::EmptyHalf { half: "last" })?;
    Ok(NetChange {
        first_half_median,
        last_half_median,
    })
}

/// Count sodium entries inside `window` at or above `spike_mg`.
fn count_sodium_spikes(sodium: &[SodiumRecord], window: &Window, spike_mg: f64) -> Result<usize, PlateauError> {
    let cleaned = clean_series(sodium)?;
    Ok(cleaned
        .iter()
        .filter(|s| window.contains(s.date) && s.value >= spike_mg)
        .count())
}
