//! Human-readable report output.
//!
//! JSON stays the machine interface (`io::export`); this is for eyeballing a
//! run in the terminal.

use crate::app::pipeline::RunOutput;
use crate::domain::{EvaluatedReport, PlateauReport, SkipReason, SkippedReport};

/// Format a full run: inputs, decision, and statistics.
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== plateau - weight plateau check ===\n");
    out.push_str(&format!(
        "Weigh-ins: {} read, {} usable rows",
        run.weighins_read, run.weighins_loaded
    ));
    if run.row_errors > 0 {
        out.push_str(&format!(" ({} unreadable)", run.row_errors));
    }
    out.push('\n');
    match run.sodium_days {
        Some(n) => out.push_str(&format!("Sodium: {n} entries\n")),
        None => out.push_str("Sodium: none\n"),
    }
    out.push('\n');

    out.push_str(&format_report(&run.report));
    out
}

/// Format a single report.
pub fn format_report(report: &PlateauReport) -> String {
    match report {
        PlateauReport::Skipped(r) => format_skipped(r),
        PlateauReport::Evaluated(r) => format_evaluated(r),
    }
}

fn format_skipped(r: &SkippedReport) -> String {
    let mut out = String::new();
    out.push_str("Plateau: not evaluated\n");
    match r.reason {
        SkipReason::NoWeighins => out.push_str("- reason: no usable weigh-ins\n"),
        SkipReason::InsufficientWeighins => {
            out.push_str("- reason: not enough weigh-ins in window\n");
        }
    }
    if let Some(ctx) = &r.context {
        out.push_str(&format!(
            "- window: {} .. {} ({} days)\n",
            ctx.window_start, ctx.window_end, ctx.window_days
        ));
        out.push_str(&format!(
            "- weigh-ins: {} (need {})\n",
            ctx.weighins_count,
            ctx.required_min.max(2)
        ));
    }
    out
}

fn format_evaluated(r: &EvaluatedReport) -> String {
    let mut out = String::new();
    let verdict = match r.severity {
        Some(sev) => format!("DETECTED ({})", sev.as_str()),
        None => "not detected".to_string(),
    };
    out.push_str(&format!("Plateau: {verdict}\n"));
    out.push_str(&format!(
        "- window: {} .. {} ({} days, {} weigh-ins)\n",
        r.window_start, r.window_end, r.window_days, r.weighins_count
    ));
    out.push_str(&format!("- smoothing: {}\n", r.smoothing.as_str()));
    out.push_str(&format!(
        "- trend: {:+.3} lbs/week [{}]\n",
        r.slope_lbs_per_week,
        gate(r.flat_trend, "flat", "moving")
    ));
    out.push_str(&format!(
        "- net change: {:+.2} lbs ({:.2} -> {:.2}) [{}]\n",
        r.net_change_lbs,
        r.first_half_median,
        r.last_half_median,
        gate(r.small_change, "small", "large")
    ));
    for flag in &r.flags {
        out.push_str(&format!("- flag: {}\n", flag.as_str()));
    }
    out
}

fn gate(passed: bool, yes: &'static str, no: &'static str) -> &'static str {
    if passed { yes } else { no }
}
