//! Command-line parsing.
//!
//! Argument parsing and dispatch stay separate from the detector. Every
//! tunable can also come from a `PLATEAU_*` environment variable (a `.env`
//! file is loaded first).

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::OutputFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "plateau", version, about = "Weight plateau detection from weigh-in logs")]
pub struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace). Defaults to `RUST_LOG` or warn.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate the trailing window of weigh-ins for a plateau.
    Detect(DetectArgs),
    /// Roll a MyFitnessPal nutrition summary CSV up into daily totals (JSON).
    Nutrition(NutritionArgs),
}

/// Options for `plateau detect`.
#[derive(Debug, Parser, Clone)]
pub struct DetectArgs {
    /// Weigh-in records (.json array or .csv with `date|logged_at|weighed_at,weight`).
    #[arg(long, value_name = "FILE")]
    pub weighins: PathBuf,

    /// Daily sodium records (.json or .csv with `date|logged_at,sodium`).
    #[arg(long, value_name = "FILE", conflicts_with = "nutrition_csv")]
    pub sodium: Option<PathBuf>,

    /// MyFitnessPal nutrition summary export; summed per day into the sodium series.
    #[arg(long, value_name = "FILE")]
    pub nutrition_csv: Option<PathBuf>,

    /// Trailing window length (calendar days).
    #[arg(long, env = "PLATEAU_WINDOW_DAYS", default_value_t = 14)]
    pub window_days: u32,

    /// Minimum weigh-ins required inside the window.
    #[arg(long, env = "PLATEAU_MIN_WEIGHINS", default_value_t = 10)]
    pub min_weighins: usize,

    /// Rolling-mean width in samples (also the EWMA span).
    #[arg(long, env = "PLATEAU_MA_WINDOW_POINTS", default_value_t = 7)]
    pub ma_window_points: usize,

    /// Max |slope| (lbs/week) that still counts as flat.
    #[arg(long, env = "PLATEAU_SLOPE_FLAT", default_value_t = 0.25)]
    pub slope_flat_lbs_per_week: f64,

    /// Max |net change| (lbs) that still counts as small.
    #[arg(long, env = "PLATEAU_NET_CHANGE", default_value_t = 0.5)]
    pub net_change_lbs: f64,

    /// Stricter slope bound for a "strong" plateau.
    #[arg(long, env = "PLATEAU_STRONG_SLOPE", default_value_t = 0.15)]
    pub strong_slope_lbs_per_week: f64,

    /// Stricter net-change bound for a "strong" plateau.
    #[arg(long, env = "PLATEAU_STRONG_NET_CHANGE", default_value_t = 0.3)]
    pub strong_net_change_lbs: f64,

    /// Never fall back to EWMA when the rolling mean is too sparse.
    #[arg(long, env = "PLATEAU_NO_EWMA_FALLBACK")]
    pub no_ewma_fallback: bool,

    /// Daily sodium (mg) counted as a spike.
    #[arg(long, env = "PLATEAU_SODIUM_SPIKE_MG", default_value_t = 2300.0)]
    pub sodium_spike_mg: f64,

    /// Spike days needed to flag possible water retention.
    #[arg(long, env = "PLATEAU_SODIUM_SPIKE_DAYS", default_value_t = 4)]
    pub sodium_spike_days_flag: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Also write the JSON report to this file.
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

/// Options for `plateau nutrition`.
#[derive(Debug, Parser)]
pub struct NutritionArgs {
    /// Nutrition summary CSV export.
    #[arg(long, value_name = "FILE")]
    pub csv: PathBuf,
}
