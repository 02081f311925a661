//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - resolves the run configuration
//! - runs the detector and prints/exports the report

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Command, DetectArgs, NutritionArgs};
use crate::domain::{OutputFormat, PlateauParams, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `plateau` binary.
pub fn run() -> Result<(), AppError> {
    // Must happen before parsing so `PLATEAU_*` values from `.env` are seen.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Detect(args) => handle_detect(args),
        Command::Nutrition(args) => handle_nutrition(args),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_detect(args: DetectArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_detect(&config)?;

    match config.format {
        OutputFormat::Json => println!("{}", crate::io::report_json(&run.report)?),
        OutputFormat::Text => println!("{}", crate::report::format_run_summary(&run)),
    }

    if let Some(path) = &config.export {
        crate::io::write_report_json(path, &run.report)?;
    }
    Ok(())
}

fn handle_nutrition(args: NutritionArgs) -> Result<(), AppError> {
    let summary = crate::io::load_nutrition_summary(&args.csv)?;
    let body = serde_json::to_string_pretty(&summary.days)
        .map_err(|e| AppError::new(4, format!("Failed to serialize nutrition totals: {e}")))?;
    println!("{body}");
    Ok(())
}

pub fn run_config_from_args(args: &DetectArgs) -> RunConfig {
    RunConfig {
        weighins_path: args.weighins.clone(),
        sodium_path: args.sodium.clone(),
        nutrition_csv: args.nutrition_csv.clone(),
        params: PlateauParams {
            window_days: args.window_days,
            min_weighins: args.min_weighins,
            ma_window_points: args.ma_window_points,
            slope_flat_lbs_per_week: args.slope_flat_lbs_per_week,
            net_change_lbs: args.net_change_lbs,
            strong_slope_lbs_per_week: args.strong_slope_lbs_per_week,
            strong_net_change_lbs: args.strong_net_change_lbs,
            use_ewma_if_sparse: !args.no_ewma_fallback,
            sodium_spike_mg: args.sodium_spike_mg,
            sodium_spike_days_flag: args.sodium_spike_days_flag,
        },
        format: args.format,
        export: args.export.clone(),
    }
}
