//! MyFitnessPal "Nutrition Summary" CSV rollup.
//!
//! The export has one row per meal. We sum meals into per-day totals, which is
//! the shape the sodium overlay expects (one entry per day).

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::SodiumRecord;
use crate::error::AppError;
use crate::io::ingest::{RowError, normalize_header_name};

const COL_DATE: &str = "date";
const COL_MEAL: &str = "meal";
const COL_CALORIES: &str = "calories";
const COL_SODIUM: &str = "sodium (mg)";
const COL_CARBS: &str = "carbohydrates (g)";
const COL_PROTEIN: &str = "protein (g)";
const COL_FAT: &str = "fat (g)";

const REQUIRED: [&str; 7] = [COL_DATE, COL_MEAL, COL_CALORIES, COL_SODIUM, COL_CARBS, COL_PROTEIN, COL_FAT];

/// Summed nutrition for one day. Blank cells contribute nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DailyTotals {
    pub calories: f64,
    pub sodium_mg: f64,
    pub carbs_g: f64,
    pub protein_g: f64,
    pub fat_g: f64,
}

#[derive(Debug, Clone)]
pub struct NutritionSummary {
    pub days: BTreeMap<NaiveDate, DailyTotals>,
    pub meal_rows: usize,
    pub row_errors: Vec<RowError>,
}

impl NutritionSummary {
    /// One sodium record per day, ascending.
    pub fn sodium_records(&self) -> Vec<SodiumRecord> {
        self.days
            .iter()
            .map(|(day, totals)| SodiumRecord::new(*day, totals.sodium_mg))
            .collect()
    }
}

/// Read and roll up a nutrition summary export.
pub fn load_nutrition_summary(path: &Path) -> Result<NutritionSummary, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open nutrition CSV '{}': {e}", path.display())))?;
    let summary = summarize(file)?;
    for err in &summary.row_errors {
        warn!(line = err.line, "{}", err.message);
    }
    info!(meal_rows = summary.meal_rows, days = summary.days.len(), "nutrition summary loaded");
    Ok(summary)
}

fn summarize(reader: impl std::io::Read) -> Result<NutritionSummary, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect();

    let missing: Vec<&str> = REQUIRED.iter().copied().filter(|c| !header_map.contains_key(*c)).collect();
    if !missing.is_empty() {
        return Err(AppError::new(
            2,
            format!("Nutrition CSV missing required columns: {}", missing.join(", ")),
        ));
    }

    let mut days: BTreeMap<NaiveDate, DailyTotals> = BTreeMap::new();
    let mut meal_rows = 0usize;
    let mut row_errors = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let (Some(raw_date), Some(_meal)) = (
            get_optional(&record, &header_map, COL_DATE),
            get_optional(&record, &header_map, COL_MEAL),
        ) else {
            continue;
        };
        let day = match parse_date(raw_date) {
            Ok(d) => d,
            Err(message) => {
                row_errors.push(RowError { line, message });
                continue;
            }
        };

        let totals = days.entry(day).or_default();
        let cell = |name: &str| parse_opt_f64(get_optional(&record, &header_map, name));
        totals.calories += cell(COL_CALORIES).unwrap_or(0.0);
        totals.sodium_mg += cell(COL_SODIUM).unwrap_or(0.0);
        totals.carbs_g += cell(COL_CARBS).unwrap_or(0.0);
        totals.protein_g += cell(COL_PROTEIN).unwrap_or(0.0);
        totals.fat_g += cell(COL_FAT).unwrap_or(0.0);
        meal_rows += 1;
    }

    Ok(NutritionSummary {
        days,
        meal_rows,
        row_errors,
    })
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // MFP writes ISO dates; some locales re-save as MM/DD/YYYY.
    const FMTS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!("Invalid date '{s}'. Expected YYYY-MM-DD, MM/DD/YYYY or YYYY/MM/DD."))
}

fn parse_opt_f64(s: Option<&str>) -> Option<f64> {
    let v = s?.replace(',', "").parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Date,Meal,Calories,Fat (g),Cholesterol,Sodium (mg),Carbohydrates (g),Protein (g)\n";

    #[test]
    fn sums_meals_per_day() {
        let body = format!(
            "{HEADER}\
             2026-01-01,Breakfast,400,10,0,800,50,20\n\
             2026-01-01,Dinner,700,25,0,1600.5,60,45\n\
             2026-01-02,Lunch,500,,0,,40,30\n\
             ,Snacks,100,1,0,50,10,1\n\
             2026-01-02,,100,1,0,50,10,1\n"
        );
        let summary = summarize(body.as_bytes()).unwrap();
        assert_eq!(summary.meal_rows, 3);
        assert_eq!(summary.days.len(), 2);

        let jan1 = summary.days[&NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()];
        assert_eq!(jan1.calories, 1100.0);
        assert_eq!(jan1.sodium_mg, 2400.5);
        assert_eq!(jan1.fat_g, 35.0);

        let jan2 = summary.days[&NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()];
        assert_eq!(jan2.sodium_mg, 0.0);
        assert_eq!(jan2.protein_g, 30.0);

        let sodium = summary.sodium_records();
        assert_eq!(sodium.len(), 2);
        assert_eq!(sodium[0].sodium, Some(2400.5));
    }

    #[test]
    fn missing_columns_are_reported() {
        let err = summarize("Date,Meal,Calories\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("sodium (mg)"));
    }

    #[test]
    fn bad_dates_become_row_errors() {
        let body = format!("{HEADER}not-a-date,Lunch,500,1,0,900,40,30\n");
        let summary = summarize(body.as_bytes()).unwrap();
        assert_eq!(summary.meal_rows, 0);
        assert_eq!(summary.row_errors.len(), 1);
        assert_eq!(summary.row_errors[0].line, 2);
    }
}
