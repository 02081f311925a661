//! Record cleaning: loosely-typed rows in, ascending `Sample`s out.
//!
//! Two deliberately different paths:
//! - rows with a missing/unparseable date or a missing value are filtered out
//! - a date member of an unsupported kind aborts with an error

use tracing::debug;

use crate::domain::{DatedRecord, Sample};
use crate::error::PlateauError;

/// Clean and sort `records` by date (stable, so same-day rows keep input order).
pub fn clean_series<R: DatedRecord>(records: &[R]) -> Result<Vec<Sample>, PlateauError> {
    let mut out = Vec::with_capacity(records.len());
    let mut dropped = 0usize;

    for record in records {
        // Resolve the date before looking at the value so an unsupported date
        // kind is reported even on rows that would be dropped anyway.
        let date = match record.extract_date() {
            Some((field, raw)) => raw.to_date(field)?,
            None => None,
        };
        let value = record.value().filter(|v| v.is_finite());

        match (date, value) {
            (Some(date), Some(value)) => out.push(Sample::new(date, value)),
            _ => dropped += 1,
        }
    }

    out.sort_by_key(|s| s.date);

    if dropped > 0 {
        debug!(kept = out.len(), dropped, "dropped malformed records");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{DateLike, SodiumRecord, WeighInRecord};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn drops_malformed_rows_silently() {
        let records = vec![
            WeighInRecord::new("2026-01-03", 150.2),
            WeighInRecord {
                date: Some(DateLike::from("not a date")),
                weight: Some(149.0),
                ..WeighInRecord::default()
            },
            WeighInRecord {
                date: Some(DateLike::from("2026-01-02")),
                weight: None,
                ..WeighInRecord::default()
            },
            WeighInRecord {
                weight: Some(151.0),
                ..WeighInRecord::default()
            },
            WeighInRecord::new("2026-01-01", f64::NAN),
            WeighInRecord::new(ymd(2026, 1, 1), 150.9),
        ];

        let cleaned = clean_series(&records).unwrap();
        assert_eq!(
            cleaned,
            vec![Sample::new(ymd(2026, 1, 1), 150.9), Sample::new(ymd(2026, 1, 3), 150.2)]
        );
    }

    #[test]
    fn sorts_by_date_and_keeps_same_day_order() {
        let records = vec![
            WeighInRecord::new("2026-01-05", 1.0),
            WeighInRecord::new("2026-01-04T21:00:00Z", 2.0),
            WeighInRecord::new("2026-01-05T06:00:00+02:00", 3.0),
            WeighInRecord::new("2026-01-04", 4.0),
        ];
        let values: Vec<f64> = clean_series(&records).unwrap().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn unsupported_date_kind_is_an_error_even_without_value() {
        let records: Vec<WeighInRecord> =
            serde_json::from_str(r#"[{"date": "2026-01-01", "weight": 150}, {"logged_at": {"d": 1}}]"#).unwrap();
        let err = clean_series(&records).unwrap_err();
        assert_eq!(
            err,
            PlateauError::UnsupportedDateType {
                field: "logged_at",
                kind: "object".to_string()
            }
        );
    }

    #[test]
    fn sodium_rows_use_their_own_field_list() {
        let records = vec![
            SodiumRecord::new("2026-01-02", 2500.0),
            SodiumRecord {
                logged_at: Some(DateLike::from("2026-01-01T12:00:00")),
                sodium: Some(1800.0),
                ..SodiumRecord::default()
            },
        ];
        let cleaned = clean_series(&records).unwrap();
        assert_eq!(cleaned[0], Sample::new(ymd(2026, 1, 1), 1800.0));
        assert_eq!(cleaned[1], Sample::new(ymd(2026, 1, 2), 2500.0));
    }
}
