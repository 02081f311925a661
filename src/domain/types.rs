//! Input-side domain types.
//!
//! Upstream rows (SMS logs, tracker exports, database selects) are loosely
//! typed: the date may live under one of several member names and may be a
//! date, a timestamp or ISO text. We model that with structural record types
//! whose members are all optional, and convert to the strict [`Sample`] at the
//! boundary (see `plateau::clean`).

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::PlateauError;

/// A single cleaned observation: calendar date + value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: NaiveDate,
    pub value: f64,
}

impl Sample {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// A date-like member of an input record.
///
/// `Unsupported` keeps the JSON kind of a value we cannot interpret so the
/// cleaner can raise [`PlateauError::UnsupportedDateType`] instead of silently
/// dropping the row.
#[derive(Debug, Clone, PartialEq)]
pub enum DateLike {
    Date(NaiveDate),
    Timestamp(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
    Text(String),
    Unsupported(&'static str),
}

impl DateLike {
    /// Blank text behaves like an absent member.
    pub fn is_blank(&self) -> bool {
        matches!(self, DateLike::Text(s) if s.trim().is_empty())
    }

    /// Resolve to a calendar date.
    ///
    /// - `Ok(Some(date))`: usable
    /// - `Ok(None)`: text that does not parse (row gets dropped)
    /// - `Err(..)`: a kind we refuse to interpret
    pub fn to_date(&self, field: &'static str) -> Result<Option<NaiveDate>, PlateauError> {
        match self {
            DateLike::Date(d) => Ok(Some(*d)),
            DateLike::Timestamp(ts) => Ok(Some(ts.date_naive())),
            DateLike::Naive(ts) => Ok(Some(ts.date())),
            DateLike::Text(s) => Ok(parse_iso_date(s)),
            DateLike::Unsupported(kind) => Err(PlateauError::UnsupportedDateType {
                field,
                kind: (*kind).to_string(),
            }),
        }
    }
}

impl From<NaiveDate> for DateLike {
    fn from(value: NaiveDate) -> Self {
        DateLike::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for DateLike {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DateLike::Timestamp(value)
    }
}

impl From<DateTime<Utc>> for DateLike {
    fn from(value: DateTime<Utc>) -> Self {
        DateLike::Timestamp(value.fixed_offset())
    }
}

impl From<NaiveDateTime> for DateLike {
    fn from(value: NaiveDateTime) -> Self {
        DateLike::Naive(value)
    }
}

impl From<&str> for DateLike {
    fn from(value: &str) -> Self {
        DateLike::Text(value.to_string())
    }
}

impl From<String> for DateLike {
    fn from(value: String) -> Self {
        DateLike::Text(value)
    }
}

impl<'de> Deserialize<'de> for DateLike {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => DateLike::Text(s),
            // `null` is handled by the surrounding `Option`.
            Value::Null => DateLike::Text(String::new()),
            Value::Bool(_) => DateLike::Unsupported("boolean"),
            Value::Number(_) => DateLike::Unsupported("number"),
            Value::Array(_) => DateLike::Unsupported("array"),
            Value::Object(_) => DateLike::Unsupported("object"),
        })
    }
}

/// Parse `YYYY-MM-DD` or an ISO-8601 date-time, keeping the stamp's own
/// calendar date. A trailing `Z` is read as `+00:00`.
fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }

    let normalized = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(head) => format!("{head}+00:00"),
        None => s.to_string(),
    };

    const WITH_OFFSET: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f%:z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
        "%Y-%m-%dT%H:%M%:z",
        "%Y-%m-%d %H:%M%:z",
    ];
    for fmt in WITH_OFFSET {
        if let Ok(ts) = DateTime::parse_from_str(&normalized, fmt) {
            return Some(ts.date_naive());
        }
    }

    const NAIVE: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in NAIVE {
        if let Ok(ts) = NaiveDateTime::parse_from_str(&normalized, fmt) {
            return Some(ts.date());
        }
    }

    None
}

/// Accept JSON numbers and numeric strings; everything else reads as absent.
fn deserialize_loose_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Getter for one candidate date member.
pub type DateAccessor<R> = fn(&R) -> Option<&DateLike>;

/// A record that carries a date under one of several member names and a
/// numeric value.
pub trait DatedRecord: Sized + 'static {
    /// Candidate date members, highest priority first.
    const DATE_FIELDS: &'static [(&'static str, DateAccessor<Self>)];

    fn value(&self) -> Option<f64>;

    /// First present, non-blank date member (with its name).
    fn extract_date(&self) -> Option<(&'static str, &DateLike)> {
        Self::DATE_FIELDS.iter().find_map(|(name, get)| {
            get(self)
                .filter(|d| !d.is_blank())
                .map(|d| (*name, d))
        })
    }
}

/// A body-weight log row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeighInRecord {
    #[serde(default)]
    pub date: Option<DateLike>,
    #[serde(default)]
    pub logged_at: Option<DateLike>,
    #[serde(default)]
    pub weighed_at: Option<DateLike>,
    #[serde(default, deserialize_with = "deserialize_loose_f64")]
    pub weight: Option<f64>,
}

impl WeighInRecord {
    pub fn new(date: impl Into<DateLike>, weight: f64) -> Self {
        Self {
            date: Some(date.into()),
            weight: Some(weight),
            ..Self::default()
        }
    }
}

fn weigh_in_date(r: &WeighInRecord) -> Option<&DateLike> {
    r.date.as_ref()
}

fn weigh_in_logged_at(r: &WeighInRecord) -> Option<&DateLike> {
    r.logged_at.as_ref()
}

fn weigh_in_weighed_at(r: &WeighInRecord) -> Option<&DateLike> {
    r.weighed_at.as_ref()
}

impl DatedRecord for WeighInRecord {
    const DATE_FIELDS: &'static [(&'static str, DateAccessor<Self>)] = &[
        ("date", weigh_in_date),
        ("logged_at", weigh_in_logged_at),
        ("weighed_at", weigh_in_weighed_at),
    ];

    fn value(&self) -> Option<f64> {
        self.weight
    }
}

/// A daily sodium intake row (mg).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SodiumRecord {
    #[serde(default)]
    pub date: Option<DateLike>,
    #[serde(default)]
    pub logged_at: Option<DateLike>,
    #[serde(default, deserialize_with = "deserialize_loose_f64")]
    pub sodium: Option<f64>,
}

impl SodiumRecord {
    pub fn new(date: impl Into<DateLike>, sodium: f64) -> Self {
        Self {
            date: Some(date.into()),
            sodium: Some(sodium),
            ..Self::default()
        }
    }
}

fn sodium_date(r: &SodiumRecord) -> Option<&DateLike> {
    r.date.as_ref()
}

fn sodium_logged_at(r: &SodiumRecord) -> Option<&DateLike> {
    r.logged_at.as_ref()
}

impl DatedRecord for SodiumRecord {
    const DATE_FIELDS: &'static [(&'static str, DateAccessor<Self>)] =
        &[("date", sodium_date), ("logged_at", sodium_logged_at)];

    fn value(&self) -> Option<f64> {
        self.sodium
    }
}
