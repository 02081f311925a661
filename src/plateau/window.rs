//! Trailing calendar window anchored at the latest sample.

use chrono::{Days, NaiveDate};

use crate::domain::Sample;

/// Inclusive `[start, end]` span of `days` calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub days: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    /// Window of `days` days ending at `end`. `days` must be >= 1.
    pub fn ending_at(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);
        Self { days, start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// `start + floor(days / 2)`; dates on or before it form the first half.
    pub fn midpoint(&self) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(u64::from(self.days / 2)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Samples inside the window, order preserved.
    pub fn select(&self, samples: &[Sample]) -> Vec<Sample> {
        samples.iter().copied().filter(|s| self.contains(s.date)).collect()
    }
}
