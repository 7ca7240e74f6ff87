//! Totals and average temperature over a date filter of hourly records.

use chrono::{Datelike, NaiveDate};

use meter_core::error::{ReportError, Result};
use meter_core::models::HourlyRecord;

// ── PeriodStats ───────────────────────────────────────────────────────────────

/// Consumption, production and temperature accumulated over a period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodStats {
    pub consumption_kwh: f64,
    pub production_kwh: f64,
    pub temperature_sum: f64,
    pub count: u32,
}

impl PeriodStats {
    fn add(&mut self, record: &HourlyRecord) {
        self.consumption_kwh += record.consumption_kwh;
        self.production_kwh += record.production_kwh;
        self.temperature_sum += record.temperature_c;
        self.count += 1;
    }

    /// Mean temperature, or `0.0` when the period holds no records.
    pub fn average_temperature(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.temperature_sum / f64::from(self.count)
    }
}

// ── Period ────────────────────────────────────────────────────────────────────

/// Which records a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Inclusive date range.
    Range { start: NaiveDate, end: NaiveDate },
    /// Calendar month (1-12) of any year.
    Month(u32),
    /// Calendar year.
    Year(i32),
}

impl Period {
    /// Reject inverted ranges and out-of-range months.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Period::Range { start, end } if start > end => Err(ReportError::InvalidInput(format!(
                "range start {start} is after end {end}"
            ))),
            Period::Month(month) if !(1..=12).contains(&month) => Err(
                ReportError::InvalidInput(format!("month must be 1-12, got {month}")),
            ),
            _ => Ok(()),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Period::Range { start, end } => start <= date && date <= end,
            Period::Month(month) => date.month() == month,
            Period::Year(year) => date.year() == year,
        }
    }
}

// ── PeriodAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that summarises hourly records over a [`Period`].
pub struct PeriodAggregator;

impl PeriodAggregator {
    /// Summarise every record whose date falls inside `period`.
    pub fn summarize(records: &[HourlyRecord], period: &Period) -> Result<PeriodStats> {
        period.validate()?;
        let mut stats = PeriodStats::default();
        for record in records.iter().filter(|r| period.contains(r.date())) {
            stats.add(record);
        }
        Ok(stats)
    }

    /// Year of the first record, used when no year was requested.
    pub fn default_year(records: &[HourlyRecord]) -> Option<i32> {
        records.first().map(|r| r.date().year())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
