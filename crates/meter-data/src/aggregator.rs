//! Day-bucketed aggregation over a time-ordered stream of meter readings.
//!
//! Readings are grouped into runs of consecutive same-date rows in input
//! order. Input that is not sorted by date therefore yields one summary per
//! run, so a date can appear more than once in the output.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use meter_core::error::{ReportError, Result};
use meter_core::locale::Locale;
use meter_core::models::{DaySummary, Reading, CHANNELS, WH_PER_KWH};

// ── RunTotals ─────────────────────────────────────────────────────────────────

/// Watt-hour totals of the run currently open.
#[derive(Debug, Clone, Default)]
struct RunTotals {
    wh: [f64; CHANNELS],
    count: u32,
}

impl RunTotals {
    fn add(&mut self, reading: &Reading) {
        for (total, value) in self.wh.iter_mut().zip(reading.channels.iter()) {
            *total += value;
        }
        self.count += 1;
    }
}

// ── DailyAggregator ───────────────────────────────────────────────────────────

/// Streaming run-length aggregator producing one [`DaySummary`] per run.
///
/// Feed readings with [`push`](Self::push); each call returns the summary of
/// the run it closed, if any. [`finish`](Self::finish) closes the last run.
#[derive(Debug, Clone)]
pub struct DailyAggregator {
    locale: Locale,
    cursor: Option<NaiveDate>,
    totals: RunTotals,
}

impl DailyAggregator {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            cursor: None,
            totals: RunTotals::default(),
        }
    }

    /// Add `reading` to the open run.
    ///
    /// When the reading's date differs from the open run's date, that run is
    /// closed and returned before the reading starts a new one.
    pub fn push(&mut self, reading: &Reading) -> Option<DaySummary> {
        let date = reading.date();
        let closed = match self.cursor {
            Some(current) if current != date => Some(self.close(current)),
            _ => None,
        };
        self.cursor = Some(date);
        self.totals.add(reading);
        closed
    }

    /// Close the last open run.
    ///
    /// Fails with [`ReportError::EmptyInput`] when no reading was pushed.
    pub fn finish(mut self) -> Result<DaySummary> {
        let current = self.cursor.ok_or(ReportError::EmptyInput)?;
        Ok(self.close(current))
    }

    /// Aggregate a whole slice of readings.
    pub fn aggregate(readings: &[Reading], locale: Locale) -> Result<Vec<DaySummary>> {
        let mut aggregator = Self::new(locale);
        let mut days: Vec<DaySummary> = readings
            .iter()
            .filter_map(|reading| aggregator.push(reading))
            .collect();
        days.push(aggregator.finish()?);

        debug!(
            "Aggregated {} readings into {} day summaries",
            readings.len(),
            days.len()
        );
        Ok(days)
    }

    /// Per-channel kWh totals across `days`.
    pub fn calculate_totals(days: &[DaySummary]) -> [f64; CHANNELS] {
        let mut totals = [0.0; CHANNELS];
        for day in days {
            for (total, value) in totals.iter_mut().zip(day.totals_kwh.iter()) {
                *total += value;
            }
        }
        totals
    }

    fn close(&mut self, date: NaiveDate) -> DaySummary {
        let run = std::mem::take(&mut self.totals);
        DaySummary {
            date,
            weekday: self.locale.weekday_name(date.weekday()),
            totals_kwh: run.wh.map(|wh| wh / WH_PER_KWH),
            readings: run.count,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn reading(ts: &str, consumption: [f64; 3], production: [f64; 3]) -> Reading {
        let timestamp = NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S").unwrap();
        Reading::new(timestamp, consumption, production)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Count maximal runs of equal dates in input order.
    fn count_runs(readings: &[Reading]) -> usize {
        let mut runs = 0;
        let mut previous = None;
        for r in readings {
            if previous != Some(r.date()) {
                runs += 1;
                previous = Some(r.date());
            }
        }
        runs
    }

    // ── aggregate ─────────────────────────────────────────────────────────────

    #[test]
    fn test_groups_consecutive_same_date() {
        let readings = vec![
            reading("2025-10-13T00:00:00", [100.0, 200.0, 300.0], [0.0; 3]),
            reading("2025-10-13T01:00:00", [50.0, 50.0, 50.0], [0.0; 3]),
            reading("2025-10-14T00:00:00", [10.0, 10.0, 10.0], [0.0; 3]),
        ];
        let days = DailyAggregator::aggregate(&readings, Locale::Fi).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date("2025-10-13"));
        assert_eq!(days[0].consumption(), &[0.15, 0.25, 0.35]);
        assert_eq!(days[0].readings, 2);
        assert_eq!(days[1].date, date("2025-10-14"));
        assert_eq!(days[1].consumption(), &[0.01, 0.01, 0.01]);
        assert_eq!(days[1].readings, 1);
    }

    #[test]
    fn test_weekday_from_lookup_table() {
        let readings = vec![
            reading("2025-10-13T00:00:00", [1.0; 3], [1.0; 3]),
            reading("2025-10-19T00:00:00", [1.0; 3], [1.0; 3]),
        ];
        let fi = DailyAggregator::aggregate(&readings, Locale::Fi).unwrap();
        assert_eq!(fi[0].weekday, "Maanantai");
        assert_eq!(fi[1].weekday, "Sunnuntai");

        let en = DailyAggregator::aggregate(&readings, Locale::En).unwrap();
        assert_eq!(en[0].weekday, "Monday");
    }

    #[test]
    fn test_single_reading_yields_its_own_values() {
        let readings = vec![reading(
            "2025-10-15T12:00:00",
            [1234.0, 0.0, 500.0],
            [10.0, 20.0, 30.0],
        )];
        let days = DailyAggregator::aggregate(&readings, Locale::Fi).unwrap();

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].totals_kwh, [1.234, 0.0, 0.5, 0.01, 0.02, 0.03]);
        assert_eq!(days[0].weekday, "Keskiviikko");
    }

    #[test]
    fn test_non_contiguous_date_makes_separate_runs() {
        let readings = vec![
            reading("2025-10-13T00:00:00", [1000.0; 3], [0.0; 3]),
            reading("2025-10-14T00:00:00", [2000.0; 3], [0.0; 3]),
            reading("2025-10-13T05:00:00", [3000.0; 3], [0.0; 3]),
        ];
        let days = DailyAggregator::aggregate(&readings, Locale::Fi).unwrap();

        let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![date("2025-10-13"), date("2025-10-14"), date("2025-10-13")]
        );
        assert_eq!(days[0].consumption(), &[1.0, 1.0, 1.0]);
        assert_eq!(days[2].consumption(), &[3.0, 3.0, 3.0]);
    }

    #[test]
    fn test_empty_input_fails_fast() {
        let result = DailyAggregator::aggregate(&[], Locale::Fi);
        assert!(matches!(result, Err(ReportError::EmptyInput)));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let readings: Vec<Reading> = (0..48)
            .map(|h| {
                let ts = format!("2025-10-{:02}T{:02}:00:00", 13 + h / 24, h % 24);
                let v = f64::from(h) * 17.3;
                reading(&ts, [v, v + 1.0, v + 2.0], [v / 2.0, 0.0, 3.3])
            })
            .collect();

        let first = DailyAggregator::aggregate(&readings, Locale::Fi).unwrap();
        let second = DailyAggregator::aggregate(&readings, Locale::Fi).unwrap();
        assert_eq!(first, second);
        for (a, b) in first.iter().zip(second.iter()) {
            for (x, y) in a.totals_kwh.iter().zip(b.totals_kwh.iter()) {
                assert_eq!(x.to_bits(), y.to_bits());
            }
        }
    }

    #[test]
    fn test_run_count_and_sums_preserved() {
        let days_in_order = [13, 13, 14, 15, 15, 15, 14, 16, 13];
        let readings: Vec<Reading> = days_in_order
            .iter()
            .enumerate()
            .map(|(i, day)| {
                let ts = format!("2025-10-{:02}T{:02}:00:00", day, i);
                let v = (i as f64 + 1.0) * 100.0;
                reading(&ts, [v, 2.0 * v, 3.0 * v], [v, 0.0, 1.0])
            })
            .collect();

        let days = DailyAggregator::aggregate(&readings, Locale::Fi).unwrap();
        assert_eq!(days.len(), count_runs(&readings));

        let fed: u32 = days.iter().map(|d| d.readings).sum();
        assert_eq!(fed as usize, readings.len());

        // Every channel's grand total survives the grouping.
        let totals = DailyAggregator::calculate_totals(&days);
        for channel in 0..CHANNELS {
            let wh: f64 = readings.iter().map(|r| r.channels[channel]).sum();
            assert!((totals[channel] - wh / 1000.0).abs() < 1e-9);
        }
    }

    // ── push / finish ─────────────────────────────────────────────────────────

    #[test]
    fn test_push_emits_when_run_closes() {
        let mut aggregator = DailyAggregator::new(Locale::Fi);

        assert!(aggregator
            .push(&reading("2025-10-13T00:00:00", [1.0; 3], [0.0; 3]))
            .is_none());
        assert!(aggregator
            .push(&reading("2025-10-13T23:00:00", [1.0; 3], [0.0; 3]))
            .is_none());

        let closed = aggregator
            .push(&reading("2025-10-14T00:00:00", [5.0; 3], [0.0; 3]))
            .unwrap();
        assert_eq!(closed.date, date("2025-10-13"));
        assert_eq!(closed.readings, 2);

        let last = aggregator.finish().unwrap();
        assert_eq!(last.date, date("2025-10-14"));
        assert_eq!(last.consumption(), &[0.005, 0.005, 0.005]);
    }

    #[test]
    fn test_finish_without_readings_is_empty_input() {
        let aggregator = DailyAggregator::new(Locale::En);
        assert!(matches!(aggregator.finish(), Err(ReportError::EmptyInput)));
    }

    // ── calculate_totals ──────────────────────────────────────────────────────

    #[test]
    fn test_calculate_totals_sums_days() {
        let readings = vec![
            reading("2025-10-13T00:00:00", [1000.0, 0.0, 0.0], [500.0, 0.0, 0.0]),
            reading("2025-10-14T00:00:00", [2000.0, 0.0, 0.0], [250.0, 0.0, 0.0]),
        ];
        let days = DailyAggregator::aggregate(&readings, Locale::Fi).unwrap();
        let totals = DailyAggregator::calculate_totals(&days);
        assert_eq!(totals, [3.0, 0.0, 0.0, 0.75, 0.0, 0.0]);
    }

    #[test]
    fn test_calculate_totals_empty() {
        assert_eq!(DailyAggregator::calculate_totals(&[]), [0.0; CHANNELS]);
    }
}
