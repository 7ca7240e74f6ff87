use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Number of electrical phases metered per direction.
pub const PHASES: usize = 3;

/// Number of channels carried by a [`Reading`]: three consumption phases
/// followed by three production phases.
pub const CHANNELS: usize = 2 * PHASES;

/// Watt-hours per kilowatt-hour.
pub const WH_PER_KWH: f64 = 1000.0;

/// Column names of a week file, in channel order after the timestamp.
pub const CHANNEL_NAMES: [&str; CHANNELS] = [
    "Consumption phase 1 Wh",
    "Consumption phase 2 Wh",
    "Consumption phase 3 Wh",
    "Production phase 1 Wh",
    "Production phase 2 Wh",
    "Production phase 3 Wh",
];

// ── Reading ───────────────────────────────────────────────────────────────────

/// One timestamped row of a week file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Wall-clock time of the measurement.
    pub timestamp: NaiveDateTime,
    /// Channel values in watt-hours, consumption phases first.
    pub channels: [f64; CHANNELS],
}

impl Reading {
    /// Build a reading from separate consumption and production phases.
    pub fn new(
        timestamp: NaiveDateTime,
        consumption: [f64; PHASES],
        production: [f64; PHASES],
    ) -> Self {
        let mut channels = [0.0; CHANNELS];
        channels[..PHASES].copy_from_slice(&consumption);
        channels[PHASES..].copy_from_slice(&production);
        Self {
            timestamp,
            channels,
        }
    }

    /// Calendar date of the reading.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn consumption(&self) -> &[f64] {
        &self.channels[..PHASES]
    }

    pub fn production(&self) -> &[f64] {
        &self.channels[PHASES..]
    }
}

// ── DaySummary ────────────────────────────────────────────────────────────────

/// Totals for one run of same-date readings, in kilowatt-hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    /// Calendar date shared by every reading in the run.
    pub date: NaiveDate,
    /// Localised weekday name of `date`.
    pub weekday: &'static str,
    /// Per-channel totals in kWh, same order as [`Reading::channels`].
    pub totals_kwh: [f64; CHANNELS],
    /// Number of readings that fed this summary.
    pub readings: u32,
}

impl DaySummary {
    pub fn consumption(&self) -> &[f64] {
        &self.totals_kwh[..PHASES]
    }

    pub fn production(&self) -> &[f64] {
        &self.totals_kwh[PHASES..]
    }
}

// ── HourlyRecord ──────────────────────────────────────────────────────────────

/// One row of a yearly hourly file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    /// Wall-clock start of the hour.
    pub timestamp: NaiveDateTime,
    /// Net consumption during the hour (kWh).
    pub consumption_kwh: f64,
    /// Production during the hour (kWh).
    pub production_kwh: f64,
    /// Outdoor temperature (°C).
    pub temperature_c: f64,
}

impl HourlyRecord {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

// ── Reservation ───────────────────────────────────────────────────────────────

/// A venue reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: u32,
    /// Name of the person who made the booking.
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Day the venue is reserved for.
    pub date: NaiveDate,
    /// Start time on `date`.
    pub start_time: NaiveTime,
    /// Length of the reservation in whole hours.
    pub duration_hours: u32,
    /// Price per hour in euros.
    pub hourly_price: f64,
    /// Whether the booking is confirmed (and paid).
    pub confirmed: bool,
    /// Reserved venue or resource.
    pub resource: String,
    /// When the reservation was created.
    pub created_at: NaiveDateTime,
}

impl Reservation {
    /// Reservations of at least this many hours count as long.
    pub const LONG_HOURS: u32 = 3;

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Returns `true` when the reservation lasts [`Self::LONG_HOURS`] or more.
    pub fn is_long(&self) -> bool {
        self.duration_hours >= Self::LONG_HOURS
    }

    /// Duration multiplied by the hourly price.
    pub fn total_price(&self) -> f64 {
        f64::from(self.duration_hours) * self.hourly_price
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
