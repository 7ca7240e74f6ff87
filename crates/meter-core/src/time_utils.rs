use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::error::{ReportError, Result};

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Validate that `tz_name` is a recognised IANA timezone identifier.
pub fn validate_timezone(tz_name: &str) -> bool {
    tz_name.parse::<Tz>().is_ok()
}

// ── ZoneMode ──────────────────────────────────────────────────────────────────

/// How offset-bearing timestamps are reduced to a wall-clock date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneMode {
    /// Keep the wall-clock time as recorded and drop the offset.
    Source,
    /// Convert the instant into this zone first.
    Named(Tz),
}

// ── TimestampParser ───────────────────────────────────────────────────────────

/// Parses the timestamp column of meter files into wall-clock
/// [`NaiveDateTime`] values, which is what calendar-day bucketing needs.
#[derive(Debug, Clone, Copy)]
pub struct TimestampParser {
    zone: ZoneMode,
}

impl Default for TimestampParser {
    fn default() -> Self {
        Self {
            zone: ZoneMode::Source,
        }
    }
}

impl TimestampParser {
    /// Build a parser from a `--timezone` value.
    ///
    /// * `"source"` keeps recorded wall-clock times.
    /// * `"auto"` converts into the system timezone (falls back to `source`
    ///   with a warning when the system zone is not a known IANA name).
    /// * anything else must be an IANA timezone name.
    pub fn new(tz_name: &str) -> Result<Self> {
        let zone = match tz_name {
            "source" => ZoneMode::Source,
            "auto" => {
                let system = get_system_timezone();
                match system.parse::<Tz>() {
                    Ok(tz) => ZoneMode::Named(tz),
                    Err(_) => {
                        warn!(
                            "TimestampParser: system timezone \"{}\" not recognised, keeping source times",
                            system
                        );
                        ZoneMode::Source
                    }
                }
            }
            name => ZoneMode::Named(name.parse::<Tz>().map_err(|_| {
                ReportError::Config(format!("Unknown timezone: {name}"))
            })?),
        };
        debug!("TimestampParser zone mode: {:?}", zone);
        Ok(Self { zone })
    }

    pub fn zone(&self) -> ZoneMode {
        self.zone
    }

    /// Parse a timestamp string.
    ///
    /// Handles RFC 3339 / ISO 8601 with `Z` or a numeric offset (optionally
    /// with fractional seconds), the same forms without an offset, minute
    /// precision, and bare dates (taken as midnight).
    pub fn parse(&self, s: &str) -> Result<NaiveDateTime> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ReportError::TimestampParse(String::new()));
        }

        if let Some(dt) = parse_with_offset(s) {
            return Ok(match self.zone {
                ZoneMode::Source => dt.naive_local(),
                ZoneMode::Named(tz) => dt.with_timezone(&tz).naive_local(),
            });
        }

        const NAIVE_FORMATS: &[&str] = &[
            "%Y-%m-%dT%H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M",
        ];
        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(naive);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(midnight);
            }
        }

        Err(ReportError::TimestampParse(s.to_string()))
    }
}

/// Try the offset-bearing forms. A trailing `Z` is treated as `+00:00`.
fn parse_with_offset(s: &str) -> Option<DateTime<FixedOffset>> {
    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt);
    }

    const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&normalised, fmt).ok())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
