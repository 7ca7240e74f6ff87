//! Delimited-file discovery and loading.
//!
//! Week files (`;`-delimited, Wh per phase), yearly hourly files
//! (`;`-delimited, kWh with decimal commas) and reservation lists
//! (`|`-delimited). Malformed rows are reported with their file and line,
//! never skipped.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord};
use regex::Regex;
use tracing::{debug, info, warn};

use meter_core::error::{ReportError, Result};
use meter_core::formatting::parse_decimal;
use meter_core::models::{HourlyRecord, Reading, Reservation, CHANNELS, CHANNEL_NAMES};
use meter_core::time_utils::TimestampParser;

/// Fields per week-file row: timestamp plus one value per channel.
const WEEK_FIELDS: usize = 1 + CHANNELS;
/// Fields per hourly row: timestamp, consumption, production, temperature.
const HOURLY_FIELDS: usize = 4;
/// Column names of a yearly hourly file.
const HOURLY_HEADER: [&str; HOURLY_FIELDS] =
    ["timestamp", "consumption", "production", "temperature"];
/// Fields per reservation row.
const RESERVATION_FIELDS: usize = 11;

// ── Week file discovery ───────────────────────────────────────────────────────

/// A week file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekFile {
    /// Week number taken from the file name.
    pub week: u32,
    pub path: PathBuf,
}

/// Extract the week number from a `weekNN.csv` file name (case-insensitive).
pub fn week_number(path: &Path) -> Option<u32> {
    let re = Regex::new(r"(?i)^week(\d+)\.csv$").expect("regex is valid");
    let name = path.file_name()?.to_str()?;
    re.captures(name)?.get(1)?.as_str().parse().ok()
}

/// Find all `weekNN.csv` files recursively under `data_dir`, sorted by week
/// number then path.
pub fn find_week_files(data_dir: &Path) -> Result<Vec<WeekFile>> {
    if !data_dir.exists() {
        warn!("Data directory does not exist: {}", data_dir.display());
        return Err(ReportError::NoDataFiles(data_dir.to_path_buf()));
    }

    let mut files: Vec<WeekFile> = walkdir::WalkDir::new(data_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let week = week_number(entry.path())?;
            Some(WeekFile {
                week,
                path: entry.into_path(),
            })
        })
        .collect();

    if files.is_empty() {
        return Err(ReportError::NoDataFiles(data_dir.to_path_buf()));
    }

    files.sort_by(|a, b| a.week.cmp(&b.week).then_with(|| a.path.cmp(&b.path)));
    debug!("Found {} week files in {}", files.len(), data_dir.display());
    Ok(files)
}

// ── Loaders ───────────────────────────────────────────────────────────────────

/// Load a week file into [`Reading`]s, preserving file order.
///
/// The first row must be the `Time;Consumption phase 1 Wh;…` header. Every
/// other row needs a timestamp followed by three consumption and three
/// production values in Wh.
pub fn load_readings(path: &Path, timestamps: &TimestampParser) -> Result<Vec<Reading>> {
    let mut reader = open_delimited(path, b';', true)?;
    let expected: Vec<&str> = std::iter::once("Time").chain(CHANNEL_NAMES).collect();
    check_header(path, &mut reader, &expected)?;
    let mut readings = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| row_error(path, e))?;
        let line = line_of(&record);
        let reading = parse_reading(&record, timestamps).map_err(|e| e.at(path, line))?;
        readings.push(reading);
    }

    info!("Loaded {} readings from {}", readings.len(), path.display());
    Ok(readings)
}

/// Load a yearly hourly file into [`HourlyRecord`]s.
pub fn load_hourly_records(
    path: &Path,
    timestamps: &TimestampParser,
) -> Result<Vec<HourlyRecord>> {
    let mut reader = open_delimited(path, b';', true)?;
    check_header(path, &mut reader, &HOURLY_HEADER)?;
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| row_error(path, e))?;
        let line = line_of(&record);
        let hourly = parse_hourly(&record, timestamps).map_err(|e| e.at(path, line))?;
        records.push(hourly);
    }

    info!(
        "Loaded {} hourly records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Load a `|`-delimited reservation list.
///
/// A first row whose id column is named `id` or `reservationId` is treated
/// as a header; any other first row is parsed as data.
pub fn load_reservations(path: &Path) -> Result<Vec<Reservation>> {
    let mut reader = open_delimited(path, b'|', false)?;
    let mut reservations = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| row_error(path, e))?;
        let line = line_of(&record);
        if idx == 0 && is_header(&record) {
            debug!("Skipping header row in {}", path.display());
            continue;
        }
        let reservation = parse_reservation(&record).map_err(|e| e.at(path, line))?;
        reservations.push(reservation);
    }

    info!(
        "Loaded {} reservations from {}",
        reservations.len(),
        path.display()
    );
    Ok(reservations)
}

// ── Row parsers ───────────────────────────────────────────────────────────────

fn parse_reading(record: &StringRecord, timestamps: &TimestampParser) -> Result<Reading> {
    check_width(record, WEEK_FIELDS)?;
    let timestamp = timestamps.parse(&record[0])?;
    let mut channels = [0.0; CHANNELS];
    for (slot, field) in channels.iter_mut().zip(record.iter().skip(1)) {
        *slot = parse_decimal(field)?;
    }
    Ok(Reading {
        timestamp,
        channels,
    })
}

fn parse_hourly(record: &StringRecord, timestamps: &TimestampParser) -> Result<HourlyRecord> {
    check_width(record, HOURLY_FIELDS)?;
    Ok(HourlyRecord {
        timestamp: timestamps.parse(&record[0])?,
        consumption_kwh: parse_decimal(&record[1])?,
        production_kwh: parse_decimal(&record[2])?,
        temperature_c: parse_decimal(&record[3])?,
    })
}

fn parse_reservation(record: &StringRecord) -> Result<Reservation> {
    check_width(record, RESERVATION_FIELDS)?;
    let field = |i: usize| record[i].trim();

    Ok(Reservation {
        id: parse_integer(field(0), "reservation id")?,
        name: field(1).to_string(),
        email: field(2).to_string(),
        phone: field(3).to_string(),
        date: NaiveDate::parse_from_str(field(4), "%Y-%m-%d")
            .map_err(|_| ReportError::DateParse(field(4).to_string()))?,
        start_time: NaiveTime::parse_from_str(field(5), "%H:%M")
            .map_err(|_| ReportError::DateParse(field(5).to_string()))?,
        duration_hours: parse_integer(field(6), "duration")?,
        hourly_price: parse_decimal(field(7))?,
        confirmed: field(8).eq_ignore_ascii_case("true"),
        resource: field(9).to_string(),
        created_at: parse_created_at(field(10))?,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn open_delimited(path: &Path, delimiter: u8, has_headers: bool) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    // flexible: row width is checked per row so errors carry a line number.
    Ok(ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(has_headers)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn check_width(record: &StringRecord, expected: usize) -> Result<()> {
    if record.len() != expected {
        return Err(ReportError::InvalidInput(format!(
            "expected {expected} fields, found {}",
            record.len()
        )));
    }
    Ok(())
}

fn is_header(record: &StringRecord) -> bool {
    record.get(0).is_some_and(|id| {
        let id = id.trim();
        id.eq_ignore_ascii_case("id") || id.eq_ignore_ascii_case("reservationId")
    })
}

/// Require the header row to name `expected` columns in order
/// (case-insensitive).
fn check_header(path: &Path, reader: &mut csv::Reader<File>, expected: &[&str]) -> Result<()> {
    let headers = reader.headers().map_err(|e| row_error(path, e))?;
    let matches = headers.len() == expected.len()
        && headers
            .iter()
            .zip(expected)
            .all(|(found, name)| found.trim().eq_ignore_ascii_case(name));
    if !matches {
        return Err(ReportError::Parse {
            path: path.to_path_buf(),
            line: 1,
            reason: format!(
                "expected header \"{}\", found \"{}\"",
                expected.join(";"),
                headers.iter().collect::<Vec<_>>().join(";")
            ),
        });
    }
    Ok(())
}

/// Turn a reader-level failure (bad UTF-8, I/O) into a located parse error.
fn row_error(path: &Path, err: csv::Error) -> ReportError {
    ReportError::Parse {
        path: path.to_path_buf(),
        line: err.position().map(|p| p.line()).unwrap_or(0),
        reason: err.to_string(),
    }
}

fn parse_integer(s: &str, what: &str) -> Result<u32> {
    s.parse()
        .map_err(|_| ReportError::NumberParse(format!("{what} \"{s}\"")))
}

fn parse_created_at(s: &str) -> Result<NaiveDateTime> {
    const FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| ReportError::TimestampParse(s.to_string()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
