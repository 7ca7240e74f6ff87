use chrono::{NaiveDate, NaiveTime};

use crate::error::{ReportError, Result};
use crate::locale::Locale;

/// Format a floating-point number with a fixed number of decimal places and
/// the locale's decimal separator.
///
/// # Examples
///
/// ```
/// use meter_core::formatting::format_decimal;
/// use meter_core::locale::Locale;
///
/// assert_eq!(format_decimal(1234.5, 2, Locale::Fi), "1234,50");
/// assert_eq!(format_decimal(0.15, 2, Locale::En), "0.15");
/// assert_eq!(format_decimal(7.0, 0, Locale::Fi), "7");
/// ```
pub fn format_decimal(value: f64, decimals: usize, locale: Locale) -> String {
    let plain = format!("{:.*}", decimals, value);
    match locale.decimal_separator() {
        '.' => plain,
        sep => plain.replace('.', &sep.to_string()),
    }
}

/// Format an energy or temperature value the way every report shows it:
/// two decimals, locale separator.
pub fn format_amount(value: f64, locale: Locale) -> String {
    format_decimal(value, 2, locale)
}

/// Format a euro amount with two decimals and a trailing `€`.
///
/// # Examples
///
/// ```
/// use meter_core::formatting::format_currency;
/// use meter_core::locale::Locale;
///
/// assert_eq!(format_currency(37.5, Locale::Fi), "37,50 €");
/// assert_eq!(format_currency(0.0, Locale::En), "0.00 €");
/// ```
pub fn format_currency(amount: f64, locale: Locale) -> String {
    format!("{} €", format_decimal(amount, 2, locale))
}

/// Format a date as `dd.mm.yyyy`.
///
/// ```
/// use chrono::NaiveDate;
/// use meter_core::formatting::format_date;
///
/// let d = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
/// assert_eq!(format_date(d), "03.10.2025");
/// ```
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Format a clock time as `HH.MM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H.%M").to_string()
}

/// Parse a decimal number that may use either `,` or `.` as its decimal
/// separator. Surrounding whitespace is ignored; non-finite values are
/// rejected.
///
/// ```
/// use meter_core::formatting::parse_decimal;
///
/// assert_eq!(parse_decimal("12,5").unwrap(), 12.5);
/// assert_eq!(parse_decimal(" 300 ").unwrap(), 300.0);
/// assert!(parse_decimal("abc").is_err());
/// ```
pub fn parse_decimal(s: &str) -> Result<f64> {
    let normalised = s.trim().replace(',', ".");
    match normalised.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ReportError::NumberParse(s.trim().to_string())),
    }
}

/// Parse a user-entered date in `dd.mm.yyyy` form.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d.%m.%Y")
        .map_err(|_| ReportError::DateParse(format!("{} (expected dd.mm.yyyy)", s.trim())))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
