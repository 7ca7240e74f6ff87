//! Locale tables: weekday and month names, decimal separators.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Finnish weekday names, Monday first.
pub static WEEKDAYS_FI: [&str; 7] = [
    "Maanantai",
    "Tiistai",
    "Keskiviikko",
    "Torstai",
    "Perjantai",
    "Lauantai",
    "Sunnuntai",
];

/// English weekday names, Monday first.
pub static WEEKDAYS_EN: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// English month names, January first.
pub static MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Output locale for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Decimal comma, Finnish weekday names.
    #[default]
    Fi,
    /// Decimal point, English weekday names.
    En,
}

impl Locale {
    pub fn decimal_separator(self) -> char {
        match self {
            Locale::Fi => ',',
            Locale::En => '.',
        }
    }

    /// Look up the weekday name in the locale's fixed 7-entry table.
    pub fn weekday_name(self, weekday: Weekday) -> &'static str {
        let table = match self {
            Locale::Fi => &WEEKDAYS_FI,
            Locale::En => &WEEKDAYS_EN,
        };
        table[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Fi => f.write_str("fi"),
            Locale::En => f.write_str("en"),
        }
    }
}

impl FromStr for Locale {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fi" => Ok(Locale::Fi),
            "en" => Ok(Locale::En),
            other => Err(ReportError::Config(format!("Unknown locale: {other}"))),
        }
    }
}

/// English name of `month` (1-12), or `None` when out of range.
pub fn month_name(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTHS_EN.get(idx).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_name_fi() {
        assert_eq!(Locale::Fi.weekday_name(Weekday::Mon), "Maanantai");
        assert_eq!(Locale::Fi.weekday_name(Weekday::Wed), "Keskiviikko");
        assert_eq!(Locale::Fi.weekday_name(Weekday::Sun), "Sunnuntai");
    }

    #[test]
    fn test_weekday_name_en() {
        assert_eq!(Locale::En.weekday_name(Weekday::Fri), "Friday");
    }

    #[test]
    fn test_decimal_separator() {
        assert_eq!(Locale::Fi.decimal_separator(), ',');
        assert_eq!(Locale::En.decimal_separator(), '.');
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("fi".parse::<Locale>().unwrap(), Locale::Fi);
        assert_eq!(" EN ".parse::<Locale>().unwrap(), Locale::En);
        assert!("sv".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_display_round_trips() {
        for locale in [Locale::Fi, Locale::En] {
            assert_eq!(locale.to_string().parse::<Locale>().unwrap(), locale);
        }
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }
}
