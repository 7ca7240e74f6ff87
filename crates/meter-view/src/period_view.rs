//! Period reports over hourly records.

use meter_core::formatting::{format_amount, format_date};
use meter_core::locale::{month_name, Locale};
use meter_data::period::{Period, PeriodStats};

const RULE_WIDTH: usize = 53;

/// Heading line naming the period.
pub fn period_title(period: &Period) -> String {
    match *period {
        Period::Range { start, end } => format!(
            "Report for the period {}–{}",
            format_date(start),
            format_date(end)
        ),
        Period::Month(month) => format!(
            "Report for the month: {}",
            month_name(month).unwrap_or("unknown")
        ),
        Period::Year(year) => format!("Report for the year: {year}"),
    }
}

/// Render totals and average temperature for one period.
pub fn render_period_report(period: &Period, stats: &PeriodStats, locale: Locale) -> Vec<String> {
    vec![
        "-".repeat(RULE_WIDTH),
        period_title(period),
        format!(
            "- Total consumption: {} kWh",
            format_amount(stats.consumption_kwh, locale)
        ),
        format!(
            "- Total production: {} kWh",
            format_amount(stats.production_kwh, locale)
        ),
        format!(
            "- Average temperature: {} °C",
            format_amount(stats.average_temperature(), locale)
        ),
    ]
}
