//! Week tables: one row per day summary plus a totals row.
//!
//! Columns are padded by display width so localised weekday names and
//! non-ASCII units line up.

use unicode_width::UnicodeWidthStr;

use meter_core::formatting::{format_amount, format_date};
use meter_core::locale::Locale;
use meter_core::models::{DaySummary, CHANNELS, PHASES};
use meter_data::aggregator::DailyAggregator;

const DAY_WIDTH: usize = 12;
const DATE_WIDTH: usize = 12;
const VALUE_WIDTH: usize = 8;

/// Horizontal alignment inside a padded cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Pad `text` with spaces to `width` display columns. Text that is already
/// wider is returned unchanged.
pub fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(fill)),
        Align::Right => format!("{}{}", " ".repeat(fill), text),
    }
}

/// Total display width of a week table line.
fn table_width() -> usize {
    DAY_WIDTH + 1 + DATE_WIDTH + 1 + CHANNELS * VALUE_WIDTH + (CHANNELS - 1)
}

fn group_width() -> usize {
    PHASES * VALUE_WIDTH + (PHASES - 1)
}

fn row(day: &str, date: &str, values: &[String]) -> String {
    let cells: Vec<String> = values
        .iter()
        .map(|v| pad(v, VALUE_WIDTH, Align::Right))
        .collect();
    format!(
        "{} {} {}",
        pad(day, DAY_WIDTH, Align::Left),
        pad(date, DATE_WIDTH, Align::Left),
        cells.join(" ")
    )
    .trim_end()
    .to_string()
}

/// Render one week's day summaries as a table.
///
/// `week` is the label shown in the heading, e.g. `"42"`.
pub fn render_week_table(week: &str, days: &[DaySummary], locale: Locale) -> Vec<String> {
    let separator = "-".repeat(table_width());
    let phase_labels: Vec<String> = (1..=PHASES)
        .chain(1..=PHASES)
        .map(|n| format!("v{n}"))
        .collect();

    let mut lines = vec![
        format!("Week {week} electricity consumption and production (kWh, by phase)"),
        String::new(),
        format!(
            "{} {} {} {}",
            pad("Day", DAY_WIDTH, Align::Left),
            pad("Date", DATE_WIDTH, Align::Left),
            pad("Consumption [kWh]", group_width(), Align::Left),
            "Production [kWh]"
        ),
        row("", "(dd.mm.yyyy)", &phase_labels),
        separator.clone(),
    ];

    for day in days {
        let values: Vec<String> = day
            .totals_kwh
            .iter()
            .map(|v| format_amount(*v, locale))
            .collect();
        lines.push(row(day.weekday, &format_date(day.date), &values));
    }

    let totals: Vec<String> = DailyAggregator::calculate_totals(days)
        .iter()
        .map(|v| format_amount(*v, locale))
        .collect();
    lines.push(separator);
    lines.push(row(total_label(locale), "", &totals));

    lines
}

/// Render several weeks one after another, separated by blank lines.
pub fn render_week_summary(weeks: &[(String, Vec<DaySummary>)], locale: Locale) -> Vec<String> {
    let mut lines = Vec::new();
    for (label, days) in weeks {
        lines.extend(render_week_table(label, days, locale));
        lines.push(String::new());
    }
    lines
}

fn total_label(locale: Locale) -> &'static str {
    match locale {
        Locale::Fi => "Yhteensä",
        Locale::En => "Total",
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
