mod bootstrap;
mod menu;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use meter_core::error::ReportError;
use meter_core::settings::Settings;
use meter_core::time_utils::TimestampParser;
use meter_core::Locale;
use meter_data::aggregator::DailyAggregator;
use meter_data::period::{Period, PeriodAggregator};
use meter_data::reader::{self, WeekFile};
use meter_view::output::{print_lines, write_report};
use meter_view::period_view::render_period_report;
use meter_view::reservation_view::{render_reservation_card, render_reservation_report};
use meter_view::table_view::{render_week_summary, render_week_table};

const SUMMARY_FILE: &str = "summary.txt";
const MENU_REPORT_FILE: &str = "report.txt";

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("meter-report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Locale: {}, Timezone: {}",
        settings.view,
        settings.locale,
        settings.timezone
    );

    let locale = settings.locale()?;
    let timestamps = TimestampParser::new(&settings.timezone)?;

    match settings.view.as_str() {
        "daily" => run_daily(&settings, locale, &timestamps),
        "weekly" => run_weekly(&settings, locale, &timestamps),
        "period" => run_period(&settings, locale, &timestamps),
        "menu" => run_menu(&settings, locale, &timestamps),
        "reservations" => run_reservations(&settings, locale),
        "reservation" => run_reservation(&settings, locale),
        unknown => Err(ReportError::Config(format!("Unknown view: {unknown}")).into()),
    }
}

// ── Views ──────────────────────────────────────────────────────────────────────

fn run_daily(settings: &Settings, locale: Locale, timestamps: &TimestampParser) -> Result<()> {
    if settings.inputs.is_empty() {
        return Err(ReportError::Config("the daily view needs at least one --input".into()).into());
    }

    let mut lines = Vec::new();
    for path in &settings.inputs {
        let (label, days) = load_week(path, locale, timestamps)?;
        lines.extend(render_week_table(&label, &days, locale));
        lines.push(String::new());
    }

    emit(&lines, settings.output.as_deref())
}

fn run_weekly(settings: &Settings, locale: Locale, timestamps: &TimestampParser) -> Result<()> {
    let files: Vec<PathBuf> = if settings.inputs.is_empty() {
        reader::find_week_files(&settings.data_dir)?
            .into_iter()
            .map(|WeekFile { path, .. }| path)
            .collect()
    } else {
        settings.inputs.clone()
    };

    let weeks = files
        .iter()
        .map(|path| load_week(path, locale, timestamps))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!("Summarising {} weeks", weeks.len());

    let lines = render_week_summary(&weeks, locale);
    let output = settings
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(SUMMARY_FILE));

    print_stdout(&lines)?;
    write_report(&output, &lines)?;
    println!("Summary written to {}", output.display());
    Ok(())
}

fn run_period(settings: &Settings, locale: Locale, timestamps: &TimestampParser) -> Result<()> {
    let path = first_input(settings, "period")?;
    let records = reader::load_hourly_records(path, timestamps)?;

    let period = match settings.period.as_str() {
        "range" => {
            let (start, end) = settings.date_range()?;
            Period::Range { start, end }
        }
        "month" => Period::Month(settings.month.ok_or_else(|| {
            ReportError::Config("month reports need --month".to_string())
        })?),
        _ => Period::Year(
            settings
                .year
                .or_else(|| PeriodAggregator::default_year(&records))
                .ok_or(ReportError::EmptyInput)
                .with_context(|| format!("no records in {}", path.display()))?,
        ),
    };

    let stats = PeriodAggregator::summarize(&records, &period)?;
    tracing::debug!("{:?}: {} records matched", period, stats.count);

    emit(
        &render_period_report(&period, &stats, locale),
        settings.output.as_deref(),
    )
}

fn run_menu(settings: &Settings, locale: Locale, timestamps: &TimestampParser) -> Result<()> {
    let path = first_input(settings, "menu")?;
    let records = reader::load_hourly_records(path, timestamps)?;
    let report_path = settings
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(MENU_REPORT_FILE));

    let menu = menu::Menu::new(&records, locale, report_path);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    menu.run(&mut stdin.lock(), &mut stdout.lock())
}

fn run_reservations(settings: &Settings, locale: Locale) -> Result<()> {
    let path = first_input(settings, "reservations")?;
    let reservations = reader::load_reservations(path)?;
    emit(
        &render_reservation_report(&reservations, locale),
        settings.output.as_deref(),
    )
}

fn run_reservation(settings: &Settings, locale: Locale) -> Result<()> {
    let path = first_input(settings, "reservation")?;
    let reservations = reader::load_reservations(path)?;

    let reservation = match settings.reservation_id {
        Some(id) => meter_data::reservations::find_by_id(&reservations, id).ok_or_else(|| {
            ReportError::InvalidInput(format!("no reservation with id {id} in {}", path.display()))
        })?,
        None => reservations.first().ok_or(ReportError::EmptyInput)?,
    };

    emit(
        &render_reservation_card(reservation, locale),
        settings.output.as_deref(),
    )
}

// ── Helpers ────────────────────────────────────────────────────────────────────

/// Load and aggregate one week file, labelled by its week number or stem.
fn load_week(
    path: &Path,
    locale: Locale,
    timestamps: &TimestampParser,
) -> Result<(String, Vec<meter_core::models::DaySummary>)> {
    let readings = reader::load_readings(path, timestamps)?;
    let days = DailyAggregator::aggregate(&readings, locale)
        .with_context(|| format!("aggregating {}", path.display()))?;
    let label = reader::week_number(path)
        .map(|n| n.to_string())
        .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default();
    Ok((label, days))
}

fn first_input<'a>(settings: &'a Settings, view: &str) -> Result<&'a Path> {
    settings
        .inputs
        .first()
        .map(PathBuf::as_path)
        .ok_or_else(|| ReportError::Config(format!("the {view} view needs --input")).into())
}

fn print_stdout(lines: &[String]) -> Result<()> {
    print_lines(&mut std::io::stdout().lock(), lines)?;
    Ok(())
}

/// Print `lines`, and also write them to `output` when one was given.
fn emit(lines: &[String], output: Option<&Path>) -> Result<()> {
    print_stdout(lines)?;
    if let Some(path) = output {
        write_report(path, lines)?;
    }
    Ok(())
}
