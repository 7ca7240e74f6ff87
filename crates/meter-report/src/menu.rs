//! Interactive period-report loop over an input/output pair.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::Datelike;
use tracing::{debug, warn};

use meter_core::formatting::parse_date;
use meter_core::locale::Locale;
use meter_core::models::HourlyRecord;
use meter_data::period::{Period, PeriodAggregator};
use meter_view::output::{print_lines, write_report};
use meter_view::period_view::render_period_report;

const MAIN_MENU: &[&str] = &[
    "Choose report type:",
    "1) Daily consumption and production for a date range",
    "2) Monthly summary for one month",
    "3) Full year summary",
    "4) Exit",
];

enum Next {
    NewReport,
    Exit,
}

/// Menu state: the records being reported on and where reports are written.
pub struct Menu<'a> {
    records: &'a [HourlyRecord],
    locale: Locale,
    report_path: PathBuf,
}

impl<'a> Menu<'a> {
    pub fn new(records: &'a [HourlyRecord], locale: Locale, report_path: PathBuf) -> Self {
        Self {
            records,
            locale,
            report_path,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> anyhow::Result<()> {
        loop {
            for line in MAIN_MENU {
                writeln!(out, "{line}")?;
            }
            let Some(choice) = prompt(input, out, "Your choice: ")? else {
                return Ok(());
            };

            let period = match choice.as_str() {
                "1" => match self.ask_range(input, out)? {
                    Some(period) => period,
                    None => continue,
                },
                "2" => match self.ask_month(input, out)? {
                    Some(period) => period,
                    None => continue,
                },
                "3" => Period::Year(self.default_year()),
                "4" => return Ok(()),
                other => {
                    debug!("Invalid main menu choice: {other:?}");
                    writeln!(out, "Invalid choice. Try again.")?;
                    continue;
                }
            };

            let stats = match PeriodAggregator::summarize(self.records, &period) {
                Ok(stats) => stats,
                Err(e) => {
                    writeln!(out, "Error: {e}")?;
                    continue;
                }
            };
            let lines = render_period_report(&period, &stats, self.locale);
            print_lines(out, &lines)?;

            match self.after_report(input, out, &lines)? {
                Next::NewReport => continue,
                Next::Exit => return Ok(()),
            }
        }
    }

    fn ask_range<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> anyhow::Result<Option<Period>> {
        let Some(start) = prompt(input, out, "Enter start date (dd.mm.yyyy): ")? else {
            return Ok(None);
        };
        let Some(end) = prompt(input, out, "Enter end date (dd.mm.yyyy): ")? else {
            return Ok(None);
        };
        match (parse_date(&start), parse_date(&end)) {
            (Ok(start), Ok(end)) => Ok(Some(Period::Range { start, end })),
            (Err(e), _) | (_, Err(e)) => {
                writeln!(out, "Error: {e}")?;
                Ok(None)
            }
        }
    }

    fn ask_month<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> anyhow::Result<Option<Period>> {
        let Some(text) = prompt(input, out, "Enter month number (1-12): ")? else {
            return Ok(None);
        };
        match text.parse::<u32>() {
            Ok(month) if (1..=12).contains(&month) => Ok(Some(Period::Month(month))),
            _ => {
                writeln!(out, "Error: month must be a number from 1 to 12")?;
                Ok(None)
            }
        }
    }

    /// Second menu shown under a report. Every choice except exit leads back
    /// to the main menu.
    fn after_report<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
        lines: &[String],
    ) -> anyhow::Result<Next> {
        writeln!(out, "What would you like to do next?")?;
        writeln!(
            out,
            "1) Write the report to the file {}",
            self.report_path.display()
        )?;
        writeln!(out, "2) Create a new report")?;
        writeln!(out, "3) Exit")?;
        let Some(choice) = prompt(input, out, "Your choice: ")? else {
            return Ok(Next::Exit);
        };
        match choice.as_str() {
            "1" => match write_report(&self.report_path, lines) {
                Ok(()) => writeln!(out, "Report written to {}", self.report_path.display())?,
                Err(e) => {
                    warn!("Could not write report: {e}");
                    writeln!(out, "Error: {e}")?;
                }
            },
            "2" => {}
            "3" => return Ok(Next::Exit),
            other => {
                debug!("Invalid next-step choice: {other:?}");
                writeln!(out, "Invalid choice. Returning to main menu.")?;
            }
        }
        Ok(Next::NewReport)
    }

    fn default_year(&self) -> i32 {
        PeriodAggregator::default_year(self.records)
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

/// Print `text` and read one trimmed line; `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    text: &str,
) -> std::io::Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
