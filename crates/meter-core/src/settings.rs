use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ReportError, Result};
use crate::locale::Locale;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Daily energy and reservation reports from delimited text files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "meter-report",
    about = "Daily energy and reservation reports from delimited text files",
    version
)]
pub struct Settings {
    /// Report to produce
    #[arg(long, default_value = "weekly", value_parser = ["daily", "weekly", "period", "menu", "reservations", "reservation"])]
    pub view: String,

    /// Input file (repeatable)
    #[arg(long = "input", short = 'i')]
    pub inputs: Vec<PathBuf>,

    /// Directory scanned for weekNN.csv files when no --input is given
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Report file to write
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Period for the period view
    #[arg(long, default_value = "year", value_parser = ["range", "month", "year"])]
    pub period: String,

    /// First day of a range report (dd.mm.yyyy)
    #[arg(long)]
    pub from: Option<String>,

    /// Last day of a range report (dd.mm.yyyy)
    #[arg(long)]
    pub to: Option<String>,

    /// Month number for a month report (1-12)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Year for a year report (defaults to the year of the first record)
    #[arg(long)]
    pub year: Option<i32>,

    /// Reservation shown by the reservation view (defaults to the first one)
    #[arg(long)]
    pub reservation_id: Option<u32>,

    /// Output locale
    #[arg(long, default_value = "fi", value_parser = ["fi", "en"])]
    pub locale: String,

    /// Timezone used to assign readings to days ("source" keeps recorded times)
    #[arg(long, default_value = "source")]
    pub timezone: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.meter-report/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".meter-report").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("Could not clear {}: {}", config_path.display(), e);
            }
            return settings.apply_debug();
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins over persisted values.
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view.filter(|v| is_valid_persisted("view", v)) {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "locale") {
            if let Some(v) = last.locale.filter(|v| is_valid_persisted("locale", v)) {
                settings.locale = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "timezone") {
            if let Some(v) = last.timezone.filter(|v| is_valid_persisted("timezone", v)) {
                settings.timezone = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "data_dir") {
            if let Some(v) = last.data_dir {
                settings.data_dir = v;
            }
        }

        settings = settings.apply_debug();

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::warn!("Could not persist settings to {}: {}", config_path.display(), e);
        }

        settings
    }

    /// The `--debug` flag overrides the log level.
    fn apply_debug(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }

    /// Typed output locale.
    pub fn locale(&self) -> Result<Locale> {
        self.locale.parse()
    }

    /// Parsed `--from` / `--to` bounds for a range report.
    pub fn date_range(&self) -> Result<(chrono::NaiveDate, chrono::NaiveDate)> {
        let (Some(from), Some(to)) = (self.from.as_deref(), self.to.as_deref()) else {
            return Err(ReportError::Config(
                "range reports need both --from and --to".to_string(),
            ));
        };
        let start = crate::formatting::parse_date(from)?;
        let end = crate::formatting::parse_date(to)?;
        Ok((start, end))
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            view: Some(s.view.clone()),
            locale: Some(s.locale.clone()),
            timezone: Some(s.timezone.clone()),
            data_dir: Some(s.data_dir.clone()),
        }
    }
}

/// Returns `true` when a persisted value for argument `name` would also be
/// accepted on the command line. Rejected values are logged and ignored.
fn is_valid_persisted(name: &str, value: &str) -> bool {
    let valid = match name {
        "timezone" => {
            matches!(value, "source" | "auto") || crate::time_utils::validate_timezone(value)
        }
        _ => Settings::command()
            .get_arguments()
            .find(|arg| arg.get_id() == name)
            .map(|arg| {
                let possible = arg.get_possible_values();
                possible.is_empty() || possible.iter().any(|pv| pv.matches(value, false))
            })
            .unwrap_or(true),
    };
    if !valid {
        tracing::warn!("Ignoring saved {} \"{}\": not a valid value", name, value);
    }
    valid
}

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
