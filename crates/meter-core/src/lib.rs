//! Core types for meter-report.
//!
//! Domain models, the shared error type, locale tables, number and date
//! formatting, timestamp parsing and command-line settings.

pub mod error;
pub mod formatting;
pub mod locale;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{ReportError, Result};
pub use locale::Locale;
