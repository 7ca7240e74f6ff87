//! Text rendering layer for meter-report.
//!
//! Renders week tables, period reports and reservation listings as lines
//! of text, and writes those lines to the console or a report file.

pub mod output;
pub mod period_view;
pub mod reservation_view;
pub mod table_view;

pub use meter_core as core;
