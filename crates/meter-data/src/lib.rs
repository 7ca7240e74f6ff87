//! Data layer for meter-report.
//!
//! Responsible for discovering and parsing delimited input files, the
//! day-bucketed aggregation of meter readings, period statistics over
//! hourly records and reservation counts.

pub mod aggregator;
pub mod period;
pub mod reader;
pub mod reservations;

pub use meter_core as core;
