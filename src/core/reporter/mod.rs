//! # Reporter Module
//!
//! Turns metadata summaries into flat report rows and writes them as CSV or
//! JSON.
//!
//! ## Row Layout
//! `filename, date_time_original, latitude, longitude`
//!
//! Timestamps are rendered as `YYYY-MM-DD HH:MM:SS`. Missing values are empty
//! cells in CSV and `null` in JSON.

mod export;

pub use export::{export_to_file, write_csv, write_json, write_report, ReportFormat, CSV_HEADER};

use crate::core::metadata::MetadataSummary;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used in reports
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One image in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub filename: String,
    pub date_time_original: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl ReportRow {
    /// Build a row from an image's summary
    pub fn from_summary(filename: impl Into<String>, summary: &MetadataSummary) -> Self {
        Self {
            filename: filename.into(),
            date_time_original: summary.capture_timestamp().map(format_timestamp),
            latitude: summary.latitude(),
            longitude: summary.longitude(),
        }
    }
}

/// Render a capture time the way reports expect it
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(REPORT_DATE_FORMAT).to_string()
}

/// Convert (filename, summary) pairs into report rows
pub fn summaries_to_rows<'a, I, S>(items: I) -> Vec<ReportRow>
where
    I: IntoIterator<Item = (S, &'a MetadataSummary)>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(|(filename, summary)| ReportRow::from_summary(filename, summary))
        .collect()
}
