//! Export functionality for metadata reports.
//!
//! Supports CSV and JSON, both with a fixed column set.

use super::ReportRow;
use crate::error::ReportError;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV header, written even when there are no rows
pub const CSV_HEADER: [&str; 4] = ["filename", "date_time_original", "latitude", "longitude"];

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
}

impl ReportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "csv" => Some(ReportFormat::Csv),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Write rows as CSV
pub fn write_csv<W: Write>(rows: &[ReportRow], writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write rows as a JSON array with 2-space indentation
pub fn write_json<W: Write>(rows: &[ReportRow], mut writer: W) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    Ok(())
}

/// Write rows in the given format
pub fn write_report<W: Write>(
    rows: &[ReportRow],
    writer: W,
    format: ReportFormat,
) -> Result<(), ReportError> {
    match format {
        ReportFormat::Csv => write_csv(rows, writer),
        ReportFormat::Json => write_json(rows, writer),
    }
}

/// Export rows to a file, creating parent directories
pub fn export_to_file(
    rows: &[ReportRow],
    path: &Path,
    format: ReportFormat,
) -> Result<(), ReportError> {
    let io_error = |source: std::io::Error| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let file = fs::File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    write_report(rows, &mut writer, format)?;
    writer.flush().map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_rows() -> Vec<ReportRow> {
        vec![
            ReportRow {
                filename: "beach.jpg".to_string(),
                date_time_original: Some("2021-05-06 10:11:12".to_string()),
                latitude: Some(-10.0),
                longitude: Some(20.5),
            },
            ReportRow {
                filename: "scan, page 1.png".to_string(),
                date_time_original: None,
                latitude: None,
                longitude: None,
            },
        ]
    }

    fn to_string(rows: &[ReportRow], format: ReportFormat) -> String {
        let mut output = Vec::new();
        write_report(rows, &mut output, format).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn csv_starts_with_header() {
        let csv = to_string(&sample_rows(), ReportFormat::Csv);
        assert!(csv.starts_with("filename,date_time_original,latitude,longitude\n"));
    }

    #[test]
    fn csv_leaves_missing_values_empty() {
        let csv = to_string(&sample_rows(), ReportFormat::Csv);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[1], "beach.jpg,2021-05-06 10:11:12,-10.0,20.5");
        assert_eq!(lines[2], "\"scan, page 1.png\",,,");
    }

    #[test]
    fn csv_without_rows_still_has_header() {
        let csv = to_string(&[], ReportFormat::Csv);
        assert_eq!(csv, "filename,date_time_original,latitude,longitude\n");
    }

    #[test]
    fn csv_coordinates_survive_a_reread() {
        let rows = vec![ReportRow {
            filename: "peak.jpg".to_string(),
            date_time_original: None,
            latitude: Some(46.852_777_777_777_78),
            longitude: Some(-121.760_555_555_555_56),
        }];
        let csv = to_string(&rows, ReportFormat::Csv);

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let reread: Vec<ReportRow> = reader.deserialize().map(|r| r.unwrap()).collect();

        let lat = reread[0].latitude.unwrap();
        let lon = reread[0].longitude.unwrap();
        assert!((lat - 46.852_777_777_777_78).abs() < 1e-12);
        assert!((lon + 121.760_555_555_555_56).abs() < 1e-12);
    }

    #[test]
    fn json_uses_null_and_two_space_indent() {
        let json = to_string(&sample_rows(), ReportFormat::Json);
        assert!(json.starts_with("[\n  {\n    \"filename\": \"beach.jpg\""));
        assert!(json.contains("\"date_time_original\": null"));
        assert!(json.contains("\"latitude\": -10.0"));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[test]
    fn json_without_rows_is_empty_array() {
        assert_eq!(to_string(&[], ReportFormat::Json).trim(), "[]");
    }

    #[test]
    fn format_from_path() {
        assert_eq!(ReportFormat::from_path(Path::new("out/report.CSV")), Some(ReportFormat::Csv));
        assert_eq!(ReportFormat::from_path(Path::new("report.json")), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::from_path(Path::new("report.txt")), None);
    }

    #[test]
    fn export_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join("exif.json");

        export_to_file(&sample_rows(), &path, ReportFormat::Json).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("beach.jpg"));
    }
}
