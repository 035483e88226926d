//! Builds a [`MetadataSummary`] from a metadata container.

use super::container::open_container;
use super::directory::{EmptyContainer, MetadataContainer};
use super::rational::extract_gps_decimal;
use super::tags::{gps_tag_name, primary_tag_name, GPS_INFO_PARSED_KEY, GPS_INFO_POINTER};
use super::value::TagValue;
use super::MetadataSummary;
use crate::error::ExtractError;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// EXIF date format: "YYYY:MM:DD HH:MM:SS"
pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Parse an EXIF timestamp. Anything else is `None`.
pub fn parse_exif_datetime(value: &TagValue) -> Option<NaiveDateTime> {
    let text = value.as_text()?;
    NaiveDateTime::parse_from_str(text, EXIF_DATE_FORMAT).ok()
}

/// Read the metadata summary of one image.
///
/// Fails only when the file cannot be opened or is not an image. Images
/// without metadata give an empty summary.
pub fn read_summary(path: &Path) -> Result<MetadataSummary, ExtractError> {
    let summary = match open_container(path)? {
        Some(container) => summarize(&container),
        None => summarize(&EmptyContainer),
    };
    debug!(
        path = %path.display(),
        tags = summary.raw_tags().len(),
        has_timestamp = summary.capture_timestamp().is_some(),
        "Summarized image metadata"
    );
    Ok(summary)
}

/// Interpret a container's directories. Never fails.
pub fn summarize<C: MetadataContainer + ?Sized>(container: &C) -> MetadataSummary {
    let primary = match container.primary_directory() {
        Some(directory) => directory,
        None => return MetadataSummary::default(),
    };

    let mut raw_tags: BTreeMap<String, TagValue> = primary.resolve(primary_tag_name);

    let capture_timestamp = raw_tags
        .get("DateTimeOriginal")
        .and_then(parse_exif_datetime)
        .or_else(|| raw_tags.get("DateTime").and_then(parse_exif_datetime));

    let gps = match container.sub_directory(GPS_INFO_POINTER) {
        Ok(directory) => directory.resolve(gps_tag_name),
        Err(e) => {
            debug!(error = %e, "No GPS directory");
            BTreeMap::new()
        }
    };

    let (latitude, longitude) = if gps.is_empty() {
        (None, None)
    } else {
        let coordinates = extract_gps_decimal(&gps);
        raw_tags.insert(GPS_INFO_PARSED_KEY.to_string(), TagValue::Directory(gps));
        coordinates
    };

    MetadataSummary::new(capture_timestamp, latitude, longitude, raw_tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::{Ratio, TagDirectory};
    use crate::error::DirectoryError;
    use chrono::NaiveDate;

    /// In-memory container for exercising the extractor
    #[derive(Default)]
    struct FixtureContainer {
        primary: Option<TagDirectory>,
        gps: Option<TagDirectory>,
        gps_error: Option<DirectoryError>,
    }

    impl MetadataContainer for FixtureContainer {
        fn primary_directory(&self) -> Option<TagDirectory> {
            self.primary.clone()
        }

        fn sub_directory(&self, pointer: u16) -> Result<TagDirectory, DirectoryError> {
            if let Some(error) = &self.gps_error {
                return Err(error.clone());
            }
            self.gps.clone().ok_or(DirectoryError::Missing { pointer })
        }
    }

    fn text(value: &str) -> TagValue {
        TagValue::Text(value.to_string())
    }

    fn dms(degrees: i64, minutes: i64, seconds: i64) -> TagValue {
        TagValue::Rationals(vec![
            Ratio::new(degrees, 1),
            Ratio::new(minutes, 1),
            Ratio::new(seconds, 1),
        ])
    }

    fn directory(entries: Vec<(u16, TagValue)>) -> Option<TagDirectory> {
        Some(entries.into_iter().collect())
    }

    fn timestamp(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn no_metadata_gives_empty_summary() {
        let summary = summarize(&EmptyContainer);
        assert!(summary.capture_timestamp().is_none());
        assert!(summary.latitude().is_none());
        assert!(summary.longitude().is_none());
        assert!(summary.raw_tags().is_empty());
    }

    #[test]
    fn prefers_date_time_original() {
        let container = FixtureContainer {
            primary: directory(vec![
                (0x0132, text("2020:01:01 00:00:00")),
                (0x9003, text("2019:07:04 18:30:05")),
            ]),
            ..Default::default()
        };
        let summary = summarize(&container);
        assert_eq!(summary.capture_timestamp(), Some(timestamp(2019, 7, 4, 18, 30, 5)));
    }

    #[test]
    fn falls_back_to_date_time() {
        let container = FixtureContainer {
            primary: directory(vec![(0x0132, text("2021:05:06 10:11:12"))]),
            ..Default::default()
        };
        let summary = summarize(&container);
        assert_eq!(summary.capture_timestamp(), Some(timestamp(2021, 5, 6, 10, 11, 12)));
    }

    #[test]
    fn unparseable_original_falls_back() {
        let container = FixtureContainer {
            primary: directory(vec![
                (0x0132, text("2021:05:06 10:11:12")),
                (0x9003, text("    :  :     :  :  ")),
            ]),
            ..Default::default()
        };
        let summary = summarize(&container);
        assert_eq!(summary.capture_timestamp(), Some(timestamp(2021, 5, 6, 10, 11, 12)));
    }

    #[test]
    fn non_text_dates_are_ignored() {
        let container = FixtureContainer {
            primary: directory(vec![(0x9003, TagValue::Integers(vec![2021]))]),
            ..Default::default()
        };
        assert!(summarize(&container).capture_timestamp().is_none());
    }

    #[test]
    fn dates_with_other_layouts_are_rejected() {
        let container = FixtureContainer {
            primary: directory(vec![
                (0x9003, text("2021-05-06 10:11:12")),
                (0x0132, text("2021:05:06T10:11:12")),
            ]),
            ..Default::default()
        };
        assert!(summarize(&container).capture_timestamp().is_none());
    }

    #[test]
    fn unknown_tags_keep_numeric_names() {
        let container = FixtureContainer {
            primary: directory(vec![(0x010F, text("Canon")), (0xC4A5, TagValue::Bytes(vec![1]))]),
            ..Default::default()
        };
        let summary = summarize(&container);
        assert_eq!(summary.raw_tags().get("Make"), Some(&text("Canon")));
        assert_eq!(summary.raw_tags().get("50341"), Some(&TagValue::Bytes(vec![1])));
    }

    #[test]
    fn gps_coordinates_are_signed() {
        let container = FixtureContainer {
            primary: directory(vec![(0x010F, text("Canon"))]),
            gps: directory(vec![
                (1, text("S")),
                (2, dms(10, 0, 0)),
                (3, text("E")),
                (4, dms(20, 0, 0)),
            ]),
            ..Default::default()
        };
        let summary = summarize(&container);
        assert_eq!(summary.latitude(), Some(-10.0));
        assert_eq!(summary.longitude(), Some(20.0));
    }

    #[test]
    fn parsed_gps_is_kept_in_raw_tags() {
        let container = FixtureContainer {
            primary: directory(vec![]),
            gps: directory(vec![(1, text("N")), (0x40, TagValue::Integers(vec![9]))]),
            ..Default::default()
        };
        let summary = summarize(&container);
        match summary.raw_tags().get(GPS_INFO_PARSED_KEY) {
            Some(TagValue::Directory(gps)) => {
                assert_eq!(gps.get("GPSLatitudeRef"), Some(&text("N")));
                assert_eq!(gps.get("64"), Some(&TagValue::Integers(vec![9])));
            }
            other => panic!("Expected parsed GPS directory, got {:?}", other),
        }
        assert!(summary.latitude().is_none());
    }

    #[test]
    fn malformed_latitude_keeps_longitude() {
        let container = FixtureContainer {
            primary: directory(vec![]),
            gps: directory(vec![
                (1, text("N")),
                (2, TagValue::Rationals(vec![Ratio::new(10, 1)])),
                (3, text("W")),
                (4, dms(75, 30, 0)),
            ]),
            ..Default::default()
        };
        let summary = summarize(&container);
        assert!(summary.latitude().is_none());
        assert_eq!(summary.longitude(), Some(-75.5));
    }

    #[test]
    fn gps_fetch_failure_is_absorbed() {
        let container = FixtureContainer {
            primary: directory(vec![(0x0132, text("2021:05:06 10:11:12"))]),
            gps_error: Some(DirectoryError::Malformed {
                pointer: GPS_INFO_POINTER,
                reason: "offset out of range".to_string(),
            }),
            ..Default::default()
        };
        let summary = summarize(&container);
        assert!(summary.capture_timestamp().is_some());
        assert!(summary.latitude().is_none());
        assert!(!summary.raw_tags().contains_key(GPS_INFO_PARSED_KEY));
    }

    #[test]
    fn empty_gps_directory_is_not_stored() {
        let container = FixtureContainer {
            primary: directory(vec![]),
            gps: directory(vec![]),
            ..Default::default()
        };
        let summary = summarize(&container);
        assert!(summary.raw_tags().is_empty());
    }

    #[test]
    fn zero_denominator_in_gps_degrades() {
        let container = FixtureContainer {
            primary: directory(vec![]),
            gps: directory(vec![
                (1, text("N")),
                (
                    2,
                    TagValue::Rationals(vec![Ratio::new(10, 0), Ratio::new(0, 1), Ratio::new(0, 1)]),
                ),
            ]),
            ..Default::default()
        };
        assert!(summarize(&container).latitude().is_none());
    }

    #[test]
    fn read_summary_missing_file_is_fatal() {
        let result = read_summary(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(ExtractError::Open { .. })));
    }
}
