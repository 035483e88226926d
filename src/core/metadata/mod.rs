//! # Metadata Module
//!
//! Extracts EXIF capture time and GPS position from photo files.
//!
//! ## Extraction Flow
//! 1. Open the image and sniff its container format (`image`)
//! 2. Parse the EXIF block (`kamadak-exif`)
//! 3. Resolve the primary directory's tags to names
//! 4. Parse `DateTimeOriginal`, falling back to `DateTime`
//! 5. Fetch the GPS sub-directory (pointer `0x8825`) and convert its
//!    degrees/minutes/seconds to signed decimal degrees
//!
//! Only step 1 can fail. Everything after it degrades to `None`.

mod container;
mod directory;
mod extractor;
mod rational;
mod tags;
mod value;

pub use container::{open_container, ExifContainer};
pub use directory::{EmptyContainer, MetadataContainer, TagDirectory};
pub use extractor::{parse_exif_datetime, read_summary, summarize, EXIF_DATE_FORMAT};
pub use rational::{dms_to_decimal, extract_gps_decimal, to_decimal, Rational};
pub use tags::{
    gps_tag_name, primary_tag_name, GPS_INFO_PARSED_KEY, GPS_INFO_POINTER, GPS_TAG_NAMES,
    PRIMARY_TAG_NAMES,
};
pub use value::{Ratio, TagValue};

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// Metadata read from one image.
///
/// Built once by the extractor and read through accessors afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataSummary {
    capture_timestamp: Option<NaiveDateTime>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    raw_tags: BTreeMap<String, TagValue>,
}

impl MetadataSummary {
    pub fn new(
        capture_timestamp: Option<NaiveDateTime>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        raw_tags: BTreeMap<String, TagValue>,
    ) -> Self {
        Self {
            capture_timestamp,
            latitude,
            longitude,
            raw_tags,
        }
    }

    /// Capture time, local to the camera (EXIF carries no zone)
    pub fn capture_timestamp(&self) -> Option<NaiveDateTime> {
        self.capture_timestamp
    }

    /// Signed decimal degrees, north positive. Range is not checked.
    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    /// Signed decimal degrees, east positive. Range is not checked.
    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// Every tag read, by resolved name
    pub fn raw_tags(&self) -> &BTreeMap<String, TagValue> {
        &self.raw_tags
    }

    /// Both coordinates are known
    pub fn has_location(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Check if any metadata was extracted
    pub fn has_data(&self) -> bool {
        self.capture_timestamp.is_some()
            || self.latitude.is_some()
            || self.longitude.is_some()
            || !self.raw_tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_data() {
        let summary = MetadataSummary::default();
        assert!(!summary.has_data());
        assert!(!summary.has_location());
    }

    #[test]
    fn location_needs_both_axes() {
        let summary = MetadataSummary::new(None, Some(1.0), None, BTreeMap::new());
        assert!(!summary.has_location());
        assert!(summary.has_data());

        let summary = MetadataSummary::new(None, Some(1.0), Some(2.0), BTreeMap::new());
        assert!(summary.has_location());
    }

    #[test]
    fn single_coordinate_counts_as_data() {
        let summary = MetadataSummary::new(None, None, Some(-3.5), BTreeMap::new());
        assert!(summary.has_data());
        assert!(!summary.has_location());
    }

    #[test]
    fn raw_tags_alone_count_as_data() {
        let mut tags = BTreeMap::new();
        tags.insert("Make".to_string(), TagValue::Text("Canon".to_string()));
        let summary = MetadataSummary::new(None, None, None, tags);
        assert!(summary.has_data());
    }
}
