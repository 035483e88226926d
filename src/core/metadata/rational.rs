//! Rational and coordinate normalization.
//!
//! Turns the numeric encodings found in metadata into plain `f64`s and
//! degrees/minutes/seconds triples into signed decimal degrees.
//! Every conversion here is best-effort: bad input gives `None`, never a panic.

use super::value::{Ratio, TagValue};
use std::collections::BTreeMap;

/// A value that should be read as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rational {
    /// Numerator/denominator, not yet divided
    Pair(Ratio),
    /// Already a plain number
    FloatLike(f64),
    /// Anything that cannot be read as a number
    Other,
}

/// Convert a rational-like value to `f64`.
///
/// A zero denominator gives `None` rather than an infinity.
pub fn to_decimal(value: Option<Rational>) -> Option<f64> {
    match value? {
        Rational::FloatLike(v) => Some(v),
        Rational::Pair(Ratio { denominator: 0, .. }) => None,
        Rational::Pair(Ratio {
            numerator,
            denominator,
        }) => Some(numerator as f64 / denominator as f64),
        Rational::Other => None,
    }
}

/// Convert degrees/minutes/seconds to signed decimal degrees.
///
/// Only the exact references `"S"` and `"W"` flip the sign; any other
/// reference (including lowercase) leaves it positive.
pub fn dms_to_decimal(
    degrees: Option<Rational>,
    minutes: Option<Rational>,
    seconds: Option<Rational>,
    hemisphere: &str,
) -> Option<f64> {
    let degrees = to_decimal(degrees)?;
    let minutes = to_decimal(minutes)?;
    let seconds = to_decimal(seconds)?;

    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    if matches!(hemisphere, "S" | "W") {
        Some(-value)
    } else {
        Some(value)
    }
}

/// Compute one axis from its reference and DMS value tags.
fn axis_decimal(reference: Option<&TagValue>, value: Option<&TagValue>) -> Option<f64> {
    let reference = reference.filter(|r| r.is_truthy())?;
    let value = value.filter(|v| v.is_truthy())?;

    match value.as_sequence()?.as_slice() {
        [degrees, minutes, seconds] => dms_to_decimal(
            Some(*degrees),
            Some(*minutes),
            Some(*seconds),
            &reference.to_string(),
        ),
        _ => None,
    }
}

/// Read latitude and longitude from a resolved GPS directory.
///
/// The two axes are independent: a malformed latitude does not stop the
/// longitude from being computed, and vice versa.
pub fn extract_gps_decimal(gps: &BTreeMap<String, TagValue>) -> (Option<f64>, Option<f64>) {
    let latitude = axis_decimal(gps.get("GPSLatitudeRef"), gps.get("GPSLatitude"));
    let longitude = axis_decimal(gps.get("GPSLongitudeRef"), gps.get("GPSLongitude"));
    (latitude, longitude)
}
