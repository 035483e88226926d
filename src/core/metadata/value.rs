//! Raw tag values as read from a metadata directory.

use super::rational::Rational;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A numerator/denominator pair, as stored by EXIF RATIONAL and SRATIONAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ratio {
    pub numerator: i64,
    pub denominator: i64,
}

impl Ratio {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Raw value of a single tag.
///
/// Mirrors the EXIF field types closely enough to keep every tag, while
/// collapsing the signed/unsigned and width variants into one numeric kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Text(String),
    Integers(Vec<i64>),
    Floats(Vec<f64>),
    Rationals(Vec<Ratio>),
    Bytes(Vec<u8>),
    /// A resolved sub-directory, keyed by tag name
    Directory(BTreeMap<String, TagValue>),
}

impl TagValue {
    /// The string content, for ASCII tags only
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether the value carries anything at all.
    ///
    /// Empty strings, empty arrays and empty directories are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            TagValue::Text(text) => !text.is_empty(),
            TagValue::Integers(values) => !values.is_empty(),
            TagValue::Floats(values) => !values.is_empty(),
            TagValue::Rationals(values) => !values.is_empty(),
            TagValue::Bytes(values) => !values.is_empty(),
            TagValue::Directory(entries) => !entries.is_empty(),
        }
    }

    /// View a numeric array as normalizer inputs.
    ///
    /// Text, opaque bytes and directories are not ordered numeric sequences
    /// and yield `None`.
    pub fn as_sequence(&self) -> Option<Vec<Rational>> {
        match self {
            TagValue::Rationals(values) => Some(values.iter().copied().map(Rational::Pair).collect()),
            TagValue::Integers(values) => Some(
                values
                    .iter()
                    .map(|v| Rational::FloatLike(*v as f64))
                    .collect(),
            ),
            TagValue::Floats(values) => Some(values.iter().copied().map(Rational::FloatLike).collect()),
            TagValue::Text(_) | TagValue::Bytes(_) | TagValue::Directory(_) => None,
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    if let [single] = values {
        return write!(f, "{}", single);
    }
    write!(f, "(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", value)?;
    }
    write!(f, ")")
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Text(text) => write!(f, "{}", text),
            TagValue::Integers(values) => write_list(f, values),
            TagValue::Floats(values) => write_list(f, values),
            TagValue::Rationals(values) => write_list(f, values),
            TagValue::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            TagValue::Directory(entries) => write!(f, "{{{} entries}}", entries.len()),
        }
    }
}
