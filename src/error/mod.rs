//! # Error Module
//!
//! Error types for the metadata lab.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Fatal only at the door** - failing to open or recognise an image is an
//!   error; anything wrong inside its metadata is not

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum LabError {
    #[error("Metadata extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Image processing error: {0}")]
    Transform(#[from] TransformError),

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),
}

/// Fatal errors while reading an image's metadata.
///
/// Only a file that cannot be opened or is not an image at all ends up here.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to open image file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a recognised image container: {path}")]
    UnrecognizedFormat { path: PathBuf },
}

/// Errors fetching a sub-directory from a metadata container.
///
/// These never leave the extractor; they mean "no such directory".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Sub-directory {pointer:#06x} is not present")]
    Missing { pointer: u16 },

    #[error("Sub-directory {pointer:#06x} is not supported by this container")]
    Unsupported { pointer: u16 },

    #[error("Sub-directory {pointer:#06x} is malformed: {reason}")]
    Malformed { pointer: u16, reason: String },
}

/// Errors from the grayscale/resize transform
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Could not read image {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Image has invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Resize failed: {0}")]
    Resize(String),

    #[error("Could not write output image {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Errors that occur while discovering images
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, LabError>;
