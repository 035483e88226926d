//! Event type definitions for progress reporting.

use serde::Serialize;
use std::path::PathBuf;

/// All events emitted while summarizing a batch of images
#[derive(Debug, Clone, Serialize)]
pub enum Event {
    /// Discovery events
    Scan(ScanEvent),
    /// Metadata extraction events
    Extract(ExtractEvent),
}

/// Events while discovering images
#[derive(Debug, Clone, Serialize)]
pub enum ScanEvent {
    /// Scanning has started
    Started { paths: Vec<PathBuf> },
    /// An image was found
    PhotoFound { path: PathBuf },
    /// A path could not be read; scanning continues
    Error { path: PathBuf, message: String },
    /// Scanning completed
    Completed { total_photos: usize },
}

/// Events while reading metadata
#[derive(Debug, Clone, Serialize)]
pub enum ExtractEvent {
    /// Extraction has started
    Started { total_photos: usize },
    /// One image has been processed, successfully or not
    Progress(ExtractProgress),
    /// An image could not be opened; the batch continues
    Failed { path: PathBuf, message: String },
    /// Extraction completed
    Completed { summarized: usize, failed: usize },
}

/// Progress information during extraction
#[derive(Debug, Clone, Serialize)]
pub struct ExtractProgress {
    /// Images processed so far
    pub completed: usize,
    /// Images in the batch
    pub total: usize,
    /// Image just processed
    pub current_path: PathBuf,
}
