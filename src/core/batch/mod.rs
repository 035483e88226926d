//! # Batch Module
//!
//! Summarizes every image found under a set of paths.
//!
//! ## Stages
//! 1. **Scan** - discover images (single files or flat directories)
//! 2. **Extract** - read each image's metadata summary, one after another
//!
//! An image that cannot be opened is recorded as a failure and skipped; it
//! never stops the batch.

use crate::core::metadata::{read_summary, MetadataSummary};
use crate::core::reporter::{summaries_to_rows, ReportRow};
use crate::core::scanner::{PhotoFile, PhotoScanner, ScanConfig, WalkDirScanner};
use crate::error::LabError;
use crate::events::{null_sender, Event, EventSender, ExtractEvent, ExtractProgress};
use std::path::PathBuf;
use std::time::Instant;
use tracing::warn;

/// One successfully summarized image
#[derive(Debug, Clone)]
pub struct SummarizedPhoto {
    pub photo: PhotoFile,
    pub summary: MetadataSummary,
}

/// One image that could not be read
#[derive(Debug, Clone)]
pub struct FailedPhoto {
    pub path: PathBuf,
    pub message: String,
}

/// Result of a batch run
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Summaries in scan order
    pub summaries: Vec<SummarizedPhoto>,
    /// Images that failed to open
    pub failures: Vec<FailedPhoto>,
    /// Non-fatal scan errors, already formatted
    pub scan_errors: Vec<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl BatchResult {
    /// Report rows for the summarized images, keyed by file name
    pub fn rows(&self) -> Vec<ReportRow> {
        summaries_to_rows(
            self.summaries
                .iter()
                .map(|item| (item.photo.file_name(), &item.summary)),
        )
    }

    /// Number of summaries with both coordinates
    pub fn located_count(&self) -> usize {
        self.summaries
            .iter()
            .filter(|item| item.summary.has_location())
            .count()
    }

    /// Number of summaries with no metadata at all
    pub fn untagged_count(&self) -> usize {
        self.summaries
            .iter()
            .filter(|item| !item.summary.has_data())
            .count()
    }

    /// Bytes on disk of the summarized images
    pub fn total_bytes(&self) -> u64 {
        self.summaries.iter().map(|item| item.photo.size).sum()
    }
}

/// Builder for batch configuration
#[derive(Debug, Clone, Default)]
pub struct BatchBuilder {
    paths: Vec<PathBuf>,
    scan_config: ScanConfig,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files or directories to summarize
    pub fn paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.scan_config = config;
        self
    }

    /// Include hidden files
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.scan_config.include_hidden = include;
        self
    }

    pub fn build(self) -> Batch {
        Batch {
            paths: self.paths,
            scan_config: self.scan_config,
        }
    }
}

/// A configured batch run
pub struct Batch {
    paths: Vec<PathBuf>,
    scan_config: ScanConfig,
}

impl Batch {
    pub fn builder() -> BatchBuilder {
        BatchBuilder::new()
    }

    /// Run without events
    pub fn run(&self) -> Result<BatchResult, LabError> {
        self.run_with_events(&null_sender())
    }

    /// Run with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<BatchResult, LabError> {
        let start_time = Instant::now();

        let scanner = WalkDirScanner::new(self.scan_config.clone());
        let scan_result = scanner.scan_with_events(&self.paths, events)?;

        let mut result = BatchResult {
            scan_errors: scan_result.errors.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        };

        let total = scan_result.photos.len();
        events.send(Event::Extract(ExtractEvent::Started {
            total_photos: total,
        }));

        for (index, photo) in scan_result.photos.into_iter().enumerate() {
            let current_path = photo.path.clone();

            match read_summary(&photo.path) {
                Ok(summary) => result.summaries.push(SummarizedPhoto { photo, summary }),
                Err(e) => {
                    warn!(path = %photo.path.display(), error = %e, "Skipping unreadable image");
                    events.send(Event::Extract(ExtractEvent::Failed {
                        path: photo.path.clone(),
                        message: e.to_string(),
                    }));
                    result.failures.push(FailedPhoto {
                        path: photo.path,
                        message: e.to_string(),
                    });
                }
            }

            events.send(Event::Extract(ExtractEvent::Progress(ExtractProgress {
                completed: index + 1,
                total,
                current_path,
            })));
        }

        events.send(Event::Extract(ExtractEvent::Completed {
            summarized: result.summaries.len(),
            failed: result.failures.len(),
        }));

        result.duration_ms = start_time.elapsed().as_millis() as u64;
        Ok(result)
    }
}
