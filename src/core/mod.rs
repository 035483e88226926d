//! # Core Module
//!
//! The front-end-agnostic engine.
//!
//! ## Modules
//! - `metadata` - Reads EXIF capture time and GPS position
//! - `scanner` - Discovers images in files and flat directories
//! - `batch` - Summarizes every discovered image
//! - `reporter` - Writes summaries as CSV or JSON
//! - `transform` - Grayscale conversion and downscaling

pub mod batch;
pub mod metadata;
pub mod reporter;
pub mod scanner;
pub mod transform;

// Re-export commonly used types
pub use batch::{Batch, BatchResult};
pub use metadata::{read_summary, MetadataSummary, TagValue};
pub use reporter::{ReportFormat, ReportRow};
pub use scanner::PhotoFile;
pub use transform::{to_grayscale_and_resize, ProcessResult, TransformOptions};
