//! # Image Metadata Lab
//!
//! Reads capture time and GPS position from photo EXIF data, and converts
//! photos to downscaled grayscale copies.
//!
//! ## Architecture
//! - `core` - Extraction, scanning, reporting and image processing
//! - `events` - Progress reporting for batch runs
//! - `error` - Error types
//!
//! ## Example
//! ```rust,ignore
//! let summary = image_metadata_lab::core::read_summary(Path::new("IMG_0001.jpg"))?;
//! if let (Some(lat), Some(lon)) = (summary.latitude(), summary.longitude()) {
//!     println!("{lat}, {lon}");
//! }
//! ```

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{LabError, Result};

/// Initialize tracing for the library
///
/// Reads `RUST_LOG`; `default_level` applies when it is unset.
/// This should be called once by the application entry point.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
