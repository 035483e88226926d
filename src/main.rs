//! # exif-lab CLI
//!
//! Command-line interface for the metadata lab.
//!
//! ## Usage
//! ```bash
//! exif-lab inspect photo.jpg --max-width 800
//! exif-lab report ~/Photos --format json --output exif.json
//! ```

mod cli;

use image_metadata_lab::Result;

fn main() -> Result<()> {
    cli::run()
}
