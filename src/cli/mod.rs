//! # CLI Module
//!
//! Command-line interface for the metadata lab.
//!
//! ## Usage
//! ```bash
//! # Print capture time and GPS position, then save a grayscale copy
//! exif-lab inspect IMG_0001.jpg --output out/gray.jpg --max-width 800
//!
//! # Metadata only
//! exif-lab inspect IMG_0001.jpg --no-transform --tags
//!
//! # CSV report for a directory, on stdout
//! exif-lab report ~/Photos
//!
//! # JSON report to a file
//! exif-lab report ~/Photos --output reports/exif.json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use image_metadata_lab::core::batch::{Batch, BatchResult};
use image_metadata_lab::core::metadata::{read_summary, MetadataSummary, TagValue};
use image_metadata_lab::core::reporter::{export_to_file, format_timestamp, write_report, ReportFormat};
use image_metadata_lab::core::transform::{to_grayscale_and_resize, ProcessResult, TransformOptions};
use image_metadata_lab::error::Result;
use image_metadata_lab::events::{Event, EventChannel, ExtractEvent, ScanEvent};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::thread;

/// Image Metadata Lab - EXIF capture time, GPS position and grayscale copies
#[derive(Parser, Debug)]
#[command(name = "exif-lab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the EXIF summary of one image and save a grayscale copy
    Inspect {
        /// Path to an image file
        input: PathBuf,

        /// Output path for the processed image
        #[arg(short, long, default_value = "data/output/processed_gray.jpg")]
        output: PathBuf,

        /// Max width for resizing (preserves aspect ratio)
        #[arg(long, default_value = "1024")]
        max_width: u32,

        /// Only read metadata, do not write a processed image
        #[arg(long)]
        no_transform: bool,

        /// Also list every raw tag
        #[arg(long)]
        tags: bool,
    },

    /// Summarize images in files or flat directories as CSV or JSON
    Report {
        /// Image files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Report format (defaults to the output extension, else CSV)
        #[arg(short, long)]
        format: Option<Format>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// filename,date_time_original,latitude,longitude
    Csv,
    /// Array of objects, 2-space indent
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ReportFormat::Csv,
            Format::Json => ReportFormat::Json,
        }
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    image_metadata_lab::init_tracing(if cli.verbose { "debug" } else { "warn" });

    match cli.command {
        Commands::Inspect {
            input,
            output,
            max_width,
            no_transform,
            tags,
        } => run_inspect(&input, (!no_transform).then_some(output), max_width, tags),
        Commands::Report {
            paths,
            format,
            output,
            include_hidden,
        } => {
            let format = format
                .map(ReportFormat::from)
                .or_else(|| output.as_deref().and_then(ReportFormat::from_path))
                .unwrap_or(ReportFormat::Csv);
            run_report(paths, format, output, include_hidden)
        }
    }
}

fn run_inspect(input: &Path, output: Option<PathBuf>, max_width: u32, show_tags: bool) -> Result<()> {
    let summary = read_summary(input)?;
    print_summary(&summary);

    if show_tags {
        print_tags(&summary);
    }

    if let Some(output) = output {
        let result = to_grayscale_and_resize(
            input,
            &output,
            TransformOptions {
                max_width: Some(max_width),
            },
        )?;
        print_process_result(&result);
    }

    Ok(())
}

fn display_or_none<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| style("None").dim().to_string())
}

fn print_summary(summary: &MetadataSummary) {
    println!("{}", style("EXIF Summary").bold());
    println!("-----------");
    println!(
        "DateTimeOriginal: {}",
        display_or_none(summary.capture_timestamp().map(format_timestamp))
    );
    println!(
        "Latitude:         {}",
        display_or_none(summary.latitude().map(|v| format!("{:?}", v)))
    );
    println!(
        "Longitude:        {}",
        display_or_none(summary.longitude().map(|v| format!("{:?}", v)))
    );
}

fn print_tags(summary: &MetadataSummary) {
    println!();
    println!("{}", style("Raw Tags").bold());
    println!("--------");
    for (name, value) in summary.raw_tags() {
        match value {
            TagValue::Directory(entries) => {
                println!("{}:", name);
                for (sub_name, sub_value) in entries {
                    println!("  {}: {}", sub_name, sub_value);
                }
            }
            _ => println!("{}: {}", name, value),
        }
    }
}

fn print_process_result(result: &ProcessResult) {
    println!();
    println!("{}", style("Processing Result").bold());
    println!("-----------------");
    println!("Original size: {:?}", result.original_size);
    println!("Output size:   {:?}", result.output_size);
    println!("Saved to:      {}", result.output_path.display());
}

fn run_report(
    paths: Vec<PathBuf>,
    format: ReportFormat,
    output: Option<PathBuf>,
    include_hidden: bool,
) -> Result<()> {
    let term = Term::stderr();

    let batch = Batch::builder()
        .paths(paths)
        .include_hidden(include_hidden)
        .build();

    let (sender, receiver) = EventChannel::new();

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );

    let progress_clone = progress.clone();
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Scan(ScanEvent::Completed { total_photos }) => {
                    progress_clone.set_length(total_photos as u64);
                }
                Event::Extract(ExtractEvent::Progress(p)) => {
                    progress_clone.set_position(p.completed as u64);
                    progress_clone.set_message(
                        p.current_path
                            .file_name()
                            .unwrap_or_default()
                            .to_string_lossy()
                            .into_owned(),
                    );
                }
                Event::Extract(ExtractEvent::Completed { .. }) => {
                    progress_clone.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = batch.run_with_events(&sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    progress.finish_and_clear();

    let result = result?;
    let rows = result.rows();

    match output {
        Some(ref path) => export_to_file(&rows, path, format)?,
        None => write_report(&rows, std::io::stdout().lock(), format)?,
    }

    print_batch_summary(&term, &result, output.as_deref());
    Ok(())
}

fn print_batch_summary(term: &Term, result: &BatchResult, output: Option<&Path>) {
    for error in &result.scan_errors {
        term.write_line(&format!("{} {}", style("!").yellow().bold(), error))
            .ok();
    }
    for failure in &result.failures {
        term.write_line(&format!(
            "{} {}",
            style("✗").red().bold(),
            failure.message
        ))
        .ok();
    }

    term.write_line(&format!(
        "{} {} images summarized ({:.1} MB), {} with GPS, {} without metadata, {} failed in {:.1}s",
        style("✓").green().bold(),
        style(result.summaries.len()).cyan(),
        result.total_bytes() as f64 / 1_048_576.0,
        style(result.located_count()).cyan(),
        style(result.untagged_count()).cyan(),
        style(result.failures.len()).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();

    if let Some(path) = output {
        term.write_line(&format!("  Report saved to {}", path.display()))
            .ok();
    }
}
