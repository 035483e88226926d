//! Directory walking implementation using walkdir.

use super::filter::{is_hidden, ImageFilter};
use super::{PhotoFile, PhotoScanner, ScanResult};
use crate::error::ScanError;
use crate::events::{null_sender, Event, EventSender, ScanEvent};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files
    pub include_hidden: bool,
    /// Maximum directory depth (1 = flat directory, None = unlimited)
    pub max_depth: Option<usize>,
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: false,
            max_depth: Some(1),
            extensions: None,
        }
    }
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = ImageFilter::new().with_hidden(config.include_hidden);

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self { config, filter }
    }

    fn photo_file(&self, path: &Path) -> Result<PhotoFile, ScanError> {
        let metadata = fs::metadata(path).map_err(|source| ScanError::ReadDirectory {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(PhotoFile {
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }

    /// Scan one input path: a single file or a directory
    fn scan_path(
        &self,
        root: &Path,
        events: &EventSender,
    ) -> Result<(Vec<PhotoFile>, Vec<ScanError>), ScanError> {
        if !root.exists() {
            return Err(ScanError::NotFound {
                path: root.to_path_buf(),
            });
        }

        // An explicitly named file is taken as is; the extractor decides
        // whether it is an image.
        if root.is_file() {
            let photo = self.photo_file(root)?;
            events.send(Event::Scan(ScanEvent::PhotoFound {
                path: photo.path.clone(),
            }));
            return Ok((vec![photo], Vec::new()));
        }

        let mut photos = Vec::new();
        let mut errors = Vec::new();

        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.config.include_hidden;
        let entries = walker
            .into_iter()
            .filter_entry(|entry| include_hidden || entry.depth() == 0 || !is_hidden(entry.path()));

        for entry_result in entries {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();

                    if entry.file_type().is_dir() || !self.filter.should_include(path) {
                        continue;
                    }

                    match self.photo_file(path) {
                        Ok(photo) => {
                            events.send(Event::Scan(ScanEvent::PhotoFound {
                                path: photo.path.clone(),
                            }));
                            photos.push(photo);
                        }
                        Err(error) => {
                            events.send(Event::Scan(ScanEvent::Error {
                                path: path.to_path_buf(),
                                message: error.to_string(),
                            }));
                            errors.push(error);
                        }
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadDirectory {
                            path: path.clone(),
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    events.send(Event::Scan(ScanEvent::Error {
                        path,
                        message: error.to_string(),
                    }));

                    errors.push(error);
                }
            }
        }

        Ok((photos, errors))
    }
}

impl PhotoScanner for WalkDirScanner {
    fn scan(&self, paths: &[PathBuf]) -> Result<ScanResult, ScanError> {
        self.scan_with_events(paths, &null_sender())
    }

    fn scan_with_events(
        &self,
        paths: &[PathBuf],
        events: &EventSender,
    ) -> Result<ScanResult, ScanError> {
        events.send(Event::Scan(ScanEvent::Started {
            paths: paths.to_vec(),
        }));

        let mut result = ScanResult::default();

        for path in paths {
            match self.scan_path(path, events) {
                Ok((photos, errors)) => {
                    result.photos.extend(photos);
                    result.errors.extend(errors);
                }
                Err(e) => {
                    events.send(Event::Scan(ScanEvent::Error {
                        path: path.clone(),
                        message: e.to_string(),
                    }));
                    result.errors.push(e);
                }
            }
        }

        result.photos.sort_by(|a, b| a.path.cmp(&b.path));

        events.send(Event::Scan(ScanEvent::Completed {
            total_photos: result.photos.len(),
        }));

        Ok(result)
    }
}
