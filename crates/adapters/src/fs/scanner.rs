use std::fs;
use std::path::Path;

use log::{debug, warn};
use sift_application::{ApplicationError, FileScanSummary, FileScanner};
use sift_domain::detect_image_kind;
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct WalkdirFileScanner;

impl FileScanner for WalkdirFileScanner {
    fn scan_images(&self, folder: &Path) -> Result<FileScanSummary, ApplicationError> {
        if !folder.is_dir() {
            return Err(ApplicationError::InvalidInput(format!(
                "folder does not exist or is not a directory: {}",
                folder.display()
            )));
        }

        fs::read_dir(folder).map_err(|error| {
            ApplicationError::Io(format!("cannot read {}: {error}", folder.display()))
        })?;

        let mut summary = FileScanSummary::default();

        let entries = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    warn!("skipping unreadable entry: {error}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            summary.scanned_files += 1;
            if !detect_image_kind(entry.path()).is_supported() {
                debug!("skipping unsupported file {}", entry.path().display());
                continue;
            }
            summary.files.push(entry.into_path());
        }

        Ok(summary)
    }
}
