use std::path::{Path, PathBuf};

use sift_domain::{RenderedImage, Rotation};

use crate::ApplicationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileScanSummary {
    pub scanned_files: usize,
    pub files: Vec<PathBuf>,
}

pub trait FileScanner {
    fn scan_images(&self, folder: &Path) -> Result<FileScanSummary, ApplicationError>;
}

/// EXIF probes. A missing tag and an unreadable file look the same here:
/// both are `None`.
pub trait MetadataReader {
    fn try_read_orientation(&self, path: &Path) -> Option<u16>;

    fn try_read_capture_time(&self, path: &Path) -> Option<String>;
}

pub trait ImageRenderer {
    fn render(
        &self,
        path: &Path,
        rotation: Rotation,
        display_height: u32,
    ) -> Result<RenderedImage, ApplicationError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportArtifact {
    pub exif_preserved: bool,
}

pub trait ImageExporter {
    fn export(&self, source: &Path, destination: &Path) -> Result<ExportArtifact, ApplicationError>;
}
