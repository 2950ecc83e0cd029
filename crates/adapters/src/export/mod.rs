mod contrast;
mod segments;

use std::fs;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use log::{debug, warn};
use sift_application::{ApplicationError, ExportArtifact, ImageExporter};

pub use contrast::autocontrast;
pub use segments::{extract_exif_segment, insert_segment};

pub const DEFAULT_JPEG_QUALITY: u8 = 75;

#[derive(Debug, Clone)]
pub struct FileImageExporter {
    quality: u8,
}

impl FileImageExporter {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl Default for FileImageExporter {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl ImageExporter for FileImageExporter {
    fn export(&self, source: &Path, destination: &Path) -> Result<ExportArtifact, ApplicationError> {
        if is_same_file(source, destination) {
            return Err(ApplicationError::InvalidInput(format!(
                "{} would be exported onto itself",
                source.display()
            )));
        }

        fs::copy(source, destination).map_err(|error| {
            ApplicationError::Io(format!(
                "copy {} -> {}: {error}",
                source.display(),
                destination.display()
            ))
        })?;

        let original = fs::read(destination)
            .map_err(|error| ApplicationError::Io(format!("{}: {error}", destination.display())))?;
        let mut pixels = image::load_from_memory(&original)
            .map_err(|error| ApplicationError::Decode(format!("{}: {error}", destination.display())))?
            .to_rgb8();
        autocontrast(&mut pixels);

        let mut encoded = Vec::new();
        JpegEncoder::new_with_quality(&mut encoded, self.quality)
            .encode(
                pixels.as_raw(),
                pixels.width(),
                pixels.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|error| ApplicationError::Encode(format!("{}: {error}", destination.display())))?;

        let (bytes, exif_preserved) = match extract_exif_segment(&original) {
            Some(exif) => match insert_segment(&encoded, exif) {
                Some(merged) => (merged, true),
                None => {
                    warn!("encoder output is not a JPEG stream, dropping exif");
                    (encoded, false)
                }
            },
            None => {
                debug!("{} carries no exif block", source.display());
                (encoded, false)
            }
        };

        fs::write(destination, bytes)
            .map_err(|error| ApplicationError::Io(format!("{}: {error}", destination.display())))?;

        Ok(ExportArtifact { exif_preserved })
    }
}

fn is_same_file(source: &Path, destination: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(destination)) {
        (Ok(source), Ok(destination)) => source == destination,
        _ => false,
    }
}
