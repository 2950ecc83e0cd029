use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use log::debug;
use sift_application::{ApplicationError, ImageRenderer};
use sift_domain::{fit_to_height, RenderedImage, Rotation};

#[derive(Debug, Default)]
pub struct ImageCrateRenderer;

impl ImageRenderer for ImageCrateRenderer {
    fn render(
        &self,
        path: &Path,
        rotation: Rotation,
        display_height: u32,
    ) -> Result<RenderedImage, ApplicationError> {
        let decoded = decode(path)?;
        let oriented = apply_rotation(decoded, rotation);

        let (width, height) = fit_to_height(oriented.width(), oriented.height(), display_height)?;
        let scaled = if (width, height) == (oriented.width(), oriented.height()) {
            oriented
        } else {
            oriented.resize_exact(width, height, FilterType::Lanczos3)
        };
        debug!(
            "rendered {} at {}x{}",
            path.display(),
            scaled.width(),
            scaled.height()
        );

        Ok(RenderedImage {
            path: path.to_path_buf(),
            width,
            height,
            rgba: scaled.to_rgba8().into_raw(),
        })
    }
}

pub(crate) fn decode(path: &Path) -> Result<DynamicImage, ApplicationError> {
    ImageReader::open(path)
        .map_err(|error| ApplicationError::Io(format!("{}: {error}", path.display())))?
        .with_guessed_format()
        .map_err(|error| ApplicationError::Io(format!("{}: {error}", path.display())))?
        .decode()
        .map_err(|error| ApplicationError::Decode(format!("{}: {error}", path.display())))
}

/// `image` rotates clockwise, [`Rotation`] is counter-clockwise.
fn apply_rotation(image: DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::None => image,
        Rotation::Ccw90 => image.rotate270(),
        Rotation::Ccw180 => image.rotate180(),
        Rotation::Ccw270 => image.rotate90(),
    }
}
