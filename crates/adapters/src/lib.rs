pub mod export;
pub mod fs;
pub mod metadata;
pub mod presenters;
pub mod render;

#[cfg(test)]
mod test_support;

pub use export::FileImageExporter;
pub use fs::WalkdirFileScanner;
pub use metadata::RexifMetadataReader;
pub use presenters::{present_export, present_image_row};
pub use render::ImageCrateRenderer;

use sift_application::ViewerSession;

pub fn build_viewer_session(jpeg_quality: u8) -> ViewerSession {
    ViewerSession::new(
        Box::new(WalkdirFileScanner),
        Box::new(RexifMetadataReader),
        Box::new(ImageCrateRenderer),
        Box::new(FileImageExporter::new(jpeg_quality)),
    )
}
