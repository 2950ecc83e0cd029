mod display;
mod error;
mod image;
mod naming;
mod navigation;
mod orientation;
mod title;

pub use display::{display_budget, fit_to_height, DEFAULT_DISPLAY_MARGIN};
pub use error::DomainError;
pub use image::{detect_image_kind, ExportReport, ImageKind, RenderedImage};
pub use naming::{export_file_name, FALLBACK_EXPORT_NAME};
pub use navigation::step_cursor;
pub use orientation::Rotation;
pub use title::{window_title, DEFAULT_TITLE};
