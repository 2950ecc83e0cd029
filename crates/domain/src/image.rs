use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Unsupported,
}

impl ImageKind {
    pub fn is_supported(self) -> bool {
        self != Self::Unsupported
    }
}

/// `rgba` holds tightly packed RGBA8 rows, `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub file_name: String,
    pub named_from_capture_time: bool,
    pub exif_preserved: bool,
}

pub fn detect_image_kind(path: &Path) -> ImageKind {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return ImageKind::Unsupported;
    };

    match ext.to_ascii_lowercase().as_str() {
        "png" => ImageKind::Png,
        "jpg" | "jpeg" => ImageKind::Jpeg,
        "gif" => ImageKind::Gif,
        _ => ImageKind::Unsupported,
    }
}
