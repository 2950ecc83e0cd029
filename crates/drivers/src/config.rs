use eframe::egui::Key;
use sift_adapters::export::DEFAULT_JPEG_QUALITY;
use sift_domain::{DEFAULT_DISPLAY_MARGIN, DEFAULT_TITLE};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window_title: String,
    pub initial_window_size: [f32; 2],
    /// Subtracted from the monitor height to leave room for decorations.
    pub display_margin: u32,
    /// Used until the monitor size is known.
    pub fallback_screen_height: f32,
    pub export_quality: u8,
    pub export_key: Key,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: DEFAULT_TITLE.to_string(),
            initial_window_size: [1280.0, 900.0],
            display_margin: DEFAULT_DISPLAY_MARGIN,
            fallback_screen_height: 1080.0,
            export_quality: DEFAULT_JPEG_QUALITY,
            export_key: Key::Z,
        }
    }
}
