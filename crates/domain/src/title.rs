use std::path::Path;

pub const DEFAULT_TITLE: &str = "Image Viewer";

pub fn window_title(path: &Path, index: usize, total: usize) -> String {
    if total == 0 {
        return DEFAULT_TITLE.to_string();
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let position = index + 1;
    let percent = position as f64 / total as f64 * 100.0;
    format!("{DEFAULT_TITLE} - {name} - {position} of {total} ({percent:.2}%)")
}
