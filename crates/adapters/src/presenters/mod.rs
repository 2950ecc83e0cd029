use std::path::Path;

use sift_domain::ExportReport;

pub fn present_image_row(index: usize, total: usize, path: &Path) -> String {
    format!("{}/{}\t{}", index + 1, total, path.display())
}

pub fn present_export(report: &ExportReport) -> String {
    let exif = if report.exif_preserved {
        "exif kept"
    } else {
        "no exif"
    };
    format!(
        "exported {} as {} ({exif})",
        file_label(&report.source),
        report.file_name
    )
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
