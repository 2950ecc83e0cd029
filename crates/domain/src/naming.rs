pub const FALLBACK_EXPORT_NAME: &str = "unnamed.jpg";

pub fn export_file_name(capture_time: Option<&str>) -> String {
    let Some(stamp) = capture_time
        .map(|raw| raw.trim_matches(|c: char| c == '\0' || c.is_whitespace()))
        .filter(|stamp| !stamp.is_empty())
    else {
        return FALLBACK_EXPORT_NAME.to_string();
    };

    let stem: String = stamp
        .chars()
        .map(|c| match c {
            ':' | ' ' | '/' | '\\' => '-',
            other => other,
        })
        .collect();
    format!("{stem}.jpg")
}
