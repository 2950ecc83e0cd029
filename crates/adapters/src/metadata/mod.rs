use std::fs;
use std::path::Path;

use log::debug;
use rexif::{ExifData, ExifTag, TagValue};
use sift_application::MetadataReader;

#[derive(Debug, Default)]
pub struct RexifMetadataReader;

impl MetadataReader for RexifMetadataReader {
    fn try_read_orientation(&self, path: &Path) -> Option<u16> {
        let exif = parse_exif_quiet(path)?;
        exif.entries
            .iter()
            .find(|entry| entry.tag == ExifTag::Orientation)
            .and_then(|entry| orientation_from_tag_value(&entry.value))
    }

    fn try_read_capture_time(&self, path: &Path) -> Option<String> {
        let exif = parse_exif_quiet(path)?;
        exif.entries
            .iter()
            .find(|entry| entry.tag == ExifTag::DateTimeOriginal)
            .and_then(|entry| match &entry.value {
                TagValue::Ascii(text) => {
                    let text = text.trim_end_matches('\0').trim();
                    (!text.is_empty()).then(|| text.to_string())
                }
                _ => None,
            })
    }
}

fn parse_exif_quiet(path: &Path) -> Option<ExifData> {
    let data = fs::read(path).ok()?;
    match rexif::parse_buffer_quiet(&data).0 {
        Ok(exif) => Some(exif),
        Err(error) => {
            debug!("no exif in {}: {error}", path.display());
            None
        }
    }
}

fn orientation_from_tag_value(value: &TagValue) -> Option<u16> {
    match value {
        TagValue::U16(vals) => vals.first().copied(),
        TagValue::U8(vals) => vals.first().map(|&v| u16::from(v)),
        TagValue::U32(vals) => vals.first().and_then(|&v| u16::try_from(v).ok()),
        TagValue::I16(vals) => vals.first().and_then(|&v| u16::try_from(v).ok()),
        TagValue::I32(vals) => vals.first().and_then(|&v| u16::try_from(v).ok()),
        _ => None,
    }
}
