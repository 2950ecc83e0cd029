//! Fixture writers for adapter tests: small images with hand-built EXIF.

use std::fs;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageBuffer, Rgb, RgbImage};

use crate::export::insert_segment;

const TAG_ORIENTATION: u16 = 0x0112;
const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TYPE_ASCII: u16 = 2;
const TYPE_SHORT: u16 = 3;
const TYPE_LONG: u16 = 4;

fn gradient(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(40 + x * 3) as u8, (60 + y * 3) as u8, 120])
    })
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    gradient(width, height).save(path).expect("png should be saved");
}

pub fn write_jpeg_with_exif(
    path: &Path,
    width: u32,
    height: u32,
    orientation: Option<u16>,
    capture_time: Option<&str>,
) {
    let pixels = gradient(width, height);
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, 95)
        .encode(pixels.as_raw(), width, height, ExtendedColorType::Rgb8)
        .expect("jpeg should encode");

    let bytes = if orientation.is_some() || capture_time.is_some() {
        insert_segment(&encoded, &exif_segment(orientation, capture_time)).expect("jpeg stream")
    } else {
        encoded
    };
    fs::write(path, bytes).expect("jpeg should be written");
}

fn push_entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value.to_le_bytes());
}

/// Little-endian TIFF with IFD0 (orientation, Exif pointer) and an Exif IFD
/// holding `DateTimeOriginal`.
fn exif_segment(orientation: Option<u16>, capture_time: Option<&str>) -> Vec<u8> {
    let ifd0_entries = usize::from(orientation.is_some()) + usize::from(capture_time.is_some());
    let ifd0_len = 2 + 12 * ifd0_entries + 4;
    let exif_ifd_offset = (8 + ifd0_len) as u32;
    let exif_ifd_len = 2 + 12 + 4;
    let text_offset = exif_ifd_offset + exif_ifd_len as u32;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42_u16.to_le_bytes());
    tiff.extend_from_slice(&8_u32.to_le_bytes());

    tiff.extend_from_slice(&(ifd0_entries as u16).to_le_bytes());
    if let Some(value) = orientation {
        push_entry(&mut tiff, TAG_ORIENTATION, TYPE_SHORT, 1, u32::from(value));
    }
    if capture_time.is_some() {
        push_entry(&mut tiff, TAG_EXIF_IFD, TYPE_LONG, 1, exif_ifd_offset);
    }
    tiff.extend_from_slice(&0_u32.to_le_bytes());

    if let Some(stamp) = capture_time {
        let mut text = stamp.as_bytes().to_vec();
        text.push(0);
        tiff.extend_from_slice(&1_u16.to_le_bytes());
        push_entry(
            &mut tiff,
            TAG_DATE_TIME_ORIGINAL,
            TYPE_ASCII,
            text.len() as u32,
            text_offset,
        );
        tiff.extend_from_slice(&0_u32.to_le_bytes());
        tiff.extend_from_slice(&text);
    }

    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);
    segment
}
