//! Just enough JPEG marker walking to move an EXIF `APP1` segment from one
//! file to another.

const SOI: [u8; 2] = [0xFF, 0xD8];
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;
const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// Returns the complete EXIF `APP1` segment (marker and length included) of
/// a JPEG stream, if it has one before the image data.
pub fn extract_exif_segment(jpeg: &[u8]) -> Option<&[u8]> {
    if !jpeg.starts_with(&SOI) {
        return None;
    }

    let mut pos = SOI.len();
    while pos + 4 <= jpeg.len() {
        if jpeg[pos] != 0xFF {
            return None;
        }
        let marker = jpeg[pos + 1];
        match marker {
            0xFF => {
                pos += 1;
                continue;
            }
            SOS | EOI => return None,
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            _ => {}
        }

        let length = usize::from(u16::from_be_bytes([jpeg[pos + 2], jpeg[pos + 3]]));
        if length < 2 {
            return None;
        }
        let end = pos + 2 + length;
        if end > jpeg.len() {
            return None;
        }
        if marker == APP1 && jpeg[pos + 4..end].starts_with(EXIF_HEADER) {
            return Some(&jpeg[pos..end]);
        }
        pos = end;
    }
    None
}

pub fn insert_segment(jpeg: &[u8], segment: &[u8]) -> Option<Vec<u8>> {
    if !jpeg.starts_with(&SOI) {
        return None;
    }

    let mut at = SOI.len();
    if jpeg.len() >= at + 4 && jpeg[at] == 0xFF && jpeg[at + 1] == APP0 {
        let length = usize::from(u16::from_be_bytes([jpeg[at + 2], jpeg[at + 3]]));
        if at + 2 + length <= jpeg.len() {
            at += 2 + length;
        }
    }

    let mut out = Vec::with_capacity(jpeg.len() + segment.len());
    out.extend_from_slice(&jpeg[..at]);
    out.extend_from_slice(segment);
    out.extend_from_slice(&jpeg[at..]);
    Some(out)
}
