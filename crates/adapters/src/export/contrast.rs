use image::RgbImage;

pub fn autocontrast(image: &mut RgbImage) {
    let mut low = [u8::MAX; 3];
    let mut high = [u8::MIN; 3];
    for pixel in image.pixels() {
        for channel in 0..3 {
            low[channel] = low[channel].min(pixel[channel]);
            high[channel] = high[channel].max(pixel[channel]);
        }
    }

    let tables: [Option<[u8; 256]>; 3] =
        std::array::from_fn(|channel| stretch_table(low[channel], high[channel]));
    if tables.iter().all(Option::is_none) {
        return;
    }

    for pixel in image.pixels_mut() {
        for (channel, table) in tables.iter().enumerate() {
            if let Some(table) = table {
                pixel[channel] = table[usize::from(pixel[channel])];
            }
        }
    }
}

fn stretch_table(low: u8, high: u8) -> Option<[u8; 256]> {
    if high <= low {
        return None;
    }
    let (low, high) = (u32::from(low), u32::from(high));
    Some(std::array::from_fn(|value| {
        let value = (value as u32).clamp(low, high);
        ((value - low) * 255 / (high - low)) as u8
    }))
}
