//! Precompressed and alternate-format payloads.
//!
//! Only produced outside development mode. Neither payload takes part in the
//! fingerprint.

use std::io::{self, Write};

use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageFormat};

/// Brotli quality and window size (maximum compression).
const BROTLI_QUALITY: u32 = 11;
const BROTLI_LGWIN: u32 = 22;
const BROTLI_BUFFER: usize = 4096;

/// Compress bytes with brotli.
pub fn compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut writer = brotli::CompressorWriter::new(
        Vec::with_capacity(data.len() / 2),
        BROTLI_BUFFER,
        BROTLI_QUALITY,
        BROTLI_LGWIN,
    );
    writer.write_all(data)?;
    writer.flush()?;
    Ok(writer.into_inner())
}

/// Decode a PNG and re-encode it as lossless WebP.
pub fn png_to_webp(png: &[u8]) -> image::ImageResult<Vec<u8>> {
    let img = image::load_from_memory_with_format(png, ImageFormat::Png)?;
    let mut out = Vec::new();
    let encoder = WebPEncoder::new_lossless(&mut out);

    if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        encoder.encode(rgba.as_raw(), rgba.width(), rgba.height(), ExtendedColorType::Rgba8)?;
    } else {
        let rgb = img.to_rgb8();
        encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
    }

    Ok(out)
}
