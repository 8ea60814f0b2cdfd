//! # Pixel exporter
//!
//! Converts an encoded image into a raw pixel buffer.
//!
//! The buffer contains one 4-byte record (red, green, blue, alpha) per pixel in row-major order.
//! It carries no header; consumers must know the width and height of the source image.
//! Source images without an alpha channel are exported fully opaque.

use crate::error::Error;
use crate::util::fs;
use std::path::Path;

/// The number of bytes per exported pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A decoded image in RGBA8 layout.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PixelBuffer {
    /// The width of the image in pixels.
    pub width: u32,
    /// The height of the image in pixels.
    pub height: u32,
    /// The RGBA8 pixel records in row-major order.
    ///
    /// The length is always `width * height * 4`.
    pub data: Vec<u8>,
}

/// Decodes an encoded image into an RGBA8 pixel buffer.
///
/// Any color type supported by the decoder is converted; 16-bit channels are reduced to 8 bits.
pub fn decode(encoded: &[u8]) -> Result<PixelBuffer, image::ImageError> {
    let image = image::load_from_memory(encoded)?;
    log::debug!(
        "decoded {}x{} image with color type {:?}",
        image.width(),
        image.height(),
        image.color()
    );

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let data = rgba.into_raw();

    debug_assert_eq!(data.len(), width as usize * height as usize * BYTES_PER_PIXEL);

    Ok(PixelBuffer {
        width,
        height,
        data,
    })
}

/// Exports the image at `image_path` as a raw RGBA8 buffer to `rgba_path`.
///
/// `rgba_path` is created or replaced; it is left untouched if reading or decoding fails.
pub fn export(image_path: &Path, rgba_path: &Path) -> Result<PixelBuffer, Error> {
    log::info!("Export Pixels of {}", image_path.display());

    let encoded = fs::read(image_path)?;
    let buffer = decode(&encoded).map_err(|source| Error::Image {
        path: image_path.to_path_buf(),
        source,
    })?;

    fs::write_atomic(rgba_path, &buffer.data)?;

    log::info!(
        "wrote {}x{} pixels ({} bytes) to {}",
        buffer.width,
        buffer.height,
        buffer.data.len(),
        rgba_path.display()
    );

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        image.write_to(&mut cursor, ImageFormat::Png).unwrap();
        cursor.into_inner()
    }

    fn encode_indexed_png(width: u32, height: u32, palette: &[u8], trns: Option<&[u8]>, indices: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(palette.to_vec());
            if let Some(trns) = trns {
                encoder.set_trns(trns.to_vec());
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(indices).unwrap();
        }
        out
    }

    #[test]
    fn test_decode_length_matches_dimensions() {
        for &(width, height) in &[(1, 1), (3, 2), (17, 5), (64, 1)] {
            let image = DynamicImage::ImageRgba8(image::RgbaImage::new(width, height));
            let buffer = decode(&encode_png(image)).unwrap();
            assert_eq!(buffer.width, width);
            assert_eq!(buffer.height, height);
            assert_eq!(buffer.data.len(), (4 * width * height) as usize);
        }
    }

    #[test]
    fn test_decode_grayscale_is_opaque() {
        let gray = image::GrayImage::from_fn(2, 2, |x, y| image::Luma([(10 * (x + 2 * y)) as u8]));
        let buffer = decode(&encode_png(DynamicImage::ImageLuma8(gray))).unwrap();
        assert_eq!(
            buffer.data,
            vec![0, 0, 0, 255, 10, 10, 10, 255, 20, 20, 20, 255, 30, 30, 30, 255]
        );
    }

    #[test]
    fn test_decode_grayscale_alpha() {
        let gray = image::GrayAlphaImage::from_pixel(1, 1, image::LumaA([7, 99]));
        let buffer = decode(&encode_png(DynamicImage::ImageLumaA8(gray))).unwrap();
        assert_eq!(buffer.data, vec![7, 7, 7, 99]);
    }

    #[test]
    fn test_decode_rgb_is_opaque() {
        let rgb = image::RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                image::Rgb([1, 2, 3])
            } else {
                image::Rgb([4, 5, 6])
            }
        });
        let buffer = decode(&encode_png(DynamicImage::ImageRgb8(rgb))).unwrap();
        assert_eq!(buffer.data, vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_decode_rgba_is_verbatim() {
        let rgba = image::RgbaImage::from_pixel(1, 2, image::Rgba([9, 8, 7, 6]));
        let buffer = decode(&encode_png(DynamicImage::ImageRgba8(rgba))).unwrap();
        assert_eq!(buffer.data, vec![9, 8, 7, 6, 9, 8, 7, 6]);
    }

    #[test]
    fn test_decode_rgb16_is_reduced() {
        let rgb = image::ImageBuffer::<image::Rgb<u16>, _>::from_pixel(1, 1, image::Rgb([0xFFFF, 0, 0x8080]));
        let buffer = decode(&encode_png(DynamicImage::ImageRgb16(rgb))).unwrap();
        assert_eq!(buffer.data, vec![255, 0, 128, 255]);
    }

    #[test]
    fn test_decode_indexed() {
        let palette = [255, 0, 0, 0, 0, 255];
        let encoded = encode_indexed_png(2, 1, &palette, None, &[1, 0]);
        let buffer = decode(&encoded).unwrap();
        assert_eq!(buffer.data, vec![0, 0, 255, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_indexed_with_transparency() {
        let palette = [255, 0, 0, 0, 0, 255];
        let encoded = encode_indexed_png(2, 1, &palette, Some(&[0]), &[0, 1]);
        let buffer = decode(&encoded).unwrap();
        assert_eq!(buffer.data, vec![255, 0, 0, 0, 0, 0, 255, 255]);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode(b"definitely not a png").is_err());
    }

    #[test]
    fn test_export_writes_raw_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("spaces.png");
        let rgba_path = dir.path().join("spaces.rgba");
        let rgb = image::RgbImage::from_pixel(3, 4, image::Rgb([10, 20, 30]));
        std::fs::write(&image_path, encode_png(DynamicImage::ImageRgb8(rgb))).unwrap();

        let buffer = export(&image_path, &rgba_path).unwrap();

        let written = std::fs::read(&rgba_path).unwrap();
        assert_eq!(written.len(), 3 * 4 * BYTES_PER_PIXEL);
        assert_eq!(written, buffer.data);
        assert_eq!(&written[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_export_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let rgba_path = dir.path().join("spaces.rgba");

        let result = export(&dir.path().join("missing.png"), &rgba_path);

        assert!(matches!(result, Err(Error::Io { .. })));
        assert!(!rgba_path.exists());
    }

    #[test]
    fn test_export_corrupt_input_keeps_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("spaces.png");
        let rgba_path = dir.path().join("spaces.rgba");
        std::fs::write(&image_path, b"\x89PNG\r\n\x1a\ntruncated").unwrap();
        std::fs::write(&rgba_path, b"previous").unwrap();

        let result = export(&image_path, &rgba_path);

        assert!(matches!(result, Err(Error::Image { .. })));
        assert_eq!(std::fs::read(&rgba_path).unwrap(), b"previous");
    }
}
