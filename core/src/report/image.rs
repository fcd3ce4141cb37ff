//! Chart image decoding for PDF embedding.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid PNG: {0}")]
    Png(#[from] png::DecodingError),
    #[error("unsupported PNG color type {0:?}")]
    Unsupported(png::ColorType),
}

/// 8-bit RGB pixels with an optional separate alpha plane.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl DecodedImage {
    /// Height per unit of width.
    pub fn aspect(&self) -> f32 {
        if self.width == 0 {
            1.0
        } else {
            self.height as f32 / self.width as f32
        }
    }
}

/// Decode a base64 PNG, with or without a `data:` URL prefix.
pub fn decode_png_base64(encoded: &str) -> Result<DecodedImage, ImageError> {
    let payload = encoded
        .split_once(";base64,")
        .map_or(encoded, |(_, data)| data)
        .trim();
    let bytes = STANDARD.decode(payload)?;
    decode_png(&bytes)
}

pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, ImageError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let pixels = (info.width as usize) * (info.height as usize);
    let (rgb, alpha) = match info.color_type {
        png::ColorType::Rgb => (buf, None),
        png::ColorType::Rgba => {
            let mut rgb = Vec::with_capacity(pixels * 3);
            let mut alpha = Vec::with_capacity(pixels);
            for px in buf.chunks_exact(4) {
                rgb.extend_from_slice(&px[..3]);
                alpha.push(px[3]);
            }
            (rgb, Some(alpha))
        }
        png::ColorType::Grayscale => (buf.iter().flat_map(|&g| [g, g, g]).collect(), None),
        png::ColorType::GrayscaleAlpha => {
            let mut rgb = Vec::with_capacity(pixels * 3);
            let mut alpha = Vec::with_capacity(pixels);
            for px in buf.chunks_exact(2) {
                rgb.extend_from_slice(&[px[0], px[0], px[0]]);
                alpha.push(px[1]);
            }
            (rgb, Some(alpha))
        }
        other => return Err(ImageError::Unsupported(other)),
    };

    Ok(DecodedImage {
        width: info.width,
        height: info.height,
        rgb,
        alpha,
    })
}

/// Encode an RGBA PNG as base64, for tests elsewhere in the crate.
#[cfg(test)]
pub(crate) fn test_png_base64(width: u32, height: u32) -> String {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        let data: Vec<u8> = (0..width * height)
            .flat_map(|i| [(i % 256) as u8, 40, 200, 128])
            .collect();
        writer.write_image_data(&data).unwrap();
    }
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_rgba_into_rgb_and_alpha() {
        let image = decode_png_base64(&test_png_base64(4, 2)).unwrap();
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(image.rgb.len(), 4 * 2 * 3);
        assert_eq!(image.alpha.as_ref().map(Vec::len), Some(8));
        assert_eq!(&image.rgb[3..6], &[1, 40, 200]);
        assert!((image.aspect() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn accepts_data_url_prefix() {
        let url = format!("data:image/png;base64,{}", test_png_base64(1, 1));
        assert!(decode_png_base64(&url).is_ok());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            decode_png_base64("%%%"),
            Err(ImageError::Base64(_))
        ));
        let not_png = STANDARD.encode(b"hello");
        assert!(matches!(decode_png_base64(&not_png), Err(ImageError::Png(_))));
    }
}
