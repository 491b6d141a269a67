// webfit/src/processors/encoder.rs
use crate::core::{ConvertError, Result, MAX_EFFORT, MAX_QUALITY_SCALE};
use image::{DynamicImage, RgbImage};
use std::borrow::Cow;
use webp::{Encoder, WebPConfig};

/// The encode primitive the quality search drives: one image, one quality,
/// one encoded buffer. Implementations must not touch the filesystem.
pub trait QualityEncoder {
    fn encode(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>>;
}

/// Lossy WebP via libwebp. Output carries no EXIF or ICC chunks.
#[derive(Debug, Clone, Copy)]
pub struct WebpEncoder {
    effort: u8,
}

impl WebpEncoder {
    pub fn new(effort: u8) -> Self {
        Self {
            effort: effort.min(MAX_EFFORT),
        }
    }

    pub fn effort(&self) -> u8 {
        self.effort
    }
}

impl Default for WebpEncoder {
    fn default() -> Self {
        Self::new(MAX_EFFORT)
    }
}

impl QualityEncoder for WebpEncoder {
    fn encode(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
        // libwebp has no grayscale input; luma is widened here, per attempt,
        // so the normalized image keeps its own color mode.
        let rgb: Cow<'_, RgbImage> = match image {
            DynamicImage::ImageRgb8(buffer) => Cow::Borrowed(buffer),
            other => Cow::Owned(other.to_rgb8()),
        };

        let mut config = WebPConfig::new()
            .map_err(|_| ConvertError::Encode("Failed to initialise WebP config".to_string()))?;
        config.lossless = 0;
        config.quality = f32::from(quality.min(MAX_QUALITY_SCALE));
        config.method = i32::from(self.effort);

        let memory = Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height())
            .encode_advanced(&config)
            .map_err(|e| {
                ConvertError::Encode(format!("WebP encoding at quality {} failed: {:?}", quality, e))
            })?;

        log::trace!("Encoded WebP at quality {}: {} bytes", quality, memory.len());

        Ok(memory.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb};

    fn noisy(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            let v = x.wrapping_mul(2654435761).wrapping_add(y.wrapping_mul(40503));
            Rgb([(v >> 3) as u8, (v >> 11) as u8, (v >> 19) as u8])
        }))
    }

    #[test]
    fn test_output_is_webp() {
        let bytes = WebpEncoder::new(4).encode(&noisy(32, 24), 75).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 24));
    }

    #[test]
    fn test_grayscale_input_encodes() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_fn(16, 16, |x, y| {
            Luma([((x * 16) ^ (y * 16)) as u8])
        }));
        let bytes = WebpEncoder::default().encode(&gray, 60).unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_lower_quality_is_smaller_on_noise() {
        let image = noisy(96, 96);
        let encoder = WebpEncoder::new(4);

        let high = encoder.encode(&image, 95).unwrap();
        let low = encoder.encode(&image, 5).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_effort_clamped() {
        assert_eq!(WebpEncoder::new(9).effort(), 6);
    }
}
