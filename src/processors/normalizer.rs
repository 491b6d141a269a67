// webfit/src/processors/normalizer.rs
use crate::core::ResizeAlgorithm;
use crate::processors::SourceImage;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, GenericImageView};

/// Turns a freshly decoded image into the canonical form every encode
/// attempt reads from: upright, 8-bit RGB or grayscale, no wider than the
/// configured maximum.
pub struct Normalizer {
    algorithm: ResizeAlgorithm,
}

impl Normalizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn prepare(&self, source: SourceImage, max_width: u32) -> DynamicImage {
        let SourceImage {
            mut image,
            orientation,
        } = source;

        if orientation != Orientation::NoTransforms {
            log::debug!("Applying orientation {:?}", orientation);
            image.apply_orientation(orientation);
        }

        let image = to_encodable_color(image);
        self.limit_width(image, max_width)
    }

    fn limit_width(&self, image: DynamicImage, max_width: u32) -> DynamicImage {
        let (width, height) = image.dimensions();
        if width <= max_width {
            return image;
        }

        let new_height = scaled_height(width, height, max_width);

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            width,
            height,
            max_width,
            new_height
        );

        image.resize_exact(max_width, new_height, self.filter_type())
    }

    fn filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::Lanczos3)
    }
}

/// Height after scaling `width` down to `max_width`, rounded to the nearest
/// pixel and never zero.
pub fn scaled_height(width: u32, height: u32, max_width: u32) -> u32 {
    let ratio = max_width as f64 / width as f64;
    ((height as f64 * ratio).round() as u32).max(1)
}

fn to_encodable_color(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => image,
        other => {
            log::debug!("Converting {:?} to RGB8", other.color());
            DynamicImage::ImageRgb8(other.into_rgb8())
        }
    }
}
