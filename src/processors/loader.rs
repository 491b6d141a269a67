// webfit/src/processors/loader.rs
use crate::core::{ConvertError, Result};
use crate::processors::MetadataProcessor;
use image::metadata::Orientation;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// A decoded raster plus the orientation its pixels still need.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub image: DynamicImage,
    pub orientation: Orientation,
}

impl From<DynamicImage> for SourceImage {
    fn from(image: DynamicImage) -> Self {
        Self {
            image,
            orientation: Orientation::NoTransforms,
        }
    }
}

#[derive(Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((100_000, 100_000)),
        }
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Some((width, height));
        self
    }

    pub fn load(&self, path: &Path) -> Result<SourceImage> {
        log::debug!("Loading image from: {}", path.display());

        let data = std::fs::read(path)?;
        if data.is_empty() {
            return Err(ConvertError::Decode(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        self.load_from_bytes(&data)
            .map_err(|e| match e {
                ConvertError::Decode(msg) => {
                    ConvertError::Decode(format!("{}: {}", path.display(), msg))
                }
                other => other,
            })
    }

    pub fn load_from_bytes(&self, data: &[u8]) -> Result<SourceImage> {
        let image = ImageReader::new(Cursor::new(data))
            .with_guessed_format()?
            .decode()
            .map_err(|e| ConvertError::Decode(format!("Failed to decode image: {}", e)))?;

        let (width, height) = image.dimensions();
        if let Some((max_w, max_h)) = self.max_dimensions {
            if width > max_w || height > max_h {
                return Err(ConvertError::MemoryLimitExceeded(format!(
                    "Image dimensions {}x{} exceed maximum {}x{}",
                    width, height, max_w, max_h
                )));
            }
        }

        let orientation = MetadataProcessor::new().orientation(data);

        log::debug!(
            "Loaded image: {}x{} pixels, color: {:?}, orientation: {:?}",
            width,
            height,
            image.color(),
            orientation
        );

        Ok(SourceImage { image, orientation })
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
