mod cli;
mod core;
mod processors;
mod utils;

pub use cli::{Algorithm, Cli};
pub use crate::core::processor::{FileOutcome, ImageProcessor};
pub use crate::core::{
    ConvertConfig, ConvertError, EncodeResult, ProcessingStats, ResizeAlgorithm, Result,
};
pub use processors::{
    scaled_height, BatchProcessor, Loader, MetadataProcessor, Normalizer, QualityEncoder,
    QualitySearch, SearchOutcome, SourceImage, TargetSizeEncoder, WebpEncoder,
};
pub use utils::{format_file_size, is_jpeg, webp_output_path};

pub mod prelude {
    pub use crate::{
        BatchProcessor, ConvertConfig, ImageProcessor, Normalizer, QualityEncoder,
        QualitySearch, TargetSizeEncoder, WebpEncoder,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
