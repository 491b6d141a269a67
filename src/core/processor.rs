// webfit/src/core/processor.rs
use super::{ConvertConfig, EncodeResult, Result};
use crate::processors::{
    Loader, Normalizer, QualityEncoder, QualitySearch, TargetSizeEncoder, WebpEncoder,
};
use std::path::Path;

/// What happened to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub original_size: u64,
    pub width: u32,
    pub height: u32,
    pub result: EncodeResult,
}

/// Per-file pipeline: decode, normalize, search, write.
pub struct ImageProcessor<E: QualityEncoder = WebpEncoder> {
    config: ConvertConfig,
    loader: Loader,
    normalizer: Normalizer,
    encoder: TargetSizeEncoder<E>,
}

impl ImageProcessor<WebpEncoder> {
    pub fn new(config: ConvertConfig) -> Result<Self> {
        let encoder = WebpEncoder::new(config.effort);
        Self::with_encoder(config, encoder)
    }
}

impl<E: QualityEncoder> ImageProcessor<E> {
    pub fn with_encoder(config: ConvertConfig, encoder: E) -> Result<Self> {
        config.validate()?;
        let search = QualitySearch::new(config.min_quality, config.max_quality)?;

        Ok(Self {
            loader: Loader::new(),
            normalizer: Normalizer::new(config.algorithm),
            encoder: TargetSizeEncoder::new(encoder, search),
            config,
        })
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<FileOutcome> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        let original_size = std::fs::metadata(input_path)?.len();
        let source = self.loader.load(input_path)?;
        let image = self.normalizer.prepare(source, self.config.max_width);

        let result =
            self.encoder
                .search_and_save(&image, self.config.target_bytes(), output_path)?;

        Ok(FileOutcome {
            original_size,
            width: image.width(),
            height: image.height(),
            result,
        })
    }
}
