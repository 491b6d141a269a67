// webfit/src/core/mod.rs
pub mod processor;

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SOURCE_DIR: &str = "inputs";
pub const DEFAULT_DEST_DIR: &str = "outputs";
pub const DEFAULT_MAX_WIDTH: u32 = 1600;
pub const DEFAULT_TARGET_KB: u64 = 280;
pub const DEFAULT_MIN_QUALITY: u8 = 45;
pub const DEFAULT_MAX_QUALITY: u8 = 85;
pub const DEFAULT_EFFORT: u8 = 6;

/// Highest quality the WebP encoder accepts.
pub const MAX_QUALITY_SCALE: u8 = 100;
/// Highest compression effort (libwebp `method`).
pub const MAX_EFFORT: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    #[default]
    Lanczos3,
}

/// Read-only settings shared by every file of a run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub max_width: u32,
    pub target_size_kb: u64,
    pub min_quality: u8,
    pub max_quality: u8,
    pub effort: u8,
    pub algorithm: ResizeAlgorithm,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            max_width: DEFAULT_MAX_WIDTH,
            target_size_kb: DEFAULT_TARGET_KB,
            min_quality: DEFAULT_MIN_QUALITY,
            max_quality: DEFAULT_MAX_QUALITY,
            effort: DEFAULT_EFFORT,
            algorithm: ResizeAlgorithm::default(),
        }
    }
}

impl ConvertConfig {
    pub fn target_bytes(&self) -> u64 {
        self.target_size_kb.saturating_mul(1024)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 {
            return Err(ConvertError::InvalidParameter(
                "Maximum width must be at least 1 pixel".to_string(),
            ));
        }

        if self.max_width > 100_000 {
            return Err(ConvertError::InvalidParameter(
                "Maximum width too large (max 100,000 pixels)".to_string(),
            ));
        }

        if self.max_quality > MAX_QUALITY_SCALE {
            return Err(ConvertError::InvalidParameter(format!(
                "Maximum quality must be between 0 and {}",
                MAX_QUALITY_SCALE
            )));
        }

        if self.min_quality > self.max_quality {
            return Err(ConvertError::InvalidParameter(format!(
                "Minimum quality {} is above maximum quality {}",
                self.min_quality, self.max_quality
            )));
        }

        if self.effort > MAX_EFFORT {
            return Err(ConvertError::InvalidParameter(format!(
                "Compression effort must be between 0 and {}",
                MAX_EFFORT
            )));
        }

        Ok(())
    }
}

/// Outcome of converting one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeResult {
    pub quality: u8,
    pub size_bytes: u64,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub processed_count: usize,
    pub total_size_before: u64,
    pub total_size_after: u64,
    pub errors: Vec<(String, String)>,
}

impl ProcessingStats {
    pub fn savings_percent(&self) -> f64 {
        if self.total_size_before == 0 {
            return 0.0;
        }

        let savings = (self.total_size_before as f64 - self.total_size_after as f64)
            / self.total_size_before as f64
            * 100.0;
        savings.clamp(0.0, 100.0)
    }
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Memory limit exceeded: {0}")]
    MemoryLimitExceeded(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
