// webfit/src/cli.rs
use crate::core::{
    ConvertConfig, ResizeAlgorithm, DEFAULT_DEST_DIR, DEFAULT_EFFORT, DEFAULT_MAX_QUALITY,
    DEFAULT_MAX_WIDTH, DEFAULT_MIN_QUALITY, DEFAULT_SOURCE_DIR, DEFAULT_TARGET_KB,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "webfit",
    version,
    about = "Convert a folder of JPEGs to WebP files that fit a size budget"
)]
pub struct Cli {
    /// Directory scanned (non-recursively) for .jpg/.jpeg files
    #[arg(short, long, env = "WEBFIT_SOURCE_DIR", default_value = DEFAULT_SOURCE_DIR)]
    pub input: PathBuf,

    /// Directory the .webp files are written to, created if missing
    #[arg(short, long, env = "WEBFIT_DEST_DIR", default_value = DEFAULT_DEST_DIR)]
    pub output: PathBuf,

    /// Images wider than this are scaled down to it
    #[arg(short = 'w', long, env = "WEBFIT_MAX_WIDTH", default_value_t = DEFAULT_MAX_WIDTH,
          value_parser = clap::value_parser!(u32).range(1..=100_000))]
    pub max_width: u32,

    /// Size budget per output file, in KB
    #[arg(short, long, env = "WEBFIT_TARGET_KB", default_value_t = DEFAULT_TARGET_KB)]
    pub target_kb: u64,

    /// Lowest quality the search may settle on
    #[arg(long, env = "WEBFIT_MIN_QUALITY", default_value_t = DEFAULT_MIN_QUALITY,
          value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_quality: u8,

    /// Quality tried first; the search never goes above it
    #[arg(long, env = "WEBFIT_MAX_QUALITY", default_value_t = DEFAULT_MAX_QUALITY,
          value_parser = clap::value_parser!(u8).range(0..=100))]
    pub max_quality: u8,

    /// WebP compression effort (0 = fastest, 6 = smallest)
    #[arg(short, long, env = "WEBFIT_EFFORT", default_value_t = DEFAULT_EFFORT,
          value_parser = clap::value_parser!(u8).range(0..=6))]
    pub effort: u8,

    /// Resampling filter used when downscaling
    #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos3)]
    pub algorithm: Algorithm,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

impl Cli {
    pub fn to_config(&self) -> ConvertConfig {
        ConvertConfig {
            source_dir: self.input.clone(),
            dest_dir: self.output.clone(),
            max_width: self.max_width,
            target_size_kb: self.target_kb,
            min_quality: self.min_quality,
            max_quality: self.max_quality,
            effort: self.effort,
            algorithm: self.algorithm.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config_defaults() {
        let cli = Cli::try_parse_from(["webfit"]).unwrap();
        let config = cli.to_config();
        let defaults = ConvertConfig::default();

        assert_eq!(config.source_dir, defaults.source_dir);
        assert_eq!(config.dest_dir, defaults.dest_dir);
        assert_eq!(config.max_width, 1600);
        assert_eq!(config.target_size_kb, 280);
        assert_eq!(config.min_quality, 45);
        assert_eq!(config.max_quality, 85);
        assert_eq!(config.effort, 6);
        assert_eq!(config.algorithm, ResizeAlgorithm::Lanczos3);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "webfit", "-i", "photos", "-o", "web", "-w", "1200", "-t", "180",
            "--min-quality", "30", "--max-quality", "90", "-e", "4", "-a", "bicubic", "-v",
        ])
        .unwrap();
        let config = cli.to_config();

        assert_eq!(config.source_dir, PathBuf::from("photos"));
        assert_eq!(config.dest_dir, PathBuf::from("web"));
        assert_eq!(config.max_width, 1200);
        assert_eq!(config.target_bytes(), 180 * 1024);
        assert_eq!((config.min_quality, config.max_quality), (30, 90));
        assert_eq!(config.effort, 4);
        assert_eq!(config.algorithm, ResizeAlgorithm::Bicubic);
        assert!(cli.verbose);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(Cli::try_parse_from(["webfit", "-e", "7"]).is_err());
        assert!(Cli::try_parse_from(["webfit", "--max-quality", "101"]).is_err());
        assert!(Cli::try_parse_from(["webfit", "-w", "0"]).is_err());
    }
}
