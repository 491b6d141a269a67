// webfit/src/processors/batch.rs
use crate::core::processor::{FileOutcome, ImageProcessor};
use crate::core::{ConvertConfig, ConvertError, ProcessingStats, Result};
use crate::processors::{QualityEncoder, WebpEncoder};
use crate::utils::{display_name, format_file_size, is_jpeg, kilobytes, webp_output_path};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Converts every JPEG directly inside the source directory, one after the
/// other. Each output path is written by exactly one file's search.
pub struct BatchProcessor<E: QualityEncoder = WebpEncoder> {
    processor: ImageProcessor<E>,
}

impl BatchProcessor<WebpEncoder> {
    pub fn new(config: ConvertConfig) -> Result<Self> {
        Ok(Self {
            processor: ImageProcessor::new(config)?,
        })
    }
}

impl<E: QualityEncoder> BatchProcessor<E> {
    pub fn with_encoder(config: ConvertConfig, encoder: E) -> Result<Self> {
        Ok(Self {
            processor: ImageProcessor::with_encoder(config, encoder)?,
        })
    }

    /// Runs the batch, printing report lines to stdout.
    pub fn run(&self) -> Result<ProcessingStats> {
        let stdout = std::io::stdout();
        self.run_with_report(&mut stdout.lock())
    }

    pub fn run_with_report<W: Write>(&self, report: &mut W) -> Result<ProcessingStats> {
        let config = self.processor.config();

        self.prepare_output_dir(&config.dest_dir)?;

        let image_paths = self.collect_image_paths(&config.source_dir)?;

        if image_paths.is_empty() {
            writeln!(
                report,
                "No .jpg/.jpeg files found in '{}'.",
                config.source_dir.display()
            )?;
            return Ok(ProcessingStats::default());
        }

        log::info!(
            "Converting {} images from {} to {}",
            image_paths.len(),
            config.source_dir.display(),
            config.dest_dir.display()
        );
        warn_on_name_collisions(&image_paths, &config.dest_dir);

        let pb = self.create_progress_bar(image_paths.len());
        let mut stats = ProcessingStats::default();

        for input_path in &image_paths {
            let output_path = webp_output_path(input_path, &config.dest_dir);
            pb.set_message(display_name(input_path));

            match self.processor.process(input_path, &output_path) {
                Ok(outcome) => {
                    let line = report_line(input_path, &outcome);
                    pb.suspend(|| writeln!(report, "{}", line))?;

                    stats.processed_count += 1;
                    stats.total_size_before += outcome.original_size;
                    stats.total_size_after += outcome.result.size_bytes;
                }
                Err(e) => {
                    pb.suspend(|| log::error!("Skipping {}: {}", input_path.display(), e));
                    stats
                        .errors
                        .push((input_path.display().to_string(), e.to_string()));
                }
            }

            pb.inc(1);
        }

        pb.finish_and_clear();

        log::info!(
            "Converted {} of {} images: {} -> {} ({:.1}% smaller)",
            stats.processed_count,
            image_paths.len(),
            format_file_size(stats.total_size_before),
            format_file_size(stats.total_size_after),
            stats.savings_percent()
        );

        Ok(stats)
    }

    fn prepare_output_dir(&self, output_dir: &Path) -> Result<()> {
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(ConvertError::InvalidParameter(format!(
                "Output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        std::fs::create_dir_all(output_dir)?;
        Ok(())
    }

    fn collect_image_paths(&self, input_dir: &Path) -> Result<Vec<PathBuf>> {
        if !input_dir.is_dir() {
            log::warn!("Source directory {} does not exist", input_dir.display());
            return Ok(Vec::new());
        }

        let paths: Vec<PathBuf> = WalkDir::new(input_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| is_jpeg(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        Ok(paths)
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }
}

fn report_line(input_path: &Path, outcome: &FileOutcome) -> String {
    format!(
        "✔ {:35}  → {:35}  {:.0}KB → {:.0}KB  (q={})",
        display_name(input_path),
        display_name(&outcome.result.path),
        kilobytes(outcome.original_size),
        kilobytes(outcome.result.size_bytes),
        outcome.result.quality
    )
}

fn warn_on_name_collisions(inputs: &[PathBuf], dest_dir: &Path) {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();

    for input in inputs {
        let output = webp_output_path(input, dest_dir);
        if let Some(previous) = seen.insert(output.clone(), input) {
            log::warn!(
                "{} and {} both map to {}; the later one wins",
                previous.display(),
                input.display(),
                output.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EncodeResult;

    #[test]
    fn test_report_line_format() {
        let outcome = FileOutcome {
            original_size: 2 * 1024 * 1024,
            width: 1600,
            height: 1200,
            result: EncodeResult {
                quality: 62,
                size_bytes: 279 * 1024,
                path: PathBuf::from("outputs/beach.webp"),
            },
        };

        let line = report_line(Path::new("inputs/beach.jpg"), &outcome);

        assert!(line.starts_with("✔ beach.jpg "));
        assert!(line.contains("→ beach.webp "));
        assert!(line.contains("2048KB → 279KB"));
        assert!(line.ends_with("(q=62)"));
    }
}
