// webfit/src/processors/search.rs
use crate::core::{ConvertError, EncodeResult, Result, MAX_QUALITY_SCALE};
use crate::processors::QualityEncoder;
use image::DynamicImage;
use std::collections::BTreeMap;
use std::path::Path;

/// Best encoding found for a byte budget. `bytes` is exactly the encoding at
/// `quality`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub quality: u8,
    pub bytes: Vec<u8>,
    pub probes: usize,
}

impl SearchOutcome {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Finds the highest quality in `[min_quality, max_quality]` whose encoding
/// fits a byte budget, falling back to `min_quality` when none does.
///
/// This is a rightmost-feasible binary search, so it assumes encoded size
/// never shrinks as quality rises. libwebp behaves that way in practice but
/// nothing guarantees it, and the search does not verify it. On a codec that
/// breaks the assumption the answer is still feasible (or the floor), just
/// not necessarily the highest feasible quality.
#[derive(Debug, Clone, Copy)]
pub struct QualitySearch {
    min_quality: u8,
    max_quality: u8,
}

impl QualitySearch {
    pub fn new(min_quality: u8, max_quality: u8) -> Result<Self> {
        if max_quality > MAX_QUALITY_SCALE || min_quality > max_quality {
            return Err(ConvertError::InvalidParameter(format!(
                "Invalid quality range {}..={}",
                min_quality, max_quality
            )));
        }

        Ok(Self {
            min_quality,
            max_quality,
        })
    }

    pub fn min_quality(&self) -> u8 {
        self.min_quality
    }

    pub fn max_quality(&self) -> u8 {
        self.max_quality
    }

    pub fn search<E: QualityEncoder + ?Sized>(
        &self,
        encoder: &E,
        image: &DynamicImage,
        target_bytes: u64,
    ) -> Result<SearchOutcome> {
        let mut probe = Prober::new(encoder, image);

        let top = probe.size_at(self.max_quality)?;
        if top <= target_bytes {
            log::debug!(
                "Quality {} fits budget ({} <= {} bytes)",
                self.max_quality,
                top,
                target_bytes
            );
            return Ok(probe.finish(self.max_quality));
        }

        let mut lo = i32::from(self.min_quality);
        let mut hi = i32::from(self.max_quality);
        let mut best: Option<u8> = None;

        while lo <= hi {
            let mid = (lo + hi) / 2;
            let quality = mid as u8;
            let size = probe.size_at(quality)?;

            if size <= target_bytes {
                if best.map_or(true, |b| quality > b) {
                    best = Some(quality);
                }
                lo = mid + 1;
            } else {
                hi = mid - 1;
            }
        }

        match best {
            Some(quality) => Ok(probe.finish(quality)),
            None => {
                log::debug!(
                    "No quality in {}..={} fits {} bytes, using floor",
                    self.min_quality,
                    self.max_quality,
                    target_bytes
                );
                probe.size_at(self.min_quality)?;
                Ok(probe.finish(self.min_quality))
            }
        }
    }
}

/// Encodes each quality at most once and keeps the buffers so the winner
/// never has to be encoded again.
struct Prober<'a, E: QualityEncoder + ?Sized> {
    encoder: &'a E,
    image: &'a DynamicImage,
    attempts: BTreeMap<u8, Vec<u8>>,
    probes: usize,
}

impl<'a, E: QualityEncoder + ?Sized> Prober<'a, E> {
    fn new(encoder: &'a E, image: &'a DynamicImage) -> Self {
        Self {
            encoder,
            image,
            attempts: BTreeMap::new(),
            probes: 0,
        }
    }

    fn size_at(&mut self, quality: u8) -> Result<u64> {
        if let Some(bytes) = self.attempts.get(&quality) {
            return Ok(bytes.len() as u64);
        }

        let bytes = self.encoder.encode(self.image, quality)?;
        self.probes += 1;
        let size = bytes.len() as u64;
        log::debug!("Probe #{}: quality {} -> {} bytes", self.probes, quality, size);

        self.attempts.insert(quality, bytes);
        Ok(size)
    }

    fn finish(mut self, quality: u8) -> SearchOutcome {
        let bytes = self.attempts.remove(&quality).unwrap_or_default();
        SearchOutcome {
            quality,
            bytes,
            probes: self.probes,
        }
    }
}

/// Runs the search entirely in memory, then writes the winning buffer to the
/// destination once. A failed search leaves the destination untouched.
pub struct TargetSizeEncoder<E: QualityEncoder> {
    encoder: E,
    search: QualitySearch,
}

impl<E: QualityEncoder> TargetSizeEncoder<E> {
    pub fn new(encoder: E, search: QualitySearch) -> Self {
        Self { encoder, search }
    }

    pub fn search(&self, image: &DynamicImage, target_bytes: u64) -> Result<SearchOutcome> {
        self.search.search(&self.encoder, image, target_bytes)
    }

    pub fn search_and_save(
        &self,
        image: &DynamicImage,
        target_bytes: u64,
        dest: &Path,
    ) -> Result<EncodeResult> {
        let outcome = self.search(image, target_bytes)?;

        std::fs::write(dest, &outcome.bytes)?;

        log::info!(
            "Saved {} at quality {} ({} bytes, {} probes)",
            dest.display(),
            outcome.quality,
            outcome.size(),
            outcome.probes
        );

        Ok(EncodeResult {
            quality: outcome.quality,
            size_bytes: outcome.size(),
            path: dest.to_path_buf(),
        })
    }
}
