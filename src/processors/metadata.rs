// webfit/src/processors/metadata.rs
use exif::{Exif, In, Reader, Tag};
use image::metadata::Orientation;
use std::io::Cursor;

/// Reads the bits of EXIF the pipeline cares about. Nothing is carried over
/// into the output; the WebP encoder never receives EXIF or ICC data.
pub struct MetadataProcessor;

impl MetadataProcessor {
    pub fn new() -> Self {
        Self
    }

    pub fn read_metadata(&self, data: &[u8]) -> Option<Exif> {
        let mut cursor = Cursor::new(data);

        match Reader::new().read_from_container(&mut cursor) {
            Ok(exif) => Some(exif),
            Err(exif::Error::NotFound(_)) => {
                log::debug!("No EXIF data found");
                None
            }
            Err(e) => {
                log::warn!("Ignoring unreadable EXIF data: {}", e);
                None
            }
        }
    }

    /// Orientation from the primary IFD. Missing or out-of-range values mean
    /// the pixels are already upright.
    pub fn orientation(&self, data: &[u8]) -> Orientation {
        self.read_metadata(data)
            .and_then(|exif| orientation_from_exif(&exif))
            .unwrap_or(Orientation::NoTransforms)
    }
}

fn orientation_from_exif(exif: &Exif) -> Option<Orientation> {
    let field = exif.get_field(Tag::Orientation, In::PRIMARY)?;
    let value = field.value.get_uint(0)?;
    let orientation = u8::try_from(value).ok().and_then(Orientation::from_exif);

    if orientation.is_none() {
        log::warn!("Unknown EXIF orientation value {}, assuming upright", value);
    }

    orientation
}

impl Default for MetadataProcessor {
    fn default() -> Self {
        Self::new()
    }
}
