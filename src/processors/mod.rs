// webfit/src/processors/mod.rs
mod batch;
mod encoder;
mod loader;
pub(crate) mod metadata;
mod normalizer;
mod search;

pub use batch::BatchProcessor;
pub use encoder::{QualityEncoder, WebpEncoder};
pub use loader::{Loader, SourceImage};
pub use metadata::MetadataProcessor;
pub use normalizer::{scaled_height, Normalizer};
pub use search::{QualitySearch, SearchOutcome, TargetSizeEncoder};

pub mod prelude {
    pub use super::{
        BatchProcessor, Loader, MetadataProcessor, Normalizer, QualityEncoder, QualitySearch,
        TargetSizeEncoder, WebpEncoder,
    };
}
