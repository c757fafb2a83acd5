pub mod content;
pub mod detection;

pub use content::{ClassificationResult, ContentType, ConversionOutput, Metadata};
pub use detection::DetectionOptions;
