use std::path::PathBuf;
use thiserror::Error;

use crate::conversion::ConversionReport;

/// The main error type for voc2yolo operations.
#[derive(Debug, Error)]
pub enum Voc2YoloError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse VOC XML {path}: {message}")]
    VocXmlParse { path: PathBuf, message: String },

    #[error("Invalid VOC input at {path}: {message}")]
    VocLayoutInvalid { path: PathBuf, message: String },

    /// A mapped object needs a division by a zero image dimension.
    #[error("Image has a zero dimension ({width}x{height}); cannot normalize bounding boxes")]
    ZeroImageDimension { width: u32, height: u32 },

    /// A mapped object whose `<bndbox>` could not be read.
    #[error("Unreadable <bndbox> for object '{class_name}': {message}")]
    MalformedBox { class_name: String, message: String },

    #[error("Failed to parse class map YAML from {path}: {source}")]
    ClassMapParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid class map {path}: {message}")]
    ClassMapInvalid { path: PathBuf, message: String },

    #[error("Failed to write YOLO labels to {path}: {message}")]
    YoloWrite { path: PathBuf, message: String },

    #[error("Conversion finished with {failed} failed file(s)")]
    ConversionFailed {
        failed: usize,
        report: ConversionReport,
    },

    #[error("Failed to serialize conversion report: {0}")]
    ReportSerialize(#[source] serde_json::Error),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
