use thiserror::Error;

use crate::pixel_pipeline::format::PixelFormatId;

/// Failures raised while validating or decoding a single frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Truncated frame: expected at least {expected} bytes, got {actual}")]
    TruncatedFrame { expected: usize, actual: usize },

    #[error("Invalid geometry {width}x{height}: {reason}")]
    InvalidGeometry {
        width: u32,
        height: u32,
        reason: &'static str,
    },

    #[error("Color conversion failed: {0}")]
    ConversionFailed(String),

    #[error("Invalid format descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Format mismatch: decoder handles {expected}, frame carries {actual}")]
    FormatMismatch {
        expected: PixelFormatId,
        actual: PixelFormatId,
    },
}

/// Failures raised by the decoder registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No decoder registered for pixel format {0}")]
    UnknownFormat(PixelFormatId),

    #[error("A decoder is already registered for pixel format {0}")]
    DuplicateIdentifier(PixelFormatId),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Failures reported by a [`ColorConversionAdapter`](crate::pixel_pipeline::ColorConversionAdapter).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Unsupported conversion from {source_format} to {destination}")]
    UnsupportedPairing {
        source_format: &'static str,
        destination: &'static str,
    },

    #[error("Buffer size mismatch: need {needed} bytes, have {available}")]
    SizeMismatch { needed: usize, available: usize },

    #[error("Conversion backend error: {0}")]
    Backend(String),
}

/// Failures raised while recording decoded images.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Cannot record an empty image ({0}x{1})")]
    EmptyImage(u32, u32),

    #[error("Failed to encode TIFF image: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;
