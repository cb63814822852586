//! Common utilities module
//!
//! Error types shared by the descriptor model, the decoders and the registry.

pub mod error;

pub use error::{ConversionError, FormatError, RecordError, RegistryError, Result};
