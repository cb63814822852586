//! Colorspace conversion
//!
//! Chroma decoders hand interleaved 4:2:2 data to a [`ColorConversionAdapter`]
//! rather than converting it themselves.

mod adapter;
mod yuvutils_adapter;

pub use adapter::ColorConversionAdapter;
pub use yuvutils_adapter::YuvUtilsAdapter;
