//! Pixel format descriptors
//!
//! Describes how a camera encodes one frame: identifier, sample width,
//! signedness, packing, channel layout and byte order.

pub mod catalog;
mod descriptor;

pub use catalog::builtin_formats;
pub use descriptor::{
    ByteOrder, CfaPattern, ChannelLayout, ChromaOrder, FormatDescriptor, Packing, PixelFormatId,
};
