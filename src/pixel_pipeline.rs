//! Sensor pixel format decoding
//!
//! Turns raw frame buffers in camera-native encodings (unpacked and packed
//! monochrome, Bayer mosaics, interleaved 4:2:2 chroma) into [`DecodedImage`]s
//! in one of a few standard layouts. The [`DecoderRegistry`] picks the decoder
//! from the format identifier the camera reports at runtime.

pub mod color;
pub mod common;
pub mod config;
pub mod decoder;
pub mod format;
pub mod frame;
pub mod image;
pub mod pipeline;
pub mod recording;
pub mod registry;


pub use common::{ConversionError, FormatError, RecordError, RegistryError, Result};

pub use format::{
    ByteOrder,
    CfaPattern,
    ChannelLayout,
    ChromaOrder,
    FormatDescriptor,
    Packing,
    PixelFormatId,
};

pub use frame::RawFrame;

pub use image::{DecodedImage, PixelLayout};

pub use decoder::Decoder;

pub use color::{ColorConversionAdapter, YuvUtilsAdapter};

pub use config::{ColorMatrix, ColorRange, DecoderConfig, DecoderConfigBuilder, DemosaicMethod, OutputMode};

pub use registry::{DecoderFactory, DecoderPlugin, DecoderRegistry, SharedDecoder};

pub use pipeline::{DecodeStats, FramePipeline, StatsSnapshot};

pub use recording::{RecordCompression, TiffRecorder};
