use std::sync::Arc;

use tracing::warn;

use super::{DecoderFactory, DecoderRegistry};
use crate::pixel_pipeline::color::ColorConversionAdapter;
use crate::pixel_pipeline::common::error::{RegistryError, Result};
use crate::pixel_pipeline::config::{DecoderConfig, OutputMode};
use crate::pixel_pipeline::decoder::{
    BayerDecoder, Decoder, MonoPackedDecoder, MonoUnpackedDecoder, Yuv422Decoder,
};
use crate::pixel_pipeline::format::{builtin_formats, ChannelLayout, FormatDescriptor, Packing};

/// Factory dispatching on the descriptor's layout and packing.
///
/// Works for any valid descriptor, so custom formats that fit one of the
/// built-in families can reuse it.
pub fn standard_factory(
    config: &DecoderConfig,
    adapter: Option<Arc<dyn ColorConversionAdapter>>,
) -> DecoderFactory {
    let mode = config.output;
    let method = config.demosaic;
    let adapter = adapter.filter(|_| mode == OutputMode::Color);

    Arc::new(move |format: &FormatDescriptor, width: u32, height: u32| -> Result<Box<dyn Decoder>> {
        let decoder: Box<dyn Decoder> = match (format.layout, format.packing) {
            (ChannelLayout::Mono, Packing::Unpacked) => {
                Box::new(MonoUnpackedDecoder::new(*format, width, height)?)
            }
            (ChannelLayout::Mono, _) => Box::new(MonoPackedDecoder::new(*format, width, height)?),
            (ChannelLayout::Yuv422(_), _) => match &adapter {
                Some(adapter) => Box::new(Yuv422Decoder::color(*format, width, height, Arc::clone(adapter))?),
                None => Box::new(Yuv422Decoder::luma(*format, width, height)?),
            },
            (ChannelLayout::Bayer(_), _) => Box::new(BayerDecoder::new(*format, width, height, mode, method)?),
        };
        Ok(decoder)
    })
}

pub(super) fn register_builtin(
    registry: &DecoderRegistry,
    config: &DecoderConfig,
    adapter: Option<Arc<dyn ColorConversionAdapter>>,
) -> std::result::Result<(), RegistryError> {
    if adapter.is_none() && config.output == OutputMode::Color {
        warn!("No color conversion adapter configured; YUV 4:2:2 formats decode to luma only");
    }
    let factory = standard_factory(config, adapter);
    for format in builtin_formats() {
        registry.register(*format, Arc::clone(&factory))?;
    }
    Ok(())
}
