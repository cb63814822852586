//! Facade used by acquisition loops: resolve, decode, account.

mod stats;

use std::sync::{Arc, PoisonError};
use std::time::Instant;

use tracing::{debug, instrument};

use crate::pixel_pipeline::color::{ColorConversionAdapter, YuvUtilsAdapter};
use crate::pixel_pipeline::common::error::RegistryError;
use crate::pixel_pipeline::config::DecoderConfig;
use crate::pixel_pipeline::frame::RawFrame;
use crate::pixel_pipeline::image::DecodedImage;
use crate::pixel_pipeline::registry::DecoderRegistry;

pub use stats::{DecodeStats, StatsSnapshot};

pub struct FramePipeline {
    registry: Arc<DecoderRegistry>,
    stats: DecodeStats,
}

impl FramePipeline {
    pub fn new(registry: Arc<DecoderRegistry>) -> Self {
        Self {
            registry,
            stats: DecodeStats::new(),
        }
    }

    /// Pipeline over the built-in formats, converting chroma formats with
    /// [`YuvUtilsAdapter`].
    pub fn with_builtin(config: &DecoderConfig) -> Result<Self, RegistryError> {
        let adapter: Arc<dyn ColorConversionAdapter> = Arc::new(YuvUtilsAdapter::from_config(config));
        let registry = DecoderRegistry::with_builtin(config, Some(adapter))?;
        Ok(Self::new(Arc::new(registry)))
    }

    /// Decodes `frame` into a newly allocated image.
    pub fn decode(&self, frame: &RawFrame<'_>) -> Result<DecodedImage, RegistryError> {
        self.decode_with(frame, DecodedImage::clone)
    }

    /// Decodes `frame` and hands the decoder's own buffer to `consume`.
    ///
    /// Nothing is allocated once the decoder for this geometry is cached. The
    /// decoder stays locked while `consume` runs.
    #[instrument(
        level = "debug",
        skip_all,
        fields(format = %frame.format, width = frame.width, height = frame.height)
    )]
    pub fn decode_with<R>(
        &self,
        frame: &RawFrame<'_>,
        consume: impl FnOnce(&DecodedImage) -> R,
    ) -> Result<R, RegistryError> {
        let decoder = {
            let _span = tracing::debug_span!("resolve").entered();
            self.registry.resolve(&frame.format, frame.width, frame.height)
        };
        let decoder = decoder.inspect_err(|_| self.stats.record_failure())?;
        let mut decoder = decoder.lock().unwrap_or_else(PoisonError::into_inner);

        let started = Instant::now();
        let image = {
            let _span = tracing::debug_span!("decode").entered();
            decoder.decode_in_place(frame)
        };
        match image {
            Ok(image) => {
                let elapsed = started.elapsed();
                self.stats.record_success(frame.expected_byte_size(), elapsed);
                debug!("Decoded frame in {:.3}ms", elapsed.as_secs_f64() * 1000.0);
                Ok(consume(image))
            }
            Err(e) => {
                self.stats.record_failure();
                Err(e.into())
            }
        }
    }

    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    pub fn registry(&self) -> &Arc<DecoderRegistry> {
        &self.registry
    }
}
