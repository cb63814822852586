use crate::pixel_pipeline::common::error::Result;
use crate::pixel_pipeline::decoder::Decoder;
use crate::pixel_pipeline::format::FormatDescriptor;

/// Decoder supplied from outside the crate for a vendor-specific format.
///
/// Plugins are registered once at startup with
/// [`DecoderRegistry::register_plugin`](super::DecoderRegistry::register_plugin).
pub trait DecoderPlugin: Send + Sync {
    /// Format handled by this plugin; its identifier must not collide with any
    /// other registration.
    fn format(&self) -> FormatDescriptor;

    fn make_decoder(&self, width: u32, height: u32) -> Result<Box<dyn Decoder>>;
}
