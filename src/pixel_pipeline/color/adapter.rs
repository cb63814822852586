use crate::pixel_pipeline::common::error::ConversionError;
use crate::pixel_pipeline::format::ChromaOrder;
use crate::pixel_pipeline::image::PixelLayout;

/// Converts interleaved 4:2:2 frames into one of the standard output layouts.
///
/// `src` holds `width * height * 2` bytes with rows packed back to back; `dst`
/// rows start every `dst_stride` bytes. Implementations must be shareable
/// across threads since one adapter serves every cached decoder.
pub trait ColorConversionAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    #[allow(clippy::too_many_arguments)]
    fn convert(
        &self,
        src: &[u8],
        source: ChromaOrder,
        width: u32,
        height: u32,
        destination: PixelLayout,
        dst: &mut [u8],
        dst_stride: usize,
    ) -> Result<(), ConversionError>;
}
