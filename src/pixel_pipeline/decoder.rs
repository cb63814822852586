//! Frame decoders
//!
//! Every decoder is built for one format and one frame geometry and owns an
//! output buffer of that size, so the steady-state streaming path does not
//! allocate.

mod bayer;
mod chroma;
mod packed;
mod sample;
mod unpacked;

use rayon::prelude::*;

use crate::pixel_pipeline::common::error::{FormatError, Result};
use crate::pixel_pipeline::format::FormatDescriptor;
use crate::pixel_pipeline::frame::RawFrame;
use crate::pixel_pipeline::image::{DecodedImage, PixelLayout};

pub use bayer::BayerDecoder;
pub use chroma::Yuv422Decoder;
pub use packed::MonoPackedDecoder;
pub use sample::SampleScaler;
pub use unpacked::MonoUnpackedDecoder;

/// Output images at least this large are decoded row-parallel.
const PARALLEL_MIN_BYTES: usize = 256 * 1024;

/// Converts raw frames of one format and geometry into [`DecodedImage`]s.
///
/// At most one decode call is in flight per instance. A failed decode never
/// exposes a partially written image.
pub trait Decoder: Send {
    fn format(&self) -> &FormatDescriptor;

    /// Geometry the decoder was built for, as `(width, height)`.
    fn geometry(&self) -> (u32, u32);

    fn output_layout(&self) -> PixelLayout;

    fn is_grayscale(&self) -> bool {
        self.output_layout() == PixelLayout::Gray8
    }

    /// Decodes into the decoder's own buffer and lends it to the caller.
    ///
    /// This is the zero-allocation path: the buffer is overwritten by the next
    /// call.
    fn decode_in_place(&mut self, frame: &RawFrame<'_>) -> Result<&DecodedImage>;

    /// Decodes into an image owned by the caller.
    fn decode(&mut self, frame: &RawFrame<'_>) -> Result<DecodedImage> {
        self.decode_in_place(frame).cloned()
    }
}

/// Checks that `frame` matches the decoder's format and geometry and returns
/// exactly the bytes the decoder is allowed to read.
pub(crate) fn check_frame<'a>(
    format: &FormatDescriptor,
    geometry: (u32, u32),
    frame: &RawFrame<'a>,
) -> Result<&'a [u8]> {
    if frame.format != *format {
        return Err(FormatError::FormatMismatch {
            expected: format.id,
            actual: frame.format.id,
        });
    }
    if (frame.width, frame.height) != geometry {
        return Err(FormatError::InvalidGeometry {
            width: frame.width,
            height: frame.height,
            reason: "frame geometry differs from the decoder's",
        });
    }
    frame.payload()
}

pub(crate) fn ensure_layout(format: &FormatDescriptor, accepted: bool, family: &str) -> Result<()> {
    format.validate()?;
    if accepted {
        Ok(())
    } else {
        Err(FormatError::InvalidDescriptor(format!(
            "{format} cannot be decoded by the {family} decoder"
        )))
    }
}

/// Runs `fill(y, row)` over every row of `image`, without stride padding.
pub(crate) fn for_each_row<F>(image: &mut DecodedImage, fill: F)
where
    F: Fn(usize, &mut [u8]) + Send + Sync,
{
    if image.is_empty() {
        return;
    }
    let stride = image.stride();
    let row_bytes = image.row_bytes();
    let pixels = image.pixels_mut();
    if pixels.len() >= PARALLEL_MIN_BYTES {
        pixels
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| fill(y, &mut row[..row_bytes]));
    } else {
        pixels
            .chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| fill(y, &mut row[..row_bytes]));
    }
}
