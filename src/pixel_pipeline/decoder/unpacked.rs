//! Monochrome formats storing one sample per byte-aligned storage unit
//! (Mono8, Mono8Signed, Mono10, Mono12, Mono14, Mono16 and custom variants).

use tracing::debug;

use super::{check_frame, ensure_layout, for_each_row, Decoder, SampleScaler};
use crate::pixel_pipeline::common::error::Result;
use crate::pixel_pipeline::format::{ByteOrder, ChannelLayout, FormatDescriptor, Packing};
use crate::pixel_pipeline::frame::RawFrame;
use crate::pixel_pipeline::image::{DecodedImage, PixelLayout};

pub struct MonoUnpackedDecoder {
    format: FormatDescriptor,
    width: u32,
    height: u32,
    scaler: SampleScaler,
    output: DecodedImage,
}

impl MonoUnpackedDecoder {
    pub fn new(format: FormatDescriptor, width: u32, height: u32) -> Result<Self> {
        ensure_layout(
            &format,
            format.layout == ChannelLayout::Mono && format.packing == Packing::Unpacked,
            "unpacked monochrome",
        )?;
        debug!(
            "Building {} decoder for {}x{} ({} byte samples)",
            format,
            width,
            height,
            format.storage_bytes()
        );
        Ok(Self {
            scaler: SampleScaler::new(format.bits_per_sample, format.signed),
            output: DecodedImage::new(width, height, PixelLayout::Gray8)?,
            format,
            width,
            height,
        })
    }
}

impl Decoder for MonoUnpackedDecoder {
    fn format(&self) -> &FormatDescriptor {
        &self.format
    }

    fn geometry(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn output_layout(&self) -> PixelLayout {
        PixelLayout::Gray8
    }

    fn decode_in_place(&mut self, frame: &RawFrame<'_>) -> Result<&DecodedImage> {
        let payload = check_frame(&self.format, (self.width, self.height), frame)?;
        let unit = self.format.storage_bytes();
        let src_row = self.width as usize * unit;
        let order = self.format.byte_order;
        let scaler = &self.scaler;

        for_each_row(&mut self.output, |y, row| {
            unpack_row(&payload[y * src_row..][..src_row], row, unit, order, scaler);
        });
        Ok(&self.output)
    }
}

/// Scales one row of `unit`-byte samples into 8-bit values.
pub(crate) fn unpack_row(src: &[u8], dst: &mut [u8], unit: usize, order: ByteOrder, scaler: &SampleScaler) {
    if unit == 1 {
        for (out, &sample) in dst.iter_mut().zip(src) {
            *out = scaler.map(u32::from(sample));
        }
        return;
    }
    for (out, sample) in dst.iter_mut().zip(src.chunks_exact(unit)) {
        *out = scaler.map(read_unit(sample, order));
    }
}

#[inline]
fn read_unit(bytes: &[u8], order: ByteOrder) -> u32 {
    match order {
        ByteOrder::LittleEndian => bytes.iter().rev().fold(0, |acc, &b| acc << 8 | u32::from(b)),
        ByteOrder::BigEndian => bytes.iter().fold(0, |acc, &b| acc << 8 | u32::from(b)),
    }
}
