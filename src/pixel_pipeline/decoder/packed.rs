//! Monochrome formats whose samples are not byte aligned.
//!
//! Two packing schemes are understood:
//!
//! * Tight packing (PFNC `Mono10p`, `Mono12p`, ...): samples follow each other
//!   in one continuous bit stream. With little-endian byte order the stream is
//!   read LSB first, so bit 0 of sample 0 is the least significant bit of the
//!   first byte. With big-endian byte order it is read MSB first.
//! * Group packing (GigE Vision `Mono10Packed`, `Mono12Packed`): two samples in
//!   three bytes. Bytes 0 and 2 hold the high bits of the first and second
//!   sample, byte 1 holds the low bits of both (first sample in the low nibble).

use tracing::debug;

use super::{check_frame, ensure_layout, for_each_row, Decoder, SampleScaler};
use crate::pixel_pipeline::common::error::Result;
use crate::pixel_pipeline::format::{ByteOrder, ChannelLayout, FormatDescriptor, Packing};
use crate::pixel_pipeline::frame::RawFrame;
use crate::pixel_pipeline::image::{DecodedImage, PixelLayout};

#[derive(Debug, Clone, Copy)]
enum BitLayout {
    LsbFirst { bits: usize },
    MsbFirst { bits: usize },
    Group10,
    Group12,
}

impl BitLayout {
    fn for_format(format: &FormatDescriptor) -> Self {
        let bits = usize::from(format.bits_per_sample);
        match (format.packing, format.byte_order) {
            (Packing::GroupPacked, _) if bits == 10 => BitLayout::Group10,
            (Packing::GroupPacked, _) => BitLayout::Group12,
            (_, ByteOrder::LittleEndian) => BitLayout::LsbFirst { bits },
            (_, ByteOrder::BigEndian) => BitLayout::MsbFirst { bits },
        }
    }

    /// Raw value of sample `index`; `data` must hold the whole frame payload.
    #[inline]
    fn sample_at(self, data: &[u8], index: usize) -> u32 {
        match self {
            BitLayout::LsbFirst { bits } => {
                let bit = index * bits;
                let shift = bit % 8;
                let span = (shift + bits).div_ceil(8);
                let acc = data[bit / 8..bit / 8 + span]
                    .iter()
                    .rev()
                    .fold(0u32, |acc, &b| acc << 8 | u32::from(b));
                (acc >> shift) & low_bits(bits)
            }
            BitLayout::MsbFirst { bits } => {
                let bit = index * bits;
                let shift = bit % 8;
                let span = (shift + bits).div_ceil(8);
                let acc = data[bit / 8..bit / 8 + span]
                    .iter()
                    .fold(0u32, |acc, &b| acc << 8 | u32::from(b));
                (acc >> (span * 8 - shift - bits)) & low_bits(bits)
            }
            BitLayout::Group10 => {
                let group = &data[index / 2 * 3..][..3];
                let (high, low) = if index % 2 == 0 {
                    (group[0], group[1] & 0x03)
                } else {
                    (group[2], (group[1] >> 4) & 0x03)
                };
                u32::from(high) << 2 | u32::from(low)
            }
            BitLayout::Group12 => {
                let group = &data[index / 2 * 3..][..3];
                let (high, low) = if index % 2 == 0 {
                    (group[0], group[1] & 0x0f)
                } else {
                    (group[2], group[1] >> 4)
                };
                u32::from(high) << 4 | u32::from(low)
            }
        }
    }
}

#[inline]
fn low_bits(bits: usize) -> u32 {
    (1u32 << bits) - 1
}

pub struct MonoPackedDecoder {
    format: FormatDescriptor,
    width: u32,
    height: u32,
    layout: BitLayout,
    scaler: SampleScaler,
    output: DecodedImage,
}

impl MonoPackedDecoder {
    pub fn new(format: FormatDescriptor, width: u32, height: u32) -> Result<Self> {
        ensure_layout(
            &format,
            format.layout == ChannelLayout::Mono && format.packing != Packing::Unpacked,
            "packed monochrome",
        )?;
        let layout = BitLayout::for_format(&format);
        debug!("Building {} decoder for {}x{} ({:?})", format, width, height, layout);
        Ok(Self {
            scaler: SampleScaler::new(format.bits_per_sample, format.signed),
            output: DecodedImage::new(width, height, PixelLayout::Gray8)?,
            format,
            width,
            height,
            layout,
        })
    }
}

impl Decoder for MonoPackedDecoder {
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
        let width = self.width as usize;
        let layout = self.layout;
        let scaler = &self.scaler;

        for_each_row(&mut self.output, |y, row| {
            let first = y * width;
            for (x, out) in row.iter_mut().enumerate() {
                *out = scaler.map(layout.sample_at(payload, first + x));
            }
        });
        Ok(&self.output)
    }
}
