//! 4:2:2 interleaved luma/chroma formats (UYVY `YUV422Packed`, YUYV
//! `YUV422_YUYV_Packed`).
//!
//! Color output is produced by a [`ColorConversionAdapter`]; the luma-only
//! path picks the Y samples directly and never touches the adapter.

use std::sync::Arc;

use tracing::debug;

use super::{check_frame, for_each_row, Decoder};
use crate::pixel_pipeline::color::ColorConversionAdapter;
use crate::pixel_pipeline::common::error::{FormatError, Result};
use crate::pixel_pipeline::format::{ChannelLayout, ChromaOrder, FormatDescriptor};
use crate::pixel_pipeline::frame::RawFrame;
use crate::pixel_pipeline::image::{DecodedImage, PixelLayout};

pub struct Yuv422Decoder {
    format: FormatDescriptor,
    order: ChromaOrder,
    width: u32,
    height: u32,
    adapter: Option<Arc<dyn ColorConversionAdapter>>,
    output: DecodedImage,
}

impl Yuv422Decoder {
    /// Grayscale decoder extracting the luma samples.
    pub fn luma(format: FormatDescriptor, width: u32, height: u32) -> Result<Self> {
        Self::build(format, width, height, None)
    }

    /// RGB24 decoder delegating conversion to `adapter`.
    pub fn color(
        format: FormatDescriptor,
        width: u32,
        height: u32,
        adapter: Arc<dyn ColorConversionAdapter>,
    ) -> Result<Self> {
        Self::build(format, width, height, Some(adapter))
    }

    fn build(
        format: FormatDescriptor,
        width: u32,
        height: u32,
        adapter: Option<Arc<dyn ColorConversionAdapter>>,
    ) -> Result<Self> {
        format.validate()?;
        let ChannelLayout::Yuv422(order) = format.layout else {
            return Err(FormatError::InvalidDescriptor(format!(
                "{format} cannot be decoded by the 4:2:2 chroma decoder"
            )));
        };
        if width % 2 != 0 {
            return Err(FormatError::InvalidGeometry {
                width,
                height,
                reason: "4:2:2 chroma needs an even width",
            });
        }

        let layout = if adapter.is_some() {
            PixelLayout::Rgb24
        } else {
            PixelLayout::Gray8
        };
        debug!(
            "Building {} decoder for {}x{} -> {} ({})",
            format,
            width,
            height,
            layout.name(),
            adapter.as_ref().map_or("luma only", |a| a.name())
        );

        Ok(Self {
            output: DecodedImage::new(width, height, layout)?,
            format,
            order,
            width,
            height,
            adapter,
        })
    }
}

impl Decoder for Yuv422Decoder {
    fn format(&self) -> &FormatDescriptor {
        &self.format
    }

    fn geometry(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn output_layout(&self) -> PixelLayout {
        self.output.layout()
    }

    fn decode_in_place(&mut self, frame: &RawFrame<'_>) -> Result<&DecodedImage> {
        let payload = check_frame(&self.format, (self.width, self.height), frame)?;
        if self.output.is_empty() {
            return Ok(&self.output);
        }

        match &self.adapter {
            Some(adapter) => {
                let stride = self.output.stride();
                adapter
                    .convert(
                        payload,
                        self.order,
                        self.width,
                        self.height,
                        PixelLayout::Rgb24,
                        self.output.pixels_mut(),
                        stride,
                    )
                    .map_err(|e| FormatError::ConversionFailed(e.to_string()))?;
            }
            None => {
                let src_row = self.width as usize * 2;
                let offset = self.order.luma_offset();
                for_each_row(&mut self.output, |y, row| {
                    let src = &payload[y * src_row..][..src_row];
                    for (out, &luma) in row.iter_mut().zip(src[offset..].iter().step_by(2)) {
                        *out = luma;
                    }
                });
            }
        }
        Ok(&self.output)
    }
}
