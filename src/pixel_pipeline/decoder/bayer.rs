use std::io::Cursor;

use bayer::{BayerDepth, CFA, Demosaic, RasterDepth, RasterMut};
use tracing::debug;

use super::unpacked::unpack_row;
use super::{check_frame, for_each_row, Decoder, SampleScaler};
use crate::pixel_pipeline::common::error::{FormatError, Result};
use crate::pixel_pipeline::config::{DemosaicMethod, OutputMode};
use crate::pixel_pipeline::format::{CfaPattern, ChannelLayout, FormatDescriptor};
use crate::pixel_pipeline::frame::RawFrame;
use crate::pixel_pipeline::image::{DecodedImage, PixelLayout};

/// Bayer mosaic decoder.
///
/// Samples are scaled to 8 bits first, then demosaiced to RGB24. In luma-only
/// mode the scaled mosaic itself is returned as Gray8.
pub struct BayerDecoder {
    format: FormatDescriptor,
    width: u32,
    height: u32,
    cfa: CFA,
    method: Demosaic,
    scaler: SampleScaler,
    /// Scaled mosaic, only allocated for color output
    mosaic: Vec<u8>,
    output: DecodedImage,
}

impl BayerDecoder {
    pub fn new(
        format: FormatDescriptor,
        width: u32,
        height: u32,
        mode: OutputMode,
        method: DemosaicMethod,
    ) -> Result<Self> {
        format.validate()?;
        let ChannelLayout::Bayer(pattern) = format.layout else {
            return Err(FormatError::InvalidDescriptor(format!(
                "{format} cannot be decoded by the Bayer decoder"
            )));
        };
        let empty = width == 0 || height == 0;
        if !empty && (width < 2 || height < 2) {
            return Err(FormatError::InvalidGeometry {
                width,
                height,
                reason: "Bayer mosaic needs at least 2x2 pixels",
            });
        }
        // bayer's cubic kernel reads a 4x4 neighbourhood
        let cubic = mode == OutputMode::Color && method == DemosaicMethod::Cubic;
        if !empty && cubic && (width < 4 || height < 4) {
            return Err(FormatError::InvalidGeometry {
                width,
                height,
                reason: "cubic demosaicing needs at least 4x4 pixels",
            });
        }

        let (layout, mosaic) = match mode {
            OutputMode::Color => (PixelLayout::Rgb24, vec![0u8; width as usize * height as usize]),
            OutputMode::LumaOnly => (PixelLayout::Gray8, Vec::new()),
        };
        debug!(
            "Building {} decoder for {}x{} -> {} ({:?})",
            format,
            width,
            height,
            layout.name(),
            method
        );

        Ok(Self {
            cfa: cfa_for(pattern),
            method: demosaic_for(method),
            scaler: SampleScaler::new(format.bits_per_sample, format.signed),
            output: DecodedImage::new(width, height, layout)?,
            mosaic,
            format,
            width,
            height,
        })
    }
}

fn cfa_for(pattern: CfaPattern) -> CFA {
    match pattern {
        CfaPattern::Rggb => CFA::RGGB,
        CfaPattern::Grbg => CFA::GRBG,
        CfaPattern::Gbrg => CFA::GBRG,
        CfaPattern::Bggr => CFA::BGGR,
    }
}

fn demosaic_for(method: DemosaicMethod) -> Demosaic {
    match method {
        DemosaicMethod::NearestNeighbour => Demosaic::NearestNeighbour,
        DemosaicMethod::Linear => Demosaic::Linear,
        DemosaicMethod::Cubic => Demosaic::Cubic,
    }
}

impl Decoder for BayerDecoder {
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

        let width = self.width as usize;
        let height = self.height as usize;
        let unit = self.format.storage_bytes();
        let src_row = width * unit;
        let order = self.format.byte_order;

        if self.output.layout() == PixelLayout::Gray8 {
            let scaler = &self.scaler;
            for_each_row(&mut self.output, |y, row| {
                unpack_row(&payload[y * src_row..][..src_row], row, unit, order, scaler);
            });
            return Ok(&self.output);
        }

        for (y, row) in self.mosaic.chunks_exact_mut(width).enumerate() {
            unpack_row(&payload[y * src_row..][..src_row], row, unit, order, &self.scaler);
        }

        let mut raster = RasterMut::new(width, height, RasterDepth::Depth8, self.output.pixels_mut());
        bayer::run_demosaic(
            &mut Cursor::new(&self.mosaic[..]),
            BayerDepth::Depth8,
            self.cfa,
            self.method,
            &mut raster,
        )
        .map_err(|e| FormatError::ConversionFailed(format!("demosaic failed: {:?}", e)))?;
        Ok(&self.output)
    }
}
