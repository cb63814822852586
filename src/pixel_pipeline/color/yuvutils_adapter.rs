use tracing::trace;
use yuvutils_rs::{YuvError, YuvPackedImage, YuvRange, YuvStandardMatrix};

use super::ColorConversionAdapter;
use crate::pixel_pipeline::common::error::ConversionError;
use crate::pixel_pipeline::config::{ColorMatrix, ColorRange, DecoderConfig};
use crate::pixel_pipeline::format::ChromaOrder;
use crate::pixel_pipeline::image::PixelLayout;

/// SIMD 4:2:2 to RGB conversion backed by `yuvutils-rs`.
///
/// Supports RGB24 and RGBA32 destinations.
#[derive(Debug, Clone, Copy)]
pub struct YuvUtilsAdapter {
    range: ColorRange,
    matrix: ColorMatrix,
}

impl Default for YuvUtilsAdapter {
    fn default() -> Self {
        Self::new(ColorRange::Limited, ColorMatrix::Bt709)
    }
}

impl YuvUtilsAdapter {
    pub fn new(range: ColorRange, matrix: ColorMatrix) -> Self {
        Self { range, matrix }
    }

    pub fn from_config(config: &DecoderConfig) -> Self {
        Self::new(config.color_range, config.color_matrix)
    }

    fn yuv_range(&self) -> YuvRange {
        match self.range {
            ColorRange::Limited => YuvRange::Limited,
            ColorRange::Full => YuvRange::Full,
        }
    }

    fn yuv_matrix(&self) -> YuvStandardMatrix {
        match self.matrix {
            ColorMatrix::Bt601 => YuvStandardMatrix::Bt601,
            ColorMatrix::Bt709 => YuvStandardMatrix::Bt709,
            ColorMatrix::Bt2020 => YuvStandardMatrix::Bt2020,
        }
    }
}

impl ColorConversionAdapter for YuvUtilsAdapter {
    fn name(&self) -> &'static str {
        "yuvutils"
    }

    fn convert(
        &self,
        src: &[u8],
        source: ChromaOrder,
        width: u32,
        height: u32,
        destination: PixelLayout,
        dst: &mut [u8],
        dst_stride: usize,
    ) -> Result<(), ConversionError> {
        type PackedToRgb = fn(&YuvPackedImage<u8>, &mut [u8], u32, YuvRange, YuvStandardMatrix) -> Result<(), YuvError>;
        let convert_fn: PackedToRgb = match (source, destination) {
            (ChromaOrder::Uyvy, PixelLayout::Rgb24) => yuvutils_rs::uyvy422_to_rgb,
            (ChromaOrder::Uyvy, PixelLayout::Rgba32) => yuvutils_rs::uyvy422_to_rgba,
            (ChromaOrder::Yuyv, PixelLayout::Rgb24) => yuvutils_rs::yuyv422_to_rgb,
            (ChromaOrder::Yuyv, PixelLayout::Rgba32) => yuvutils_rs::yuyv422_to_rgba,
            (_, PixelLayout::Gray8) => {
                return Err(ConversionError::UnsupportedPairing {
                    source_format: source.name(),
                    destination: destination.name(),
                });
            }
        };
        if width == 0 || height == 0 {
            return Ok(());
        }

        let rows = height as usize;
        let src_stride = width as usize * 2;
        let src_len = src_stride * rows;
        if src.len() < src_len {
            return Err(ConversionError::SizeMismatch {
                needed: src_len,
                available: src.len(),
            });
        }
        let row_bytes = width as usize * destination.bytes_per_pixel();
        let dst_len = dst_stride.max(row_bytes) * rows;
        if dst_stride < row_bytes || dst.len() < dst_len {
            return Err(ConversionError::SizeMismatch {
                needed: dst_len,
                available: dst.len(),
            });
        }
        let (Ok(yuy_stride), Ok(rgb_stride)) = (u32::try_from(src_stride), u32::try_from(dst_stride)) else {
            return Err(ConversionError::Backend("row stride exceeds u32".to_string()));
        };

        trace!(
            "Converting {}x{} {} -> {}",
            width,
            height,
            source.name(),
            destination.name()
        );
        let packed = YuvPackedImage {
            yuy: &src[..src_len],
            yuy_stride,
            width,
            height,
        };
        convert_fn(
            &packed,
            &mut dst[..dst_len],
            rgb_stride,
            self.yuv_range(),
            self.yuv_matrix(),
        )
        .map_err(|e| ConversionError::Backend(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mid-gray with neutral chroma; identical bytes for either order.
    fn gray_frame(width: usize, height: usize) -> Vec<u8> {
        vec![128u8; width * height * 2]
    }

    #[test]
    fn test_neutral_chroma_gives_gray_rgb() {
        let adapter = YuvUtilsAdapter::new(ColorRange::Full, ColorMatrix::Bt601);
        for order in [ChromaOrder::Uyvy, ChromaOrder::Yuyv] {
            let src = gray_frame(8, 2);
            let mut dst = vec![0u8; 8 * 3 * 2];
            adapter
                .convert(&src, order, 8, 2, PixelLayout::Rgb24, &mut dst, 8 * 3)
                .unwrap();
            for px in dst.chunks_exact(3) {
                assert!(px.iter().all(|&c| c.abs_diff(128) <= 2), "{px:?}");
            }
        }
    }

    #[test]
    fn test_limited_range_expands_black_and_white() {
        let adapter = YuvUtilsAdapter::default();
        // UYVY: Y 16 (black) then Y 235 (white) with neutral chroma
        let src = [128u8, 16, 128, 235].repeat(4);
        let mut dst = vec![0u8; 8 * 3];
        adapter
            .convert(&src, ChromaOrder::Uyvy, 8, 1, PixelLayout::Rgb24, &mut dst, 8 * 3)
            .unwrap();
        for (i, px) in dst.chunks_exact(3).enumerate() {
            let expected = if i % 2 == 0 { 0 } else { 255 };
            assert!(px.iter().all(|&c| c.abs_diff(expected) <= 2), "pixel {i}: {px:?}");
        }
    }

    #[test]
    fn test_gray_destination_is_unsupported() {
        let adapter = YuvUtilsAdapter::default();
        let src = gray_frame(2, 1);
        let mut dst = vec![0u8; 2];
        let result = adapter.convert(&src, ChromaOrder::Uyvy, 2, 1, PixelLayout::Gray8, &mut dst, 2);
        assert_eq!(
            result,
            Err(ConversionError::UnsupportedPairing {
                source_format: "UYVY",
                destination: "Gray8"
            })
        );
    }

    #[test]
    fn test_short_destination_is_size_mismatch() {
        let adapter = YuvUtilsAdapter::default();
        let src = gray_frame(4, 2);
        let mut dst = vec![0u8; 4 * 3 * 2 - 1];
        let result = adapter.convert(&src, ChromaOrder::Yuyv, 4, 2, PixelLayout::Rgb24, &mut dst, 12);
        assert!(matches!(result, Err(ConversionError::SizeMismatch { .. })));
    }
}
