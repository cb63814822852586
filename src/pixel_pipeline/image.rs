//! Decoded image buffers

use crate::pixel_pipeline::common::error::{FormatError, Result};

/// Standard output pixel layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    Gray8,
    Rgb24,
    Rgba32,
}

impl PixelLayout {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Gray8 => 1,
            PixelLayout::Rgb24 => 3,
            PixelLayout::Rgba32 => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PixelLayout::Gray8 => "Gray8",
            PixelLayout::Rgb24 => "RGB24",
            PixelLayout::Rgba32 => "RGBA32",
        }
    }
}

/// Dense, fixed-stride image in one of the standard [`PixelLayout`]s.
///
/// Always holds `pixels.len() == stride * height` with
/// `stride >= width * layout.bytes_per_pixel()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    stride: usize,
    layout: PixelLayout,
}

impl DecodedImage {
    /// Zero-filled image with tightly packed rows.
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Result<Self> {
        let stride = min_stride(width, height, layout)?;
        Self::with_stride(width, height, layout, stride)
    }

    /// Zero-filled image whose rows are `stride` bytes apart.
    pub fn with_stride(width: u32, height: u32, layout: PixelLayout, stride: usize) -> Result<Self> {
        if stride < min_stride(width, height, layout)? {
            return Err(geometry_error(width, height, "stride is shorter than a row"));
        }
        let len = stride
            .checked_mul(height as usize)
            .ok_or_else(|| geometry_error(width, height, "image size overflows"))?;
        Ok(Self {
            pixels: vec![0; len],
            width,
            height,
            stride,
            layout,
        })
    }

    /// Wraps an existing buffer, checking the layout invariants.
    pub fn from_parts(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        stride: usize,
        layout: PixelLayout,
    ) -> Result<Self> {
        if stride < min_stride(width, height, layout)? {
            return Err(geometry_error(width, height, "stride is shorter than a row"));
        }
        if Some(pixels.len()) != stride.checked_mul(height as usize) {
            return Err(geometry_error(width, height, "pixel buffer does not match stride * height"));
        }
        Ok(Self {
            pixels,
            width,
            height,
            stride,
            layout,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Bytes of one row that carry pixel data, without stride padding.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * self.layout.bytes_per_pixel()
    }

    /// Pixel data of row `y`, without padding.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        self.pixels.get(start..start + self.row_bytes())
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

fn min_stride(width: u32, height: u32, layout: PixelLayout) -> Result<usize> {
    (width as usize)
        .checked_mul(layout.bytes_per_pixel())
        .ok_or_else(|| geometry_error(width, height, "row size overflows"))
}

fn geometry_error(width: u32, height: u32, reason: &'static str) -> FormatError {
    FormatError::InvalidGeometry {
        width,
        height,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_is_tightly_packed() {
        let image = DecodedImage::new(5, 3, PixelLayout::Rgb24).unwrap();
        assert_eq!(image.stride(), 15);
        assert_eq!(image.pixels().len(), 45);
        assert_eq!(image.row(2).unwrap().len(), 15);
        assert!(image.row(3).is_none());
    }

    #[test]
    fn test_padded_stride_keeps_invariant() {
        let image = DecodedImage::with_stride(5, 3, PixelLayout::Gray8, 8).unwrap();
        assert_eq!(image.pixels().len(), 24);
        assert_eq!(image.row(1).unwrap().len(), 5);

        let short = DecodedImage::with_stride(5, 3, PixelLayout::Rgba32, 19);
        assert!(matches!(short, Err(FormatError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_from_parts_checks_length() {
        assert!(DecodedImage::from_parts(vec![0; 12], 4, 3, 4, PixelLayout::Gray8).is_ok());
        assert!(DecodedImage::from_parts(vec![0; 11], 4, 3, 4, PixelLayout::Gray8).is_err());
    }

    #[test]
    fn test_empty_image() {
        let image = DecodedImage::new(0, 10, PixelLayout::Gray8).unwrap();
        assert!(image.is_empty());
        assert!(image.pixels().is_empty());
    }
}
