use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{colortype, Compression, TiffEncoder};
use tracing::{debug, info};

use crate::pixel_pipeline::common::error::RecordError;
use crate::pixel_pipeline::image::{DecodedImage, PixelLayout};

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression, balanced level
    Deflate,
}

impl RecordCompression {
    fn to_tiff(self) -> Compression {
        match self {
            RecordCompression::None => Compression::Uncompressed,
            RecordCompression::Lzw => Compression::Lzw,
            RecordCompression::Deflate => Compression::Deflate(DeflateLevel::Balanced),
        }
    }
}

/// Writes decoded frames as single-page TIFF images.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiffRecorder {
    compression: RecordCompression,
}

impl TiffRecorder {
    pub fn new(compression: RecordCompression) -> Self {
        Self { compression }
    }

    pub fn compression(&self) -> RecordCompression {
        self.compression
    }

    pub fn write(&self, image: &DecodedImage, output: &mut dyn Write) -> Result<(), RecordError> {
        if image.is_empty() {
            return Err(RecordError::EmptyImage(image.width(), image.height()));
        }
        debug!(
            "Encoding {} TIFF image: {}x{}",
            image.layout().name(),
            image.width(),
            image.height()
        );

        let pixels = packed_rows(image);
        let mut buffer = Vec::new();
        let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
            .map_err(|e| RecordError::Encode(e.to_string()))?
            .with_compression(self.compression.to_tiff());
        let (width, height) = (image.width(), image.height());
        let written = match image.layout() {
            PixelLayout::Gray8 => encoder.write_image::<colortype::Gray8>(width, height, &pixels),
            PixelLayout::Rgb24 => encoder.write_image::<colortype::RGB8>(width, height, &pixels),
            PixelLayout::Rgba32 => encoder.write_image::<colortype::RGBA8>(width, height, &pixels),
        };
        written.map_err(|e| RecordError::Encode(e.to_string()))?;
        drop(encoder);

        output.write_all(&buffer)?;
        debug!("TIFF encoding complete ({} bytes)", buffer.len());
        Ok(())
    }

    pub fn write_file<P: AsRef<Path>>(&self, image: &DecodedImage, path: P) -> Result<(), RecordError> {
        let path = path.as_ref();
        let mut output = BufWriter::new(File::create(path)?);
        self.write(image, &mut output)?;
        output.flush()?;
        info!(output = %path.display(), "Recorded {}x{} frame", image.width(), image.height());
        Ok(())
    }
}

/// Pixel rows without stride padding.
fn packed_rows(image: &DecodedImage) -> Cow<'_, [u8]> {
    let row_bytes = image.row_bytes();
    if image.stride() == row_bytes {
        return Cow::Borrowed(image.pixels());
    }
    Cow::Owned(
        image
            .pixels()
            .chunks(image.stride())
            .flat_map(|row| &row[..row_bytes])
            .copied()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tiff::decoder::{Decoder as TiffDecoder, DecodingResult};

    use super::*;

    fn read_back(bytes: Vec<u8>) -> (u32, u32, Vec<u8>) {
        let mut decoder = TiffDecoder::new(Cursor::new(bytes)).unwrap();
        let (width, height) = decoder.dimensions().unwrap();
        match decoder.read_image().unwrap() {
            DecodingResult::U8(data) => (width, height, data),
            other => panic!("unexpected sample type: {:?}", std::mem::discriminant(&other)),
        }
    }

    #[test]
    fn test_gray_image_round_trips() {
        let pixels: Vec<u8> = (0..12).collect();
        let image = DecodedImage::from_parts(pixels.clone(), 4, 3, 4, PixelLayout::Gray8).unwrap();

        let mut output = Vec::new();
        TiffRecorder::default().write(&image, &mut output).unwrap();
        assert_eq!(read_back(output), (4, 3, pixels));
    }

    #[test]
    fn test_padded_stride_is_repacked() {
        // 2x2 RGB with two bytes of padding per row
        let pixels = vec![1, 2, 3, 4, 5, 6, 0xee, 0xee, 7, 8, 9, 10, 11, 12, 0xee, 0xee];
        let image = DecodedImage::from_parts(pixels, 2, 2, 8, PixelLayout::Rgb24).unwrap();

        let mut output = Vec::new();
        TiffRecorder::new(RecordCompression::Lzw).write(&image, &mut output).unwrap();
        assert_eq!(read_back(output), (2, 2, (1..=12).collect()));
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let image = DecodedImage::new(0, 10, PixelLayout::Gray8).unwrap();
        let result = TiffRecorder::default().write(&image, &mut Vec::new());
        assert!(matches!(result, Err(RecordError::EmptyImage(0, 10))));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.tiff");
        let image = DecodedImage::from_parts(vec![9; 16], 2, 2, 8, PixelLayout::Rgba32).unwrap();

        TiffRecorder::new(RecordCompression::Deflate).write_file(&image, &path).unwrap();
        let (width, height, data) = read_back(fs::read(&path).unwrap());
        assert_eq!((width, height), (2, 2));
        assert_eq!(data, vec![9; 16]);
    }
}
