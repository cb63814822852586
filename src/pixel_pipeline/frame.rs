//! Raw frames handed over by the acquisition loop

use crate::pixel_pipeline::common::error::{FormatError, Result};
use crate::pixel_pipeline::format::FormatDescriptor;

/// One captured frame as delivered by the camera.
///
/// The byte buffer is borrowed for the duration of a decode call only.
#[derive(Debug, Clone, Copy)]
pub struct RawFrame<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub format: FormatDescriptor,
}

impl<'a> RawFrame<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32, format: FormatDescriptor) -> Self {
        Self {
            data,
            width,
            height,
            format,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn expected_byte_size(&self) -> usize {
        self.format.expected_byte_size(self.width, self.height)
    }

    /// The bytes a decoder may touch, or `TruncatedFrame` if the buffer is
    /// shorter than the declared geometry and format require.
    pub fn payload(&self) -> Result<&'a [u8]> {
        let expected = self.expected_byte_size();
        self.data.get(..expected).ok_or(FormatError::TruncatedFrame {
            expected,
            actual: self.data.len(),
        })
    }
}
