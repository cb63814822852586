//! Pixel format descriptor types

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::pixel_pipeline::common::error::{FormatError, Result};

/// Opaque pixel format identifier as reported by the camera.
///
/// Built-in formats use the GenICam PFNC / GigE Vision 32-bit codes. Plugins are
/// free to pick any value that does not collide with a registered one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelFormatId(pub u32);

impl PixelFormatId {
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    pub const fn code(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PixelFormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// How samples are laid out in the raw byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packing {
    /// One sample per byte-aligned storage unit of `ceil(bits / 8)` bytes.
    Unpacked,
    /// Samples packed back to back in a continuous bit stream.
    TightPacked,
    /// GigE Vision group packing: two samples in three bytes.
    GroupPacked,
}

/// Byte order of multi-byte samples. For tight packing this also fixes the bit
/// order of the stream (little-endian reads LSB first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

/// Color filter array arrangement, named after the top-left 2x2 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CfaPattern {
    Rggb,
    Grbg,
    Gbrg,
    Bggr,
}

/// Byte order inside a 4:2:2 macropixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromaOrder {
    /// U Y0 V Y1
    Uyvy,
    /// Y0 U Y1 V
    Yuyv,
}

impl ChromaOrder {
    /// Byte offset of the first luma sample inside a macropixel.
    pub const fn luma_offset(self) -> usize {
        match self {
            ChromaOrder::Uyvy => 1,
            ChromaOrder::Yuyv => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ChromaOrder::Uyvy => "UYVY",
            ChromaOrder::Yuyv => "YUYV",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    Yuv422(ChromaOrder),
    Bayer(CfaPattern),
}

/// Immutable description of one sensor pixel encoding.
///
/// Two descriptors are equal when their identifiers are equal; the remaining
/// fields describe the encoding but take no part in identity.
#[derive(Debug, Clone, Copy)]
pub struct FormatDescriptor {
    pub id: PixelFormatId,
    pub name: &'static str,
    pub bits_per_sample: u8,
    pub signed: bool,
    pub packing: Packing,
    pub layout: ChannelLayout,
    pub byte_order: ByteOrder,
}

impl FormatDescriptor {
    /// Unsigned little-endian monochrome format.
    pub const fn mono(id: u32, name: &'static str, bits_per_sample: u8, packing: Packing) -> Self {
        Self {
            id: PixelFormatId(id),
            name,
            bits_per_sample,
            signed: false,
            packing,
            layout: ChannelLayout::Mono,
            byte_order: ByteOrder::LittleEndian,
        }
    }

    pub const fn bayer(id: u32, name: &'static str, bits_per_sample: u8, cfa: CfaPattern) -> Self {
        Self {
            id: PixelFormatId(id),
            name,
            bits_per_sample,
            signed: false,
            packing: Packing::Unpacked,
            layout: ChannelLayout::Bayer(cfa),
            byte_order: ByteOrder::LittleEndian,
        }
    }

    pub const fn yuv422(id: u32, name: &'static str, order: ChromaOrder) -> Self {
        Self {
            id: PixelFormatId(id),
            name,
            bits_per_sample: 8,
            signed: false,
            packing: Packing::Unpacked,
            layout: ChannelLayout::Yuv422(order),
            byte_order: ByteOrder::LittleEndian,
        }
    }

    pub const fn with_signed(mut self, signed: bool) -> Self {
        self.signed = signed;
        self
    }

    pub const fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn is_grayscale(&self) -> bool {
        matches!(self.layout, ChannelLayout::Mono)
    }

    /// Size in bytes of one storage unit for unpacked samples.
    pub fn storage_bytes(&self) -> usize {
        usize::from(self.bits_per_sample).div_ceil(8)
    }

    /// Minimum number of bytes a frame of the given geometry occupies.
    ///
    /// Returns 0 when either dimension is zero. Sizes that do not fit in
    /// `usize` saturate to `usize::MAX`, which no buffer can satisfy.
    pub fn expected_byte_size(&self, width: u32, height: u32) -> usize {
        let pixels = u128::from(width) * u128::from(height);
        let bits = u128::from(self.bits_per_sample);
        let bytes = match (self.packing, self.layout) {
            (Packing::TightPacked, _) => (pixels * bits).div_ceil(8),
            (Packing::GroupPacked, _) => pixels.div_ceil(2) * 3,
            // Y plus one of U/V per pixel
            (Packing::Unpacked, ChannelLayout::Yuv422(_)) => pixels * 2 * bits.div_ceil(8),
            (Packing::Unpacked, _) => pixels * bits.div_ceil(8),
        };
        usize::try_from(bytes).unwrap_or(usize::MAX)
    }

    /// Rejects descriptors that no decoder can interpret unambiguously.
    pub fn validate(&self) -> Result<()> {
        let bits = self.bits_per_sample;
        if bits == 0 || bits > 16 {
            return Err(self.invalid(format!("{bits} bits per sample is outside 1..=16")));
        }

        match self.layout {
            ChannelLayout::Mono => {
                if self.packing == Packing::GroupPacked && bits != 10 && bits != 12 {
                    return Err(self.invalid(format!(
                        "group packing is defined for 10 and 12 bit samples, not {bits}"
                    )));
                }
                if self.packing == Packing::GroupPacked && self.byte_order == ByteOrder::BigEndian {
                    return Err(self.invalid("group packing has no big-endian variant".to_string()));
                }
            }
            ChannelLayout::Yuv422(_) => {
                if bits != 8 {
                    return Err(self.invalid(format!("4:2:2 chroma expects 8 bit samples, not {bits}")));
                }
                if self.packing != Packing::Unpacked {
                    return Err(self.invalid("4:2:2 chroma must be byte aligned".to_string()));
                }
                if self.signed {
                    return Err(self.invalid("4:2:2 chroma samples are unsigned".to_string()));
                }
            }
            ChannelLayout::Bayer(_) => {
                if self.packing != Packing::Unpacked {
                    return Err(self.invalid("packed bayer mosaics are not supported".to_string()));
                }
                if self.signed {
                    return Err(self.invalid("bayer samples are unsigned".to_string()));
                }
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: String) -> FormatError {
        FormatError::InvalidDescriptor(format!("{} ({}): {}", self.name, self.id, reason))
    }
}

impl PartialEq for FormatDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FormatDescriptor {}

impl Hash for FormatDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tight_packed_size_rounds_up() {
        let format = FormatDescriptor::mono(0x010a0046, "Mono10p", 10, Packing::TightPacked);
        assert_eq!(format.expected_byte_size(4, 1), 5);
        assert_eq!(format.expected_byte_size(3, 1), 4);
        assert_eq!(format.expected_byte_size(8, 2), 20);
    }

    #[test]
    fn test_group_packed_size() {
        let format = FormatDescriptor::mono(0x010c0006, "Mono12Packed", 12, Packing::GroupPacked);
        assert_eq!(format.expected_byte_size(2, 1), 3);
        assert_eq!(format.expected_byte_size(3, 1), 6);
        assert_eq!(format.expected_byte_size(4, 4), 24);
    }

    #[test]
    fn test_unpacked_and_chroma_sizes() {
        let mono16 = FormatDescriptor::mono(0x01100007, "Mono16", 16, Packing::Unpacked);
        assert_eq!(mono16.expected_byte_size(10, 10), 200);

        let mono8 = FormatDescriptor::mono(0x01080001, "Mono8", 8, Packing::Unpacked);
        assert_eq!(mono8.expected_byte_size(10, 10), 100);

        let uyvy = FormatDescriptor::yuv422(0x0210001f, "YUV422Packed", ChromaOrder::Uyvy);
        assert_eq!(uyvy.expected_byte_size(4, 2), 16);
    }

    #[test]
    fn test_zero_geometry_needs_no_bytes() {
        let format = FormatDescriptor::mono(0x010a0046, "Mono10p", 10, Packing::TightPacked);
        assert_eq!(format.expected_byte_size(0, 480), 0);
        assert_eq!(format.expected_byte_size(640, 0), 0);
    }

    #[test]
    fn test_huge_geometry_saturates() {
        let format = FormatDescriptor::mono(0x01100007, "Mono16", 16, Packing::Unpacked);
        assert_eq!(format.expected_byte_size(u32::MAX, u32::MAX), usize::MAX);
    }

    #[test]
    fn test_equality_is_by_identifier() {
        let a = FormatDescriptor::mono(0x01100005, "Mono12", 12, Packing::Unpacked);
        let b = FormatDescriptor::mono(0x01100005, "Renamed", 16, Packing::TightPacked);
        let c = FormatDescriptor::mono(0x01100007, "Mono12", 12, Packing::Unpacked);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_grayscale_query() {
        assert!(FormatDescriptor::mono(1, "m", 8, Packing::Unpacked).is_grayscale());
        assert!(!FormatDescriptor::yuv422(2, "y", ChromaOrder::Yuyv).is_grayscale());
        assert!(!FormatDescriptor::bayer(3, "b", 8, CfaPattern::Rggb).is_grayscale());
    }

    #[test]
    fn test_validate_rejects_ambiguous_descriptors() {
        let zero_bits = FormatDescriptor::mono(1, "Zero", 0, Packing::Unpacked);
        assert!(matches!(zero_bits.validate(), Err(FormatError::InvalidDescriptor(_))));

        let wide = FormatDescriptor::mono(1, "Wide", 24, Packing::Unpacked);
        assert!(matches!(wide.validate(), Err(FormatError::InvalidDescriptor(_))));

        let group14 = FormatDescriptor::mono(1, "Mono14Packed", 14, Packing::GroupPacked);
        assert!(matches!(group14.validate(), Err(FormatError::InvalidDescriptor(_))));

        let group_be = FormatDescriptor::mono(1, "Mono12Packed", 12, Packing::GroupPacked)
            .with_byte_order(ByteOrder::BigEndian);
        assert!(matches!(group_be.validate(), Err(FormatError::InvalidDescriptor(_))));

        let mut signed_yuv = FormatDescriptor::yuv422(1, "YUV", ChromaOrder::Uyvy);
        signed_yuv.signed = true;
        assert!(matches!(signed_yuv.validate(), Err(FormatError::InvalidDescriptor(_))));

        let mut packed_bayer = FormatDescriptor::bayer(1, "BayerRG10p", 10, CfaPattern::Rggb);
        packed_bayer.packing = Packing::TightPacked;
        assert!(matches!(packed_bayer.validate(), Err(FormatError::InvalidDescriptor(_))));
    }

    #[test]
    fn test_validate_accepts_standard_descriptors() {
        let formats = [
            FormatDescriptor::mono(1, "Mono8s", 8, Packing::Unpacked).with_signed(true),
            FormatDescriptor::mono(2, "Mono12Packed", 12, Packing::GroupPacked),
            FormatDescriptor::mono(3, "Mono14p", 14, Packing::TightPacked)
                .with_byte_order(ByteOrder::BigEndian),
            FormatDescriptor::bayer(4, "BayerBG16", 16, CfaPattern::Bggr),
            FormatDescriptor::yuv422(5, "YUV422Packed", ChromaOrder::Uyvy),
        ];
        for format in formats {
            assert!(format.validate().is_ok(), "{format} should be valid");
        }
    }
}
