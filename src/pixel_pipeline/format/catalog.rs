//! Built-in pixel formats
//!
//! Identifiers are the GenICam PFNC / GigE Vision codes cameras report for
//! `PixelFormat`. All multi-byte samples are little-endian.

use super::descriptor::{CfaPattern, ChromaOrder, FormatDescriptor, Packing, PixelFormatId};

pub const MONO_8: FormatDescriptor = FormatDescriptor::mono(0x0108_0001, "Mono8", 8, Packing::Unpacked);
pub const MONO_8_SIGNED: FormatDescriptor =
    FormatDescriptor::mono(0x0108_0002, "Mono8Signed", 8, Packing::Unpacked).with_signed(true);
pub const MONO_10: FormatDescriptor = FormatDescriptor::mono(0x0110_0003, "Mono10", 10, Packing::Unpacked);
pub const MONO_10_PACKED: FormatDescriptor =
    FormatDescriptor::mono(0x010c_0004, "Mono10Packed", 10, Packing::GroupPacked);
pub const MONO_10_P: FormatDescriptor = FormatDescriptor::mono(0x010a_0046, "Mono10p", 10, Packing::TightPacked);
pub const MONO_12: FormatDescriptor = FormatDescriptor::mono(0x0110_0005, "Mono12", 12, Packing::Unpacked);
pub const MONO_12_PACKED: FormatDescriptor =
    FormatDescriptor::mono(0x010c_0006, "Mono12Packed", 12, Packing::GroupPacked);
pub const MONO_12_P: FormatDescriptor = FormatDescriptor::mono(0x010c_0047, "Mono12p", 12, Packing::TightPacked);
pub const MONO_14: FormatDescriptor = FormatDescriptor::mono(0x0110_0025, "Mono14", 14, Packing::Unpacked);
pub const MONO_16: FormatDescriptor = FormatDescriptor::mono(0x0110_0007, "Mono16", 16, Packing::Unpacked);

pub const BAYER_GR_8: FormatDescriptor = FormatDescriptor::bayer(0x0108_0008, "BayerGR8", 8, CfaPattern::Grbg);
pub const BAYER_RG_8: FormatDescriptor = FormatDescriptor::bayer(0x0108_0009, "BayerRG8", 8, CfaPattern::Rggb);
pub const BAYER_GB_8: FormatDescriptor = FormatDescriptor::bayer(0x0108_000a, "BayerGB8", 8, CfaPattern::Gbrg);
pub const BAYER_BG_8: FormatDescriptor = FormatDescriptor::bayer(0x0108_000b, "BayerBG8", 8, CfaPattern::Bggr);
pub const BAYER_GR_10: FormatDescriptor = FormatDescriptor::bayer(0x0110_000c, "BayerGR10", 10, CfaPattern::Grbg);
pub const BAYER_RG_10: FormatDescriptor = FormatDescriptor::bayer(0x0110_000d, "BayerRG10", 10, CfaPattern::Rggb);
pub const BAYER_GB_10: FormatDescriptor = FormatDescriptor::bayer(0x0110_000e, "BayerGB10", 10, CfaPattern::Gbrg);
pub const BAYER_BG_10: FormatDescriptor = FormatDescriptor::bayer(0x0110_000f, "BayerBG10", 10, CfaPattern::Bggr);
pub const BAYER_GR_12: FormatDescriptor = FormatDescriptor::bayer(0x0110_0010, "BayerGR12", 12, CfaPattern::Grbg);
pub const BAYER_RG_12: FormatDescriptor = FormatDescriptor::bayer(0x0110_0011, "BayerRG12", 12, CfaPattern::Rggb);
pub const BAYER_GB_12: FormatDescriptor = FormatDescriptor::bayer(0x0110_0012, "BayerGB12", 12, CfaPattern::Gbrg);
pub const BAYER_BG_12: FormatDescriptor = FormatDescriptor::bayer(0x0110_0013, "BayerBG12", 12, CfaPattern::Bggr);
pub const BAYER_GR_16: FormatDescriptor = FormatDescriptor::bayer(0x0110_002e, "BayerGR16", 16, CfaPattern::Grbg);
pub const BAYER_RG_16: FormatDescriptor = FormatDescriptor::bayer(0x0110_002f, "BayerRG16", 16, CfaPattern::Rggb);
pub const BAYER_GB_16: FormatDescriptor = FormatDescriptor::bayer(0x0110_0030, "BayerGB16", 16, CfaPattern::Gbrg);
pub const BAYER_BG_16: FormatDescriptor = FormatDescriptor::bayer(0x0110_0031, "BayerBG16", 16, CfaPattern::Bggr);

pub const YUV_422_PACKED: FormatDescriptor =
    FormatDescriptor::yuv422(0x0210_001f, "YUV422Packed", ChromaOrder::Uyvy);
pub const YUV_422_YUYV_PACKED: FormatDescriptor =
    FormatDescriptor::yuv422(0x0210_0032, "YUV422_YUYV_Packed", ChromaOrder::Yuyv);

const BUILTIN: &[FormatDescriptor] = &[
    MONO_8,
    MONO_8_SIGNED,
    MONO_10,
    MONO_10_PACKED,
    MONO_10_P,
    MONO_12,
    MONO_12_PACKED,
    MONO_12_P,
    MONO_14,
    MONO_16,
    BAYER_GR_8,
    BAYER_RG_8,
    BAYER_GB_8,
    BAYER_BG_8,
    BAYER_GR_10,
    BAYER_RG_10,
    BAYER_GB_10,
    BAYER_BG_10,
    BAYER_GR_12,
    BAYER_RG_12,
    BAYER_GB_12,
    BAYER_BG_12,
    BAYER_GR_16,
    BAYER_RG_16,
    BAYER_GB_16,
    BAYER_BG_16,
    YUV_422_PACKED,
    YUV_422_YUYV_PACKED,
];

pub fn builtin_formats() -> &'static [FormatDescriptor] {
    BUILTIN
}

impl FormatDescriptor {
    /// Looks up a built-in format by its camera-reported identifier.
    pub fn from_id(id: PixelFormatId) -> Option<FormatDescriptor> {
        BUILTIN.iter().find(|f| f.id == id).copied()
    }

    /// Looks up a built-in format by its GenICam name, ignoring case.
    pub fn from_name(name: &str) -> Option<FormatDescriptor> {
        BUILTIN.iter().find(|f| f.name.eq_ignore_ascii_case(name)).copied()
    }
}
