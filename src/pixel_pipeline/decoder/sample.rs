/// Maps raw `W`-bit samples onto 8-bit luma.
///
/// Unsigned samples keep their most significant 8 bits (narrower samples are
/// stretched over 0..=255). Signed samples are sign-extended from `W` bits and
/// offset by `2^(W-1)` before the same scaling; zero lands on 128.
///
/// The mapping is tabulated once per decoder; lookups mask the raw value to
/// `W` bits first, so stray high bits in a storage unit are ignored.
#[derive(Debug, Clone)]
pub struct SampleScaler {
    lut: Vec<u8>,
    mask: u32,
}

impl SampleScaler {
    /// `bits` is clamped to 1..=16.
    pub fn new(bits: u8, signed: bool) -> Self {
        let bits = u32::from(bits.clamp(1, 16));
        let mask = (1u32 << bits) - 1;
        let lut = (0..=mask).map(|raw| scale_sample(raw, bits, signed)).collect();
        Self { lut, mask }
    }

    #[inline]
    pub fn map(&self, raw: u32) -> u8 {
        self.lut[(raw & self.mask) as usize]
    }
}

fn scale_sample(raw: u32, bits: u32, signed: bool) -> u8 {
    let max = (1u32 << bits) - 1;
    let raw = raw & max;
    let value = if signed {
        let shift = 32 - bits;
        let extended = ((raw << shift) as i32) >> shift;
        (extended + (1 << (bits - 1))) as u32
    } else {
        raw
    };
    if bits >= 8 {
        (value >> (bits - 8)) as u8
    } else {
        ((value * 255 + max / 2) / max) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_keeps_top_bits() {
        let scaler = SampleScaler::new(12, false);
        assert_eq!(scaler.map(0), 0);
        assert_eq!(scaler.map(0x0ff0), 0xff);
        assert_eq!(scaler.map(0x0800), 0x80);
        assert_eq!(scaler.map(0x0fff), 0xff);
    }

    #[test]
    fn test_stray_high_bits_are_masked() {
        let scaler = SampleScaler::new(10, false);
        assert_eq!(scaler.map(0xfc00), 0);
        assert_eq!(scaler.map(0xffff), 0xff);
    }

    #[test]
    fn test_signed_midpoint_is_mid_gray() {
        for bits in [8u8, 10, 12, 14, 16] {
            let scaler = SampleScaler::new(bits, true);
            let b = u32::from(bits);
            let most_negative = 1u32 << (b - 1);
            let most_positive = most_negative - 1;
            assert_eq!(scaler.map(0), 128, "zero at {bits} bits");
            assert_eq!(scaler.map(most_negative), 0, "minimum at {bits} bits");
            assert_eq!(scaler.map(most_positive), 255, "maximum at {bits} bits");
        }
    }

    #[test]
    fn test_narrow_samples_stretch_to_full_range() {
        let scaler = SampleScaler::new(4, false);
        assert_eq!(scaler.map(0), 0);
        assert_eq!(scaler.map(15), 255);
        assert_eq!(scaler.map(8), 136);
    }

    #[test]
    fn test_mono8_unsigned_is_identity() {
        let scaler = SampleScaler::new(8, false);
        for v in 0..=255u32 {
            assert_eq!(u32::from(scaler.map(v)), v);
        }
    }
}
