//! IEEE-754 single-precision float ↔ big-endian byte codec.
//!
//! Treats the float purely as its bit pattern: NaNs and infinities
//! round-trip exactly, including the NaN payload and sign bit.

/// Encodes `value`'s bit pattern as 4 big-endian bytes.
pub fn f32_to_be(value: f32) -> [u8; 4] {
    value.to_bits().to_be_bytes()
}

/// Decodes 4 big-endian bytes back into an `f32` bit pattern.
pub fn f32_from_be(bytes: [u8; 4]) -> f32 {
    f32::from_bits(u32::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trips_bit_exact(v: f32) {
        let got = f32_from_be(f32_to_be(v));
        assert_eq!(got.to_bits(), v.to_bits(), "round-trip changed bits of {v}");
    }

    #[test]
    fn round_trips_notable_values() {
        for v in [
            0.0f32,
            -0.0f32,
            1.0,
            -1.0,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
            f32::MIN_POSITIVE,
            -f32::MIN_POSITIVE,
            f32::MAX,
            f32::MIN,
            55.0,
            -75.0,
        ] {
            round_trips_bit_exact(v);
        }
    }

    #[test]
    fn encodes_big_endian() {
        // 1.0f32 bit pattern is 0x3F800000.
        assert_eq!(f32_to_be(1.0), [0x3F, 0x80, 0x00, 0x00]);
        assert_eq!(f32_from_be([0x3F, 0x80, 0x00, 0x00]), 1.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn round_trips_any_bit_pattern(bits in any::<u32>()) {
            let v = f32::from_bits(bits);
            prop_assert_eq!(f32_from_be(f32_to_be(v)).to_bits(), bits);
        }
    }
}
