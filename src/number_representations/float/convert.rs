use log::debug;

use crate::error::InexactConversionError;
use crate::number_representations::float::{
    binary16::{Binary16, EXP_MASK, QUIET_BIT, SIGN_MASK, SIGNIFICAND_MASK},
    unpacked::UnpackedBinary16,
};

const F64_FRACTION_BITS: u32 = 52;
const F64_FRACTION_MASK: u64 = (1 << F64_FRACTION_BITS) - 1;
const F64_EXP_MASK: u64 = 0x7FF << F64_FRACTION_BITS;
// exponent of the lowest f64 fraction bit when the biased exponent is 0
const F64_MIN_QUANTUM: i32 = -1074;

const F32_FRACTION_BITS: u32 = 23;
const F32_FRACTION_MASK: u32 = (1 << F32_FRACTION_BITS) - 1;
const F32_EXP_MASK: u32 = 0xFF << F32_FRACTION_BITS;
const F32_MIN_QUANTUM: i32 = -149;

impl Binary16 {
    /// Exact widening to `f32`.
    pub fn to_f32(self) -> f32 {
        let decoded = self.decode();
        let sign = ((self.to_raw_bits() & SIGN_MASK) as u32) << 16;
        if decoded.is_nan || decoded.is_infinite {
            let payload = (self.significand_field() as u32) << (F32_FRACTION_BITS - 10);
            return f32::from_bits(sign | F32_EXP_MASK | payload);
        }
        // an 11-bit integer times a normal power of two, nothing to round
        let magnitude = decoded.significand as f32 * pow2_f32(decoded.exponent);
        f32::from_bits(sign | magnitude.to_bits())
    }

    /// Exact widening to `f64`.
    pub fn to_f64(self) -> f64 {
        let decoded = self.decode();
        let sign = ((self.to_raw_bits() & SIGN_MASK) as u64) << 48;
        if decoded.is_nan || decoded.is_infinite {
            let payload = (self.significand_field() as u64) << (F64_FRACTION_BITS - 10);
            return f64::from_bits(sign | F64_EXP_MASK | payload);
        }
        let magnitude = decoded.significand as f64 * pow2_f64(decoded.exponent);
        f64::from_bits(sign | magnitude.to_bits())
    }

    /// Nearest binary16 to `value`, ties to even.
    ///
    /// NaNs keep their sign and the top ten payload bits, and come out quiet.
    pub fn from_f64(value: f64) -> Self {
        let bits = value.to_bits();
        let sign = bits >> 63 == 1;
        let biased = ((bits & F64_EXP_MASK) >> F64_FRACTION_BITS) as i32;
        let fraction = bits & F64_FRACTION_MASK;

        if biased == 0x7FF {
            let payload = (fraction >> (F64_FRACTION_BITS - 10)) as u16;
            return special_from_parts(sign, fraction != 0, payload);
        }

        let unpacked = if biased == 0 {
            UnpackedBinary16::new(sign, F64_MIN_QUANTUM, fraction as u128)
        } else {
            UnpackedBinary16::new(
                sign,
                biased - 1 + F64_MIN_QUANTUM,
                (fraction | (1 << F64_FRACTION_BITS)) as u128,
            )
        };
        unpacked.encode()
    }

    /// Nearest binary16 to `value`, ties to even.
    pub fn from_f32(value: f32) -> Self {
        let bits = value.to_bits();
        let sign = bits >> 31 == 1;
        let biased = ((bits & F32_EXP_MASK) >> F32_FRACTION_BITS) as i32;
        let fraction = bits & F32_FRACTION_MASK;

        if biased == 0xFF {
            let payload = (fraction >> (F32_FRACTION_BITS - 10)) as u16;
            return special_from_parts(sign, fraction != 0, payload);
        }

        let unpacked = if biased == 0 {
            UnpackedBinary16::new(sign, F32_MIN_QUANTUM, fraction as u128)
        } else {
            UnpackedBinary16::new(
                sign,
                biased - 1 + F32_MIN_QUANTUM,
                (fraction | (1 << F32_FRACTION_BITS)) as u128,
            )
        };
        unpacked.encode()
    }

    /// Nearest binary16 to `value`. Magnitudes of 65520 and above saturate to infinity.
    pub fn from_i64(value: i64) -> Self {
        UnpackedBinary16::new(value < 0, 0, value.unsigned_abs() as u128).encode()
    }

    pub fn from_i32(value: i32) -> Self {
        Self::from_i64(value as i64)
    }

    pub fn from_u64(value: u64) -> Self {
        UnpackedBinary16::new(false, 0, value as u128).encode()
    }

    /// Like `from_f64`, but refuses any input that the narrowing would change.
    ///
    /// NaN inputs are accepted; their payload is not compared.
    pub fn from_f64_exact(value: f64) -> Result<Self, InexactConversionError> {
        let narrowed = Self::from_f64(value);
        if value.is_nan() || narrowed.to_f64().to_bits() == value.to_bits() {
            Ok(narrowed)
        } else {
            debug!(
                "rejecting inexact narrowing of {} to binary16 {:#06x}",
                value,
                narrowed.to_raw_bits()
            );
            Err(InexactConversionError::new(value, narrowed))
        }
    }

    pub fn from_f32_exact(value: f32) -> Result<Self, InexactConversionError> {
        let narrowed = Self::from_f32(value);
        if value.is_nan() || narrowed.to_f32().to_bits() == value.to_bits() {
            Ok(narrowed)
        } else {
            debug!(
                "rejecting inexact narrowing of {} to binary16 {:#06x}",
                value,
                narrowed.to_raw_bits()
            );
            Err(InexactConversionError::new(value as f64, narrowed))
        }
    }

    pub fn from_i64_exact(value: i64) -> Result<Self, InexactConversionError> {
        let narrowed = Self::from_i64(value);
        if narrowed.is_finite() && narrowed.to_f64() == value as f64 {
            Ok(narrowed)
        } else {
            debug!("rejecting inexact narrowing of integer {} to binary16", value);
            Err(InexactConversionError::new(value as f64, narrowed))
        }
    }

    /// Truncates toward zero and saturates at the `i64` range; NaN gives 0.
    pub fn to_i64_saturating(self) -> i64 {
        self.to_f64() as i64
    }

    /// Truncates toward zero and saturates at the `i32` range; NaN gives 0.
    pub fn to_i32_saturating(self) -> i32 {
        self.to_f64() as i32
    }
}

fn special_from_parts(sign: bool, is_nan: bool, payload: u16) -> Binary16 {
    let sign_bits = if sign { SIGN_MASK } else { 0 };
    if is_nan {
        Binary16::from_bits(sign_bits | EXP_MASK | QUIET_BIT | (payload & SIGNIFICAND_MASK))
    } else {
        Binary16::from_bits(sign_bits | EXP_MASK)
    }
}

fn pow2_f64(exponent: i32) -> f64 {
    f64::from_bits(((exponent + 1023) as u64) << F64_FRACTION_BITS)
}

fn pow2_f32(exponent: i32) -> f32 {
    f32::from_bits(((exponent + 127) as u32) << F32_FRACTION_BITS)
}

impl From<f64> for Binary16 {
    fn from(value: f64) -> Self {
        Binary16::from_f64(value)
    }
}

impl From<f32> for Binary16 {
    fn from(value: f32) -> Self {
        Binary16::from_f32(value)
    }
}

impl From<u8> for Binary16 {
    fn from(value: u8) -> Self {
        Binary16::from_u64(value as u64)
    }
}

impl From<i8> for Binary16 {
    fn from(value: i8) -> Self {
        Binary16::from_i64(value as i64)
    }
}

impl From<Binary16> for f64 {
    fn from(value: Binary16) -> Self {
        value.to_f64()
    }
}

impl From<Binary16> for f32 {
    fn from(value: Binary16) -> Self {
        value.to_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    /// Compares the f32 narrowing against the `half` crate.
    fn validate_from_f32(value: f32) {
        let mine = Binary16::from_f32(value);
        let reference = f16::from_f32(value);

        if value.is_nan() {
            assert!(mine.is_nan(), "NaN input {:#010x} lost its NaN-ness", value.to_bits());
            return;
        }

        if mine.to_raw_bits() != reference.to_bits() {
            println!("Input f32: {} ({:#010x})", value, value.to_bits());
            println!("Mine:      {:#018b}", mine.to_raw_bits());
            println!("Reference: {:#018b}", reference.to_bits());
        }

        assert_eq!(
            mine.to_raw_bits(),
            reference.to_bits(),
            "f32 -> binary16 mismatch for {}",
            value
        );
    }

    #[test]
    fn test_from_f32_against_reference() {
        let test_cases = [
            0.0,
            -0.0,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
            1.0,
            -1.0,
            0.1,
            1.0 / 3.0,
            3.14159,
            -2.71828,
            65504.0,
            65519.0,
            65520.0,
            65535.0,
            1.0e9,
            f32::MAX,
            6.1035156e-5,
            5.9604645e-8,
            2.9802322e-8,
            2.9802326e-8,
            1.0e-10,
            f32::MIN_POSITIVE,
            f32::from_bits(0x0000_0001),
        ];
        for &value in test_cases.iter() {
            validate_from_f32(value);
        }
    }

    #[test]
    fn test_from_f32_sweep_against_reference() {
        // every f32 exponent, a spread of fraction patterns around the rounding bits
        for biased in 0u32..=0xFF {
            for &fraction in &[0u32, 1, 0xFFF, 0x1000, 0x1001, 0x2000, 0x3000, 0x7F_FFFF, 0x40_1000] {
                for sign in [0u32, 1] {
                    let value = f32::from_bits(sign << 31 | biased << 23 | fraction);
                    validate_from_f32(value);
                }
            }
        }
    }

    #[test]
    fn test_widening_is_exact_for_every_pattern() {
        for bits in 0..=u16::MAX {
            let value = Binary16::from_bits(bits);
            let wide = value.to_f64();
            let narrow = value.to_f32();
            let reference = f16::from_bits(bits);

            if value.is_nan() {
                assert!(wide.is_nan() && narrow.is_nan());
                assert_eq!(wide.is_sign_negative(), value.is_sign_negative());
                // NaN survives the trip with its payload
                assert_eq!(Binary16::from_f64(wide).to_raw_bits(), bits | QUIET_BIT);
                continue;
            }

            assert_eq!(narrow.to_bits(), reference.to_f32().to_bits(), "{:#06x}", bits);
            assert_eq!(wide.to_bits(), (narrow as f64).to_bits(), "{:#06x}", bits);
            assert_eq!(Binary16::from_f64(wide).to_raw_bits(), bits);
            assert_eq!(Binary16::from_f32(narrow).to_raw_bits(), bits);
        }
    }

    #[test]
    fn test_from_f64_uses_every_fraction_bit() {
        // 1 + 2^-11 is a tie between 1.0 and 1 + 2^-10; the lowest f64 bit breaks it
        let tie = 1.0 + 2f64.powi(-11);
        assert_eq!(Binary16::from_f64(tie).to_raw_bits(), 0x3C00);
        let above = f64::from_bits(tie.to_bits() + 1);
        assert_eq!(Binary16::from_f64(above).to_raw_bits(), 0x3C01);
        let below = f64::from_bits(tie.to_bits() - 1);
        assert_eq!(Binary16::from_f64(below).to_raw_bits(), 0x3C00);
    }

    #[test]
    fn test_from_f64_boundaries() {
        assert_eq!(Binary16::from_f64(65520.0).to_raw_bits(), 0x7C00);
        assert_eq!(
            Binary16::from_f64(f64::from_bits(65520f64.to_bits() - 1)).to_raw_bits(),
            0x7BFF
        );
        assert_eq!(Binary16::from_f64(-65520.0).to_raw_bits(), 0xFC00);
        assert_eq!(Binary16::from_f64(65488.0).to_raw_bits(), Binary16::from_f64(65472.0).to_raw_bits());
        assert_eq!(Binary16::from_f64(2f64.powi(-25)).to_raw_bits(), 0x0000);
        assert_eq!(Binary16::from_f64(-(2f64.powi(-25))).to_raw_bits(), 0x8000);
        assert_eq!(
            Binary16::from_f64(f64::from_bits(2f64.powi(-25).to_bits() + 1)).to_raw_bits(),
            0x0001
        );
        assert_eq!(Binary16::from_f64(f64::MIN_POSITIVE).to_raw_bits(), 0x0000);
        assert_eq!(Binary16::from_f64(f64::from_bits(1)).to_raw_bits(), 0x0000);
        assert_eq!(Binary16::from_f64(f64::MAX).to_raw_bits(), 0x7C00);
    }

    #[test]
    fn test_from_i64_saturates() {
        assert_eq!(Binary16::from_i64(65520).to_raw_bits(), Binary16::POSITIVE_INFINITY.to_raw_bits());
        assert_eq!(Binary16::from_i64(65519).to_raw_bits(), Binary16::MAX_VALUE.to_raw_bits());
        assert_eq!(Binary16::from_i64(-65520).to_raw_bits(), Binary16::NEGATIVE_INFINITY.to_raw_bits());
        assert_eq!(Binary16::from_i64(-65519).to_raw_bits(), Binary16::LOWEST.to_raw_bits());
        assert_eq!(Binary16::from_i64(i64::MIN).to_raw_bits(), Binary16::NEGATIVE_INFINITY.to_raw_bits());
        assert_eq!(Binary16::from_i64(i64::MAX).to_raw_bits(), Binary16::POSITIVE_INFINITY.to_raw_bits());
        assert_eq!(Binary16::from_u64(u64::MAX).to_raw_bits(), Binary16::POSITIVE_INFINITY.to_raw_bits());
        assert_eq!(Binary16::from_i64(0).to_raw_bits(), 0x0000);
        assert_eq!(Binary16::from_i32(-2049).to_f64(), -2048.0);
        assert_eq!(Binary16::from_i32(2051).to_f64(), 2052.0);
    }

    #[test]
    fn test_from_i64_matches_f64_path_below_2_pow_53() {
        for value in (-70_000i64..=70_000).step_by(7) {
            assert_eq!(
                Binary16::from_i64(value).to_raw_bits(),
                Binary16::from_f64(value as f64).to_raw_bits(),
                "integer {} disagrees with its f64 image",
                value
            );
        }
    }

    #[test]
    fn test_exact_helpers() {
        assert_eq!(Binary16::from_f64_exact(0.5).unwrap().to_raw_bits(), 0x3800);
        assert_eq!(Binary16::from_f64_exact(-0.0).unwrap().to_raw_bits(), 0x8000);
        assert!(Binary16::from_f64_exact(f64::INFINITY).unwrap().is_infinite());
        assert!(Binary16::from_f64_exact(f64::NAN).unwrap().is_nan());

        let error = Binary16::from_f64_exact(0.1).unwrap_err();
        assert_eq!(error.value, 0.1);
        assert_eq!(error.rounded.to_raw_bits(), Binary16::from_f64(0.1).to_raw_bits());
        assert!(Binary16::from_f64_exact(65520.0).is_err());
        assert!(Binary16::from_f64_exact(2f64.powi(-25)).is_err());

        assert!(Binary16::from_f32_exact(1.5).is_ok());
        assert!(Binary16::from_f32_exact(1.0 + f32::EPSILON).is_err());

        assert_eq!(Binary16::from_i64_exact(2048).unwrap().to_f64(), 2048.0);
        assert!(Binary16::from_i64_exact(2049).is_err());
        assert!(Binary16::from_i64_exact(65536).is_err());
    }

    #[test]
    fn test_saturating_integer_narrowing() {
        assert_eq!(Binary16::from_f64(-2.75).to_i64_saturating(), -2);
        assert_eq!(Binary16::MAX_VALUE.to_i32_saturating(), 65504);
        assert_eq!(Binary16::POSITIVE_INFINITY.to_i32_saturating(), i32::MAX);
        assert_eq!(Binary16::NEGATIVE_INFINITY.to_i64_saturating(), i64::MIN);
        assert_eq!(Binary16::NAN.to_i32_saturating(), 0);
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Binary16::from(200u8).to_f32(), 200.0);
        assert_eq!(Binary16::from(-128i8).to_f32(), -128.0);
        let value: Binary16 = 0.25f64.into();
        let wide: f64 = value.into();
        assert_eq!(wide, 0.25);
        let narrow: f32 = Binary16::from(1.5f32).into();
        assert_eq!(narrow, 1.5);
    }
}
