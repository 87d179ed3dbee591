use std::{cmp::Ordering, num::FpCategory};

pub(crate) const SIGN_MASK: u16 = 0x8000;
pub(crate) const EXP_MASK: u16 = 0x7C00;
pub(crate) const SIGNIFICAND_MASK: u16 = 0x03FF;
pub(crate) const SIGNIFICAND_WIDTH: u32 = 10;
pub(crate) const EXP_BIAS: i32 = 15;
pub(crate) const QUIET_BIT: u16 = 0x0200;

const CANONICAL_NAN_BITS: u16 = 0x7E00;

/// IEEE 754 binary16 value.
///
/// Layout is sign-magnitude: 1 sign bit, 5 exponent bits (bias 15) and
/// 10 significand bits. Every `u16` is a valid value; whether it is a NaN,
/// an infinity, a subnormal or a zero is read off the bits on demand.
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct Binary16 {
    bits: u16,
}

impl Binary16 {
    pub const BYTES: usize = 2;
    pub const SIZE: u32 = 16;
    /// Significand bits including the implicit one.
    pub const PRECISION: u32 = 11;
    pub const MAX_EXPONENT: i32 = 15;
    pub const MIN_EXPONENT: i32 = -14;

    pub const ZERO: Self = Binary16 { bits: 0x0000 };
    pub const NEG_ZERO: Self = Binary16 { bits: SIGN_MASK };
    pub const ONE: Self = Binary16 { bits: 0x3C00 };
    pub const NEG_ONE: Self = Binary16 { bits: 0xBC00 };
    /// Smallest positive subnormal, 2^-24.
    pub const MIN_VALUE: Self = Binary16 { bits: 0x0001 };
    /// Smallest positive normal, 2^-14.
    pub const MIN_NORMAL: Self = Binary16 { bits: 0x0400 };
    /// Largest finite value, (2 - 2^-10) * 2^15 = 65504.
    pub const MAX_VALUE: Self = Binary16 { bits: 0x7BFF };
    /// Most negative finite value, -65504.
    pub const LOWEST: Self = Binary16 { bits: 0xFBFF };
    /// Distance between 1.0 and the next larger value, 2^-10.
    pub const EPSILON: Self = Binary16 { bits: 0x1400 };
    pub const POSITIVE_INFINITY: Self = Binary16 { bits: EXP_MASK };
    pub const NEGATIVE_INFINITY: Self = Binary16 { bits: SIGN_MASK | EXP_MASK };
    pub const NAN: Self = Binary16 {
        bits: CANONICAL_NAN_BITS,
    };

    /// Builds a value from any bit pattern, NaN payloads included.
    pub const fn from_bits(bits: u16) -> Self {
        Binary16 { bits }
    }

    /// The stored bits, untouched.
    pub const fn to_raw_bits(self) -> u16 {
        self.bits
    }

    /// The stored bits, except that every NaN reads as the canonical `0x7E00`.
    pub const fn to_bits(self) -> u16 {
        if self.is_nan() {
            CANONICAL_NAN_BITS
        } else {
            self.bits
        }
    }

    pub(crate) const fn biased_exponent(self) -> u16 {
        (self.bits & EXP_MASK) >> SIGNIFICAND_WIDTH
    }

    pub(crate) const fn significand_field(self) -> u16 {
        self.bits & SIGNIFICAND_MASK
    }

    pub const fn is_nan(self) -> bool {
        self.bits & EXP_MASK == EXP_MASK && self.bits & SIGNIFICAND_MASK != 0
    }

    pub const fn is_infinite(self) -> bool {
        self.bits & !SIGN_MASK == EXP_MASK
    }

    pub const fn is_finite(self) -> bool {
        self.bits & EXP_MASK != EXP_MASK
    }

    pub const fn is_zero(self) -> bool {
        self.bits & !SIGN_MASK == 0
    }

    pub const fn is_subnormal(self) -> bool {
        self.bits & EXP_MASK == 0 && self.bits & SIGNIFICAND_MASK != 0
    }

    pub const fn is_normal(self) -> bool {
        let exponent = self.bits & EXP_MASK;
        exponent != 0 && exponent != EXP_MASK
    }

    /// True for every value whose sign bit is set, `-0.0` and negative NaNs included.
    pub const fn is_sign_negative(self) -> bool {
        self.bits & SIGN_MASK != 0
    }

    pub const fn is_sign_positive(self) -> bool {
        !self.is_sign_negative()
    }

    pub const fn classify(self) -> FpCategory {
        match (self.biased_exponent(), self.significand_field()) {
            (0x1F, 0) => FpCategory::Infinite,
            (0x1F, _) => FpCategory::Nan,
            (0, 0) => FpCategory::Zero,
            (0, _) => FpCategory::Subnormal,
            _ => FpCategory::Normal,
        }
    }

    /// Unbiased exponent of a normal value.
    ///
    /// Zeros and subnormals report `MIN_EXPONENT - 1`, NaNs and infinities
    /// report `MAX_EXPONENT + 1`.
    pub const fn get_exponent(self) -> i32 {
        match self.biased_exponent() {
            0x1F => Self::MAX_EXPONENT + 1,
            0 => Self::MIN_EXPONENT - 1,
            biased => biased as i32 - EXP_BIAS,
        }
    }

    /// Gap between `|self|` and the next value of larger magnitude.
    ///
    /// The power of two is written straight into the exponent field (or the
    /// significand, once it drops below the normal range), so no rounding
    /// is ever involved.
    pub const fn ulp(self) -> Self {
        match self.classify() {
            FpCategory::Nan => Self::NAN,
            FpCategory::Infinite => Self::POSITIVE_INFINITY,
            FpCategory::Zero | FpCategory::Subnormal => Self::MIN_VALUE,
            FpCategory::Normal => {
                let exponent = self.get_exponent() - SIGNIFICAND_WIDTH as i32;
                if exponent >= Self::MIN_EXPONENT {
                    Self::from_bits(((exponent + EXP_BIAS) as u16) << SIGNIFICAND_WIDTH)
                } else {
                    Self::from_bits(1 << (exponent - Self::MIN_EXPONENT + SIGNIFICAND_WIDTH as i32))
                }
            }
        }
    }

    /// `1.0` or `-1.0` following the sign; zeros and NaNs come back unchanged.
    pub const fn signum(self) -> Self {
        if self.is_nan() || self.is_zero() {
            self
        } else {
            Self::ONE.copy_sign(self)
        }
    }

    /// Magnitude of `self` with the sign bit of `sign`.
    pub const fn copy_sign(self, sign: Self) -> Self {
        Self::from_bits((self.bits & !SIGN_MASK) | (sign.bits & SIGN_MASK))
    }

    /// Adjacent value in the direction of positive infinity.
    pub const fn next_up(self) -> Self {
        if self.is_nan() || self.bits == Self::POSITIVE_INFINITY.bits {
            self
        } else if self.is_zero() {
            Self::MIN_VALUE
        } else if self.is_sign_negative() {
            Self::from_bits(self.bits - 1)
        } else {
            Self::from_bits(self.bits + 1)
        }
    }

    /// Adjacent value in the direction of negative infinity.
    pub const fn next_down(self) -> Self {
        if self.is_nan() || self.bits == Self::NEGATIVE_INFINITY.bits {
            self
        } else if self.is_zero() {
            Self::from_bits(SIGN_MASK | Self::MIN_VALUE.bits)
        } else if self.is_sign_negative() {
            Self::from_bits(self.bits + 1)
        } else {
            Self::from_bits(self.bits - 1)
        }
    }

    /// Key whose integer order is the numeric order of non-NaN values, with
    /// `-0.0` placed just below `+0.0`.
    pub(crate) const fn total_order_key(self) -> i16 {
        let key = self.bits as i16;
        if key < 0 { key ^ 0x7FFF } else { key }
    }

    /// Numeric ordering of two non-NaN values that tells the zeros apart.
    pub(crate) fn total_cmp_non_nan(self, other: Self) -> Ordering {
        self.total_order_key().cmp(&other.total_order_key())
    }
}

/// Raw bits of `value`, NaN payload and sign preserved.
pub fn raw_bits_of(value: Binary16) -> u16 {
    value.to_raw_bits()
}

/// Bits of `value` with every NaN collapsed to the canonical pattern.
pub fn bits_of(value: Binary16) -> u16 {
    value.to_bits()
}

pub fn from_raw_bits(bits: u16) -> Binary16 {
    Binary16::from_bits(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_values() -> impl Iterator<Item = Binary16> {
        (0..=u16::MAX).map(Binary16::from_bits)
    }

    #[test]
    fn test_nan_bits_canonicalize_but_raw_bits_survive() {
        let mut nan_patterns = 0;
        for bits in 0..=u16::MAX {
            let value = from_raw_bits(bits);
            assert_eq!(raw_bits_of(value), bits);
            if bits & EXP_MASK == EXP_MASK && bits & SIGNIFICAND_MASK != 0 {
                nan_patterns += 1;
                assert!(value.is_nan(), "{:#06x} should be NaN", bits);
                assert_eq!(bits_of(value), 0x7E00, "NaN {:#06x} not canonicalized", bits);
            } else {
                assert_eq!(bits_of(value), bits);
            }
        }
        assert_eq!(nan_patterns, 2046);
    }

    #[test]
    fn test_classification_partitions_every_pattern() {
        let mut counts = [0usize; 5];
        for value in all_values() {
            let index = match value.classify() {
                FpCategory::Nan => 0,
                FpCategory::Infinite => 1,
                FpCategory::Zero => 2,
                FpCategory::Subnormal => 3,
                FpCategory::Normal => 4,
            };
            counts[index] += 1;

            assert_eq!(value.is_nan(), index == 0);
            assert_eq!(value.is_infinite(), index == 1);
            assert_eq!(value.is_zero(), index == 2);
            assert_eq!(value.is_subnormal(), index == 3);
            assert_eq!(value.is_normal(), index == 4);
            assert_eq!(value.is_finite(), index >= 2);
        }
        assert_eq!(counts, [2046, 2, 2, 2046, 61440]);
    }

    #[test]
    fn test_zeros_are_distinct_patterns() {
        assert_ne!(Binary16::ZERO.to_raw_bits(), Binary16::NEG_ZERO.to_raw_bits());
        assert!(Binary16::NEG_ZERO.is_zero());
        assert!(Binary16::NEG_ZERO.is_sign_negative());
        assert!(Binary16::ZERO.is_sign_positive());
    }

    #[test]
    fn test_get_exponent() {
        assert_eq!(Binary16::ONE.get_exponent(), 0);
        assert_eq!(Binary16::MAX_VALUE.get_exponent(), 15);
        assert_eq!(Binary16::MIN_NORMAL.get_exponent(), -14);
        assert_eq!(Binary16::MIN_VALUE.get_exponent(), -15);
        assert_eq!(Binary16::ZERO.get_exponent(), -15);
        assert_eq!(Binary16::NEG_ZERO.get_exponent(), -15);
        assert_eq!(Binary16::POSITIVE_INFINITY.get_exponent(), 16);
        assert_eq!(Binary16::NEGATIVE_INFINITY.get_exponent(), 16);
        assert_eq!(Binary16::NAN.get_exponent(), 16);
        // 12.0 = 1.5 * 2^3
        assert_eq!(Binary16::from_bits(0x4A00).get_exponent(), 3);
    }

    #[test]
    fn test_ulp_special_values() {
        assert_eq!(Binary16::ZERO.ulp().to_raw_bits(), Binary16::MIN_VALUE.to_raw_bits());
        assert_eq!(Binary16::NEG_ZERO.ulp().to_raw_bits(), Binary16::MIN_VALUE.to_raw_bits());
        assert_eq!(Binary16::MIN_VALUE.ulp().to_raw_bits(), Binary16::MIN_VALUE.to_raw_bits());
        assert_eq!(
            Binary16::POSITIVE_INFINITY.ulp().to_raw_bits(),
            Binary16::POSITIVE_INFINITY.to_raw_bits()
        );
        assert_eq!(
            Binary16::NEGATIVE_INFINITY.ulp().to_raw_bits(),
            Binary16::POSITIVE_INFINITY.to_raw_bits()
        );
        assert!(Binary16::NAN.ulp().is_nan());
        assert!(Binary16::from_bits(0xFD01).ulp().is_nan());
    }

    #[test]
    fn test_ulp_is_gap_to_next_value() {
        for value in all_values().filter(|v| v.is_finite()) {
            let magnitude = value.copy_sign(Binary16::ZERO);
            let above = magnitude.next_up();
            let gap = if above.is_infinite() {
                // 65536 would be the next value if the exponent range allowed it
                65536.0 - magnitude.to_f64()
            } else {
                above.to_f64() - magnitude.to_f64()
            };
            assert_eq!(
                value.ulp().to_f64(),
                gap,
                "ulp mismatch for {:#06x}",
                value.to_raw_bits()
            );
        }
        assert_eq!(Binary16::MAX_VALUE.ulp().to_f64(), 32.0);
        assert_eq!(Binary16::ONE.ulp().to_raw_bits(), Binary16::EPSILON.to_raw_bits());
    }

    #[test]
    fn test_next_up_and_next_down() {
        assert_eq!(Binary16::ZERO.next_up().to_raw_bits(), 0x0001);
        assert_eq!(Binary16::NEG_ZERO.next_up().to_raw_bits(), 0x0001);
        assert_eq!(Binary16::ZERO.next_down().to_raw_bits(), 0x8001);
        assert_eq!(Binary16::from_bits(0x8001).next_up().to_raw_bits(), 0x8000);
        assert_eq!(Binary16::MAX_VALUE.next_up().to_raw_bits(), 0x7C00);
        assert_eq!(Binary16::POSITIVE_INFINITY.next_up().to_raw_bits(), 0x7C00);
        assert_eq!(Binary16::POSITIVE_INFINITY.next_down().to_raw_bits(), 0x7BFF);
        assert_eq!(Binary16::NEGATIVE_INFINITY.next_up().to_raw_bits(), 0xFBFF);
        assert_eq!(Binary16::NEGATIVE_INFINITY.next_down().to_raw_bits(), 0xFC00);
        assert_eq!(Binary16::ONE.next_up().to_raw_bits(), 0x3C01);
        assert_eq!(Binary16::ONE.next_down().to_raw_bits(), 0x3BFF);
        assert!(Binary16::NAN.next_up().is_nan());
        assert!(Binary16::NAN.next_down().is_nan());
    }

    #[test]
    fn test_signum_and_copy_sign() {
        let minus_three = Binary16::from_bits(0xC200);
        assert_eq!(minus_three.signum().to_raw_bits(), Binary16::NEG_ONE.to_raw_bits());
        assert_eq!(Binary16::MIN_VALUE.signum().to_raw_bits(), Binary16::ONE.to_raw_bits());
        assert_eq!(Binary16::NEG_ZERO.signum().to_raw_bits(), 0x8000);
        assert_eq!(
            Binary16::NEGATIVE_INFINITY.signum().to_raw_bits(),
            Binary16::NEG_ONE.to_raw_bits()
        );
        assert!(Binary16::NAN.signum().is_nan());

        assert_eq!(minus_three.copy_sign(Binary16::ONE).to_raw_bits(), 0x4200);
        assert_eq!(Binary16::ONE.copy_sign(Binary16::NEG_ZERO).to_raw_bits(), 0xBC00);
    }

    #[test]
    fn test_total_order_key_is_monotonic() {
        let mut finite: Vec<Binary16> = all_values().filter(|v| !v.is_nan()).collect();
        finite.sort_by(|a, b| a.total_cmp_non_nan(*b));
        assert_eq!(finite.first().unwrap().to_raw_bits(), 0xFC00);
        assert_eq!(finite.last().unwrap().to_raw_bits(), 0x7C00);
        for pair in finite.windows(2) {
            if pair[0].to_raw_bits() == Binary16::NEG_ZERO.to_raw_bits() {
                assert_eq!(pair[1].to_raw_bits(), Binary16::ZERO.to_raw_bits());
            } else {
                assert_eq!(pair[0].next_up().to_raw_bits(), pair[1].to_raw_bits());
            }
        }
    }
}
