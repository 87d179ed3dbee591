use std::num::FpCategory;

use ndarray::ScalarOperand;
use num_traits::{
    Bounded, FromPrimitive, Num, NumCast, One, ToPrimitive, Zero, float::FloatCore,
};

use crate::{
    error::{ParseBinary16Error, ParseErrorKind},
    number_representations::{
        core::{FusedOps, LaneScalar},
        float::{arith, binary16::Binary16},
    },
};

// Calls below are spelled `Binary16::method(..)` so that the inherent method
// is used and never the trait method being defined.

impl Zero for Binary16 {
    fn zero() -> Self {
        Binary16::ZERO
    }

    fn is_zero(&self) -> bool {
        Binary16::is_zero(*self)
    }
}

impl One for Binary16 {
    fn one() -> Self {
        Binary16::ONE
    }
}

impl Num for Binary16 {
    type FromStrRadixErr = ParseBinary16Error;

    fn from_str_radix(str: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        if radix != 10 {
            return Err(ParseBinary16Error::new(str, ParseErrorKind::UnsupportedRadix(radix)));
        }
        Binary16::parse(str)
    }
}

impl Bounded for Binary16 {
    fn min_value() -> Self {
        Binary16::LOWEST
    }

    fn max_value() -> Self {
        Binary16::MAX_VALUE
    }
}

// Integer targets truncate toward zero and reject NaN, infinities and
// anything out of range, the same as f64.
impl ToPrimitive for Binary16 {
    fn to_i64(&self) -> Option<i64> {
        Binary16::to_f64(*self).to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        Binary16::to_f64(*self).to_u64()
    }

    fn to_f32(&self) -> Option<f32> {
        Some(Binary16::to_f32(*self))
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Binary16::to_f64(*self))
    }
}

impl FromPrimitive for Binary16 {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Binary16::from_i64(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(Binary16::from_u64(n))
    }

    fn from_f32(n: f32) -> Option<Self> {
        Some(Binary16::from_f32(n))
    }

    fn from_f64(n: f64) -> Option<Self> {
        Some(Binary16::from_f64(n))
    }
}

impl NumCast for Binary16 {
    fn from<T: ToPrimitive>(n: T) -> Option<Self> {
        n.to_f64().map(Binary16::from_f64)
    }
}

/// Applies an integral rounding of f64. The result is always representable:
/// every binary16 of magnitude 2048 or more is already an integer.
fn integral(v: Binary16, round: fn(f64) -> f64) -> Binary16 {
    if !v.is_finite() {
        return v;
    }
    Binary16::from_f64(round(Binary16::to_f64(v)))
}

impl FloatCore for Binary16 {
    fn infinity() -> Self {
        Binary16::POSITIVE_INFINITY
    }

    fn neg_infinity() -> Self {
        Binary16::NEGATIVE_INFINITY
    }

    fn nan() -> Self {
        Binary16::NAN
    }

    fn neg_zero() -> Self {
        Binary16::NEG_ZERO
    }

    fn min_value() -> Self {
        Binary16::LOWEST
    }

    fn min_positive_value() -> Self {
        Binary16::MIN_NORMAL
    }

    fn epsilon() -> Self {
        Binary16::EPSILON
    }

    fn max_value() -> Self {
        Binary16::MAX_VALUE
    }

    fn is_nan(self) -> bool {
        Binary16::is_nan(self)
    }

    fn is_infinite(self) -> bool {
        Binary16::is_infinite(self)
    }

    fn is_finite(self) -> bool {
        Binary16::is_finite(self)
    }

    fn is_normal(self) -> bool {
        Binary16::is_normal(self)
    }

    fn is_subnormal(self) -> bool {
        Binary16::is_subnormal(self)
    }

    fn classify(self) -> FpCategory {
        Binary16::classify(self)
    }

    fn floor(self) -> Self {
        integral(self, f64::floor)
    }

    fn ceil(self) -> Self {
        integral(self, f64::ceil)
    }

    fn round(self) -> Self {
        integral(self, f64::round)
    }

    fn trunc(self) -> Self {
        integral(self, f64::trunc)
    }

    fn abs(self) -> Self {
        arith::abs(self)
    }

    fn signum(self) -> Self {
        Binary16::signum(self)
    }

    fn is_sign_positive(self) -> bool {
        Binary16::is_sign_positive(self)
    }

    fn is_sign_negative(self) -> bool {
        Binary16::is_sign_negative(self)
    }

    fn min(self, other: Self) -> Self {
        arith::min(self, other)
    }

    fn max(self, other: Self) -> Self {
        arith::max(self, other)
    }

    fn recip(self) -> Self {
        arith::divide(Binary16::ONE, self)
    }

    fn to_degrees(self) -> Self {
        Binary16::from_f64(Binary16::to_f64(self).to_degrees())
    }

    fn to_radians(self) -> Self {
        Binary16::from_f64(Binary16::to_f64(self).to_radians())
    }

    /// `mantissa * 2^exponent * sign` with the f32/f64 conventions: normals
    /// carry the implicit bit, subnormals are shifted up by one.
    fn integer_decode(self) -> (u64, i16, i8) {
        let sign = if Binary16::is_sign_negative(self) { -1 } else { 1 };
        let biased = self.biased_exponent();
        let fraction = self.significand_field() as u64;
        let mantissa = if biased == 0 {
            fraction << 1
        } else {
            fraction | 0x400
        };
        (mantissa, biased as i16 - 25, sign)
    }
}

impl ScalarOperand for Binary16 {}

impl FusedOps for Binary16 {
    fn fused_mul_add(self, a: Self, b: Self) -> Self {
        arith::fma(self, a, b)
    }
    fn sqrt(self) -> Self {
        arith::sqrt(self)
    }
    fn max(self, other: Self) -> Self {
        arith::max(self, other)
    }
    fn min(self, other: Self) -> Self {
        arith::min(self, other)
    }
}

impl LaneScalar for Binary16 {}
