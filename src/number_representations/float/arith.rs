use std::{
    cmp::Ordering,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
};

use crate::number_representations::float::{
    binary16::{Binary16, SIGN_MASK},
    unpacked::UnpackedBinary16,
};

/// Exponent every finite fused multiply-add term is aligned to. Products of
/// two subnormals reach 2^-48, nothing finite goes lower.
const FMA_ALIGN: i32 = -48;

// The binary operators widen to f64, compute there and narrow once. f64
// carries more than twice binary16's precision plus two bits, so the single
// f64 rounding never disturbs the final binary16 rounding.

pub fn add(a: Binary16, b: Binary16) -> Binary16 {
    Binary16::from_f64(a.to_f64() + b.to_f64())
}

pub fn subtract(a: Binary16, b: Binary16) -> Binary16 {
    Binary16::from_f64(a.to_f64() - b.to_f64())
}

pub fn multiply(a: Binary16, b: Binary16) -> Binary16 {
    Binary16::from_f64(a.to_f64() * b.to_f64())
}

pub fn divide(a: Binary16, b: Binary16) -> Binary16 {
    Binary16::from_f64(a.to_f64() / b.to_f64())
}

/// Truncated remainder, the sign follows the dividend. Exact in f64.
pub fn remainder(a: Binary16, b: Binary16) -> Binary16 {
    Binary16::from_f64(a.to_f64() % b.to_f64())
}

pub fn sqrt(v: Binary16) -> Binary16 {
    Binary16::from_f64(v.to_f64().sqrt())
}

/// Flips the sign bit. NaN payloads survive.
pub fn negate(v: Binary16) -> Binary16 {
    Binary16::from_bits(v.to_raw_bits() ^ SIGN_MASK)
}

/// Clears the sign bit. NaN payloads survive.
pub fn abs(v: Binary16) -> Binary16 {
    Binary16::from_bits(v.to_raw_bits() & !SIGN_MASK)
}

/// The smaller operand, with `-0` below `+0`. A NaN operand is returned as is.
pub fn min(a: Binary16, b: Binary16) -> Binary16 {
    if a.is_nan() {
        return a;
    }
    if b.is_nan() {
        return b;
    }
    match a.total_cmp_non_nan(b) {
        Ordering::Greater => b,
        _ => a,
    }
}

/// The larger operand, with `+0` above `-0`. A NaN operand is returned as is.
pub fn max(a: Binary16, b: Binary16) -> Binary16 {
    if a.is_nan() {
        return a;
    }
    if b.is_nan() {
        return b;
    }
    match a.total_cmp_non_nan(b) {
        Ordering::Less => b,
        _ => a,
    }
}

pub fn ulp(v: Binary16) -> Binary16 {
    v.ulp()
}

/// `a * b + c` with a single rounding.
pub fn fma(a: Binary16, b: Binary16, c: Binary16) -> Binary16 {
    let (da, db, dc) = (a.decode(), b.decode(), c.decode());
    if da.is_nan || db.is_nan || dc.is_nan {
        return Binary16::NAN;
    }
    // with an infinite operand no finite rounding is left, f64 settles the
    // sign or produces the NaN for inf * 0 and inf - inf
    if da.is_infinite || db.is_infinite || dc.is_infinite {
        return Binary16::from_f64(a.to_f64() * b.to_f64() + c.to_f64());
    }

    // STEP 1: exact product and addend as integers scaled by 2^FMA_ALIGN
    let product_negative = da.sign != db.sign;
    let product = (da.significand as i128 * db.significand as i128)
        << (da.exponent + db.exponent - FMA_ALIGN);
    let addend = (dc.significand as i128) << (dc.exponent - FMA_ALIGN);

    // STEP 2: exact sum
    let signed_product = if product_negative { -product } else { product };
    let signed_addend = if dc.sign { -addend } else { addend };
    let sum = signed_product + signed_addend;

    // STEP 3: an exact zero is -0 only when both terms were -0
    if sum == 0 {
        let sign = product_negative && dc.sign;
        return UnpackedBinary16::new(sign, 0, 0).encode();
    }

    // STEP 4: round once
    UnpackedBinary16::new(sum < 0, FMA_ALIGN, sum.unsigned_abs()).encode()
}

/// `v * 2^n` rounded once.
pub fn scalb(v: Binary16, n: i32) -> Binary16 {
    let decoded = v.decode();
    if decoded.is_nan || decoded.is_infinite {
        return v;
    }
    UnpackedBinary16::new(
        decoded.sign,
        decoded.exponent.saturating_add(n),
        decoded.significand as u128,
    )
    .encode()
}

impl Binary16 {
    pub fn abs(self) -> Self {
        abs(self)
    }

    pub fn sqrt(self) -> Self {
        sqrt(self)
    }

    pub fn min(self, other: Self) -> Self {
        min(self, other)
    }

    pub fn max(self, other: Self) -> Self {
        max(self, other)
    }

    /// `self * a + b` with a single rounding.
    pub fn mul_add(self, a: Self, b: Self) -> Self {
        fma(self, a, b)
    }

    pub fn scalb(self, n: i32) -> Self {
        scalb(self, n)
    }
}

macro_rules! binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $function:ident) => {
        impl $trait for Binary16 {
            type Output = Binary16;

            fn $method(self, rhs: Self) -> Self::Output {
                $function(self, rhs)
            }
        }

        impl $assign_trait for Binary16 {
            fn $assign_method(&mut self, rhs: Self) {
                *self = $function(*self, rhs);
            }
        }
    };
}

binary_op!(Add, add, AddAssign, add_assign, add);
binary_op!(Sub, sub, SubAssign, sub_assign, subtract);
binary_op!(Mul, mul, MulAssign, mul_assign, multiply);
binary_op!(Div, div, DivAssign, div_assign, divide);
binary_op!(Rem, rem, RemAssign, rem_assign, remainder);

impl Neg for Binary16 {
    type Output = Binary16;

    fn neg(self) -> Self::Output {
        negate(self)
    }
}
