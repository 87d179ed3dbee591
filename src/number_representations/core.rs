use std::{
    fmt::{Debug, Display},
    ops::{AddAssign, Neg, SubAssign},
};

use ndarray::{LinalgScalar, ScalarOperand};
use num_traits::{Num, NumCast};

/// Element type a lane container can hold and compute on.
pub trait LaneScalar:
    LinalgScalar
    + ScalarOperand
    + Num
    + NumCast
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + Display
    + Debug
    + FusedOps
    + PartialOrd
{
}

/// Operations beyond `Num` that every lane element type provides.
pub trait FusedOps {
    /// `self * a + b` with a single rounding.
    fn fused_mul_add(self, a: Self, b: Self) -> Self;
    fn sqrt(self) -> Self;
    fn max(self, other: Self) -> Self;
    fn min(self, other: Self) -> Self;
}
