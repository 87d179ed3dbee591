//! Element-wise application of the arithmetic over `ndarray` lanes.

use log::{debug, trace};
use ndarray::{Array1, ArrayView1, Zip};

use crate::{
    error::LaneError,
    number_representations::{
        core::{FusedOps, LaneScalar},
        float::Binary16,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneOp {
    Add,
    Sub,
    Mul,
    Div,
    Min,
    Max,
}

impl LaneOp {
    pub fn apply<T: LaneScalar>(self, a: T, b: T) -> T {
        match self {
            LaneOp::Add => a + b,
            LaneOp::Sub => a - b,
            LaneOp::Mul => a * b,
            LaneOp::Div => a / b,
            LaneOp::Min => FusedOps::min(a, b),
            LaneOp::Max => FusedOps::max(a, b),
        }
    }
}

fn same_lanes(left: usize, right: usize) -> Result<(), LaneError> {
    if left != right {
        debug!("lane count mismatch: {} against {}", left, right);
        return Err(LaneError::ShapeMismatch { left, right });
    }
    Ok(())
}

/// `op` applied lane by lane.
pub fn lanewise<T: LaneScalar>(
    op: LaneOp,
    a: &ArrayView1<T>,
    b: &ArrayView1<T>,
) -> Result<Array1<T>, LaneError> {
    same_lanes(a.len(), b.len())?;
    trace!("{:?} over {} lanes", op, a.len());
    Ok(Zip::from(a).and(b).map_collect(|&x, &y| op.apply(x, y)))
}

/// `a * b + c` lane by lane, each lane rounded once.
pub fn lanewise_fma<T: LaneScalar>(
    a: &ArrayView1<T>,
    b: &ArrayView1<T>,
    c: &ArrayView1<T>,
) -> Result<Array1<T>, LaneError> {
    same_lanes(a.len(), b.len())?;
    same_lanes(a.len(), c.len())?;
    trace!("fused multiply-add over {} lanes", a.len());
    Ok(Zip::from(a)
        .and(b)
        .and(c)
        .map_collect(|&x, &y, &z| x.fused_mul_add(y, z)))
}

pub fn narrow(values: &ArrayView1<f64>) -> Array1<Binary16> {
    values.mapv(Binary16::from_f64)
}

pub fn widen(values: &ArrayView1<Binary16>) -> Array1<f64> {
    values.mapv(Binary16::to_f64)
}
