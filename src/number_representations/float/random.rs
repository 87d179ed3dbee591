use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

use crate::number_representations::float::{arith, binary16::Binary16};

/// Uniform on `[0, 1)` in steps of `2^-11`, every step exactly representable.
impl Distribution<Binary16> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Binary16 {
        let step = rng.random::<u16>() >> 5;
        arith::scalb(Binary16::from_u64(step as u64), -11)
    }
}

/// Every one of the 65536 bit patterns with equal probability, NaN payloads
/// and both zeros included.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyBits;

impl Distribution<Binary16> for AnyBits {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Binary16 {
        Binary16::from_bits(rng.random())
    }
}

/// Every finite bit pattern with equal probability.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyFinite;

impl Distribution<Binary16> for AnyFinite {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Binary16 {
        loop {
            let candidate = Binary16::from_bits(rng.random());
            if candidate.is_finite() {
                return candidate;
            }
        }
    }
}
