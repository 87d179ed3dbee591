use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use crate::number_representations::float::binary16::Binary16;

/// Hash of the canonical bits, sign-extended. All NaNs share one hash and
/// `-0` hashes apart from `+0`.
pub fn hash_code(v: Binary16) -> i32 {
    v.to_bits() as i16 as i32
}

/// Total order `-inf < ... < -0 < +0 < ... < +inf < NaN`, with every NaN
/// equal to every other.
pub fn compare(a: Binary16, b: Binary16) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp_non_nan(b),
    }
}

/// A `Binary16` compared by `compare` and hashed by `hash_code`, usable as a
/// set or map key.
#[derive(Debug, Clone, Copy, Default)]
#[repr(transparent)]
pub struct Canonical(pub Binary16);

impl Canonical {
    pub fn get(self) -> Binary16 {
        self.0
    }
}

impl From<Binary16> for Canonical {
    fn from(value: Binary16) -> Self {
        Canonical(value)
    }
}

impl PartialEq for Canonical {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Canonical {}

impl PartialOrd for Canonical {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Canonical {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self.0, other.0)
    }
}

impl Hash for Canonical {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_code(self.0).hash(state);
    }
}

impl Binary16 {
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        compare(*self, *other)
    }
}

// IEEE comparison, like the primitive floats: NaN is unordered and unequal
// to itself, and the two zeros are equal.
impl PartialEq for Binary16 {
    fn eq(&self, other: &Self) -> bool {
        if self.is_nan() || other.is_nan() {
            return false;
        }
        (self.is_zero() && other.is_zero()) || self.to_raw_bits() == other.to_raw_bits()
    }
}

impl PartialOrd for Binary16 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            return None;
        }
        if self.is_zero() && other.is_zero() {
            return Some(Ordering::Equal);
        }
        Some(self.total_cmp_non_nan(*other))
    }
}
