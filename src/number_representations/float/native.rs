use crate::number_representations::core::{FusedOps, LaneScalar};

macro_rules! native_lane_scalar {
    ($t:ty) => {
        impl FusedOps for $t {
            fn fused_mul_add(self, a: Self, b: Self) -> Self {
                self.mul_add(a, b)
            }
            fn sqrt(self) -> Self {
                self.sqrt()
            }
            fn max(self, other: Self) -> Self {
                self.max(other)
            }
            fn min(self, other: Self) -> Self {
                self.min(other)
            }
        }

        impl LaneScalar for $t {}
    };
}

native_lane_scalar!(f32);
native_lane_scalar!(f64);
