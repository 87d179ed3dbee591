pub mod error;
pub mod lanes;
pub mod number_representations;

pub use error::{InexactConversionError, LaneError, ParseBinary16Error, ParseErrorKind};
pub use number_representations::{
    core::{FusedOps, LaneScalar},
    float::{
        Binary16, arith,
        binary16::{bits_of, from_raw_bits, raw_bits_of},
        equiv::{Canonical, compare, hash_code},
        random::{AnyBits, AnyFinite},
    },
};
