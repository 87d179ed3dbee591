pub mod arith;
pub mod binary16;
mod convert;
pub mod equiv;
mod format;
mod native;
mod num_impls;
mod parse;
pub mod random;
pub(crate) mod unpacked;

pub use binary16::Binary16;
