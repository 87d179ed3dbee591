pub mod core;
pub mod float;
