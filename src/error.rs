use thiserror::Error;

use crate::Binary16;

/// Why a piece of text is not a binary16 literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("empty string")]
    Empty,
    #[error("invalid digit or symbol")]
    InvalidDigit,
    #[error("hexadecimal literal without a binary exponent")]
    MissingExponent,
    #[error("malformed exponent")]
    InvalidExponent,
    #[error("unexpected trailing characters")]
    TrailingCharacters,
    #[error("radix {0} is not supported, only radix 10")]
    UnsupportedRadix(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {input:?} as binary16: {kind}")]
pub struct ParseBinary16Error {
    input: String,
    kind: ParseErrorKind,
}

impl ParseBinary16Error {
    pub(crate) fn new(input: &str, kind: ParseErrorKind) -> Self {
        ParseBinary16Error {
            input: input.to_string(),
            kind,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

/// Raised by the `*_exact` conversions when narrowing would change the value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{value} is not exactly representable as binary16, nearest is {rounded}")]
pub struct InexactConversionError {
    pub value: f64,
    pub rounded: Binary16,
}

impl InexactConversionError {
    pub(crate) fn new(value: f64, rounded: Binary16) -> Self {
        InexactConversionError { value, rounded }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LaneError {
    #[error("lane count mismatch: {left} lanes against {right}")]
    ShapeMismatch { left: usize, right: usize },
}
