use std::str::FromStr;

use log::debug;

use crate::error::{ParseBinary16Error, ParseErrorKind};
use crate::number_representations::float::{binary16::Binary16, unpacked::UnpackedBinary16};

/// Decimal places kept when scaling a decimal literal to an integer.
/// 10^-26 resolves finer than the 2^-25 spacing of binary16 midpoints.
const DECIMAL_PLACES: i64 = 26;
/// 5^26, so that x * 2^26 = (x * 10^26) / 5^26.
const FIVE_POW_26: u128 = 1_490_116_119_384_765_625;
/// Hex digits read before the rest only contributes a sticky bit.
const HEX_DIGITS_KEPT: usize = 16;
const EXPONENT_LIMIT: i64 = 10_000_000_000;
const BINARY_EXPONENT_LIMIT: i64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Radix {
    Decimal,
    Hexadecimal,
}

#[derive(Debug)]
struct NumericLiteral {
    negative: bool,
    radix: Radix,
    // digit values of the significand, the point removed
    digits: Vec<u8>,
    integer_digits: usize,
    exponent: i64,
}

#[derive(Debug)]
enum Scanned {
    NaN,
    Infinity { negative: bool },
    Number(NumericLiteral),
}

impl Binary16 {
    /// Parses a decimal or hexadecimal floating-point literal.
    ///
    /// Accepts `NaN`, `Infinity`, plain and signed decimals with an optional
    /// `e` exponent, and hexadecimal literals such as `0x1.8p3`, whose `p`
    /// exponent is mandatory. A trailing `f`, `F`, `d` or `D` is ignored, as
    /// is surrounding whitespace. The exact value of the text is rounded once,
    /// ties to even, however many digits it has.
    pub fn parse(text: &str) -> Result<Self, ParseBinary16Error> {
        match scan(text) {
            Ok(Scanned::NaN) => Ok(Binary16::NAN),
            Ok(Scanned::Infinity { negative }) => Ok(signed_infinity(negative)),
            Ok(Scanned::Number(literal)) => Ok(match literal.radix {
                Radix::Decimal => round_decimal(&literal),
                Radix::Hexadecimal => round_hexadecimal(&literal),
            }),
            Err(kind) => {
                debug!("rejecting binary16 literal {:?}: {}", text, kind);
                Err(ParseBinary16Error::new(text, kind))
            }
        }
    }
}

impl FromStr for Binary16 {
    type Err = ParseBinary16Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Binary16::parse(s)
    }
}

fn scan(text: &str) -> Result<Scanned, ParseErrorKind> {
    let trimmed = text.trim_matches(|c: char| c <= ' ');
    if trimmed.is_empty() {
        return Err(ParseErrorKind::Empty);
    }

    let bytes = trimmed.as_bytes();
    let mut pos = 0;
    let negative = match bytes[0] {
        b'-' => {
            pos = 1;
            true
        }
        b'+' => {
            pos = 1;
            false
        }
        _ => false,
    };

    match &trimmed[pos..] {
        "NaN" => return Ok(Scanned::NaN),
        "Infinity" => return Ok(Scanned::Infinity { negative }),
        _ => {}
    }

    let radix = if bytes.len() > pos + 1 && bytes[pos] == b'0' && (bytes[pos + 1] | 0x20) == b'x' {
        pos += 2;
        Radix::Hexadecimal
    } else {
        Radix::Decimal
    };

    let mut digits = Vec::new();
    let mut point = None;
    while let Some(&byte) = bytes.get(pos) {
        if byte == b'.' {
            if point.is_some() {
                return Err(ParseErrorKind::InvalidDigit);
            }
            point = Some(digits.len());
        } else if let Some(digit) = digit_value(byte, radix) {
            digits.push(digit);
        } else {
            break;
        }
        pos += 1;
    }
    if digits.is_empty() {
        return Err(ParseErrorKind::InvalidDigit);
    }
    let integer_digits = point.unwrap_or(digits.len());

    let marker = match radix {
        Radix::Decimal => b'e',
        Radix::Hexadecimal => b'p',
    };
    let exponent = match bytes.get(pos) {
        Some(&byte) if (byte | 0x20) == marker => {
            pos += 1;
            scan_exponent(bytes, &mut pos)?
        }
        _ if radix == Radix::Hexadecimal => return Err(ParseErrorKind::MissingExponent),
        _ => 0,
    };

    if let Some(&byte) = bytes.get(pos) {
        if matches!(byte | 0x20, b'f' | b'd') {
            pos += 1;
        }
    }
    if pos != bytes.len() {
        return Err(ParseErrorKind::TrailingCharacters);
    }

    Ok(Scanned::Number(NumericLiteral {
        negative,
        radix,
        digits,
        integer_digits,
        exponent,
    }))
}

fn scan_exponent(bytes: &[u8], pos: &mut usize) -> Result<i64, ParseErrorKind> {
    let negative = match bytes.get(*pos) {
        Some(b'-') => {
            *pos += 1;
            true
        }
        Some(b'+') => {
            *pos += 1;
            false
        }
        _ => false,
    };

    let start = *pos;
    let mut magnitude = 0i64;
    while let Some(&byte) = bytes.get(*pos) {
        if !byte.is_ascii_digit() {
            break;
        }
        // large enough to flush any binary16 to zero or infinity
        magnitude = (magnitude * 10 + (byte - b'0') as i64).min(EXPONENT_LIMIT);
        *pos += 1;
    }
    if *pos == start {
        return Err(ParseErrorKind::InvalidExponent);
    }
    Ok(if negative { -magnitude } else { magnitude })
}

fn digit_value(byte: u8, radix: Radix) -> Option<u8> {
    match (byte, radix) {
        (b'0'..=b'9', _) => Some(byte - b'0'),
        (b'a'..=b'f', Radix::Hexadecimal) => Some(byte - b'a' + 10),
        (b'A'..=b'F', Radix::Hexadecimal) => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn round_decimal(literal: &NumericLiteral) -> Binary16 {
    let Some(first) = literal.digits.iter().position(|&d| d != 0) else {
        return signed_zero(literal.negative);
    };
    let significant = &literal.digits[first..];

    // x = 0.d1 d2 d3 ... * 10^scale
    let scale = literal.integer_digits as i64 - first as i64 + literal.exponent;
    if scale > 5 {
        // x >= 10^5
        return signed_infinity(literal.negative);
    }
    if scale < -7 {
        // x < 10^-8, below half the smallest subnormal
        return signed_zero(literal.negative);
    }

    // floor(x * 10^26) has at most 31 digits
    let kept = (scale + DECIMAL_PLACES) as usize;
    let scaled = (0..kept).fold(0u128, |acc, i| {
        acc * 10 + significant.get(i).copied().unwrap_or(0) as u128
    });
    let dropped_nonzero = significant.iter().skip(kept).any(|&d| d != 0);

    let whole = scaled / FIVE_POW_26;
    let sticky = dropped_nonzero || scaled % FIVE_POW_26 != 0;
    UnpackedBinary16::new(
        literal.negative,
        -(DECIMAL_PLACES as i32) - 1,
        (whole << 1) | sticky as u128,
    )
    .encode()
}

fn round_hexadecimal(literal: &NumericLiteral) -> Binary16 {
    let Some(first) = literal.digits.iter().position(|&d| d != 0) else {
        return signed_zero(literal.negative);
    };
    let significant = &literal.digits[first..];

    let kept = significant.len().min(HEX_DIGITS_KEPT);
    let mut mantissa = significant[..kept]
        .iter()
        .fold(0u128, |acc, &d| (acc << 4) | d as u128);
    let mut exponent =
        literal.exponent + 4 * (literal.integer_digits as i64 - first as i64 - kept as i64);

    if significant[kept..].iter().any(|&d| d != 0) {
        mantissa = (mantissa << 1) | 1;
        exponent -= 1;
    }

    let exponent = exponent.clamp(-BINARY_EXPONENT_LIMIT, BINARY_EXPONENT_LIMIT) as i32;
    UnpackedBinary16::new(literal.negative, exponent, mantissa).encode()
}

fn signed_zero(negative: bool) -> Binary16 {
    if negative {
        Binary16::NEG_ZERO
    } else {
        Binary16::ZERO
    }
}

fn signed_infinity(negative: bool) -> Binary16 {
    if negative {
        Binary16::NEGATIVE_INFINITY
    } else {
        Binary16::POSITIVE_INFINITY
    }
}
