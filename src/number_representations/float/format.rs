use std::fmt;

use crate::number_representations::float::binary16::Binary16;

/// Five significant digits always identify a binary16 uniquely.
const MAX_DECIMAL_DIGITS: usize = 5;

impl Binary16 {
    /// Hexadecimal significand-and-exponent text, e.g. `0x1.8p3` or `0x0.004p-14`.
    pub fn to_hex_string(self) -> String {
        if self.is_nan() {
            return "NaN".to_string();
        }
        let sign = if self.is_sign_negative() { "-" } else { "" };
        if self.is_infinite() {
            return format!("{}Infinity", sign);
        }
        if self.is_zero() {
            return format!("{}0x0.0p0", sign);
        }

        // ten fraction bits padded to three hex digits
        let fraction = format!("{:03x}", self.significand_field() << 2);
        let fraction = match fraction.trim_end_matches('0') {
            "" => "0",
            trimmed => trimmed,
        };
        if self.is_subnormal() {
            format!("{}0x0.{}p{}", sign, fraction, Binary16::MIN_EXPONENT)
        } else {
            format!("{}0x1.{}p{}", sign, fraction, self.get_exponent())
        }
    }

    fn to_decimal_string(self) -> String {
        if self.is_nan() {
            return "NaN".to_string();
        }
        let sign = if self.is_sign_negative() { "-" } else { "" };
        if self.is_infinite() {
            return format!("{}Infinity", sign);
        }
        if self.is_zero() {
            return format!("{}0.0", sign);
        }

        let (digits, exponent) = shortest_digits(self.copy_sign(Binary16::ZERO));
        if exponent >= -3 {
            format!("{}{}", sign, positional(&digits, exponent))
        } else {
            let (lead, rest) = digits.split_at(1);
            let rest = if rest.is_empty() { "0" } else { rest };
            format!("{}{}.{}E{}", sign, lead, rest, exponent)
        }
    }
}

/// Fewest significant digits, and the decimal exponent of the first one,
/// that parse back to `magnitude`. A single digit is widened to the closest
/// two-digit decimal, so `1.19e-7` prints as `1.2E-7` rather than `1.0E-7`.
fn shortest_digits(magnitude: Binary16) -> (String, i32) {
    let wide = magnitude.to_f64();
    let reads_back = |text: &str| {
        Binary16::parse(text).is_ok_and(|parsed| parsed.to_raw_bits() == magnitude.to_raw_bits())
    };
    let mut text = String::new();
    for precision in 0..MAX_DECIMAL_DIGITS {
        text = format!("{:.*e}", precision, wide);
        if reads_back(&text) {
            if precision == 0 {
                let two_digits = format!("{:.1e}", wide);
                if reads_back(&two_digits) {
                    text = two_digits;
                }
            }
            break;
        }
    }

    let (mantissa, exponent) = text.split_once('e').unwrap_or((&text, "0"));
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = match digits.trim_end_matches('0') {
        "" => "0".to_string(),
        trimmed => trimmed.to_string(),
    };
    (digits, exponent.parse().unwrap_or(0))
}

/// `d1.d2d3... * 10^exponent` written without an exponent, keeping at least
/// one digit after the point.
fn positional(digits: &str, exponent: i32) -> String {
    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);
        return format!("0.{}{}", zeros, digits);
    }

    let integer_len = exponent as usize + 1;
    if digits.len() > integer_len {
        let (integer, fraction) = digits.split_at(integer_len);
        format!("{}.{}", integer, fraction)
    } else {
        let zeros = "0".repeat(integer_len - digits.len());
        format!("{}{}.0", digits, zeros)
    }
}

impl fmt::Display for Binary16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_decimal_string())
    }
}

impl fmt::Debug for Binary16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_decimal_string())
    }
}

impl fmt::LowerExp for Binary16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerExp::fmt(&self.to_f32(), f)
    }
}

impl fmt::UpperExp for Binary16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperExp::fmt(&self.to_f32(), f)
    }
}
