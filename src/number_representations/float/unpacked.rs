use crate::number_representations::float::binary16::{
    Binary16, EXP_BIAS, EXP_MASK, SIGN_MASK, SIGNIFICAND_WIDTH,
};

/// Field view of a `Binary16`.
///
/// For finite values the magnitude is exactly `significand * 2^exponent`,
/// with the implicit leading bit folded into `significand` (at most 2047)
/// and `exponent` in `-24..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DecodedBinary16 {
    pub is_nan: bool,
    pub is_infinite: bool,
    pub sign: bool,
    pub exponent: i32,
    pub significand: u32,
}

/// Exact intermediate `(-1)^sign * mantissa * 2^exponent`.
///
/// Everything that narrows to binary16 builds one of these first and rounds
/// exactly once in `encode`. The 128-bit mantissa is wide enough to hold an
/// exact fused multiply-add of three binary16 operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnpackedBinary16 {
    pub sign: bool,
    pub exponent: i32,
    pub mantissa: u128,
}

/// Exponent of the smallest subnormal.
const QUANTUM_MIN: i32 = Binary16::MIN_EXPONENT - SIGNIFICAND_WIDTH as i32;

impl Binary16 {
    pub(crate) const fn decode(self) -> DecodedBinary16 {
        let sign = self.is_sign_negative();
        let biased = self.biased_exponent();
        let fraction = self.significand_field() as u32;

        if biased == 0x1F {
            return DecodedBinary16 {
                is_nan: fraction != 0,
                is_infinite: fraction == 0,
                sign,
                exponent: 0,
                significand: 0,
            };
        }

        if biased == 0 {
            DecodedBinary16 {
                is_nan: false,
                is_infinite: false,
                sign,
                exponent: QUANTUM_MIN,
                significand: fraction,
            }
        } else {
            DecodedBinary16 {
                is_nan: false,
                is_infinite: false,
                sign,
                exponent: biased as i32 - EXP_BIAS - SIGNIFICAND_WIDTH as i32,
                significand: fraction | (1 << SIGNIFICAND_WIDTH),
            }
        }
    }
}

impl UnpackedBinary16 {
    pub(crate) const fn new(sign: bool, exponent: i32, mantissa: u128) -> Self {
        UnpackedBinary16 {
            sign,
            exponent,
            mantissa,
        }
    }

    /// Rounds to the nearest binary16, ties to even.
    ///
    /// Magnitudes from 65520 upward become infinities; magnitudes below
    /// 2^-25 become zeros. The sign survives both.
    pub(crate) fn encode(self) -> Binary16 {
        let sign_bits = if self.sign { SIGN_MASK } else { 0 };
        if self.mantissa == 0 {
            return Binary16::from_bits(sign_bits);
        }

        // STEP 1: find the binade, 2^scale <= |value| < 2^(scale + 1)
        let msb_pos = 127 - self.mantissa.leading_zeros() as i32;
        let scale = self.exponent.saturating_add(msb_pos);

        if scale > Binary16::MAX_EXPONENT {
            return Binary16::from_bits(sign_bits | EXP_MASK);
        }
        if scale < QUANTUM_MIN - 1 {
            return Binary16::from_bits(sign_bits);
        }

        // STEP 2: weight of the last significand bit in that binade
        let quantum = scale.max(Binary16::MIN_EXPONENT) - SIGNIFICAND_WIDTH as i32;
        let shift = quantum - self.exponent;

        // STEP 3: round the dropped bits, shift is at most 128 here
        let significand = if shift <= 0 {
            self.mantissa << -shift
        } else {
            let kept = self.mantissa.checked_shr(shift as u32).unwrap_or(0);
            let half = 1u128 << (shift - 1);
            let tail = self.mantissa & (half << 1).wrapping_sub(1);
            if tail > half || (tail == half && kept & 1 == 1) {
                kept + 1
            } else {
                kept
            }
        };

        // STEP 4: assemble. The implicit bit lands in the exponent field, so a
        // significand that rounded up to 2^11 carries into the next binade and
        // one that stays below 2^10 leaves a subnormal.
        let magnitude = (((quantum - QUANTUM_MIN) as u32) << SIGNIFICAND_WIDTH) + significand as u32;
        let magnitude = magnitude.min(EXP_MASK as u32) as u16;
        Binary16::from_bits(sign_bits | magnitude)
    }
}
