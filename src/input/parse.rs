use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Zero, pow};
use thiserror::Error;

use crate::math::RationalVector;

/// Decimal exponents beyond this magnitude are rejected rather than expanded.
const MAX_EXPONENT: u32 = 4_096;

/// A component literal that is not an exact rational.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text is neither blank, a number, nor a quotient of numbers.
    #[error("`{0}` is not a rational number")]
    InvalidLiteral(String),

    /// A quotient whose denominator evaluates to zero.
    #[error("`{0}` has a zero denominator")]
    ZeroDenominator(String),

    /// A decimal exponent larger in magnitude than 4096.
    #[error("exponent of `{0}` is out of range")]
    ExponentOutOfRange(String),
}

/// Parse one component.
///
/// Accepts integers (`-4`), decimals with an optional exponent (`0.25`,
/// `-.5`, `1e-3`), and a quotient of two such numbers (`3/4`, `1.5/2`).
/// Decimals are converted exactly, so `0.1` is `1/10`. A blank field means
/// zero.
pub fn parse_rational(literal: &str) -> Result<BigRational, ParseError> {
    let text = literal.trim();
    if text.is_empty() {
        return Ok(BigRational::zero());
    }

    if let Some((numer, denom)) = text.rsplit_once('/') {
        let numer = parse_decimal(numer.trim(), literal)?;
        let denom = parse_decimal(denom.trim(), literal)?;
        if denom.is_zero() {
            return Err(ParseError::ZeroDenominator(literal.to_string()));
        }
        return Ok(numer / denom);
    }

    parse_decimal(text, literal)
}

/// Parse a whole vector, one literal per component.
pub fn parse_vector<S: AsRef<str>>(literals: &[S]) -> Result<RationalVector, ParseError> {
    literals
        .iter()
        .map(|s| parse_rational(s.as_ref()))
        .collect::<Result<Vec<_>, _>>()
        .map(RationalVector::new)
}

fn parse_decimal(text: &str, literal: &str) -> Result<BigRational, ParseError> {
    let invalid = || ParseError::InvalidLiteral(literal.to_string());

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (mantissa, exponent) = match unsigned.split_once(|c: char| c == 'e' || c == 'E') {
        Some((m, e)) => (m, Some(e)),
        None => (unsigned, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(invalid());
    }

    let digits = format!("{whole}{fraction}");
    let mut numer: BigInt = digits.parse().map_err(|_| invalid())?;
    if negative {
        numer = -numer;
    }
    let mut denom = pow(BigInt::from(10), fraction.len());

    if let Some(exponent) = exponent {
        let unsigned = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        if unsigned.is_empty() || !is_digits(unsigned) {
            return Err(invalid());
        }
        // well-formed but wider than i64 is still just a huge exponent
        let exponent: i64 = exponent
            .parse()
            .map_err(|_| ParseError::ExponentOutOfRange(literal.to_string()))?;
        let magnitude = u32::try_from(exponent.unsigned_abs())
            .ok()
            .filter(|m| *m <= MAX_EXPONENT)
            .ok_or_else(|| ParseError::ExponentOutOfRange(literal.to_string()))?;
        let scale = pow(BigInt::from(10), magnitude as usize);
        if exponent >= 0 {
            numer *= scale;
        } else {
            denom *= scale;
        }
    }

    Ok(BigRational::new(numer, denom))
}
