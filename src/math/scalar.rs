//! Exact scalars with a single square-root factor.
//!
//! Normalizing a rational vector divides it by `√(‖v‖²)`, which is rarely
//! rational. Instead of falling back to floating point the value is kept as
//! `c·√m`, with `c` an exact rational and `m` a natural-number radicand.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Mul, Neg};

use num_bigint::{BigInt, BigUint, Sign};
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Primes below this bound are divided out of a radicand as square factors.
const TRIAL_DIVISION_LIMIT: u32 = 1_000;

/// Exact value `coefficient · √radicand`.
///
/// Radicands are stored with small square factors pulled into the
/// coefficient, so `√12` is held as `2·√3`. The form is not guaranteed to be
/// fully square-free for radicands with large repeated prime factors;
/// equality does not depend on it.
#[derive(Debug, Clone)]
pub struct Surd {
    coefficient: BigRational,
    radicand: BigUint,
}

impl Surd {
    /// Build `coefficient · √radicand`, pulling square factors out of the radicand.
    pub fn new(coefficient: BigRational, radicand: BigUint) -> Self {
        if coefficient.is_zero() || radicand.is_zero() {
            return Self::zero();
        }
        let (outside, inside) = split_square(radicand);
        Self {
            coefficient: coefficient * BigRational::from_integer(BigInt::from(outside)),
            radicand: inside,
        }
    }

    /// A rational value, i.e. radicand one.
    pub fn rational(value: BigRational) -> Self {
        Self::new(value, BigUint::one())
    }

    /// The exact zero.
    pub fn zero() -> Self {
        Self {
            coefficient: BigRational::zero(),
            radicand: BigUint::one(),
        }
    }

    /// Exact square root of a non-negative rational.
    ///
    /// Returns `None` for negative input.
    pub fn sqrt(value: &BigRational) -> Option<Self> {
        if value.is_negative() {
            return None;
        }
        // √(p/q) = √(p·q) / q
        let p = value.numer().to_biguint()?;
        let q = value.denom().to_biguint()?;
        let coefficient = BigRational::new(BigInt::one(), BigInt::from(q.clone()));
        Some(Self::new(coefficient, p * q))
    }

    /// The rational factor `c`.
    pub fn coefficient(&self) -> &BigRational {
        &self.coefficient
    }

    /// The radicand `m`.
    pub fn radicand(&self) -> &BigUint {
        &self.radicand
    }

    /// True for the exact zero.
    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// True when the value is rational (radicand one).
    pub fn is_rational(&self) -> bool {
        self.radicand.is_one()
    }

    /// The value as a rational, if it is one.
    pub fn to_rational(&self) -> Option<BigRational> {
        self.is_rational().then(|| self.coefficient.clone())
    }

    /// `c²·m`, always rational.
    pub fn square(&self) -> BigRational {
        &self.coefficient * &self.coefficient * radicand_as_rational(&self.radicand)
    }

    /// Floating-point approximation.
    ///
    /// Coefficient and radicand are scaled by powers of two before conversion,
    /// so a tiny coefficient times a radicand beyond `f64::MAX` still yields
    /// its finite value. Returns `None` if the value itself is not finite.
    pub fn to_f64(&self) -> Option<f64> {
        let (c, c_exp) = split_exponent(&self.coefficient)?;
        let (mut m, mut m_exp) = split_exponent(&radicand_as_rational(&self.radicand))?;
        if m_exp % 2 != 0 {
            m *= 2.0;
            m_exp -= 1;
        }
        // beyond this range the result is zero or infinite anyway
        let exponent = (c_exp + m_exp / 2).clamp(-4_000, 4_000) as i32;
        let half = exponent / 2;
        let value = c * m.sqrt() * 2f64.powi(half) * 2f64.powi(exponent - half);
        value.is_finite().then_some(value)
    }
}

impl Default for Surd {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<BigRational> for Surd {
    fn from(value: BigRational) -> Self {
        Self::rational(value)
    }
}

impl PartialEq for Surd {
    /// `a√m == b√n` iff both share a sign and `a²m == b²n`.
    fn eq(&self, other: &Self) -> bool {
        self.coefficient.signum() == other.coefficient.signum() && self.square() == other.square()
    }
}

impl Eq for Surd {}

impl PartialOrd for Surd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Surd {
    fn cmp(&self, other: &Self) -> Ordering {
        let sign = |s: &Surd| match s.coefficient.numer().sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        };
        match sign(self).cmp(&sign(other)) {
            Ordering::Equal => {
                let magnitude = self.square().cmp(&other.square());
                if sign(self) < 0 { magnitude.reverse() } else { magnitude }
            }
            unequal => unequal,
        }
    }
}

impl Mul<&Surd> for &Surd {
    type Output = Surd;

    fn mul(self, rhs: &Surd) -> Surd {
        Surd::new(
            &self.coefficient * &rhs.coefficient,
            &self.radicand * &rhs.radicand,
        )
    }
}

impl Mul for Surd {
    type Output = Surd;

    fn mul(self, rhs: Surd) -> Surd {
        &self * &rhs
    }
}

impl Mul<&BigRational> for &Surd {
    type Output = Surd;

    fn mul(self, rhs: &BigRational) -> Surd {
        if rhs.is_zero() {
            return Surd::zero();
        }
        Surd {
            coefficient: &self.coefficient * rhs,
            radicand: self.radicand.clone(),
        }
    }
}

impl Neg for Surd {
    type Output = Surd;

    fn neg(self) -> Surd {
        Surd {
            coefficient: -self.coefficient,
            radicand: self.radicand,
        }
    }
}

impl fmt::Display for Surd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rational() {
            return write!(f, "{}", self.coefficient);
        }
        if self.coefficient.is_one() {
            write!(f, "√{}", self.radicand)
        } else if (-&self.coefficient).is_one() {
            write!(f, "-√{}", self.radicand)
        } else {
            write!(f, "{}·√{}", self.coefficient, self.radicand)
        }
    }
}

pub(crate) fn radicand_as_rational(radicand: &BigUint) -> BigRational {
    BigRational::from_integer(BigInt::from(radicand.clone()))
}

/// Write `r` as `mantissa · 2^exponent` with the mantissa close to one.
fn split_exponent(r: &BigRational) -> Option<(f64, i64)> {
    if r.is_zero() {
        return Some((0.0, 0));
    }
    let exponent = r.numer().bits() as i64 - r.denom().bits() as i64;
    let shift = BigRational::from_integer(BigInt::one() << exponent.unsigned_abs());
    let scaled = if exponent >= 0 { r / shift } else { r * shift };
    Some((scaled.to_f64()?, exponent))
}

/// Split `m` into `(s, k)` with `m = s²·k`.
fn split_square(mut m: BigUint) -> (BigUint, BigUint) {
    let root = m.sqrt();
    if &root * &root == m {
        return (root, BigUint::one());
    }

    let mut outside = BigUint::one();
    let mut p: u32 = 2;
    while p <= TRIAL_DIVISION_LIMIT {
        let square = BigUint::from(p) * p;
        if square > m {
            break;
        }
        while (&m % &square).is_zero() {
            m /= &square;
            outside *= p;
        }
        p += if p == 2 { 1 } else { 2 };
    }

    // whatever is left may still be a perfect square of a large prime
    let root = m.sqrt();
    if &root * &root == m {
        outside *= root;
        m = BigUint::one();
    }
    (outside, m)
}
