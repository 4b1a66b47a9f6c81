use std::fmt;

use num_bigint::BigUint;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::scalar::radicand_as_rational;
use super::{RationalVector, Surd};
use crate::error::AlgebraError;

/// A vector whose components all carry the same square-root factor.
///
/// Component `i` is `coefficients[i] · √radicand`. Normalized rational
/// vectors always have this shape, and a plain rational vector is the
/// `radicand == 1` case, so both kinds of output share one type.
#[derive(Debug, Clone)]
pub struct RadicalVector {
    coefficients: Vec<BigRational>,
    radicand: BigUint,
}

impl RadicalVector {
    /// Build a vector from rational coefficients and the shared radicand.
    ///
    /// Square factors are pulled out of the radicand into the coefficients.
    pub fn from_parts(coefficients: Vec<BigRational>, radicand: BigUint) -> Self {
        let factor = Surd::new(BigRational::one(), radicand);
        let coefficients = coefficients
            .into_iter()
            .map(|c| c * factor.coefficient())
            .collect();
        Self {
            coefficients,
            radicand: factor.radicand().clone(),
        }
    }

    /// Number of components.
    pub fn dimension(&self) -> usize {
        self.coefficients.len()
    }

    /// The rational coefficients `cᵢ`.
    pub fn coefficients(&self) -> &[BigRational] {
        &self.coefficients
    }

    /// The common radicand `m`.
    pub fn radicand(&self) -> &BigUint {
        &self.radicand
    }

    /// Component `index` as an exact [`Surd`].
    pub fn component(&self, index: usize) -> Option<Surd> {
        self.coefficients
            .get(index)
            .map(|c| Surd::new(c.clone(), self.radicand.clone()))
    }

    /// Every component as an exact [`Surd`].
    pub fn components(&self) -> impl Iterator<Item = Surd> + '_ {
        self.coefficients
            .iter()
            .map(|c| Surd::new(c.clone(), self.radicand.clone()))
    }

    /// `m · Σ cᵢ²`, exact.
    pub fn norm_squared(&self) -> BigRational {
        let sum = self
            .coefficients
            .iter()
            .fold(BigRational::zero(), |acc, c| acc + c * c);
        sum * radicand_as_rational(&self.radicand)
    }

    /// Inner product. Both radicands fold into a single surd.
    pub fn dot(&self, other: &Self) -> Result<Surd, AlgebraError> {
        if self.dimension() != other.dimension() {
            return Err(AlgebraError::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            });
        }
        let sum = self
            .coefficients
            .iter()
            .zip(&other.coefficients)
            .fold(BigRational::zero(), |acc, (a, b)| acc + a * b);
        Ok(Surd::new(sum, &self.radicand * &other.radicand))
    }

    /// True when every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(Zero::is_zero)
    }

    /// The vector as a [`RationalVector`], if no square root remains.
    pub fn to_rational(&self) -> Option<RationalVector> {
        self.radicand
            .is_one()
            .then(|| RationalVector::new(self.coefficients.clone()))
    }

    /// Floating-point approximation of every component.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        self.components().map(|s| s.to_f64()).collect()
    }
}

impl From<RationalVector> for RadicalVector {
    fn from(v: RationalVector) -> Self {
        Self {
            coefficients: v.into_components(),
            radicand: BigUint::one(),
        }
    }
}

impl PartialEq for RadicalVector {
    fn eq(&self, other: &Self) -> bool {
        self.dimension() == other.dimension()
            && self.components().zip(other.components()).all(|(a, b)| a == b)
    }
}

impl Eq for RadicalVector {}

impl fmt::Display for RadicalVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.components().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, ")")
    }
}
