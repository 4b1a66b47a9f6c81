//! Rational coordinate vectors
//!
//! # Motivation
//! Gram-Schmidt in floating point loses orthogonality as soon as the input is
//! even mildly ill-conditioned. Over ℚ the recurrence only ever divides by
//! squared norms, so every intermediate vector stays rational and every
//! orthogonality check is an exact comparison with zero.
//!
//! All operations are pure: they borrow their operands and return a new vector.
//! Binary operations check dimensions and fail with
//! [`AlgebraError::DimensionMismatch`] rather than truncating.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use super::{RadicalVector, Surd};
use crate::error::AlgebraError;

/// An immutable, fixed-length vector of exact rationals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RationalVector {
    components: Vec<BigRational>,
}

impl RationalVector {
    /// Create a vector from its components.
    pub fn new(components: Vec<BigRational>) -> Self {
        Self { components }
    }

    /// The zero vector of dimension `dimension`.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            components: vec![BigRational::zero(); dimension],
        }
    }

    /// Convenience constructor for integer coordinates.
    pub fn from_integers<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<BigInt>,
    {
        values
            .into_iter()
            .map(|x| BigRational::from_integer(x.into()))
            .collect()
    }

    /// Number of components.
    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    /// The components in order.
    pub fn components(&self) -> &[BigRational] {
        &self.components
    }

    /// Component `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&BigRational> {
        self.components.get(index)
    }

    /// Iterate over the components.
    pub fn iter(&self) -> std::slice::Iter<'_, BigRational> {
        self.components.iter()
    }

    /// Take the components out of the vector.
    pub fn into_components(self) -> Vec<BigRational> {
        self.components
    }

    /// Element-wise sum.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Self) -> Result<Self, AlgebraError> {
        self.check_dimension(other)?;
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a + b).collect())
    }

    /// Element-wise difference `self - other`.
    pub fn subtract(&self, other: &Self) -> Result<Self, AlgebraError> {
        self.check_dimension(other)?;
        Ok(self.iter().zip(other.iter()).map(|(a, b)| a - b).collect())
    }

    /// Multiply every component by `k`.
    pub fn scale(&self, k: &BigRational) -> Self {
        self.iter().map(|x| x * k).collect()
    }

    /// Standard inner product.
    pub fn dot(&self, other: &Self) -> Result<BigRational, AlgebraError> {
        self.check_dimension(other)?;
        Ok(self
            .iter()
            .zip(other.iter())
            .fold(BigRational::zero(), |acc, (a, b)| acc + a * b))
    }

    /// `dot(self, self)`. Zero exactly when the vector is zero.
    pub fn norm_squared(&self) -> BigRational {
        self.iter().fold(BigRational::zero(), |acc, x| acc + x * x)
    }

    /// Exact test against the additive identity.
    pub fn is_zero(&self) -> bool {
        self.iter().all(Zero::is_zero)
    }

    /// `(dot(self, b) / ‖b‖²) · b`, the component of `self` along `b`.
    pub fn project_onto(&self, b: &Self) -> Result<Self, AlgebraError> {
        let denominator = b.norm_squared();
        if denominator.is_zero() {
            return Err(AlgebraError::ZeroVector);
        }
        Ok(b.scale(&(self.dot(b)? / denominator)))
    }

    /// Divide by `√‖v‖²`.
    ///
    /// The result usually leaves ℚ, so it is returned as a [`RadicalVector`]
    /// whose components share one square-root factor. Its squared norm is
    /// exactly one.
    pub fn normalize(&self) -> Result<RadicalVector, AlgebraError> {
        let norm_squared = self.norm_squared();
        if norm_squared.is_zero() {
            return Err(AlgebraError::ZeroVector);
        }
        // 1/√n = √(1/n)
        let factor = Surd::sqrt(&norm_squared.recip()).ok_or(AlgebraError::ZeroVector)?;
        Ok(RadicalVector::from_parts(
            self.scale(factor.coefficient()).into_components(),
            factor.radicand().clone(),
        ))
    }

    fn check_dimension(&self, other: &Self) -> Result<(), AlgebraError> {
        if self.dimension() == other.dimension() {
            Ok(())
        } else {
            Err(AlgebraError::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            })
        }
    }
}

impl From<Vec<BigRational>> for RationalVector {
    fn from(components: Vec<BigRational>) -> Self {
        Self::new(components)
    }
}

impl FromIterator<BigRational> for RationalVector {
    fn from_iter<I: IntoIterator<Item = BigRational>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for RationalVector {
    type Item = BigRational;
    type IntoIter = std::vec::IntoIter<BigRational>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl<'a> IntoIterator for &'a RationalVector {
    type Item = &'a BigRational;
    type IntoIter = std::slice::Iter<'a, BigRational>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl AsRef<[BigRational]> for RationalVector {
    fn as_ref(&self) -> &[BigRational] {
        &self.components
    }
}

impl fmt::Display for RationalVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, ")")
    }
}
