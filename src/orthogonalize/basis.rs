use num_rational::BigRational;
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::math::{RadicalVector, RationalVector};

/// Which kind of basis to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Pairwise orthogonal vectors, left unscaled. Output stays rational.
    Orthogonal,
    /// Orthogonal vectors scaled to unit length.
    #[default]
    Orthonormal,
}

/// Output of a successful Gram-Schmidt run.
///
/// Vector `i` corresponds to input vector `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    mode: Mode,
    vectors: Vec<RadicalVector>,
}

impl Basis {
    pub(crate) fn new(mode: Mode, vectors: Vec<RadicalVector>) -> Self {
        Self { mode, vectors }
    }

    /// The mode the basis was computed in.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of basis vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// True when the basis holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimension of the ambient space.
    pub fn dimension(&self) -> usize {
        self.vectors.first().map_or(0, RadicalVector::dimension)
    }

    /// The output vectors, in input order.
    pub fn vectors(&self) -> &[RadicalVector] {
        &self.vectors
    }

    /// Output vector `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&RadicalVector> {
        self.vectors.get(index)
    }

    /// Iterate over the output vectors.
    pub fn iter(&self) -> std::slice::Iter<'_, RadicalVector> {
        self.vectors.iter()
    }

    /// Take the output vectors out of the basis.
    pub fn into_vectors(self) -> Vec<RadicalVector> {
        self.vectors
    }

    /// The vectors as rationals.
    ///
    /// Always `Some` in [`Mode::Orthogonal`]. In [`Mode::Orthonormal`] it is
    /// `Some` only when every norm happened to be rational.
    pub fn to_rational(&self) -> Option<Vec<RationalVector>> {
        self.vectors.iter().map(RadicalVector::to_rational).collect()
    }

    /// Every pair of distinct vectors has an exactly zero dot product.
    pub fn is_orthogonal(&self) -> bool {
        self.vectors.iter().enumerate().all(|(i, a)| {
            self.vectors
                .iter()
                .skip(i + 1)
                .all(|b| a.dot(b).is_ok_and(|d| d.is_zero()))
        })
    }

    /// Orthogonal, and every vector has squared norm exactly one.
    pub fn is_orthonormal(&self) -> bool {
        let one = BigRational::one();
        self.is_orthogonal() && self.vectors.iter().all(|v| v.norm_squared() == one)
    }
}

impl IntoIterator for Basis {
    type Item = RadicalVector;
    type IntoIter = std::vec::IntoIter<RadicalVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Basis {
    type Item = &'a RadicalVector;
    type IntoIter = std::slice::Iter<'a, RadicalVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.iter()
    }
}

impl AsRef<[RadicalVector]> for Basis {
    fn as_ref(&self) -> &[RadicalVector] {
        &self.vectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(xs: &[i64]) -> RationalVector {
        RationalVector::from_integers(xs.iter().copied())
    }

    fn basis(mode: Mode, vectors: &[RationalVector]) -> Basis {
        Basis::new(mode, vectors.iter().cloned().map(RadicalVector::from).collect())
    }

    #[test]
    fn orthogonality_checks() {
        let b = basis(Mode::Orthogonal, &[v(&[2, 0]), v(&[0, 3])]);
        assert!(b.is_orthogonal());
        assert!(!b.is_orthonormal());
        assert_eq!(b.dimension(), 2);

        let skewed = basis(Mode::Orthogonal, &[v(&[1, 0]), v(&[1, 1])]);
        assert!(!skewed.is_orthogonal());
    }

    #[test]
    fn standard_basis_is_orthonormal() {
        let b = basis(Mode::Orthonormal, &[v(&[1, 0, 0]), v(&[0, 1, 0]), v(&[0, 0, 1])]);
        assert!(b.is_orthonormal());
        assert_eq!(b.len(), 3);
        assert_eq!(b.to_rational().unwrap().len(), 3);
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Orthogonal).unwrap(), "\"orthogonal\"");
        let mode: Mode = serde_json::from_str("\"orthonormal\"").unwrap();
        assert_eq!(mode, Mode::default());
    }
}
