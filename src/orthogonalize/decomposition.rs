use num_rational::BigRational;

use crate::error::AlgebraError;
use crate::math::RationalVector;

/// Exact Gram-Schmidt factorization of an input list.
///
/// Holds the orthogonal vectors `wᵢ` and the projection coefficients
/// `μᵢⱼ = ⟨vᵢ, wⱼ⟩ / ‖wⱼ‖²` for `j < i`, so that
///
/// ```text
/// vᵢ = wᵢ + Σⱼ<ᵢ μᵢⱼ · wⱼ
/// ```
///
/// This is the rational counterpart of a QR factorization with `R` unit
/// upper triangular.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    orthogonal: Vec<RationalVector>,
    coefficients: Vec<Vec<BigRational>>,
}

impl Decomposition {
    pub(crate) fn new(orthogonal: Vec<RationalVector>, coefficients: Vec<Vec<BigRational>>) -> Self {
        Self {
            orthogonal,
            coefficients,
        }
    }

    /// The orthogonal vectors `w₁ … wₙ`.
    pub fn orthogonal(&self) -> &[RationalVector] {
        &self.orthogonal
    }

    /// Take the orthogonal vectors, dropping the coefficients.
    pub fn into_orthogonal(self) -> Vec<RationalVector> {
        self.orthogonal
    }

    /// `μᵢⱼ`, defined for `j < i`.
    pub fn coefficient(&self, i: usize, j: usize) -> Option<&BigRational> {
        self.coefficients.get(i)?.get(j)
    }

    /// Row `i` of the coefficient triangle: `μᵢ₀ … μᵢ,ᵢ₋₁`.
    pub fn coefficients(&self, i: usize) -> Option<&[BigRational]> {
        self.coefficients.get(i).map(Vec::as_slice)
    }

    /// Number of vectors in the factorization.
    pub fn len(&self) -> usize {
        self.orthogonal.len()
    }

    /// True when the factorization holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.orthogonal.is_empty()
    }

    /// Rebuild the input vectors from the factorization.
    pub fn reconstruct(&self) -> Result<Vec<RationalVector>, AlgebraError> {
        self.orthogonal
            .iter()
            .zip(&self.coefficients)
            .map(|(w, row)| {
                row.iter()
                    .zip(&self.orthogonal)
                    .try_fold(w.clone(), |acc, (mu, wj)| acc.add(&wj.scale(mu)))
            })
            .collect()
    }
}
