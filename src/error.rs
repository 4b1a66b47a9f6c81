use thiserror::Error;

/// Failure of a single vector-algebra primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraError {
    /// The operands do not have the same number of components.
    #[error("dimension mismatch: expected {expected} components, found {found}")]
    DimensionMismatch {
        /// Components of the left operand.
        expected: usize,
        /// Components of the right operand.
        found: usize,
    },

    /// Normalization or projection onto the zero vector.
    #[error("operation is undefined for the zero vector")]
    ZeroVector,
}

/// Failure of a Gram-Schmidt run.
///
/// Every variant aborts the whole computation; no partial basis is ever
/// returned alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GramSchmidtError {
    /// The input list was empty.
    #[error("no vectors were supplied")]
    NoVectors,

    /// Input vector `index` does not share the dimension of the first vector.
    #[error("vector {index} has {found} components, expected {expected}")]
    DimensionMismatch {
        /// Zero-based position of the offending vector.
        index: usize,
        /// Dimension of the first vector.
        expected: usize,
        /// Dimension of vector `index`.
        found: usize,
    },

    /// Input vector `index` lies in the span of the vectors before it.
    #[error("input vectors are linearly dependent: vector {index} lies in the span of its predecessors")]
    LinearlyDependent {
        /// Zero-based position of the first dependent vector.
        index: usize,
    },

    /// A zero residual reached normalization.
    ///
    /// The engine checks for dependency first, so seeing this from
    /// [`crate::GramSchmidt::run`] means an internal invariant was broken.
    #[error("attempted to normalize the zero vector")]
    ZeroVector,
}

impl AlgebraError {
    /// Attach the index of the input vector being processed.
    pub(crate) fn at(self, index: usize) -> GramSchmidtError {
        match self {
            AlgebraError::DimensionMismatch { expected, found } => {
                GramSchmidtError::DimensionMismatch { index, expected, found }
            }
            AlgebraError::ZeroVector => GramSchmidtError::ZeroVector,
        }
    }
}
