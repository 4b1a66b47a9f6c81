//! Turning user-entered text into engine input.
//!
//! The engine only accepts already-parsed [`RationalVector`]s. Everything that
//! can go wrong with raw text is reported here as a [`ParseError`] or
//! [`InputError`], never as a [`crate::GramSchmidtError`].

mod parse;
mod read;

pub use parse::{ParseError, parse_rational, parse_vector};
pub use read::InputError;

use crate::error::GramSchmidtError;
use crate::math::RationalVector;
use crate::orthogonalize::{Basis, Decomposition, GramSchmidt, decompose};

/// An ordered list of parsed input vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorList {
    /// The vectors, in input order.
    pub vectors: Vec<RationalVector>,
}

impl VectorList {
    /// Wrap already-built vectors.
    pub fn new(vectors: Vec<RationalVector>) -> Self {
        Self { vectors }
    }

    /// Parse a grid of text fields, one row per vector.
    pub fn parse<R, S>(rows: &[R]) -> Result<Self, InputError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        rows.iter()
            .enumerate()
            .map(|(row, fields)| {
                fields
                    .as_ref()
                    .iter()
                    .enumerate()
                    .map(|(column, field)| {
                        parse_rational(field.as_ref())
                            .map_err(|source| InputError::Parse { row, column, source })
                    })
                    .collect::<Result<RationalVector, _>>()
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// True when there are no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Run the engine on these vectors.
    pub fn orthogonalize(&self, engine: &GramSchmidt) -> Result<Basis, GramSchmidtError> {
        engine.run(&self.vectors)
    }

    /// Factorize these vectors, see [`decompose`].
    pub fn decompose(&self) -> Result<Decomposition, GramSchmidtError> {
        decompose(&self.vectors)
    }
}

impl FromIterator<RationalVector> for VectorList {
    fn from_iter<I: IntoIterator<Item = RationalVector>>(iter: I) -> Self {
        VectorList::new(iter.into_iter().collect())
    }
}

impl IntoIterator for VectorList {
    type Item = RationalVector;
    type IntoIter = std::vec::IntoIter<RationalVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.into_iter()
    }
}

impl AsRef<[RationalVector]> for VectorList {
    fn as_ref(&self) -> &[RationalVector] {
        &self.vectors
    }
}
