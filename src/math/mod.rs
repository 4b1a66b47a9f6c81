//! Exact vector algebra over ℚ, plus the single-radical values produced by
//! normalization.

mod radical;
mod scalar;
mod vector;

pub use radical::RadicalVector;
pub use scalar::Surd;
pub use vector::RationalVector;
