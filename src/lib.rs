//! Exact Gram-Schmidt orthogonalization over the rationals.
//!
//! Vectors are [`RationalVector`]s of arbitrary-precision fractions. The
//! orthogonal basis is computed without any rounding; an orthonormal basis
//! keeps each output vector as rational coefficients times one exact square
//! root ([`RadicalVector`]), so `‖w‖² == 1` holds exactly.
//!
//! ```rust
//! use gramschmidt::{Mode, RationalVector, run};
//!
//! let basis = run(
//!     &[
//!         RationalVector::from_integers([1, 1, 0]),
//!         RationalVector::from_integers([1, 0, 1]),
//!     ],
//!     Mode::Orthogonal,
//! )
//! .unwrap();
//! assert_eq!(basis.vectors()[1].to_string(), "(1/2, -1/2, 1)");
//! ```
//!
//! Text parsing lives in [`input`] and is kept apart from the engine.

// Logging is opt-in through the `tracing` feature; without it these expand to nothing.
#[cfg(feature = "tracing")]
macro_rules! debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}
#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}
#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}
#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

mod error;
mod math;
mod orthogonalize;

pub mod input;

pub use error::{AlgebraError, GramSchmidtError};
pub use math::*;
pub use orthogonalize::*;
pub use input::VectorList;
pub use num_bigint;
pub use num_rational;
