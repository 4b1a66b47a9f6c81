//! Classical Gram-Schmidt over ℚ.
//!
//! For each input `vᵢ`, in order, the engine subtracts its projections onto
//! the orthogonal vectors already produced:
//!
//! ```text
//! wᵢ = vᵢ − Σⱼ<ᵢ (⟨vᵢ, wⱼ⟩ / ‖wⱼ‖²) · wⱼ
//! ```
//!
//! Projections are taken against the full input `vᵢ` (classical, not modified
//! Gram-Schmidt) and divide by the squared norm, so no square root appears
//! until the optional final normalization of each `wᵢ`. Projecting onto the
//! unnormalized `wⱼ` gives the same result as projecting onto `wⱼ/‖wⱼ‖`,
//! which keeps the whole accumulation rational even in orthonormal mode.
//!
//! A zero residual means `vᵢ` lies in the span of its predecessors and aborts
//! the run. There is no mode that skips dependent vectors.

mod basis;
mod decomposition;

pub use basis::{Basis, Mode};
pub use decomposition::Decomposition;

use num_rational::BigRational;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::GramSchmidtError;
use crate::math::{RadicalVector, RationalVector};

/// Gram-Schmidt orthogonalization with a fixed output [`Mode`].
///
/// # Example
/// ```rust
/// use gramschmidt::{GramSchmidt, RationalVector};
///
/// let vectors = vec![
///     RationalVector::from_integers([1, 1, 0]),
///     RationalVector::from_integers([1, 0, 1]),
/// ];
/// let basis = GramSchmidt::orthonormal().run(&vectors).unwrap();
/// assert!(basis.is_orthonormal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GramSchmidt {
    /// Whether output vectors are normalized.
    pub mode: Mode,
}

impl GramSchmidt {
    /// An engine running in `mode`.
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    /// Produce an orthogonal, unnormalized basis.
    pub fn orthogonal() -> Self {
        Self::new(Mode::Orthogonal)
    }

    /// Produce an orthonormal basis.
    pub fn orthonormal() -> Self {
        Self::new(Mode::Orthonormal)
    }

    /// Orthogonalize `vectors` in order.
    ///
    /// # Errors
    /// - [`GramSchmidtError::NoVectors`] for an empty list
    /// - [`GramSchmidtError::DimensionMismatch`] if any vector differs in
    ///   length from the first; checked before any arithmetic
    /// - [`GramSchmidtError::LinearlyDependent`] for the first vector whose
    ///   residual is zero
    pub fn run(&self, vectors: &[RationalVector]) -> Result<Basis, GramSchmidtError> {
        let mut output = Vec::with_capacity(vectors.len());
        recurrence(vectors, |step| {
            let w = match self.mode {
                Mode::Orthogonal => RadicalVector::from(step.residual.clone()),
                Mode::Orthonormal => step
                    .residual
                    .normalize()
                    .map_err(|e| e.at(step.index))?,
            };
            output.push(w);
            Ok(())
        })?;
        Ok(Basis::new(self.mode, output))
    }

    /// Run several independent inputs. Results keep the input order.
    ///
    /// With the `rayon` feature the inputs are processed in parallel.
    pub fn run_batch<L>(&self, inputs: &[L]) -> Vec<Result<Basis, GramSchmidtError>>
    where
        L: AsRef<[RationalVector]> + Sync,
    {
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            inputs.par_iter().map(|l| self.run(l.as_ref())).collect()
        }
        #[cfg(not(feature = "rayon"))]
        {
            inputs.iter().map(|l| self.run(l.as_ref())).collect()
        }
    }
}

/// Orthogonalize `vectors` with the given output mode.
///
/// Shorthand for `GramSchmidt::new(mode).run(vectors)`.
pub fn run(vectors: &[RationalVector], mode: Mode) -> Result<Basis, GramSchmidtError> {
    GramSchmidt::new(mode).run(vectors)
}

/// Orthogonalize `vectors` and keep the projection coefficients.
///
/// Fails exactly when [`run`] in [`Mode::Orthogonal`] fails.
pub fn decompose(vectors: &[RationalVector]) -> Result<Decomposition, GramSchmidtError> {
    let mut coefficients = Vec::with_capacity(vectors.len());
    let orthogonal = recurrence(vectors, |step| {
        coefficients.push(step.coefficients);
        Ok(())
    })?;
    Ok(Decomposition::new(orthogonal, coefficients))
}

/// One accepted vector of the recurrence.
struct Step<'a> {
    index: usize,
    residual: &'a RationalVector,
    coefficients: Vec<BigRational>,
}

/// The shared classical Gram-Schmidt loop.
///
/// Calls `on_step` once per input with its non-zero residual and returns the
/// orthogonal vectors.
fn recurrence<F>(
    vectors: &[RationalVector],
    mut on_step: F,
) -> Result<Vec<RationalVector>, GramSchmidtError>
where
    F: FnMut(Step<'_>) -> Result<(), GramSchmidtError>,
{
    let dimension = check_dimensions(vectors)?;
    let mut orthogonal: Vec<RationalVector> = Vec::with_capacity(vectors.len());
    let mut norms: Vec<BigRational> = Vec::with_capacity(vectors.len());

    for (index, v) in vectors.iter().enumerate() {
        let mut projection_sum = RationalVector::zeros(dimension);
        let mut coefficients = Vec::with_capacity(orthogonal.len());

        for (b, b_norm) in orthogonal.iter().zip(&norms) {
            let mu = v.dot(b).map_err(|e| e.at(index))? / b_norm;
            projection_sum = projection_sum
                .add(&b.scale(&mu))
                .map_err(|e| e.at(index))?;
            coefficients.push(mu);
        }

        let w = v.subtract(&projection_sum).map_err(|e| e.at(index))?;
        let norm_squared = w.norm_squared();
        if norm_squared.is_zero() {
            debug!(index, "vector lies in the span of its predecessors");
            return Err(GramSchmidtError::LinearlyDependent { index });
        }
        trace!(index, %norm_squared, "accepted residual");

        on_step(Step {
            index,
            residual: &w,
            coefficients,
        })?;
        orthogonal.push(w);
        norms.push(norm_squared);
    }

    Ok(orthogonal)
}

/// Common dimension of `vectors`, or the first vector that breaks it.
fn check_dimensions(vectors: &[RationalVector]) -> Result<usize, GramSchmidtError> {
    let expected = vectors
        .first()
        .ok_or(GramSchmidtError::NoVectors)?
        .dimension();
    match vectors
        .iter()
        .enumerate()
        .find(|(_, v)| v.dimension() != expected)
    {
        Some((index, v)) => Err(GramSchmidtError::DimensionMismatch {
            index,
            expected,
            found: v.dimension(),
        }),
        None => Ok(expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use num_bigint::BigUint;
    use num_traits::One;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(n.into(), d.into())
    }

    fn v(xs: &[i64]) -> RationalVector {
        RationalVector::from_integers(xs.iter().copied())
    }

    fn radical(xs: &[i64]) -> RadicalVector {
        RadicalVector::from(v(xs))
    }

    /// Random vectors with a non-zero diagonal and zeros above it, so always independent.
    fn lower_triangular(rng: &mut impl Rng, n: usize) -> Vec<RationalVector> {
        (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        let x: i64 = if j < i {
                            rng.gen_range(-9..=9)
                        } else if j == i {
                            let magnitude: i64 = rng.gen_range(1..=9);
                            if rng.gen_bool(0.5) { magnitude } else { -magnitude }
                        } else {
                            0
                        };
                        BigRational::from_integer(x.into())
                    })
                    .collect()
            })
            .collect()
    }

    fn dense(rng: &mut impl Rng, count: usize, dimension: usize) -> Vec<RationalVector> {
        (0..count)
            .map(|_| RationalVector::from_integers((0..dimension).map(|_| rng.gen_range(-3i64..=3))))
            .collect()
    }

    #[test]
    fn three_dimensional_orthogonal_scenario() {
        let input = [v(&[1, 1, 0]), v(&[1, 0, 1]), v(&[0, 1, 1])];
        let basis = run(&input, Mode::Orthogonal).unwrap();

        let [w1, w2, w3] = basis.vectors() else {
            panic!("expected three vectors, got {}", basis.len());
        };
        assert_eq!(w1, &radical(&[1, 1, 0]));
        assert_eq!(
            w2.to_rational().unwrap(),
            RationalVector::new(vec![q(1, 2), q(-1, 2), q(1, 1)])
        );
        assert_eq!(
            w3.to_rational().unwrap(),
            RationalVector::new(vec![q(-2, 3), q(2, 3), q(2, 3)])
        );
        assert!(!w3.is_zero());
        assert!(basis.is_orthogonal());
        assert_eq!(basis.mode(), Mode::Orthogonal);
    }

    #[test]
    fn three_dimensional_orthonormal_scenario() {
        let input = [v(&[1, 1, 0]), v(&[1, 0, 1]), v(&[0, 1, 1])];
        let basis = GramSchmidt::orthonormal().run(&input).unwrap();

        let [w1, w2, w3] = basis.vectors() else {
            panic!("expected three vectors, got {}", basis.len());
        };
        assert_eq!(
            w1,
            &RadicalVector::from_parts(vec![q(1, 2), q(1, 2), q(0, 1)], BigUint::from(2u32))
        );
        assert_eq!(
            w2,
            &RadicalVector::from_parts(vec![q(1, 6), q(-1, 6), q(1, 3)], BigUint::from(6u32))
        );
        assert_eq!(
            w3,
            &RadicalVector::from_parts(vec![q(-1, 3), q(1, 3), q(1, 3)], BigUint::from(3u32))
        );
        assert!(basis.is_orthonormal());
    }

    #[test]
    fn already_orthonormal_input_is_unchanged() {
        let input = [v(&[1, 0]), v(&[0, 1])];
        let basis = run(&input, Mode::Orthonormal).unwrap();
        assert_eq!(basis.to_rational().unwrap(), input.to_vec());
    }

    #[test]
    fn unit_vectors_are_normalized_anyway() {
        let basis = run(&[v(&[0, -1, 0])], Mode::Orthonormal).unwrap();
        assert_eq!(basis.vectors(), &[radical(&[0, -1, 0])]);
    }

    #[test]
    fn scalar_multiple_is_linearly_dependent() {
        for mode in [Mode::Orthogonal, Mode::Orthonormal] {
            assert_eq!(
                run(&[v(&[1, 0]), v(&[2, 0])], mode),
                Err(GramSchmidtError::LinearlyDependent { index: 1 })
            );
        }
    }

    #[test]
    fn dependency_aborts_without_partial_basis() {
        let input = [v(&[1, 0, 0]), v(&[0, 1, 0]), v(&[3, -2, 0]), v(&[0, 0, 1])];
        assert_eq!(
            run(&input, Mode::Orthogonal),
            Err(GramSchmidtError::LinearlyDependent { index: 2 })
        );
        assert_eq!(
            decompose(&input),
            Err(GramSchmidtError::LinearlyDependent { index: 2 })
        );
    }

    #[test]
    fn zero_vector_is_dependent_on_nothing() {
        assert_eq!(
            run(&[v(&[0, 0])], Mode::Orthonormal),
            Err(GramSchmidtError::LinearlyDependent { index: 0 })
        );
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        for mode in [Mode::Orthogonal, Mode::Orthonormal] {
            assert_eq!(
                run(&[v(&[1, 0]), v(&[1, 0, 0])], mode),
                Err(GramSchmidtError::DimensionMismatch { index: 1, expected: 2, found: 3 })
            );
        }
    }

    #[test]
    fn dimensions_are_checked_before_dependency() {
        let input = [v(&[1, 0]), v(&[2, 0]), v(&[1])];
        assert_eq!(
            run(&input, Mode::Orthogonal),
            Err(GramSchmidtError::DimensionMismatch { index: 2, expected: 2, found: 1 })
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(run(&[], Mode::Orthogonal), Err(GramSchmidtError::NoVectors));
        assert_eq!(decompose(&[]), Err(GramSchmidtError::NoVectors));
    }

    #[test]
    fn input_order_matters() {
        let forward = run(&[v(&[1, 0]), v(&[1, 1])], Mode::Orthogonal).unwrap();
        let backward = run(&[v(&[1, 1]), v(&[1, 0])], Mode::Orthogonal).unwrap();
        assert_ne!(forward, backward);
        assert_eq!(forward.vectors(), &[radical(&[1, 0]), radical(&[0, 1])]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let input = lower_triangular(&mut rng, 6);
        for mode in [Mode::Orthogonal, Mode::Orthonormal] {
            let engine = GramSchmidt::new(mode);
            assert_eq!(engine.run(&input), engine.run(&input));
        }
    }

    #[test]
    fn random_independent_inputs_give_exact_orthogonal_bases() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for n in 1..=8 {
            let input = lower_triangular(&mut rng, n);
            let basis = GramSchmidt::orthogonal().run(&input).unwrap();
            assert_eq!(basis.len(), n);
            assert_eq!(basis.dimension(), n);

            for (a, b) in basis.iter().tuple_combinations() {
                assert!(a.dot(b).unwrap().is_zero(), "{a} and {b} are not orthogonal");
            }
        }
    }

    #[test]
    fn random_independent_inputs_give_exact_unit_vectors() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1234);
        for n in 1..=6 {
            let input = lower_triangular(&mut rng, n);
            let basis = GramSchmidt::orthonormal().run(&input).unwrap();
            assert!(basis.is_orthonormal());
            for w in &basis {
                assert_eq!(w.norm_squared(), BigRational::one());
            }
        }
    }

    #[test]
    fn random_dense_inputs_either_succeed_orthogonally_or_report_dependency() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);
        for _ in 0..50 {
            let input = dense(&mut rng, 3, 3);
            match run(&input, Mode::Orthogonal) {
                Ok(basis) => assert!(basis.is_orthogonal()),
                Err(GramSchmidtError::LinearlyDependent { index }) => assert!(index < 3),
                Err(other) => panic!("unexpected error {other}"),
            }
        }
    }

    #[test]
    fn more_vectors_than_dimensions_must_be_dependent() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        for _ in 0..20 {
            let input = dense(&mut rng, 4, 3);
            assert!(matches!(
                run(&input, Mode::Orthogonal),
                Err(GramSchmidtError::LinearlyDependent { .. })
            ));
        }
    }

    #[test]
    fn decomposition_coefficients() {
        let input = [v(&[1, 1, 0]), v(&[1, 0, 1]), v(&[0, 1, 1])];
        let d = decompose(&input).unwrap();
        assert_eq!(d.coefficients(0), Some(&[][..]));
        assert_eq!(d.coefficient(1, 0), Some(&q(1, 2)));
        assert_eq!(d.coefficients(2), Some(&[q(1, 2), q(1, 3)][..]));
        assert_eq!(d.coefficient(0, 0), None);
    }

    #[test]
    fn decomposition_preserves_the_span() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2024);
        for n in 1..=7 {
            let input = lower_triangular(&mut rng, n);
            let d = decompose(&input).unwrap();

            // inputs are combinations of the outputs
            assert_eq!(d.reconstruct().unwrap(), input);

            // outputs agree with the orthogonal run
            let basis = run(&input, Mode::Orthogonal).unwrap();
            assert_eq!(basis.to_rational().unwrap(), d.orthogonal());
        }
    }

    #[test]
    fn outputs_are_combinations_of_inputs() {
        // wᵢ = vᵢ − Σ μᵢⱼ wⱼ, unrolled: each wᵢ expressed over v₀ … vᵢ
        let input = [v(&[2, 1, 0, 0]), v(&[1, 3, 1, 0]), v(&[0, 1, 4, 1])];
        let d = decompose(&input).unwrap();

        let mut weights: Vec<Vec<BigRational>> = Vec::new();
        for i in 0..input.len() {
            let mut row = vec![BigRational::zero(); input.len()];
            if let Some(slot) = row.get_mut(i) {
                *slot = BigRational::one();
            }
            for (j, earlier) in weights.iter().enumerate() {
                let mu = d.coefficient(i, j).unwrap();
                for (slot, w) in row.iter_mut().zip(earlier) {
                    *slot -= mu * w;
                }
            }
            weights.push(row);
        }

        for (w, row) in d.orthogonal().iter().zip(&weights) {
            let combination = input
                .iter()
                .zip(row)
                .try_fold(RationalVector::zeros(4), |acc, (vi, c)| acc.add(&vi.scale(c)))
                .unwrap();
            assert_eq!(&combination, w);
        }
    }

    #[test]
    fn batch_matches_sequential_runs() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        let mut inputs: Vec<Vec<RationalVector>> = (1..=5).map(|n| lower_triangular(&mut rng, n)).collect();
        inputs.push(vec![v(&[1, 2]), v(&[2, 4])]);
        inputs.push(Vec::new());

        let engine = GramSchmidt::orthonormal();
        let batch = engine.run_batch(&inputs);
        let sequential: Vec<_> = inputs.iter().map(|input| engine.run(input)).collect();
        assert_eq!(batch, sequential);
        assert!(matches!(batch.last(), Some(Err(GramSchmidtError::NoVectors))));
    }

    #[test]
    fn default_engine_is_orthonormal() {
        assert_eq!(GramSchmidt::default().mode, Mode::Orthonormal);
        let json = serde_json::to_string(&GramSchmidt::orthogonal()).unwrap();
        assert_eq!(json, r#"{"mode":"orthogonal"}"#);
    }

    #[test]
    fn engine_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GramSchmidt>();
        assert_send_sync::<Basis>();
        assert_send_sync::<GramSchmidtError>();
    }
}
