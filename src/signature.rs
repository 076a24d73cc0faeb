//! Signature of symmetric integer matrices.
//!
//! Eigenvalues come from a floating-point symmetric eigen-decomposition, which
//! cannot tell a tiny eigenvalue from a true zero once entries get large. The
//! nullity is therefore taken from the exact rank ([`crate::kernel::rank`]) and
//! imposed on the eigenvalues: the `nullity` eigenvalues of smallest magnitude
//! are set to exactly zero before counting signs. No tolerance is involved.

use crate::error::{GramError, Result};
use crate::kernel;
use crate::matrix::IntMatrix;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use tracing::debug;

/// Counts of positive, negative and zero eigenvalues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    pub positive: usize,
    pub negative: usize,
    pub null: usize,
}

impl Signature {
    pub const fn new(positive: usize, negative: usize, null: usize) -> Self {
        Self {
            positive,
            negative,
            null,
        }
    }

    /// Dimension of the matrix this signature describes.
    pub const fn dimension(&self) -> usize {
        self.positive + self.negative + self.null
    }

    pub const fn rank(&self) -> usize {
        self.positive + self.negative
    }

    /// `(n_pos, n_neg, n_null)`.
    pub const fn as_tuple(&self) -> (usize, usize, usize) {
        (self.positive, self.negative, self.null)
    }
}

impl From<(usize, usize, usize)> for Signature {
    fn from((positive, negative, null): (usize, usize, usize)) -> Self {
        Self::new(positive, negative, null)
    }
}

impl Add for Signature {
    type Output = Signature;

    fn add(self, rhs: Signature) -> Signature {
        Signature::new(
            self.positive + rhs.positive,
            self.negative + rhs.negative,
            self.null + rhs.null,
        )
    }
}

impl AddAssign for Signature {
    fn add_assign(&mut self, rhs: Signature) {
        *self = *self + rhs;
    }
}

impl Sum for Signature {
    fn sum<I: Iterator<Item = Signature>>(iter: I) -> Signature {
        iter.fold(Signature::default(), Add::add)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.positive, self.negative, self.null)
    }
}

/// Signature `(n_pos, n_neg, n_null)` of a symmetric integer matrix.
///
/// Fails with [`GramError::Shape`] if the matrix is not square or not
/// symmetric. A `0 × 0` matrix has signature `(0, 0, 0)`.
///
/// ```
/// use gram_engine::matrix::IntMatrix;
/// use gram_engine::signature::signature;
///
/// let g = IntMatrix::from_rows(vec![vec![2, 0], vec![0, -3]]).unwrap();
/// assert_eq!(signature(&g).unwrap().as_tuple(), (1, 1, 0));
/// ```
pub fn signature(matrix: &IntMatrix) -> Result<Signature> {
    if !matrix.is_square() {
        return Err(GramError::Shape {
            expected: "gram must be a square matrix",
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }
    if !matrix.is_symmetric() {
        return Err(GramError::Shape {
            expected: "gram must be symmetric",
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }

    let n = matrix.rows();
    if n == 0 {
        return Ok(Signature::default());
    }

    let rank = kernel::rank(matrix);
    let nullity = n - rank;

    let mut eigs: Vec<f64> = matrix.to_f64()?.symmetric_eigenvalues().iter().copied().collect();
    eigs.sort_by(|a, b| a.abs().total_cmp(&b.abs()));
    for e in eigs.iter_mut().take(nullity) {
        *e = 0.0;
    }

    let positive = eigs.iter().filter(|&&e| e > 0.0).count();
    let negative = eigs.iter().filter(|&&e| e < 0.0).count();
    let sig = Signature::new(positive, negative, n - positive - negative);

    debug!(dim = n, rank, %sig, "computed signature");
    Ok(sig)
}
