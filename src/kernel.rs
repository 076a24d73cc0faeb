//! Exact integer kernel bases via fraction-free Gaussian elimination.
//!
//! The input matrix `M` (`R × C`) is augmented on the right by the `R × R`
//! identity and row reduced using only integer operations:
//!
//! ```text
//! row_j := pivot · row_j − below · row_pivot
//! row_j := sign(pivot) · row_j / content(row_j)
//! ```
//!
//! where `content` is the GCD of every entry in the augmented row. The left
//! block ends up in row echelon form with its zero rows at the bottom; the
//! matching rows of the augmentation block record which integer combination of
//! the original rows produced them, so each one is a vector `b` with
//! `bᵀ · M = 0`. Dividing by the full row content keeps every row primitive and
//! bounds coefficient growth. All entries are `BigInt`, so the cross
//! multiplication never overflows.

use crate::arith::gcd_all;
use crate::matrix::IntMatrix;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use tracing::trace;

/// Row echelon form of `[M | I]` produced by fraction-free elimination.
#[derive(Debug, Clone)]
pub struct Echelon {
    /// Augmented rows, `cols + rows` entries each.
    tableau: Vec<Vec<BigInt>>,
    cols: usize,
    rank: usize,
    stats: EliminationStats,
}

/// Counters collected during elimination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EliminationStats {
    pub row_swaps: usize,
    pub eliminations: usize,
    /// Rows whose content was greater than one and got divided out.
    pub content_reductions: usize,
    /// Largest bit length seen in the tableau.
    pub max_bits: u64,
}

impl Echelon {
    /// Reduce `matrix` augmented by the identity.
    pub fn new(matrix: &IntMatrix) -> Self {
        let num_rows = matrix.rows();
        let num_cols = matrix.cols();

        let mut tableau: Vec<Vec<BigInt>> = (0..num_rows)
            .map(|i| {
                let mut row = Vec::with_capacity(num_cols + num_rows);
                row.extend_from_slice(matrix.row(i));
                row.extend((0..num_rows).map(|k| {
                    if k == i {
                        BigInt::one()
                    } else {
                        BigInt::zero()
                    }
                }));
                row
            })
            .collect();

        let mut stats = EliminationStats::default();
        let mut pivot_row = 0;
        let mut pivot_col = 0;

        while pivot_row < num_rows && pivot_col < num_cols {
            if tableau[pivot_row][pivot_col].is_zero() {
                if let Some(swap_row) =
                    (pivot_row + 1..num_rows).find(|&r| !tableau[r][pivot_col].is_zero())
                {
                    tableau.swap(pivot_row, swap_row);
                    stats.row_swaps += 1;
                }
            }

            if !tableau[pivot_row][pivot_col].is_zero() {
                let (upper, lower) = tableau.split_at_mut(pivot_row + 1);
                let pivot = &upper[pivot_row];
                let pivot_entry = pivot[pivot_col].clone();
                let flip = pivot_entry.is_negative();

                for row in lower.iter_mut() {
                    let below = row[pivot_col].clone();
                    if below.is_zero() {
                        continue;
                    }
                    for (x, p) in row.iter_mut().zip(pivot) {
                        *x = &pivot_entry * &*x - &below * p;
                    }
                    debug_assert!(row[pivot_col].is_zero());

                    let content = gcd_all(BigInt::zero(), row.iter());
                    if !content.is_one() && !content.is_zero() {
                        for x in row.iter_mut() {
                            *x /= &content;
                        }
                        stats.content_reductions += 1;
                    }
                    if flip {
                        for x in row.iter_mut() {
                            *x = -&*x;
                        }
                    }
                    stats.eliminations += 1;
                }

                pivot_row += 1;
            }
            pivot_col += 1;
        }

        stats.max_bits = tableau
            .iter()
            .flat_map(|row| row.iter().map(BigInt::bits))
            .max()
            .unwrap_or(0);

        trace!(
            rows = num_rows,
            cols = num_cols,
            rank = pivot_row,
            swaps = stats.row_swaps,
            eliminations = stats.eliminations,
            max_bits = stats.max_bits,
            "fraction-free elimination finished"
        );

        Self {
            tableau,
            cols: num_cols,
            rank: pivot_row,
            stats,
        }
    }

    /// Number of pivots, i.e. the exact rank of the input.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of all-zero rows in the reduced left block.
    pub fn nullity(&self) -> usize {
        self.tableau.len() - self.rank
    }

    pub fn stats(&self) -> &EliminationStats {
        &self.stats
    }

    /// Reduced form of the input (left block of the tableau).
    pub fn reduced(&self) -> impl Iterator<Item = &[BigInt]> {
        self.tableau.iter().map(|row| &row[..self.cols])
    }

    /// Augmentation rows belonging to the zero rows of the reduced form.
    pub fn into_kernel_basis(self) -> Vec<Vec<BigInt>> {
        let cols = self.cols;
        let rank = self.rank;
        debug_assert!(self.tableau[rank..]
            .iter()
            .all(|row| row[..cols].iter().all(Zero::is_zero)));

        self.tableau
            .into_iter()
            .skip(rank)
            .map(|mut row| row.split_off(cols))
            .collect()
    }
}

/// Integer basis of the left kernel of `matrix`: vectors `b` of length
/// `rows` with `bᵀ · M = 0`.
///
/// The basis has exactly `rows − rank` vectors, each primitive (entries with
/// GCD 1), and spans the rational kernel. Empty input gives an empty basis.
/// Ragged input is already rejected when the [`IntMatrix`] is built.
/// For a symmetric Gram matrix this is the null space.
///
/// ```
/// use gram_engine::kernel::integer_kernel_basis;
/// use gram_engine::matrix::IntMatrix;
///
/// let m = IntMatrix::from_rows(vec![vec![1, 2], vec![2, 4]]).unwrap();
/// let basis = integer_kernel_basis(&m);
/// assert_eq!(basis.len(), 1);
/// let zero = num_bigint::BigInt::from(0);
/// assert!(m.vec_mul(&basis[0]).unwrap().iter().all(|x| *x == zero));
/// ```
pub fn integer_kernel_basis(matrix: &IntMatrix) -> Vec<Vec<BigInt>> {
    if matrix.is_empty() {
        return Vec::new();
    }
    Echelon::new(matrix).into_kernel_basis()
}

/// Integer basis of the right kernel: vectors `b` of length `cols` with
/// `M · b = 0`.
pub fn right_integer_kernel_basis(matrix: &IntMatrix) -> Vec<Vec<BigInt>> {
    integer_kernel_basis(&matrix.transpose())
}

/// Exact rank of an integer matrix.
pub fn rank(matrix: &IntMatrix) -> usize {
    if matrix.is_empty() {
        return 0;
    }
    Echelon::new(matrix).rank()
}
