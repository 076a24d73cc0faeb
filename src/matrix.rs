//! Dense row-major matrices of exact integers.

use crate::error::{GramError, Result};
use nalgebra::DMatrix;
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use std::fmt;

/// A dense `rows × cols` matrix of arbitrary-precision integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntMatrix {
    rows: usize,
    cols: usize,
    data: Vec<BigInt>,
}

impl IntMatrix {
    /// All-zero matrix of the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![BigInt::zero(); rows * cols],
        }
    }

    /// `n × n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = BigInt::from(1);
        }
        m
    }

    /// Build a matrix from nested rows.
    ///
    /// Fails with [`GramError::Shape`] if the rows are ragged, i.e. the input
    /// is not a 2-dimensional array. An empty outer vector gives a `0 × 0`
    /// matrix.
    pub fn from_rows<T, R>(rows: Vec<R>) -> Result<Self>
    where
        T: Into<BigInt>,
        R: IntoIterator<Item = T>,
    {
        let num_rows = rows.len();
        let mut data = Vec::new();
        let mut num_cols = None;

        for row in rows {
            let start = data.len();
            data.extend(row.into_iter().map(Into::into));
            let len = data.len() - start;
            match num_cols {
                None => num_cols = Some(len),
                Some(c) if c != len => {
                    return Err(GramError::Shape {
                        expected: "must be a 2D matrix",
                        rows: num_rows,
                        cols: c,
                    });
                }
                Some(_) => {}
            }
        }

        Ok(Self {
            rows: num_rows,
            cols: num_cols.unwrap_or(0),
            data,
        })
    }

    /// Build a matrix from a flat row-major buffer.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<BigInt>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(GramError::InconsistentDimension {
                what: "row-major buffer",
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Entry `(i, j)`. Panics on out-of-range indices, like slice indexing.
    pub fn get(&self, i: usize, j: usize) -> &BigInt {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of range");
        &self.data[i * self.cols + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: BigInt) {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of range");
        self.data[i * self.cols + j] = value;
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[BigInt] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[BigInt]> {
        // data is empty when cols == 0; chunks(0) would panic
        self.data.chunks(self.cols.max(1))
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t.data[j * self.rows + i] = self.data[i * self.cols + j].clone();
            }
        }
        t
    }

    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        (0..self.rows).all(|i| (0..i).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// `M · v` for a column vector `v` of length `cols`.
    pub fn mul_vec(&self, v: &[BigInt]) -> Result<Vec<BigInt>> {
        if v.len() != self.cols {
            return Err(GramError::InconsistentDimension {
                what: "vector for right multiplication",
                expected: self.cols,
                got: v.len(),
            });
        }
        Ok((0..self.rows).map(|i| dot(self.row(i), v)).collect())
    }

    /// `vᵀ · M` for a row vector `v` of length `rows`.
    pub fn vec_mul(&self, v: &[BigInt]) -> Result<Vec<BigInt>> {
        if v.len() != self.rows {
            return Err(GramError::InconsistentDimension {
                what: "vector for left multiplication",
                expected: self.rows,
                got: v.len(),
            });
        }
        let mut out = vec![BigInt::zero(); self.cols];
        for (row, coeff) in self.iter_rows().zip(v) {
            if coeff.is_zero() {
                continue;
            }
            for (acc, x) in out.iter_mut().zip(row) {
                *acc += coeff * x;
            }
        }
        Ok(out)
    }

    /// Converts to a floating-point `nalgebra` matrix.
    ///
    /// Fails with [`GramError::NonFinite`] if an entry is too large for `f64`.
    pub fn to_f64(&self) -> Result<DMatrix<f64>> {
        let mut values = Vec::with_capacity(self.data.len());
        for x in &self.data {
            match x.to_f64() {
                Some(f) if f.is_finite() => values.push(f),
                _ => return Err(GramError::NonFinite),
            }
        }
        Ok(DMatrix::from_row_slice(self.rows, self.cols, &values))
    }
}

impl fmt::Display for IntMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.data.iter().map(|x| x.to_string().len()).max().unwrap_or(1);
        write!(f, "[")?;
        for i in 0..self.rows {
            if i != 0 {
                write!(f, "\n ")?;
            }
            write!(f, "[")?;
            for (j, x) in self.row(i).iter().enumerate() {
                if j != 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", x.to_string(), width = width)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

pub(crate) fn dot(a: &[BigInt], b: &[BigInt]) -> BigInt {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
