//! Irreducible cliques: the atomic lattice records.

use crate::error::{GramError, Result};
use crate::kernel::integer_kernel_basis;
use crate::matrix::IntMatrix;
use crate::record::{HyperEntry, UnitRecord};
use crate::signature::{signature, Signature};
use num_bigint::BigInt;
use num_traits::{One, Zero};
use std::fmt;
use std::str::FromStr;

/// One irreducible clique.
///
/// Built once from a [`UnitRecord`] and immutable afterwards; aggregates share
/// it through `Arc`. Construction checks that the Gram matrix is square and
/// symmetric and that the reference row, the vertex counts and the signature
/// triple all match its dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrreducibleUnit {
    id: String,
    vertices: Vec<String>,
    gauge_group: String,
    num_ab: (usize, usize),
    gram: IntMatrix,
    reference_row: Vec<BigInt>,
    delta: i64,
    delta_shifted: i64,
    min_tension: i64,
    signature: Signature,
    hypers: Vec<HyperEntry>,
}

impl IrreducibleUnit {
    pub fn from_record(record: UnitRecord) -> Result<Self> {
        let gram = record.gram;
        if !gram.is_square() {
            return Err(GramError::Shape {
                expected: "gram must be a square matrix",
                rows: gram.rows(),
                cols: gram.cols(),
            });
        }
        if !gram.is_symmetric() {
            return Err(GramError::Shape {
                expected: "gram must be symmetric",
                rows: gram.rows(),
                cols: gram.cols(),
            });
        }

        let dim = gram.rows();
        let checks = [
            ("reference row", record.reference_row.len()),
            ("vertex counts", record.num_ab.0 + record.num_ab.1),
            ("signature triple", record.signature.dimension()),
        ];
        for (what, got) in checks {
            if got != dim {
                return Err(GramError::InconsistentDimension {
                    what,
                    expected: dim,
                    got,
                });
            }
        }

        Ok(Self {
            id: record.id,
            vertices: record.vertices,
            gauge_group: record.gauge_group,
            num_ab: record.num_ab,
            gram,
            reference_row: record.reference_row,
            delta: record.delta,
            delta_shifted: record.delta_shifted,
            min_tension: record.min_tension,
            signature: record.signature,
            hypers: record.hypers,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    pub fn gauge_group(&self) -> &str {
        &self.gauge_group
    }

    /// `(type-A count, type-B count)`.
    pub fn num_ab(&self) -> (usize, usize) {
        self.num_ab
    }

    /// Dimension of the Gram matrix (number of generators).
    pub fn dimension(&self) -> usize {
        self.gram.rows()
    }

    /// Gram matrix `bi·bj`.
    pub fn gram(&self) -> &IntMatrix {
        &self.gram
    }

    /// Inner products `b0·bi` of the reference vector with each generator.
    pub fn reference_row(&self) -> &[BigInt] {
        &self.reference_row
    }

    pub fn delta(&self) -> i64 {
        self.delta
    }

    /// Δ + 28·n_neg as recorded.
    pub fn delta_shifted(&self) -> i64 {
        self.delta_shifted
    }

    pub fn min_tension(&self) -> i64 {
        self.min_tension
    }

    /// Signature as recorded.
    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn hypers(&self) -> &[HyperEntry] {
        &self.hypers
    }

    /// Connectivity of the generators.
    ///
    /// The diagonal is zeroed and every entry is clamped to at most 1, so
    /// positive inner products become 1 while zero and negative entries are
    /// left as they are.
    pub fn nontrivial_adjacency(&self) -> IntMatrix {
        let n = self.dimension();
        let mut adjacency = self.gram.clone();
        let one = BigInt::one();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    adjacency.set(i, j, BigInt::zero());
                } else if *adjacency.get(i, j) > one {
                    adjacency.set(i, j, one.clone());
                }
            }
        }
        adjacency
    }

    /// Signature recomputed from the Gram matrix.
    pub fn computed_signature(&self) -> Result<Signature> {
        signature(&self.gram)
    }

    /// Exact integer basis of the Gram matrix null space.
    pub fn kernel_basis(&self) -> Vec<Vec<BigInt>> {
        integer_kernel_basis(&self.gram)
    }
}

impl TryFrom<UnitRecord> for IrreducibleUnit {
    type Error = GramError;

    fn try_from(record: UnitRecord) -> Result<Self> {
        Self::from_record(record)
    }
}

impl FromStr for IrreducibleUnit {
    type Err = GramError;

    fn from_str(line: &str) -> Result<Self> {
        Self::from_record(line.parse()?)
    }
}

impl fmt::Display for IrreducibleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row: Vec<String> = self.reference_row.iter().map(BigInt::to_string).collect();
        writeln!(f, "           ID : {}", self.id)?;
        writeln!(f, "     vertices : {}", self.vertices.join(", "))?;
        writeln!(f, "            G : {}", self.gauge_group)?;
        for (i, hyper) in self.hypers.iter().enumerate() {
            let label = if i == 0 { "hypers :" } else { "" };
            writeln!(f, "{label:>15} {hyper}")?;
        }
        writeln!(f, "        b0·bi : [{}]", row.join(" "))?;
        let gram = self.gram.to_string().replace('\n', &format!("\n{}", " ".repeat(15)));
        writeln!(f, "        bi·bj : {gram}")?;
        writeln!(
            f,
            "  sign(bi·bj) : ({}, {})",
            self.signature.positive, self.signature.negative
        )?;
        writeln!(f, "            Δ : {}", self.delta)?;
        writeln!(f, "        Δ+28n : {}", self.delta_shifted)?;
        write!(f, "        T_min : {}", self.min_tension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gram: Vec<Vec<i64>>, reference_row: Vec<i64>, num_ab: (usize, usize)) -> UnitRecord {
        let gram = IntMatrix::from_rows(gram).unwrap();
        let n = gram.rows();
        UnitRecord {
            id: "I-test".to_string(),
            num_ab,
            gram,
            reference_row: reference_row.into_iter().map(BigInt::from).collect(),
            signature: Signature::new(0, 0, n),
            ..Default::default()
        }
    }

    #[test]
    fn test_adjacency_clamps_and_clears_diagonal() {
        let unit = IrreducibleUnit::from_record(record(
            vec![vec![-2, 3, 0], vec![3, -1, -1], vec![0, -1, 5]],
            vec![0, 1, 2],
            (2, 1),
        ))
        .unwrap();
        let expected = IntMatrix::from_rows(vec![vec![0, 1, 0], vec![1, 0, -1], vec![0, -1, 0]]).unwrap();
        assert_eq!(unit.nontrivial_adjacency(), expected);
        // the unit itself is untouched
        assert_eq!(*unit.gram().get(0, 1), BigInt::from(3));
    }

    #[test]
    fn test_reference_row_mismatch() {
        let err = IrreducibleUnit::from_record(record(vec![vec![1, 0], vec![0, 1]], vec![1], (2, 0)))
            .unwrap_err();
        assert!(matches!(
            err,
            GramError::InconsistentDimension { what: "reference row", expected: 2, got: 1 }
        ));
    }

    #[test]
    fn test_vertex_count_mismatch() {
        let err = IrreducibleUnit::from_record(record(vec![vec![1]], vec![1], (1, 1))).unwrap_err();
        assert!(matches!(err, GramError::InconsistentDimension { what: "vertex counts", .. }));
    }

    #[test]
    fn test_asymmetric_gram_rejected() {
        let err = IrreducibleUnit::from_record(record(vec![vec![1, 2], vec![0, 1]], vec![0, 0], (2, 0)))
            .unwrap_err();
        assert!(matches!(err, GramError::Shape { .. }));
    }

    #[test]
    fn test_computed_signature_and_kernel() {
        let mut rec = record(vec![vec![1, 1], vec![1, 1]], vec![0, 0], (1, 1));
        rec.signature = Signature::new(1, 0, 1);
        let unit = IrreducibleUnit::try_from(rec).unwrap();
        assert_eq!(unit.computed_signature().unwrap(), unit.signature());

        let basis = unit.kernel_basis();
        assert_eq!(basis.len(), 1);
        assert!(unit.gram().mul_vec(&basis[0]).unwrap().iter().all(Zero::is_zero));
    }
}
