//! Composite cliques built from irreducible ones.
//!
//! A [`CompositeAggregate`] keeps its units in insertion order and maintains
//! running totals as units are appended. The totals are the authoritative
//! invariants of the composite; [`CompositeAggregate::assemble_gram`] exists to
//! expose the block-diagonal structure, and the signature recomputed from it
//! need not agree with the summed per-unit triples for degenerate blocks.

use crate::error::{GramError, Result};
use crate::matrix::IntMatrix;
use crate::signature::{signature, Signature};
use crate::unit::IrreducibleUnit;
use num_bigint::BigInt;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Running totals over the units of an aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Totals {
    num_ab: (usize, usize),
    delta: i64,
    delta_shifted: i64,
    signature: Signature,
}

impl Totals {
    /// Totals with `unit` added, or an error if any of them would overflow.
    fn checked_add(&self, unit: &IrreducibleUnit) -> Result<Totals> {
        let (a, b) = unit.num_ab();
        let sig = unit.signature();
        let add = |x: usize, y: usize| x.checked_add(y).ok_or(GramError::Overflow("counts"));
        Ok(Totals {
            num_ab: (add(self.num_ab.0, a)?, add(self.num_ab.1, b)?),
            delta: self
                .delta
                .checked_add(unit.delta())
                .ok_or(GramError::Overflow("delta"))?,
            delta_shifted: self
                .delta_shifted
                .checked_add(unit.delta_shifted())
                .ok_or(GramError::Overflow("delta shifted"))?,
            signature: Signature::new(
                add(self.signature.positive, sig.positive)?,
                add(self.signature.negative, sig.negative)?,
                add(self.signature.null, sig.null)?,
            ),
        })
    }
}

/// Ordered collection of shared irreducible units with summed invariants.
#[derive(Debug, Default)]
pub struct CompositeAggregate {
    units: Vec<Arc<IrreducibleUnit>>,
    totals: Totals,
}

impl CompositeAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate holding a single unit.
    pub fn with_unit(unit: Arc<IrreducibleUnit>) -> Result<Self> {
        let mut aggregate = Self::new();
        aggregate.append(unit)?;
        Ok(aggregate)
    }

    /// Aggregate of `units`, appended in iteration order.
    pub fn from_units<I>(units: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<IrreducibleUnit>>,
    {
        let mut aggregate = Self::new();
        for unit in units {
            aggregate.append(unit)?;
        }
        Ok(aggregate)
    }

    /// Append a unit and add its fields to the running totals.
    ///
    /// Either every total is updated or, on error, nothing is: the unit's
    /// dimensions must agree with its Gram matrix and no total may overflow.
    pub fn append(&mut self, unit: Arc<IrreducibleUnit>) -> Result<()> {
        let dim = unit.dimension();
        let (a, b) = unit.num_ab();
        if a + b != dim {
            return Err(GramError::InconsistentDimension {
                what: "vertex counts",
                expected: dim,
                got: a + b,
            });
        }
        if unit.reference_row().len() != dim {
            return Err(GramError::InconsistentDimension {
                what: "reference row",
                expected: dim,
                got: unit.reference_row().len(),
            });
        }

        let totals = self.totals.checked_add(&unit)?;
        trace!(id = unit.id(), position = self.units.len(), "appending unit");
        self.totals = totals;
        self.units.push(unit);
        Ok(())
    }

    pub fn units(&self) -> &[Arc<IrreducibleUnit>] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Total `(type-A, type-B)` counts.
    pub fn num_ab(&self) -> (usize, usize) {
        self.totals.num_ab
    }

    /// Dimension of the assembled Gram matrix.
    pub fn dimension(&self) -> usize {
        self.totals.num_ab.0 + self.totals.num_ab.1
    }

    pub fn delta(&self) -> i64 {
        self.totals.delta
    }

    /// Sum of the units' recorded Δ+28·n_neg.
    pub fn delta_shifted(&self) -> i64 {
        self.totals.delta_shifted
    }

    /// Δ + 28·n_neg from the summed Δ and summed signature.
    pub fn delta_plus_28_nneg(&self) -> i128 {
        i128::from(self.totals.delta) + 28 * self.totals.signature.negative as i128
    }

    /// Summed signature triples of the units.
    pub fn signature(&self) -> Signature {
        self.totals.signature
    }

    /// Block-diagonal Gram matrix and concatenated reference row.
    ///
    /// Unit `i` occupies the diagonal block starting at the sum of the
    /// dimensions of units `0..i`; everything off the blocks is zero.
    pub fn assemble_gram(&self) -> (IntMatrix, Vec<BigInt>) {
        let n = self.units.iter().map(|u| u.dimension()).sum();
        let mut gram = IntMatrix::zeros(n, n);
        let mut reference_row = Vec::with_capacity(n);

        let mut offset = 0;
        for unit in &self.units {
            let block = unit.gram();
            let k = block.rows();
            for i in 0..k {
                for j in 0..k {
                    gram.set(offset + i, offset + j, block.get(i, j).clone());
                }
            }
            reference_row.extend_from_slice(unit.reference_row());
            offset += k;
        }

        (gram, reference_row)
    }

    /// Signature of the assembled matrix, recomputed from scratch.
    ///
    /// This is not [`CompositeAggregate::signature`]; the summed triples stay
    /// authoritative.
    pub fn assembled_signature(&self) -> Result<Signature> {
        signature(&self.assemble_gram().0)
    }
}

impl Clone for CompositeAggregate {
    /// Shares the same units and rebuilds the totals by replaying them.
    fn clone(&self) -> Self {
        let mut clone = Self::new();
        for unit in &self.units {
            match clone.totals.checked_add(unit) {
                Ok(totals) => clone.totals = totals,
                Err(_) => unreachable!("prefix sums of an existing aggregate already fit"),
            }
            clone.units.push(Arc::clone(unit));
        }
        clone
    }
}

impl fmt::Display for CompositeAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Irreducible components:")?;
        for unit in &self.units {
            writeln!(f, "   {}", unit.id())?;
        }
        writeln!(f)?;
        writeln!(f, "    (NA,NB) = ({},{})", self.totals.num_ab.0, self.totals.num_ab.1)?;
        writeln!(f, "          Δ = {}", self.totals.delta)?;
        writeln!(f, "   Δ+28nneg = {}", self.delta_plus_28_nneg())?;
        write!(
            f,
            "sign(bi.bj) = ({},{})",
            self.totals.signature.positive, self.totals.signature.negative
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::UnitRecord;

    fn unit(id: &str, gram: Vec<Vec<i64>>, row: Vec<i64>, sig: (usize, usize, usize)) -> Arc<IrreducibleUnit> {
        let gram = IntMatrix::from_rows(gram).unwrap();
        let n = gram.rows();
        let rec = UnitRecord {
            id: id.to_string(),
            num_ab: (n, 0),
            gram,
            reference_row: row.into_iter().map(BigInt::from).collect(),
            delta: 10,
            delta_shifted: 10 + 28 * sig.1 as i64,
            signature: sig.into(),
            ..Default::default()
        };
        Arc::new(IrreducibleUnit::from_record(rec).unwrap())
    }

    #[test]
    fn test_two_one_by_one_blocks() {
        let u1 = unit("u1", vec![vec![2]], vec![1], (1, 0, 0));
        let u2 = unit("u2", vec![vec![-3]], vec![5], (0, 1, 0));
        let agg = CompositeAggregate::from_units([u1, u2]).unwrap();

        let (gram, row) = agg.assemble_gram();
        assert_eq!(gram, IntMatrix::from_rows(vec![vec![2, 0], vec![0, -3]]).unwrap());
        assert_eq!(row, vec![BigInt::from(1), BigInt::from(5)]);
        assert_eq!(agg.signature().as_tuple(), (1, 1, 0));
        assert_eq!(agg.delta(), 20);
        assert_eq!(agg.delta_shifted(), 48);
        assert_eq!(agg.delta_plus_28_nneg(), 48);
    }

    #[test]
    fn test_clone_is_independent() {
        let u1 = unit("u1", vec![vec![2]], vec![1], (1, 0, 0));
        let u2 = unit("u2", vec![vec![-3]], vec![5], (0, 1, 0));
        let mut agg = CompositeAggregate::with_unit(Arc::clone(&u1)).unwrap();
        let snapshot = agg.clone();
        agg.append(u2).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.num_ab(), (1, 0));
        assert_eq!(snapshot.signature().as_tuple(), (1, 0, 0));
        assert!(Arc::ptr_eq(&snapshot.units()[0], &u1));
        assert_eq!(agg.len(), 2);
    }

    #[test]
    fn test_overflow_leaves_totals_untouched() {
        let gram = IntMatrix::from_rows(vec![vec![1]]).unwrap();
        let big = Arc::new(
            IrreducibleUnit::from_record(UnitRecord {
                id: "big".to_string(),
                num_ab: (1, 0),
                gram,
                reference_row: vec![BigInt::from(0)],
                delta: i64::MAX,
                signature: Signature::new(1, 0, 0),
                ..Default::default()
            })
            .unwrap(),
        );
        let mut agg = CompositeAggregate::with_unit(Arc::clone(&big)).unwrap();
        let err = agg.append(big).unwrap_err();
        assert!(matches!(err, GramError::Overflow("delta")));
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.num_ab(), (1, 0));
        assert_eq!(agg.delta(), i64::MAX);
    }

    #[test]
    fn test_empty_aggregate() {
        let agg = CompositeAggregate::new();
        let (gram, row) = agg.assemble_gram();
        assert_eq!((gram.rows(), gram.cols()), (0, 0));
        assert!(row.is_empty());
        assert_eq!(agg.assembled_signature().unwrap(), Signature::default());
    }

    #[test]
    fn test_display() {
        let u1 = unit("u1", vec![vec![2]], vec![1], (1, 0, 0));
        let u2 = unit("u2", vec![vec![-3]], vec![5], (0, 1, 0));
        let agg = CompositeAggregate::from_units([u1, u2]).unwrap();
        let text = agg.to_string();
        assert!(text.contains("   u1\n   u2\n"));
        assert!(text.contains("(NA,NB) = (2,0)"));
        assert!(text.ends_with("sign(bi.bj) = (1,1)"));
    }
}
