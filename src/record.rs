//! Tab-separated irreducible-clique records.
//!
//! One record per line:
//!
//! ```text
//! ID  [v1, v2, ...]  Δ = d  Δ+28n = d'  Tmin = t  sign = [p, n]
//!     bi·bj = [[..], [..]]  b0·bi = [..]  (k1,k2) : n x [R1, R2] + ...  ...
//! ```
//!
//! The second `-`-separated component of the ID carries the vertex counts as
//! `(a,b)`. Scalar columns are read after a fixed-width label.

use crate::error::{GramError, Result};
use crate::matrix::IntMatrix;
use crate::signature::Signature;
use crate::unit::IrreducibleUnit;
use num_bigint::BigInt;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Label widths (in characters) of the scalar columns.
const DELTA_LABEL: usize = 4;
const DELTA_SHIFTED_LABEL: usize = 8;
const MIN_TENSION_LABEL: usize = 7;

/// Multiplicity and irrep IDs of one summand of a hypermultiplet entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HyperIrrep {
    pub multiplicity: u64,
    pub irreps: Vec<String>,
}

/// Hypermultiplets charged under the factors listed in `charges`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HyperEntry {
    pub charges: Vec<i64>,
    pub summands: Vec<HyperIrrep>,
}

/// Plain field record of one irreducible clique, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitRecord {
    pub id: String,
    pub vertices: Vec<String>,
    pub gauge_group: String,
    /// `(type-A count, type-B count)`.
    pub num_ab: (usize, usize),
    pub gram: IntMatrix,
    pub reference_row: Vec<BigInt>,
    pub delta: i64,
    pub delta_shifted: i64,
    pub min_tension: i64,
    pub signature: Signature,
    pub hypers: Vec<HyperEntry>,
}

impl FromStr for UnitRecord {
    type Err = GramError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\n', '\r']);
        let data: Vec<&str> = line.split('\t').collect();
        if data.len() < 8 {
            return Err(GramError::parse(
                "record",
                format!("expected at least 8 tab-separated columns, got {}", data.len()),
            ));
        }

        let id = data[0].to_string();
        let num_ab = parse_num_ab(&id)?;
        let vertices = parse_list(data[1])
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let gauge_group = gauge_group_of(&vertices)?;

        let delta = parse_labeled("delta", data[2], DELTA_LABEL)?;
        let delta_shifted = parse_labeled("delta shifted", data[3], DELTA_SHIFTED_LABEL)?;
        let min_tension = parse_labeled("minimal tension", data[4], MIN_TENSION_LABEL)?;

        let gram = parse_matrix(data[6])?;
        let reference_row = parse_list(data[7])
            .into_iter()
            .map(|x| parse_int::<BigInt>("reference row", x))
            .collect::<Result<Vec<_>>>()?;

        let signature = parse_signature(data[5], gram.rows())?;

        let hypers = data[8..]
            .iter()
            .map(|s| parse_hyper(s))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id,
            vertices,
            gauge_group,
            num_ab,
            gram,
            reference_row,
            delta,
            delta_shifted,
            min_tension,
            signature,
            hypers,
        })
    }
}

impl fmt::Display for HyperEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key: Vec<String> = self.charges.iter().map(i64::to_string).collect();
        write!(f, "({}) : ", key.join(","))?;
        for (i, s) in self.summands.iter().enumerate() {
            if i != 0 {
                write!(f, " + ")?;
            }
            write!(f, "{} x [{}]", s.multiplicity, s.irreps.join(", "))?;
        }
        Ok(())
    }
}

/// Gauge group string of a vertex list, e.g. `SU(2) x SO(8)`.
///
/// Each vertex ID has the form `<prefix>-<series><rank>-...`; series A, B, C, D
/// map to SU(r+1), SO(2r+1), Sp(r), SO(2r) and anything else to `<series>(r)`.
pub fn gauge_group_of(vertices: &[String]) -> Result<String> {
    let factors = vertices
        .iter()
        .map(|vertex| {
            let group_id = vertex
                .split('-')
                .nth(1)
                .ok_or_else(|| GramError::parse("vertex", format!("no group in {vertex:?}")))?;
            let mut chars = group_id.chars();
            let series = chars
                .next()
                .ok_or_else(|| GramError::parse("vertex", format!("empty group in {vertex:?}")))?;
            let rank: u32 = parse_int("vertex rank", chars.as_str())?;
            Ok(match series {
                'A' => format!("SU({})", rank + 1),
                'B' => format!("SO({})", 2 * rank + 1),
                'C' => format!("Sp({rank})"),
                'D' => format!("SO({})", 2 * rank),
                other => format!("{other}({rank})"),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(factors.join(" x "))
}

/// Read every record in `path` and build the immutable units.
pub fn load_irreducible_units(path: impl AsRef<Path>) -> Result<Vec<Arc<IrreducibleUnit>>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| GramError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let units = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            line.parse::<IrreducibleUnit>()
                .map(Arc::new)
                .map_err(|e| at_line(e, n + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(count = units.len(), path = %path.display(), "cliques loaded");
    Ok(units)
}

pub(crate) fn at_line(err: GramError, line: usize) -> GramError {
    match err {
        GramError::Parse { field, message } => GramError::Parse {
            field,
            message: format!("line {line}: {message}"),
        },
        other => other,
    }
}

pub(crate) fn parse_int<T: FromStr>(field: &'static str, s: &str) -> Result<T> {
    s.trim()
        .parse()
        .map_err(|_| GramError::parse(field, format!("{:?} is not an integer", s.trim())))
}

/// Integer after a fixed-width label, e.g. `Δ = -3` with a 4-character label.
pub(crate) fn parse_labeled<T: FromStr>(field: &'static str, s: &str, label: usize) -> Result<T> {
    let rest: String = s.chars().skip(label).collect();
    parse_int(field, &rest)
}

/// Items of a `[a, b, c]` list; brackets are optional and an empty list gives
/// no items.
pub(crate) fn parse_list(s: &str) -> Vec<&str> {
    let inner = bracketed(s).unwrap_or(s).trim();
    if inner.is_empty() {
        return Vec::new();
    }
    inner.split(',').map(str::trim).collect()
}

/// Text between the first `[` and the last `]`.
fn bracketed(s: &str) -> Option<&str> {
    let start = s.find('[')?;
    let end = s.rfind(']')?;
    (start < end).then(|| &s[start + 1..end])
}

fn parse_num_ab(id: &str) -> Result<(usize, usize)> {
    let counts = id
        .split('-')
        .nth(1)
        .ok_or_else(|| GramError::parse("id", format!("no vertex counts in {id:?}")))?;
    let counts = counts.trim_start_matches('(').trim_end_matches(')');
    let mut parts = counts.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => Ok((parse_int("id", a)?, parse_int("id", b)?)),
        _ => Err(GramError::parse("id", format!("expected (a,b) in {id:?}"))),
    }
}

fn parse_signature(s: &str, dim: usize) -> Result<Signature> {
    let inner = s
        .split('[')
        .nth(1)
        .and_then(|rest| rest.split(']').next())
        .ok_or_else(|| GramError::parse("signature", format!("no [p, n] in {s:?}")))?;
    let counts: Vec<usize> = inner
        .split(',')
        .map(|x| parse_int("signature", x))
        .collect::<Result<_>>()?;
    let &[positive, negative] = counts.as_slice() else {
        return Err(GramError::parse("signature", format!("expected two counts in {s:?}")));
    };
    if positive + negative > dim {
        return Err(GramError::InconsistentDimension {
            what: "signature triple",
            expected: dim,
            got: positive + negative,
        });
    }
    Ok(Signature::new(positive, negative, dim - positive - negative))
}

fn parse_matrix(s: &str) -> Result<IntMatrix> {
    let inner = bracketed(s)
        .ok_or_else(|| GramError::parse("gram matrix", format!("no [[..]] in {s:?}")))?
        .trim();
    if inner.is_empty() {
        return Ok(IntMatrix::zeros(0, 0));
    }
    let rows = inner
        .split("], [")
        .map(|row| {
            parse_list(row.trim_matches(['[', ']']))
                .into_iter()
                .map(|x| parse_int::<BigInt>("gram matrix", x))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;
    IntMatrix::from_rows(rows)
}

fn parse_hyper(s: &str) -> Result<HyperEntry> {
    let (key, irreps) = s
        .split_once(" : ")
        .ok_or_else(|| GramError::parse("hypers", format!("no ' : ' in {s:?}")))?;
    let charges = key
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(|x| parse_int("hypers", x))
        .collect::<Result<Vec<i64>>>()?;
    let summands = irreps
        .split(" + ")
        .map(|summand| {
            let (n, ids) = summand
                .split_once(" x ")
                .ok_or_else(|| GramError::parse("hypers", format!("no ' x ' in {summand:?}")))?;
            Ok(HyperIrrep {
                multiplicity: parse_int("hypers", n)?,
                irreps: parse_list(ids).into_iter().map(str::to_string).collect(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(HyperEntry { charges, summands })
}
