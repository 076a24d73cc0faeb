//! Irrep and vertex tables for a single simple factor.

use crate::config::DataLayout;
use crate::error::{GramError, Result};
use crate::record::{at_line, parse_int, parse_labeled, parse_list};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const DELTA_LABEL: usize = 4;
const BIBI_LABEL: usize = 8;
const B0BI_LABEL: usize = 8;

/// One row of an irrep table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrrepRecord {
    pub id: String,
    pub h: i64,
    pub a: i64,
    pub b: i64,
    pub c: i64,
    pub quaternionic: bool,
    pub highest_weight: Vec<i64>,
}

impl FromStr for IrrepRecord {
    type Err = GramError;

    fn from_str(line: &str) -> Result<Self> {
        let data: Vec<&str> = line.trim_end_matches(['\n', '\r']).split('\t').collect();
        let &[id, h, a, b, c, quat, hw] = data.as_slice() else {
            return Err(GramError::parse(
                "irrep",
                format!("expected 7 tab-separated columns, got {}", data.len()),
            ));
        };
        let highest_weight = hw
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(',')
            .filter(|x| !x.trim().is_empty())
            .map(|x| parse_int("highest weight", x))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            id: id.to_string(),
            h: parse_int("irrep H", h)?,
            a: parse_int("irrep A", a)?,
            b: parse_int("irrep B", b)?,
            c: parse_int("irrep C", c)?,
            quaternionic: quat.trim() == "True",
            highest_weight,
        })
    }
}

/// One row of a vertex table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRecord {
    pub id: String,
    pub delta: i64,
    pub bibi: i64,
    pub b0bi: i64,
    /// `(multiplicity, irrep ID)` pairs.
    pub hypers: Vec<(u64, String)>,
}

impl FromStr for VertexRecord {
    type Err = GramError;

    fn from_str(line: &str) -> Result<Self> {
        let data: Vec<&str> = line.trim_end_matches(['\n', '\r']).split('\t').collect();
        let &[id, delta, bibi, b0bi, hypers] = data.as_slice() else {
            return Err(GramError::parse(
                "vertex",
                format!("expected 5 tab-separated columns, got {}", data.len()),
            ));
        };
        let hypers = hypers
            .split(" + ")
            .map(|summand| {
                let (n, irrep) = summand
                    .split_once(" x ")
                    .ok_or_else(|| GramError::parse("vertex hypers", format!("no ' x ' in {summand:?}")))?;
                let irrep = parse_list(irrep).join(", ");
                Ok((parse_int("vertex hypers", n)?, irrep))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            id: id.to_string(),
            delta: parse_labeled("vertex delta", delta, DELTA_LABEL)?,
            bibi: parse_labeled("vertex bi·bi", bibi, BIBI_LABEL)?,
            b0bi: parse_labeled("vertex b0·bi", b0bi, B0BI_LABEL)?,
            hypers,
        })
    }
}

/// Irrep table for the simple factor `<series><rank>`.
pub fn load_irreps(layout: &DataLayout, series: char, rank: u32) -> Result<Vec<IrrepRecord>> {
    load_table(&layout.irreps_path(series, rank))
}

/// Vertex table for the simple factor `<series><rank>`.
pub fn load_vertices(layout: &DataLayout, series: char, rank: u32) -> Result<Vec<VertexRecord>> {
    load_table(&layout.vertices_path(series, rank))
}

fn load_table<T>(path: &Path) -> Result<Vec<T>>
where
    T: FromStr<Err = GramError>,
{
    let text = fs::read_to_string(path).map_err(|source| GramError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| line.parse().map_err(|e| at_line(e, n + 1)))
        .collect::<Result<Vec<T>>>()?;
    info!(count = rows.len(), path = %path.display(), "table loaded");
    Ok(rows)
}
