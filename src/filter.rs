//! Selecting irreducible cliques by vertex content or gauge group.

use crate::unit::IrreducibleUnit;
use std::collections::HashMap;
use std::sync::Arc;

/// How a vertex list must match a clique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexMatch {
    /// At least one of the vertices is present.
    Any,
    /// Every vertex is present, with at least the listed multiplicity.
    All,
}

/// Units whose vertices match `vertex_ids`.
pub fn filter_by_vertex<S: AsRef<str>>(
    units: &[Arc<IrreducibleUnit>],
    vertex_ids: &[S],
    mode: VertexMatch,
) -> Vec<Arc<IrreducibleUnit>> {
    let wanted = multiset(vertex_ids.iter().map(|v| v.as_ref()));
    units
        .iter()
        .filter(|unit| match mode {
            VertexMatch::Any => vertex_ids
                .iter()
                .any(|v| unit.vertices().iter().any(|u| u == v.as_ref())),
            VertexMatch::All => contains(&multiset(unit.vertices().iter().map(String::as_str)), &wanted),
        })
        .cloned()
        .collect()
}

/// Units whose gauge group matches `simple_factors`, e.g. `"SU(2) x SU(3)"`.
///
/// With `exact` the factors must agree as a multiset; otherwise the listed
/// factors only need to be contained in the unit's gauge group.
pub fn filter_by_gauge_group(
    units: &[Arc<IrreducibleUnit>],
    simple_factors: &str,
    exact: bool,
) -> Vec<Arc<IrreducibleUnit>> {
    let wanted = multiset(simple_factors.split(" x "));
    units
        .iter()
        .filter(|unit| {
            let have = multiset(unit.gauge_group().split(" x "));
            if exact {
                have == wanted
            } else {
                contains(&have, &wanted)
            }
        })
        .cloned()
        .collect()
}

fn multiset<'a>(items: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

fn contains<'a>(have: &HashMap<&'a str, usize>, wanted: &HashMap<&'a str, usize>) -> bool {
    wanted
        .iter()
        .all(|(k, &n)| have.get(k).copied().unwrap_or(0) >= n)
}
