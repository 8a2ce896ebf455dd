use std::collections::BTreeSet;

use kw_core::{CellId, Compass, Lattice};

/// `node` plus every Node one junction away from it.
///
/// Directions are probed north, south, east, west.
pub fn one_step_connected(lattice: &Lattice, node: CellId) -> Vec<CellId> {
    let mut connected = vec![node];
    for dir in [Compass::North, Compass::South, Compass::East, Compass::West] {
        let Some(control) = lattice.neighbor(node, dir) else {
            continue;
        };
        let linked = match dir {
            Compass::North | Compass::South => lattice.has_ns_junction(control),
            Compass::East | Compass::West => lattice.has_ew_junction(control),
        };
        if !linked {
            continue;
        }
        if let Some(far) = lattice.neighbor2(node, dir) {
            connected.push(far);
        }
    }
    connected
}

/// Closure of [`one_step_connected`] around `node`.
///
/// Grows the set until a pass adds no new member.
pub fn full_connected(lattice: &Lattice, node: CellId) -> BTreeSet<CellId> {
    let mut closed: BTreeSet<CellId> = one_step_connected(lattice, node).into_iter().collect();
    let mut frontier: Vec<CellId> = closed.iter().copied().collect();

    while !frontier.is_empty() {
        let mut grown = Vec::new();
        for member in frontier {
            for other in one_step_connected(lattice, member) {
                if closed.insert(other) {
                    grown.push(other);
                }
            }
        }
        frontier = grown;
    }

    closed
}

/// Node regions: closures merged on shared members, in first-node order.
pub fn regions(lattice: &Lattice) -> Vec<BTreeSet<CellId>> {
    let mut regions: Vec<BTreeSet<CellId>> = Vec::new();
    for &node in lattice.nodes() {
        if regions.iter().any(|r| r.contains(&node)) {
            continue;
        }
        let closure = full_connected(lattice, node);
        match regions.iter_mut().find(|r| !r.is_disjoint(&closure)) {
            Some(existing) => existing.extend(closure),
            None => regions.push(closure),
        }
    }
    regions
}
