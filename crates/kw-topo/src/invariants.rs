use kw_core::{Error, Lattice};
use serde::{Deserialize, Serialize};

use crate::connect::regions;
use crate::path::Topology;

/// Control cells without a junction: each is a crossing of two strands.
pub fn crossing_count(lattice: &Lattice) -> usize {
    lattice
        .cells()
        .iter()
        .filter(|c| !c.is_node() && !c.has_junction())
        .count()
}

pub fn region_count(lattice: &Lattice) -> usize {
    regions(lattice).len()
}

pub fn loop_count(lattice: &Lattice) -> Result<usize, Error> {
    Topology::build(lattice).map(|t| t.loop_count())
}

/// Summary used to classify a knot pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invariants {
    pub loops: usize,
    pub regions: usize,
    pub crossings: usize,
}

impl Invariants {
    pub fn compute(lattice: &Lattice) -> Result<Self, Error> {
        let topology = Topology::build(lattice)?;
        Ok(Self::with_topology(lattice, &topology))
    }

    /// Reuses an already built topology for the loop count.
    pub fn with_topology(lattice: &Lattice, topology: &Topology) -> Self {
        Self {
            loops: topology.loop_count(),
            regions: region_count(lattice),
            crossings: crossing_count(lattice),
        }
    }
}
