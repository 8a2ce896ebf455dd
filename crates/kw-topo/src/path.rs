use kw_core::{CellId, Corner, Error, Lattice};
use tracing::debug;

use crate::strand::{Strand, StrandGroup, StrandId};

/// One closed tour of strands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub index: usize,
    pub strands: Vec<StrandId>,
}

impl Path {
    pub fn len(&self) -> usize {
        self.strands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strands.is_empty()
    }

    pub fn contains(&self, strand: StrandId) -> bool {
        self.strands.contains(&strand)
    }

    pub fn iter(&self) -> impl Iterator<Item = StrandId> + '_ {
        self.strands.iter().copied()
    }
}

/// Strand groups of every cell and the closed paths through them.
#[derive(Debug, Clone)]
pub struct Topology {
    width: usize,
    height: usize,
    groups: Vec<StrandGroup>,
    strands: Vec<Strand>,
    paths: Vec<Path>,
}

impl Topology {
    /// Derives the local strand groups and stitches them into closed paths.
    ///
    /// Strands are pooled in cell order. Each strand not yet claimed starts a
    /// new path, traced from its first end until the tour comes back. A tour
    /// that runs off the lattice or outlasts the strand count means the
    /// pairing is corrupt and is reported as an error.
    pub fn build(lattice: &Lattice) -> Result<Self, Error> {
        let mut strands = Vec::new();
        let groups = lattice
            .cell_ids()
            .map(|cell| StrandGroup::calculate(lattice, cell, &mut strands))
            .collect();

        let mut topology = Self {
            width: lattice.width(),
            height: lattice.height(),
            groups,
            strands,
            paths: Vec::new(),
        };
        for start in 0..topology.strands.len() {
            if topology.strands[start].path.is_none() {
                topology.trace(StrandId(start))?;
            }
        }

        debug!(
            strands = topology.strands.len(),
            paths = topology.paths.len(),
            "topology built"
        );
        Ok(topology)
    }

    fn trace(&mut self, start: StrandId) -> Result<(), Error> {
        let index = self.paths.len();
        let limit = self.strands.len();
        let mut path = Path {
            index,
            strands: vec![start],
        };
        self.strands[start.0].path = Some(index);

        let mut current = start;
        let mut end = self.strands[start.0].ends[0];
        let mut closed = false;
        for _ in 0..limit {
            let (next, next_end) = self.find_next_strand(current, end)?;
            match self.strands[next.0].path {
                Some(claimed) if claimed == index => {
                    closed = true;
                    break;
                }
                Some(_) => break,
                None => {}
            }
            self.strands[next.0].path = Some(index);
            path.strands.push(next);
            current = next;
            end = next_end;
        }
        if !closed {
            return Err(Error::UnclosedPath {
                start: start.0,
                limit,
            });
        }

        debug!(index, len = path.len(), "path traced");
        self.paths.push(path);
        Ok(())
    }

    /// Follows `strand` away from `end` into the diagonal neighbor.
    ///
    /// Returns the receiving strand and the corner it was entered through.
    pub fn find_next_strand(
        &self,
        strand: StrandId,
        end: Corner,
    ) -> Result<(StrandId, Corner), Error> {
        let s = &self.strands[strand.0];
        let (x, y) = self.coord(s.cell);
        let leave = s
            .other_end(end)
            .ok_or(Error::OpenStrand { x, y, corner: end })?;
        let target = leave.opposite();
        self.diagonal(s.cell, leave)
            .and_then(|cell| self.strand_at(cell, target))
            .map(|next| (next, target))
            .ok_or(Error::OpenStrand {
                x,
                y,
                corner: leave,
            })
    }

    pub fn groups(&self) -> &[StrandGroup] {
        &self.groups
    }

    pub fn group(&self, cell: CellId) -> Option<&StrandGroup> {
        self.groups.get(cell.0)
    }

    pub fn strands(&self) -> &[Strand] {
        &self.strands
    }

    pub fn strand(&self, id: StrandId) -> &Strand {
        &self.strands[id.0]
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// The strand of `cell` that owns corner `end`.
    pub fn strand_at(&self, cell: CellId, end: Corner) -> Option<StrandId> {
        self.group(cell)?
            .strands
            .iter()
            .copied()
            .find(|&id| self.strands[id.0].has_end(end))
    }

    /// The strand of `cell` joining corners `a` and `b`.
    pub fn strand_between(&self, cell: CellId, a: Corner, b: Corner) -> Option<&Strand> {
        self.group(cell)?
            .strands
            .iter()
            .map(|&id| &self.strands[id.0])
            .find(|s| s.has_end(a) && s.has_end(b))
    }

    pub fn loop_count(&self) -> usize {
        self.paths.len()
    }

    /// Sum of all path lengths; equals the strand count of a sound topology.
    pub fn total_path_length(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    fn coord(&self, cell: CellId) -> (usize, usize) {
        (cell.0 % self.width, cell.0 / self.width)
    }

    fn diagonal(&self, cell: CellId, corner: Corner) -> Option<CellId> {
        let (x, y) = self.coord(cell);
        let (dx, dy) = corner.offset();
        let nx = x.checked_add_signed(dx).filter(|&v| v < self.width)?;
        let ny = y.checked_add_signed(dy).filter(|&v| v < self.height)?;
        Some(CellId(ny * self.width + nx))
    }
}
