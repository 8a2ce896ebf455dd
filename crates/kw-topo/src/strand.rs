use kw_core::{CellId, Corner, Lattice, Point2f, Vec2f};

/// Index of a strand in the [`Topology`](crate::Topology) pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrandId(pub usize);

/// A short arc of ribbon joining two corners of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strand {
    pub ends: [Corner; 2],
    pub cell: CellId,
    /// Index of the path that claimed this strand.
    pub path: Option<usize>,
}

impl Strand {
    fn new(a: Corner, b: Corner, cell: CellId) -> Self {
        Self {
            ends: [a, b],
            cell,
            path: None,
        }
    }

    pub fn has_end(&self, end: Corner) -> bool {
        self.ends.contains(&end)
    }

    pub fn other_end(&self, end: Corner) -> Option<Corner> {
        match self.ends {
            [a, b] if a == end => Some(b),
            [a, b] if b == end => Some(a),
            _ => None,
        }
    }

    /// The two ends as half-integer corner points of the cell.
    pub fn endpoints(&self, lattice: &Lattice) -> [Point2f; 2] {
        let (x, y) = lattice.coord(self.cell);
        let centre = Point2f::cell_center(x, y);
        self.ends
            .map(|end| centre + 0.5 * Vec2f::from(end.offset()))
    }
}

/// The strands passing through one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandGroup {
    pub cell: CellId,
    pub strands: Vec<StrandId>,
}

impl StrandGroup {
    /// Derives the local corner pairing of `cell` and appends its strands to
    /// `pool`.
    ///
    /// Nodes carry no strands. A control cell without a junction is a
    /// crossing unless it lies on the lattice border, where it turns along
    /// the border as if framed. A control cell with a junction turns around
    /// it, dropping the half that would leave the lattice.
    pub fn calculate(lattice: &Lattice, cell: CellId, pool: &mut Vec<Strand>) -> Self {
        let mut group = Self {
            cell,
            strands: Vec::with_capacity(2),
        };
        let (x, y) = lattice.coord(cell);
        if lattice.cell(cell).is_node() {
            return group;
        }

        let on_row_edge = y == 0 || y + 1 == lattice.height();
        let on_col_edge = x == 0 || x + 1 == lattice.width();
        let pairs: Vec<(Corner, Corner)> = if lattice.has_ns_junction(cell)
            || (!lattice.cell(cell).has_junction() && on_col_edge)
        {
            let mut pairs = Vec::with_capacity(2);
            if lattice.east(cell).is_some() {
                pairs.push((Corner::NorthEast, Corner::SouthEast));
            }
            if lattice.west(cell).is_some() {
                pairs.push((Corner::NorthWest, Corner::SouthWest));
            }
            pairs
        } else if lattice.has_ew_junction(cell)
            || (!lattice.cell(cell).has_junction() && on_row_edge)
        {
            let mut pairs = Vec::with_capacity(2);
            if lattice.north(cell).is_some() {
                pairs.push((Corner::NorthWest, Corner::NorthEast));
            }
            if lattice.south(cell).is_some() {
                pairs.push((Corner::SouthEast, Corner::SouthWest));
            }
            pairs
        } else {
            vec![
                (Corner::NorthWest, Corner::SouthEast),
                (Corner::NorthEast, Corner::SouthWest),
            ]
        };

        for (a, b) in pairs {
            group.strands.push(StrandId(pool.len()));
            pool.push(Strand::new(a, b, cell));
        }
        group
    }

    pub fn len(&self) -> usize {
        self.strands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use kw_core::{Compass, Corner, Lattice, Point2f};

    use crate::{Strand, StrandGroup};

    fn ends(lattice: &Lattice, x: usize, y: usize) -> Vec<[u8; 2]> {
        let mut pool = Vec::new();
        let cell = lattice.id_at(x, y).expect("in range");
        StrandGroup::calculate(lattice, cell, &mut pool);
        pool.iter()
            .map(|s: &Strand| s.ends.map(Corner::index))
            .collect()
    }

    #[test]
    fn interior_crossing_pairs_diagonals() {
        let lattice = Lattice::new(3, 3).expect("valid lattice");
        assert_eq!(ends(&lattice, 2, 1), vec![[0, 2], [1, 3]]);
        assert_eq!(ends(&lattice, 1, 2), vec![[0, 2], [1, 3]]);
    }

    #[test]
    fn nodes_carry_no_strands() {
        let lattice = Lattice::new(3, 3).expect("valid lattice");
        assert!(ends(&lattice, 2, 2).is_empty());
        assert!(ends(&lattice, 1, 1).is_empty());
    }

    #[test]
    fn junctions_bend_the_ribbon() {
        let mut lattice = Lattice::new(3, 3).expect("valid lattice");
        let centre = lattice.id_at(2, 2).expect("in range");
        lattice.link(centre, Compass::North).expect("node");
        lattice.link(centre, Compass::East).expect("node");
        assert_eq!(ends(&lattice, 2, 1), vec![[1, 2], [0, 3]]);
        assert_eq!(ends(&lattice, 3, 2), vec![[0, 1], [2, 3]]);
    }

    #[test]
    fn border_cells_turn_along_the_edge() {
        let mut lattice = Lattice::new(3, 3).expect("valid lattice");
        assert_eq!(ends(&lattice, 1, 0), vec![[2, 3]]);
        assert_eq!(ends(&lattice, 3, 4), vec![[0, 1]]);
        assert_eq!(ends(&lattice, 0, 1), vec![[1, 2]]);
        assert_eq!(ends(&lattice, 4, 3), vec![[0, 3]]);

        lattice.borders().expect("frame");
        assert_eq!(ends(&lattice, 1, 0), vec![[2, 3]]);
        assert_eq!(ends(&lattice, 4, 3), vec![[0, 3]]);
    }

    #[test]
    fn strand_end_queries() {
        let lattice = Lattice::new(2, 2).expect("valid lattice");
        let cell = lattice.id_at(1, 0).expect("in range");
        let strand = Strand {
            ends: [Corner::SouthEast, Corner::SouthWest],
            cell,
            path: None,
        };
        assert!(strand.has_end(Corner::SouthWest));
        assert!(!strand.has_end(Corner::NorthWest));
        assert_eq!(strand.other_end(Corner::SouthEast), Some(Corner::SouthWest));
        assert_eq!(strand.other_end(Corner::NorthEast), None);
        assert_eq!(
            strand.endpoints(&lattice),
            [Point2f::new(1.5, 0.5), Point2f::new(0.5, 0.5)]
        );
    }
}
