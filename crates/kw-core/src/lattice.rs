use crate::Error;
use crate::compass::{Compass, Corner, step};
use crate::junction::{Junction, JunctionId, JunctionSet, Orientation};

/// Dense index of a cell inside its [`Lattice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    x: usize,
    y: usize,
    pub(crate) junctions: Vec<JunctionId>,
}

impl Cell {
    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn coord(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// On the secondary diagonal: `x` and `y` share parity.
    pub fn is_node(&self) -> bool {
        self.x % 2 == self.y % 2
    }

    pub fn is_even(&self) -> bool {
        self.x % 2 == 0
    }

    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    pub fn has_junction(&self) -> bool {
        !self.junctions.is_empty()
    }

    pub fn junctions(&self) -> &[JunctionId] {
        &self.junctions
    }
}

/// A rectangular arena of cells plus the junctions punched into it.
#[derive(Debug, Clone)]
pub struct Lattice {
    rows: usize,
    cols: usize,
    width: usize,
    height: usize,
    pub(crate) cells: Vec<Cell>,
    nodes: Vec<CellId>,
    pub(crate) junctions: JunctionSet,
}

impl Lattice {
    /// Builds the lattice for `rows x cols` logical nodes.
    pub fn new(rows: usize, cols: usize) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let width = cols
            .checked_mul(2)
            .map(|w| w - 1)
            .ok_or(Error::InvalidDimensions { rows, cols })?;
        let height = rows
            .checked_mul(2)
            .map(|h| h - 1)
            .ok_or(Error::InvalidDimensions { rows, cols })?;
        let len = width
            .checked_mul(height)
            .ok_or(Error::InvalidDimensions { rows, cols })?;

        let mut cells = Vec::with_capacity(len);
        let mut nodes = Vec::with_capacity(rows * cols + (rows - 1) * (cols - 1));
        for y in 0..height {
            for x in 0..width {
                let cell = Cell {
                    x,
                    y,
                    junctions: Vec::new(),
                };
                if cell.is_node() {
                    nodes.push(CellId(cells.len()));
                }
                cells.push(cell);
            }
        }

        Ok(Self {
            rows,
            cols,
            width,
            height,
            cells,
            nodes,
            junctions: JunctionSet::default(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// # Panics
    /// Panics if `id` was not produced by this lattice.
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    pub fn try_cell(&self, id: CellId) -> Result<&Cell, Error> {
        self.cells.get(id.0).ok_or(Error::UnknownCell(id.0))
    }

    pub fn cell_at(&self, x: usize, y: usize) -> Option<&Cell> {
        self.id_at(x, y).map(|id| &self.cells[id.0])
    }

    pub fn id_at(&self, x: usize, y: usize) -> Option<CellId> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(CellId(y * self.width + x))
    }

    pub fn coord(&self, id: CellId) -> (usize, usize) {
        (id.0 % self.width, id.0 / self.width)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cells.len()).map(CellId)
    }

    pub fn nodes(&self) -> &[CellId] {
        &self.nodes
    }

    pub fn junctions(&self) -> &JunctionSet {
        &self.junctions
    }

    pub fn junction(&self, id: JunctionId) -> Option<&Junction> {
        self.junctions.get(id)
    }

    pub fn neighbor(&self, id: CellId, dir: Compass) -> Option<CellId> {
        self.offset(id, dir.offset())
    }

    pub fn north(&self, id: CellId) -> Option<CellId> {
        self.neighbor(id, Compass::North)
    }

    pub fn south(&self, id: CellId) -> Option<CellId> {
        self.neighbor(id, Compass::South)
    }

    pub fn east(&self, id: CellId) -> Option<CellId> {
        self.neighbor(id, Compass::East)
    }

    pub fn west(&self, id: CellId) -> Option<CellId> {
        self.neighbor(id, Compass::West)
    }

    /// Two single steps in `dir`; `None` if either leaves the lattice.
    pub fn neighbor2(&self, id: CellId, dir: Compass) -> Option<CellId> {
        self.neighbor(id, dir)
            .and_then(|mid| self.neighbor(mid, dir))
    }

    pub fn north_north(&self, id: CellId) -> Option<CellId> {
        self.neighbor2(id, Compass::North)
    }

    pub fn south_south(&self, id: CellId) -> Option<CellId> {
        self.neighbor2(id, Compass::South)
    }

    pub fn east_east(&self, id: CellId) -> Option<CellId> {
        self.neighbor2(id, Compass::East)
    }

    pub fn west_west(&self, id: CellId) -> Option<CellId> {
        self.neighbor2(id, Compass::West)
    }

    pub fn diagonal(&self, id: CellId, corner: Corner) -> Option<CellId> {
        self.offset(id, corner.offset())
    }

    pub fn is_border(&self, id: CellId) -> bool {
        let (x, y) = self.coord(id);
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    fn offset(&self, id: CellId, delta: (isize, isize)) -> Option<CellId> {
        let (x, y) = self.coord(id);
        let (nx, ny) = step(x, y, delta, self.width, self.height)?;
        Some(CellId(ny * self.width + nx))
    }

    fn carries(&self, id: CellId, orientation: Orientation) -> bool {
        self.cells[id.0]
            .junctions
            .iter()
            .filter_map(|&j| self.junctions.get(j))
            .any(|j| j.orientation == orientation)
    }

    /// A control cell reports its own junctions; a Node reports the junctions
    /// on its north and south control cells.
    pub fn has_ns_junction(&self, id: CellId) -> bool {
        if !self.cells[id.0].is_node() {
            return self.carries(id, Orientation::NorthSouth);
        }
        [Compass::North, Compass::South].into_iter().any(|dir| {
            self.neighbor(id, dir)
                .is_some_and(|c| self.carries(c, Orientation::NorthSouth))
        })
    }

    /// Same as [`Lattice::has_ns_junction`] along the east-west axis.
    pub fn has_ew_junction(&self, id: CellId) -> bool {
        if !self.cells[id.0].is_node() {
            return self.carries(id, Orientation::EastWest);
        }
        [Compass::East, Compass::West].into_iter().any(|dir| {
            self.neighbor(id, dir)
                .is_some_and(|c| self.carries(c, Orientation::EastWest))
        })
    }

    pub fn node_has_junction(&self, id: CellId) -> bool {
        self.has_ns_junction(id) || self.has_ew_junction(id)
    }

    /// Nodes exactly two cells apart along one axis.
    pub fn is_node_neighbor(&self, a: CellId, b: CellId) -> bool {
        self.node_direction(a, b).is_some()
    }

    /// Direction from Node `a` to Node `b` when they are node neighbors.
    pub fn node_direction(&self, a: CellId, b: CellId) -> Option<Compass> {
        if !self.cells.get(a.0)?.is_node() || !self.cells.get(b.0)?.is_node() {
            return None;
        }
        Compass::ALL
            .into_iter()
            .find(|&dir| self.neighbor2(a, dir) == Some(b))
    }
}
