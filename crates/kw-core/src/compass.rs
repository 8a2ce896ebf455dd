use crate::junction::Orientation;

/// One of the four axis directions. `y` grows toward `South`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Compass {
    North,
    East,
    South,
    West,
}

impl Compass {
    /// Clockwise, starting north.
    pub const ALL: [Compass; 4] = [Compass::North, Compass::East, Compass::South, Compass::West];

    pub fn offset(self) -> (isize, isize) {
        match self {
            Compass::North => (0, -1),
            Compass::East => (1, 0),
            Compass::South => (0, 1),
            Compass::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Compass {
        match self {
            Compass::North => Compass::South,
            Compass::East => Compass::West,
            Compass::South => Compass::North,
            Compass::West => Compass::East,
        }
    }

    pub fn clockwise(self) -> Compass {
        match self {
            Compass::North => Compass::East,
            Compass::East => Compass::South,
            Compass::South => Compass::West,
            Compass::West => Compass::North,
        }
    }

    pub fn counter_clockwise(self) -> Compass {
        self.clockwise().opposite()
    }

    /// Orientation of a junction that runs along this direction.
    pub fn orientation(self) -> Orientation {
        match self {
            Compass::North | Compass::South => Orientation::NorthSouth,
            Compass::East | Compass::West => Orientation::EastWest,
        }
    }
}

/// Corner quadrant of a cell; the discriminant is the strand end number.
///
/// Ends are numbered clockwise from the north-west corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Corner {
    NorthWest = 0,
    NorthEast = 1,
    SouthEast = 2,
    SouthWest = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NorthWest,
        Corner::NorthEast,
        Corner::SouthEast,
        Corner::SouthWest,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(i: u8) -> Option<Corner> {
        match i {
            0 => Some(Corner::NorthWest),
            1 => Some(Corner::NorthEast),
            2 => Some(Corner::SouthEast),
            3 => Some(Corner::SouthWest),
            _ => None,
        }
    }

    /// The corner across the cell. A thread leaving through `self` enters the
    /// diagonal neighbor through `self.opposite()`.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::NorthWest => Corner::SouthEast,
            Corner::NorthEast => Corner::SouthWest,
            Corner::SouthEast => Corner::NorthWest,
            Corner::SouthWest => Corner::NorthEast,
        }
    }

    pub fn offset(self) -> (isize, isize) {
        let (_, dy) = self.vertical().offset();
        let (dx, _) = self.horizontal().offset();
        (dx, dy)
    }

    pub fn vertical(self) -> Compass {
        match self {
            Corner::NorthWest | Corner::NorthEast => Compass::North,
            Corner::SouthEast | Corner::SouthWest => Compass::South,
        }
    }

    pub fn horizontal(self) -> Compass {
        match self {
            Corner::NorthWest | Corner::SouthWest => Compass::West,
            Corner::NorthEast | Corner::SouthEast => Compass::East,
        }
    }
}

/// Moves `(x, y)` by `(dx, dy)`, returning `None` outside `[0, width) x [0, height)`.
pub(crate) fn step(
    x: usize,
    y: usize,
    (dx, dy): (isize, isize),
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    if nx >= width || ny >= height {
        return None;
    }
    Some((nx, ny))
}
