use core::fmt;

use tracing::debug;

use crate::Error;
use crate::compass::Compass;
use crate::lattice::{CellId, Lattice};
use crate::random::SplitMix64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    NorthSouth,
    EastWest,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NorthSouth => write!(f, "NS"),
            Self::EastWest => write!(f, "EW"),
        }
    }
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JunctionId(u32);

impl JunctionId {
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// A link between two Nodes through the control cell between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Junction {
    pub source: CellId,
    pub control: CellId,
    pub target: CellId,
    pub orientation: Orientation,
}

#[derive(Debug, Clone)]
struct Slot {
    junction: Option<Junction>,
    next_free: Option<u32>,
}

/// Owning store for every junction of a lattice.
///
/// Removed slots go on a free list and are handed out again by the next
/// insertion, so ids stay dense under repeated toggling. Iteration is in slot
/// order.
#[derive(Debug, Clone, Default)]
pub struct JunctionSet {
    slots: Vec<Slot>,
    free_head: Option<u32>,
    live: usize,
}

impl JunctionSet {
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, id: JunctionId) -> Option<&Junction> {
        self.slots.get(id.0 as usize)?.junction.as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (JunctionId, &Junction)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.junction.as_ref().map(|j| (JunctionId(i as u32), j)))
    }

    fn insert(&mut self, junction: Junction) -> JunctionId {
        self.live += 1;
        if let Some(idx) = self.free_head {
            let slot = &mut self.slots[idx as usize];
            debug_assert!(slot.junction.is_none(), "free slot holds a junction");
            self.free_head = slot.next_free;
            slot.junction = Some(junction);
            slot.next_free = None;
            return JunctionId(idx);
        }
        let idx = self.slots.len() as u32;
        self.slots.push(Slot {
            junction: Some(junction),
            next_free: None,
        });
        JunctionId(idx)
    }

    fn remove(&mut self, id: JunctionId) -> Option<Junction> {
        let slot = self.slots.get_mut(id.0 as usize)?;
        let junction = slot.junction.take()?;
        slot.next_free = self.free_head;
        self.free_head = Some(id.0);
        self.live -= 1;
        Some(junction)
    }
}

impl Lattice {
    /// Punches a junction from `source` through `control` to `target`.
    ///
    /// Returns `Ok(None)` when `control` already carries a junction.
    pub fn add_junction(
        &mut self,
        source: CellId,
        control: CellId,
        target: CellId,
        orientation: Orientation,
    ) -> Result<Option<JunctionId>, Error> {
        for id in [source, control, target] {
            self.try_cell(id)?;
        }
        let well_formed = self
            .node_direction(source, target)
            .is_some_and(|dir| {
                dir.orientation() == orientation && self.neighbor(source, dir) == Some(control)
            });
        if !well_formed {
            return Err(Error::InvalidJunction {
                from: self.coord(source),
                via: self.coord(control),
                to: self.coord(target),
                orientation,
            });
        }
        if self.cells[control.0].has_junction() {
            return Ok(None);
        }
        Ok(Some(self.insert_junction(source, control, target, orientation)))
    }

    /// Links Node `source` to the Node two cells away in `dir`.
    ///
    /// Returns `Ok(None)` past the lattice edge or on an occupied control cell.
    pub fn link(&mut self, source: CellId, dir: Compass) -> Result<Option<JunctionId>, Error> {
        let cell = self.try_cell(source)?;
        if !cell.is_node() {
            let (x, y) = cell.coord();
            return Err(Error::NotANode { x, y });
        }
        let (Some(control), Some(target)) = (self.neighbor(source, dir), self.neighbor2(source, dir))
        else {
            return Ok(None);
        };
        if self.cells[control.0].has_junction() {
            return Ok(None);
        }
        Ok(Some(self.insert_junction(
            source,
            control,
            target,
            dir.orientation(),
        )))
    }

    /// Clears every junction on the control cell at `(x, y)`.
    ///
    /// Border cells are never cleared. Returns the number of junctions removed.
    pub fn remove_at(&mut self, x: usize, y: usize) -> usize {
        let Some(id) = self.id_at(x, y) else {
            return 0;
        };
        if self.is_border(id) {
            return 0;
        }
        let ids = std::mem::take(&mut self.cells[id.0].junctions);
        ids.into_iter()
            .filter(|&j| self.junctions.remove(j).is_some())
            .count()
    }

    /// Frames the rectangle spanned by two Node corners with junctions.
    ///
    /// Sides are walked in steps of two: north and south west to east, then
    /// west and east north to south. A side stops at the first missing
    /// neighbor and skips control cells that already carry a junction, so a
    /// repeated frame adds nothing. Corners on one row or column punch a
    /// single straight run of links.
    pub fn box_frame(&mut self, a: (usize, usize), b: (usize, usize)) -> Result<usize, Error> {
        for (x, y) in [a, b] {
            if self.id_at(x, y).is_none() {
                return Err(Error::OutOfBounds { x, y });
            }
        }
        if a.0 % 2 != b.0 % 2 || a.1 % 2 != b.1 % 2 {
            return Err(Error::ParityMismatch { a, b });
        }
        for (x, y) in [a, b] {
            if x % 2 != y % 2 {
                return Err(Error::NotANode { x, y });
            }
        }

        let (x_min, x_max) = (a.0.min(b.0), a.0.max(b.0));
        let (y_min, y_max) = (a.1.min(b.1), a.1.max(b.1));

        let mut added = 0;
        for y in [y_min, y_max] {
            let run: Vec<_> = (x_min..x_max).step_by(2).map(|x| (x, y)).collect();
            added += self.punch_run(&run, Compass::East);
        }
        for x in [x_min, x_max] {
            let run: Vec<_> = (y_min..y_max).step_by(2).map(|y| (x, y)).collect();
            added += self.punch_run(&run, Compass::South);
        }

        debug!(?a, ?b, added, "box frame punched");
        Ok(added)
    }

    /// Frames the whole lattice.
    pub fn borders(&mut self) -> Result<usize, Error> {
        self.box_frame((0, 0), (self.width() - 1, self.height() - 1))
    }

    /// Frames the rectangle inset by `2 * step` cells on every side.
    pub fn inner_frame(&mut self, step: usize) -> Result<usize, Error> {
        let inset = step.saturating_mul(2);
        let hi_x = (self.width() - 1).checked_sub(inset);
        let hi_y = (self.height() - 1).checked_sub(inset);
        match (hi_x, hi_y) {
            (Some(hx), Some(hy)) if hx >= inset && hy >= inset => {
                self.box_frame((inset, inset), (hx, hy))
            }
            _ => Ok(0),
        }
    }

    /// Toggles junctions around randomly chosen Nodes.
    ///
    /// Each Node is picked with `probability` percent chance; a picked Node
    /// toggles the junction toward one of its four neighbors (south, east,
    /// north, west). Border junctions are never removed. Returns the number
    /// of junctions added or removed.
    pub fn randomize(&mut self, probability: u32, rng: &mut SplitMix64) -> usize {
        const DIRECTIONS: [Compass; 4] = [Compass::South, Compass::East, Compass::North, Compass::West];

        let nodes = self.nodes().to_vec();
        let mut toggled = 0;
        for node in nodes {
            if rng.next_below(100) >= probability {
                continue;
            }
            let dir = DIRECTIONS[rng.next_below(4) as usize];
            let (Some(control), Some(target)) = (self.neighbor(node, dir), self.neighbor2(node, dir))
            else {
                continue;
            };
            if self.cells[control.0].has_junction() {
                let (x, y) = self.coord(control);
                if self.remove_at(x, y) > 0 {
                    toggled += 1;
                }
            } else {
                self.insert_junction(node, control, target, dir.orientation());
                toggled += 1;
            }
        }

        debug!(probability, toggled, "randomized junctions");
        toggled
    }

    fn punch_run(&mut self, run: &[(usize, usize)], dir: Compass) -> usize {
        let mut added = 0;
        for &(x, y) in run {
            let Some(node) = self.id_at(x, y) else {
                break;
            };
            let (Some(control), Some(target)) = (self.neighbor(node, dir), self.neighbor2(node, dir))
            else {
                break;
            };
            if self.cells[control.0].has_junction() {
                continue;
            }
            self.insert_junction(node, control, target, dir.orientation());
            added += 1;
        }
        added
    }

    fn insert_junction(
        &mut self,
        source: CellId,
        control: CellId,
        target: CellId,
        orientation: Orientation,
    ) -> JunctionId {
        let id = self.junctions.insert(Junction {
            source,
            control,
            target,
            orientation,
        });
        self.cells[control.0].junctions.push(id);
        id
    }
}
