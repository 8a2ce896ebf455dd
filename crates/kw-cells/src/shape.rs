use std::fmt;
use std::str::FromStr;

use kw_core::Lattice;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CellError;
use crate::signature::{Signature, Slot};

/// 2x2 slots in reading order (top, left, right, bottom): control cells of
/// a 3x3-node lattice.
const SLOTS_2X2: [(usize, usize); 4] = [(2, 1), (1, 2), (3, 2), (2, 3)];

/// 2x3 slots clockwise from the top-left, centre last: control cells of a
/// 3x4-node lattice.
const SLOTS_2X3: [(usize, usize); 7] = [(2, 1), (4, 1), (5, 2), (4, 3), (2, 3), (1, 2), (3, 2)];

/// Clockwise quarter turn of the 2x2 slots, before the orientation swap.
const TURN_2X2: [usize; 4] = [1, 3, 0, 2];
/// Swaps the left and right slots.
const MIRROR_2X2: [usize; 4] = [0, 2, 1, 3];

const TURN_2X3: [usize; 7] = [3, 4, 5, 0, 1, 2, 6];
const MIRRORS_2X3: [[usize; 7]; 2] = [[4, 3, 2, 1, 0, 5, 6], [1, 0, 5, 4, 3, 2, 6]];

/// Cell layouts whose link slots are enumerated by the census.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellShape {
    #[serde(rename = "2x2")]
    TwoByTwo,
    #[serde(rename = "2x3")]
    TwoByThree,
}

impl CellShape {
    pub fn slots(self) -> &'static [(usize, usize)] {
        match self {
            CellShape::TwoByTwo => &SLOTS_2X2,
            CellShape::TwoByThree => &SLOTS_2X3,
        }
    }

    pub fn slot_count(self) -> usize {
        self.slots().len()
    }

    /// Node rows and columns of the lattice the cell is drawn on.
    pub fn nodes(self) -> (usize, usize) {
        match self {
            CellShape::TwoByTwo => (3, 3),
            CellShape::TwoByThree => (3, 4),
        }
    }

    /// The shape owning signatures of this length.
    pub fn for_len(len: usize) -> Option<CellShape> {
        match len {
            4 => Some(CellShape::TwoByTwo),
            7 => Some(CellShape::TwoByThree),
            _ => None,
        }
    }

    /// Smallest rotation of the cell onto itself: a quarter turn for 2x2,
    /// a half turn for 2x3.
    pub fn rotate(self, sig: &Signature) -> Signature {
        match self {
            CellShape::TwoByTwo => sig.permuted(&TURN_2X2).map(Slot::turned),
            CellShape::TwoByThree => sig.permuted(&TURN_2X3),
        }
    }

    /// `sig` followed by its distinct rotations, in turning order.
    pub fn rotations(self, sig: &Signature) -> Vec<Signature> {
        let mut orbit = vec![sig.clone()];
        let mut next = self.rotate(sig);
        while &next != sig {
            orbit.push(next.clone());
            next = self.rotate(&next);
        }
        orbit
    }

    /// Every rotation of every mirror image of `sig`.
    pub fn reflections(self, sig: &Signature) -> Vec<Signature> {
        let mirrors: &[&[usize]] = match self {
            CellShape::TwoByTwo => &[&MIRROR_2X2],
            CellShape::TwoByThree => &[&MIRRORS_2X3[0], &MIRRORS_2X3[1]],
        };
        mirrors
            .iter()
            .flat_map(|order| self.rotations(&sig.permuted(order)))
            .collect()
    }

    fn check(self, sig: &Signature) -> Result<(), CellError> {
        if sig.len() != self.slot_count() {
            return Err(CellError::InvalidSignature {
                len: sig.len(),
                expected: self.slot_count(),
            });
        }
        Ok(())
    }

    /// A bordered lattice with one link punched per non-empty slot.
    pub fn build(self, sig: &Signature) -> Result<Lattice, CellError> {
        self.check(sig)?;
        let (rows, cols) = self.nodes();
        let mut lattice = Lattice::new(rows, cols)?;
        lattice.borders()?;

        let mut added = 0;
        for (&(x, y), &slot) in self.slots().iter().zip(sig.slots()) {
            added += match slot {
                Slot::Empty => 0,
                Slot::Horizontal => lattice.box_frame((x - 1, y), (x + 1, y))?,
                Slot::Vertical => lattice.box_frame((x, y - 1), (x, y + 1))?,
            };
        }
        debug!(shape = %self, signature = %sig, links = added, "cell built");
        Ok(lattice)
    }
}

impl fmt::Display for CellShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CellShape::TwoByTwo => "2x2",
            CellShape::TwoByThree => "2x3",
        })
    }
}

impl FromStr for CellShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2x2" => Ok(CellShape::TwoByTwo),
            "2x3" => Ok(CellShape::TwoByThree),
            other => Err(format!("unknown cell shape '{other}', expected 2x2 or 2x3")),
        }
    }
}

pub fn build_2x2(sig: &Signature) -> Result<Lattice, CellError> {
    CellShape::TwoByTwo.build(sig)
}

pub fn build_2x3(sig: &Signature) -> Result<Lattice, CellError> {
    CellShape::TwoByThree.build(sig)
}

#[cfg(test)]
mod tests {
    use kw_topo::Invariants;

    use super::{CellShape, build_2x2, build_2x3};
    use crate::{CellError, Signature};

    fn sig(label: &str) -> Signature {
        label.parse().expect("valid label")
    }

    fn labels(sigs: &[Signature]) -> Vec<String> {
        sigs.iter().map(Signature::label).collect()
    }

    fn invariants(lattice: &kw_core::Lattice) -> (usize, usize, usize) {
        let inv = Invariants::compute(lattice).expect("closed topology");
        (inv.loops, inv.regions, inv.crossings)
    }

    #[test]
    fn quarter_turn_moves_and_flips_links() {
        let shape = CellShape::TwoByTwo;
        assert_eq!(shape.rotate(&sig("1000")).label(), "0020");
        assert_eq!(
            labels(&shape.rotations(&sig("1000"))),
            vec!["1000", "0020", "0001", "0200"]
        );
        assert_eq!(
            labels(&shape.rotations(&sig("0101"))),
            vec!["0101", "2200", "1010", "0022"]
        );
        assert_eq!(labels(&shape.rotations(&sig("1111"))), vec!["1111", "2222"]);
        assert_eq!(labels(&shape.rotations(&sig("0000"))), vec!["0000"]);
        assert_eq!(
            labels(&shape.reflections(&sig("1200"))),
            labels(&shape.rotations(&sig("1020")))
        );
    }

    #[test]
    fn half_turn_keeps_the_centre() {
        let shape = CellShape::TwoByThree;
        assert_eq!(shape.rotate(&sig("1200001")).label(), "0001201");
        assert_eq!(shape.rotations(&sig("0000002")).len(), 1);
        assert_eq!(shape.reflections(&sig("1000000")).len(), 4);
        assert_eq!(
            labels(&shape.reflections(&sig("1000000"))),
            vec!["0000100", "0100000", "0100000", "0000100"]
        );
    }

    #[test]
    fn two_by_two_cells() {
        let cases = [
            ("0000", (2, 6, 4)),
            ("1000", (1, 5, 3)),
            ("2000", (1, 5, 3)),
            ("1111", (2, 3, 0)),
            ("2222", (2, 3, 0)),
            ("1212", (2, 3, 0)),
            ("2121", (2, 3, 0)),
            ("0101", (1, 4, 2)),
            ("0202", (1, 4, 2)),
            ("0012", (2, 5, 2)),
            ("0110", (2, 5, 2)),
            ("1020", (2, 4, 2)),
        ];
        for (label, expected) in cases {
            let lattice = build_2x2(&sig(label)).expect("buildable");
            assert_eq!(invariants(&lattice), expected, "{label}");
        }
    }

    #[test]
    fn two_by_two_slots_read_top_left_right_bottom() {
        let slots = [
            ("1000", (2, 1)),
            ("0200", (1, 2)),
            ("0020", (3, 2)),
            ("0001", (2, 3)),
        ];
        for (label, (x, y)) in slots {
            let lattice = build_2x2(&sig(label)).expect("buildable");
            assert!(lattice.cell_at(x, y).expect("in range").has_junction(), "{label}");
        }
        assert_eq!(invariants(&build_2x2(&sig("2121")).expect("buildable")), (2, 3, 0));
        assert_eq!(invariants(&build_2x2(&sig("0202")).expect("buildable")), (1, 4, 2));
    }

    #[test]
    fn two_by_three_cells() {
        let cases = [
            ("0000000", (1, 9, 7)),
            ("1000000", (1, 8, 6)),
            ("2000000", (2, 8, 6)),
            ("0000001", (2, 8, 6)),
            ("0000002", (1, 8, 6)),
            ("1100000", (2, 7, 5)),
            ("2200000", (1, 7, 5)),
            ("1001000", (2, 7, 5)),
            ("2020002", (2, 6, 4)),
        ];
        for (label, expected) in cases {
            let lattice = build_2x3(&sig(label)).expect("buildable");
            assert_eq!(invariants(&lattice), expected, "{label}");
        }
    }

    #[test]
    fn rotated_cells_share_invariants() {
        for shape in [CellShape::TwoByTwo, CellShape::TwoByThree] {
            let base = if shape == CellShape::TwoByTwo { "1020" } else { "1200201" };
            let expected = invariants(&shape.build(&sig(base)).expect("buildable"));
            for turned in shape.rotations(&sig(base)) {
                let lattice = shape.build(&turned).expect("buildable");
                assert_eq!(invariants(&lattice), expected, "{turned}");
            }
        }
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            build_2x3(&sig("0000")).unwrap_err(),
            CellError::InvalidSignature {
                len: 4,
                expected: 7
            }
        );
    }

    #[test]
    fn shapes_parse_by_name() {
        assert_eq!("2x3".parse(), Ok(CellShape::TwoByThree));
        assert_eq!(CellShape::TwoByTwo.to_string(), "2x2");
        assert!("3x3".parse::<CellShape>().is_err());
        assert_eq!(CellShape::for_len(7), Some(CellShape::TwoByThree));
    }
}
