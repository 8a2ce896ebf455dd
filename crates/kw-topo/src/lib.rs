//! Knot topology derived from a junction-punched lattice.
//!
//! Every control cell pairs its four corners into at most two strands:
//! - No junction: a crossing, pairing the diagonals `(NW, SE)` and `(NE, SW)`.
//! - A junction: the ribbon turns around it, pairing the corners on each side.
//! - No junction on the lattice border: the ribbon turns along the border.
//!
//! Strands are then stitched into closed [`Path`]s by leaving each strand
//! through a corner and entering the diagonal neighbor through the opposite
//! corner. The number of paths is the loop count of the knot.
//!
//! Node regions come from [`full_connected`], the fixed point of one-step
//! junction adjacency.

mod connect;
mod invariants;
mod path;
mod strand;

pub use connect::{full_connected, one_step_connected, regions};
pub use invariants::{Invariants, crossing_count, loop_count, region_count};
pub use path::{Path, Topology};
pub use strand::{Strand, StrandGroup, StrandId};
