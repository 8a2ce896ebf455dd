//! Celtic cell signatures and their census.
//!
//! A cell is a small bordered lattice whose interior control cells are
//! link slots. A [`Signature`] records what each slot holds, in the
//! slot order of its [`CellShape`]:
//! - 2x2 cells have four slots around the centre Node of a 3x3-node lattice,
//!   read top, left, right, bottom.
//! - 2x3 cells have six slots around a 3x4-node lattice plus the centre slot.
//!
//! The census enumerates candidate signatures and reduces them modulo the
//! rotations and reflections of the cell.

mod census;
mod error;
mod shape;
mod signature;

pub use census::{
    Census, all_2x2, candidates, reduce_duplicates, reduce_reflections, reduce_rotations,
    with_links,
};
pub use error::CellError;
pub use shape::{CellShape, build_2x2, build_2x3};
pub use signature::{Signature, Slot};
