//! Foundational data model for knotwork lattices.
//!
//! ## Lattice Coordinates
//! A lattice built from `rows x cols` logical nodes has physical size
//! `(2 * cols - 1) x (2 * rows - 1)`. Cells are stored row-major and addressed
//! either by `(x, y)` or by a dense [`CellId`]. `x` grows east, `y` grows south.
//!
//! ## Nodes and Control Cells
//! Cells with `x ≡ y (mod 2)` lie on the secondary diagonal and are Nodes.
//! Every other cell is a control cell: it sits between two Nodes on one axis
//! and is where a [`Junction`] is punched. A control cell with no junction is
//! a crossing of two ribbon strands.
//!
//! ## Boundaries
//! Neighbor lookups never wrap. Every accessor returns `None` past the edge,
//! and two-step lookups return `None` if either step leaves the lattice.
//!
//! ## Half Coordinates
//! Geometry handed to renderers uses lattice units where integer coordinates
//! are cell centres; strand ends sit on the half-integer cell corners.

mod compass;
mod error;
mod geom;
mod junction;
mod lattice;
mod random;

pub use compass::{Compass, Corner};
pub use error::Error;
pub use geom::{Point2f, Polygon2f, Segment2f, Vec2f};
pub use junction::{Junction, JunctionId, JunctionSet, Orientation};
pub use lattice::{Cell, CellId, Lattice};
pub use random::SplitMix64;
