//! Umbrella crate for the `knotwork` workspace.
//!
//! Re-exports the lattice model, the topology engine, the renderers and the
//! cell census so applications can depend on a single crate.

pub use kw_cells::*;
pub use kw_core::*;
pub use kw_render::*;
pub use kw_topo::*;
