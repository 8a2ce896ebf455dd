use thiserror::Error;

use crate::compass::Corner;
use crate::junction::Orientation;

/// Failures reported by lattice editing and topology passes.
///
/// Occupied control cells, border removals and missing neighbors are not
/// errors; those operations return `None`, `false` or a zero count instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid lattice dimensions: {rows} rows x {cols} cols")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("coordinate ({x}, {y}) is outside the lattice")]
    OutOfBounds { x: usize, y: usize },

    #[error("cell id {0} is not part of the lattice")]
    UnknownCell(usize),

    #[error("cell ({x}, {y}) is not a node")]
    NotANode { x: usize, y: usize },

    /// Frame corners must agree in parity on both axes.
    #[error("frame corners ({}, {}) and ({}, {}) differ in parity", a.0, a.1, b.0, b.1)]
    ParityMismatch { a: (usize, usize), b: (usize, usize) },

    #[error(
        "cells {from:?} -> {via:?} -> {to:?} do not form a {orientation} junction"
    )]
    InvalidJunction {
        from: (usize, usize),
        via: (usize, usize),
        to: (usize, usize),
        orientation: Orientation,
    },

    /// A strand end points at a cell that cannot receive it.
    #[error("strand end {corner:?} of cell ({x}, {y}) has no partner across the diagonal")]
    OpenStrand { x: usize, y: usize, corner: Corner },

    #[error("path starting at strand {start} did not close within {limit} steps")]
    UnclosedPath { start: usize, limit: usize },
}
