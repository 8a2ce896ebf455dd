use std::fmt;
use std::str::FromStr;

use kw_core::{CellId, Compass, Lattice, Orientation, Point2f, Polygon2f, Segment2f, Vec2f};
use kw_topo::Topology;
use serde::{Deserialize, Serialize};

use crate::negative::{Basic, Beveled};
use crate::positive::Positive;
use crate::primary::Primary;

/// A stroke, optionally coloured by the index of the path it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub segment: Segment2f,
    pub path: Option<usize>,
}

impl Stroke {
    pub fn plain(a: Point2f, b: Point2f) -> Self {
        Self {
            segment: Segment2f::new(a, b),
            path: None,
        }
    }

    pub fn on_path(a: Point2f, b: Point2f, path: Option<usize>) -> Self {
        Self {
            segment: Segment2f::new(a, b),
            path,
        }
    }
}

/// A round joint hiding the seam between two strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub centre: Point2f,
    pub path: Option<usize>,
}

/// Everything one variant draws around a single anchor cell, in lattice units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalGeometry {
    pub polygon: Option<Polygon2f>,
    pub lines: Vec<Stroke>,
    pub circles: Vec<Joint>,
    /// The strand drawn over the other one at a crossing.
    pub crossing: Option<Stroke>,
}

impl LocalGeometry {
    pub(crate) fn line(&mut self, a: Point2f, b: Point2f) {
        self.lines.push(Stroke::plain(a, b));
    }

    pub(crate) fn circle(&mut self, centre: Point2f) {
        self.circles.push(Joint { centre, path: None });
    }

    pub fn is_empty(&self) -> bool {
        self.polygon.is_none()
            && self.lines.is_empty()
            && self.circles.is_empty()
            && self.crossing.is_none()
    }
}

pub(crate) fn unit(dir: Compass) -> Vec2f {
    Vec2f::from(dir.offset())
}

/// The control cell toward `dir` exists and is a crossing.
pub(crate) fn is_free(lattice: &Lattice, node: CellId, dir: Compass) -> bool {
    lattice
        .neighbor(node, dir)
        .is_some_and(|c| !lattice.cell(c).has_junction())
}

/// The control cell toward `dir` exists and holds a junction of `orientation`.
pub(crate) fn carries(
    lattice: &Lattice,
    node: CellId,
    dir: Compass,
    orientation: Orientation,
) -> bool {
    lattice.neighbor(node, dir).is_some_and(|c| match orientation {
        Orientation::NorthSouth => lattice.has_ns_junction(c),
        Orientation::EastWest => lattice.has_ew_junction(c),
    })
}

/// The junction toward `dir` runs across `dir` rather than along it.
pub(crate) fn carries_across(lattice: &Lattice, node: CellId, dir: Compass) -> bool {
    carries(lattice, node, dir, dir.clockwise().orientation())
}

pub(crate) fn node_point(lattice: &Lattice, node: CellId) -> Point2f {
    let (x, y) = lattice.coord(node);
    Point2f::cell_center(x, y)
}

/// Computes the local geometry of one display variant.
pub trait LocalGeometryBuilder: Sync {
    /// Cells the variant draws around. Nodes by default.
    fn anchors(&self, lattice: &Lattice) -> Vec<CellId> {
        lattice.nodes().to_vec()
    }

    fn local_geometry(&self, lattice: &Lattice, topology: &Topology, cell: CellId)
    -> LocalGeometry;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayVariant {
    /// Negative space: diamonds at Nodes and gaps where bands cross.
    Basic,
    /// Negative space with Node polygons truncated toward junctions.
    Beveled,
    /// Positive space: the bands themselves as thick strokes.
    Positive,
    /// Positive space with a foreground stripe down each band.
    Ribbon,
    /// Strands coloured by the closed path they belong to.
    Primary,
}

impl DisplayVariant {
    pub const ALL: [DisplayVariant; 5] = [
        DisplayVariant::Basic,
        DisplayVariant::Beveled,
        DisplayVariant::Positive,
        DisplayVariant::Ribbon,
        DisplayVariant::Primary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DisplayVariant::Basic => "basic",
            DisplayVariant::Beveled => "beveled",
            DisplayVariant::Positive => "positive",
            DisplayVariant::Ribbon => "ribbon",
            DisplayVariant::Primary => "primary",
        }
    }

    pub fn builder(self, rounded: bool) -> &'static dyn LocalGeometryBuilder {
        static ROUNDED: Primary = Primary { rounded: true };
        static SQUARE: Primary = Primary { rounded: false };
        match self {
            DisplayVariant::Basic => &Basic,
            DisplayVariant::Beveled => &Beveled,
            DisplayVariant::Positive | DisplayVariant::Ribbon => &Positive,
            DisplayVariant::Primary if rounded => &ROUNDED,
            DisplayVariant::Primary => &SQUARE,
        }
    }
}

impl fmt::Display for DisplayVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayVariant::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown display variant '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::DisplayVariant;

    #[test]
    fn variant_names_round_trip() {
        for v in DisplayVariant::ALL {
            assert_eq!(v.to_string().parse::<DisplayVariant>(), Ok(v));
        }
        assert!("wobbly".parse::<DisplayVariant>().is_err());
        assert_eq!("Ribbon".parse(), Ok(DisplayVariant::Ribbon));
    }
}
