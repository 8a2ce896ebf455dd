//! Positive-space variant: each Node emits the band segments that pass beside
//! it, with round joints to hide the seams.

use kw_core::{CellId, Compass, Lattice};
use kw_topo::Topology;

use crate::geometry::{
    LocalGeometry, LocalGeometryBuilder, carries_across, is_free, node_point, unit,
};

const BAND_ORDER: [Compass; 4] = [Compass::East, Compass::South, Compass::West, Compass::North];

/// Band segments around every Node. Shared by the positive and ribbon styles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Positive;

impl LocalGeometryBuilder for Positive {
    fn local_geometry(&self, lattice: &Lattice, _: &Topology, cell: CellId) -> LocalGeometry {
        let p = node_point(lattice, cell);
        let even = lattice.cell(cell).is_even();
        let mut geometry = LocalGeometry::default();

        for dir in BAND_ORDER {
            let u = unit(dir);
            let free = is_free(lattice, cell, dir);
            let across = carries_across(lattice, cell, dir);
            if even {
                let side = dir.clockwise();
                let v = unit(side);
                if free {
                    geometry.line(p + u, p + 0.5 * u + 0.5 * v);
                } else if across {
                    let (a, b) = (p + 0.5 * u - 0.5 * v, p + 0.5 * u + 0.5 * v);
                    geometry.line(a, b);
                    geometry.circle(a);
                    geometry.circle(b);
                    if is_free(lattice, cell, side) {
                        geometry.line(b, p + 0.25 * u + 0.75 * v);
                    }
                }
            } else {
                let side = dir.counter_clockwise();
                let w = unit(side);
                let turn = p + 0.5 * u + 0.5 * w;
                if free {
                    geometry.line(p + u, turn);
                    geometry.circle(turn);
                } else if across {
                    let back = p + 0.5 * u - 0.5 * w;
                    geometry.line(turn, back);
                    geometry.circle(turn);
                    geometry.circle(back);
                } else {
                    continue;
                }
                if is_free(lattice, cell, side) {
                    geometry.line(turn, p + 0.25 * u + 0.75 * w);
                }
            }
        }
        geometry
    }
}

#[cfg(test)]
mod tests {
    use kw_core::{Lattice, Point2f};
    use kw_topo::Topology;

    use super::Positive;
    use crate::geometry::LocalGeometryBuilder;

    fn pt(x: f32, y: f32) -> Point2f {
        Point2f::new(x, y)
    }

    #[test]
    fn open_odd_node_turns_every_band() {
        let lattice = Lattice::new(2, 2).expect("valid lattice");
        let topology = Topology::build(&lattice).expect("closed topology");
        let centre = lattice.id_at(1, 1).expect("in range");

        let geometry = Positive.local_geometry(&lattice, &topology, centre);
        assert_eq!(geometry.lines.len(), 8);
        assert_eq!(geometry.circles.len(), 4);
        assert_eq!(geometry.lines[0].segment.a, pt(2.0, 1.0));
        assert_eq!(geometry.lines[0].segment.b, pt(1.5, 0.5));
        assert_eq!(geometry.lines[1].segment.b, pt(1.25, 0.25));
        assert!(geometry.polygon.is_none());
    }

    #[test]
    fn even_node_draws_plain_segments() {
        let lattice = Lattice::new(2, 2).expect("valid lattice");
        let topology = Topology::build(&lattice).expect("closed topology");
        let corner = lattice.id_at(0, 0).expect("in range");

        let geometry = Positive.local_geometry(&lattice, &topology, corner);
        assert_eq!(geometry.lines.len(), 2);
        assert!(geometry.circles.is_empty());
        assert_eq!(geometry.lines[1].segment.a, pt(0.0, 1.0));
        assert_eq!(geometry.lines[1].segment.b, pt(-0.5, 0.5));
    }

    #[test]
    fn perpendicular_junctions_wall_in_the_centre() {
        let mut lattice = Lattice::new(2, 2).expect("valid lattice");
        lattice.borders().expect("frame");
        let topology = Topology::build(&lattice).expect("closed topology");

        let centre = lattice.id_at(1, 1).expect("in range");
        let geometry = Positive.local_geometry(&lattice, &topology, centre);
        assert_eq!(geometry.lines.len(), 4);
        assert_eq!(geometry.circles.len(), 8);
        assert_eq!(geometry.lines[0].segment.a, pt(1.5, 0.5));
        assert_eq!(geometry.lines[0].segment.b, pt(1.5, 1.5));

        // Junctions running along the band leave nothing to draw.
        let corner = lattice.id_at(0, 0).expect("in range");
        assert!(Positive.local_geometry(&lattice, &topology, corner).is_empty());
    }
}
