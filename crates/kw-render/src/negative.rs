//! Negative-space variants: the lattice is filled with foreground and the
//! gaps between bands are painted in background around every Node.

use kw_core::{CellId, Compass, Lattice, Point2f, Polygon2f};
use kw_topo::Topology;

use crate::geometry::{
    LocalGeometry, LocalGeometryBuilder, carries, carries_across, is_free, node_point, unit,
};

/// Gap directions, east first, going clockwise.
const GAP_ORDER: [Compass; 4] = [Compass::East, Compass::South, Compass::West, Compass::North];

const BEVEL: f32 = 0.25;

/// Diamond around each Node with gap lines into every crossing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Basic;

/// Like [`Basic`], with the Node polygon cut back where bands turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct Beveled;

impl LocalGeometryBuilder for Basic {
    fn local_geometry(&self, lattice: &Lattice, _: &Topology, cell: CellId) -> LocalGeometry {
        let p = node_point(lattice, cell);
        let mut geometry = LocalGeometry {
            polygon: Some(diamond(p)),
            ..LocalGeometry::default()
        };
        gap_lines(lattice, cell, &mut geometry);
        geometry
    }
}

impl LocalGeometryBuilder for Beveled {
    fn local_geometry(&self, lattice: &Lattice, _: &Topology, cell: CellId) -> LocalGeometry {
        let mut geometry = LocalGeometry {
            polygon: Some(beveled_polygon(lattice, cell)),
            ..LocalGeometry::default()
        };
        gap_lines(lattice, cell, &mut geometry);
        geometry
    }
}

fn diamond(p: Point2f) -> Polygon2f {
    Polygon2f {
        points: vec![
            p + 0.5 * unit(Compass::East),
            p + 0.5 * unit(Compass::South),
            p + 0.5 * unit(Compass::West),
            p + 0.5 * unit(Compass::North),
        ],
    }
}

/// One short line from the Node edge toward each free neighbor, leaning
/// counter-clockwise on even columns and clockwise on odd ones.
fn gap_lines(lattice: &Lattice, node: CellId, geometry: &mut LocalGeometry) {
    let p = node_point(lattice, node);
    let even = lattice.cell(node).is_even();
    for dir in GAP_ORDER {
        if !is_free(lattice, node, dir) {
            continue;
        }
        let lean = if even {
            dir.counter_clockwise()
        } else {
            dir.clockwise()
        };
        let u = unit(dir);
        geometry.line(p + 0.5 * u, p + u + 0.5 * unit(lean));
    }
}

fn beveled_polygon(lattice: &Lattice, node: CellId) -> Polygon2f {
    let p = node_point(lattice, node);
    let mut points = Vec::with_capacity(12);
    for side in Compass::ALL {
        let d = unit(side);
        let blocked =
            lattice.neighbor(node, side).is_none() || carries_across(lattice, node, side);
        if blocked {
            points.push(p + BEVEL * d + BEVEL * unit(side.counter_clockwise()));
            points.push(p + BEVEL * d + BEVEL * unit(side.clockwise()));
        } else {
            points.push(p + 0.5 * d);
        }

        let next = side.clockwise();
        if carries(lattice, node, side, side.orientation())
            && carries(lattice, node, next, next.orientation())
        {
            points.push(p);
        }
    }
    Polygon2f { points }
}

#[cfg(test)]
mod tests {
    use kw_core::{Lattice, Point2f};
    use kw_topo::Topology;

    use super::{Basic, Beveled};
    use crate::geometry::LocalGeometryBuilder;

    fn pt(x: f32, y: f32) -> Point2f {
        Point2f::new(x, y)
    }

    #[test]
    fn basic_draws_a_gap_per_crossing() {
        let lattice = Lattice::new(2, 2).expect("valid lattice");
        let topology = Topology::build(&lattice).expect("closed topology");

        let centre = lattice.id_at(1, 1).expect("in range");
        let geometry = Basic.local_geometry(&lattice, &topology, centre);
        let polygon = geometry.polygon.expect("diamond");
        assert_eq!(
            polygon.points,
            vec![pt(1.5, 1.0), pt(1.0, 1.5), pt(0.5, 1.0), pt(1.0, 0.5)]
        );
        assert_eq!(geometry.lines.len(), 4);
        // Odd column leans clockwise.
        assert_eq!(geometry.lines[0].segment.a, pt(1.5, 1.0));
        assert_eq!(geometry.lines[0].segment.b, pt(2.0, 1.5));

        let corner = lattice.id_at(0, 0).expect("in range");
        let geometry = Basic.local_geometry(&lattice, &topology, corner);
        assert_eq!(geometry.lines.len(), 2);
        assert_eq!(geometry.lines[0].segment.b, pt(1.0, -0.5));
        assert!(geometry.circles.is_empty());
    }

    #[test]
    fn junctions_close_the_gaps() {
        let mut lattice = Lattice::new(2, 2).expect("valid lattice");
        lattice.borders().expect("frame");
        let topology = Topology::build(&lattice).expect("closed topology");
        let corner = lattice.id_at(0, 0).expect("in range");
        assert!(Basic.local_geometry(&lattice, &topology, corner).lines.is_empty());
    }

    #[test]
    fn beveled_corner_of_a_frame() {
        let mut lattice = Lattice::new(2, 2).expect("valid lattice");
        lattice.borders().expect("frame");
        let topology = Topology::build(&lattice).expect("closed topology");
        let corner = lattice.id_at(0, 0).expect("in range");

        let polygon = Beveled
            .local_geometry(&lattice, &topology, corner)
            .polygon
            .expect("polygon");
        assert_eq!(
            polygon.points,
            vec![
                pt(-0.25, -0.25),
                pt(0.25, -0.25),
                pt(0.5, 0.0),
                pt(0.0, 0.0),
                pt(0.0, 0.5),
                pt(-0.25, 0.25),
                pt(-0.25, -0.25),
            ]
        );
    }

    #[test]
    fn beveled_matches_basic_on_open_nodes() {
        let lattice = Lattice::new(2, 2).expect("valid lattice");
        let topology = Topology::build(&lattice).expect("closed topology");
        let centre = lattice.id_at(1, 1).expect("in range");

        let beveled = Beveled.local_geometry(&lattice, &topology, centre);
        let basic = Basic.local_geometry(&lattice, &topology, centre);
        assert_eq!(beveled.lines, basic.lines);
        assert_eq!(
            beveled.polygon.expect("polygon").points,
            vec![pt(1.0, 0.5), pt(1.5, 1.0), pt(1.0, 1.5), pt(0.5, 1.0)]
        );
    }
}
