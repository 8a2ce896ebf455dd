//! Strands drawn in the colour of their path, one control cell at a time.

use kw_core::{CellId, Corner, Lattice, Point2f, Polygon2f, Vec2f};
use kw_topo::Topology;

use crate::geometry::{Joint, LocalGeometry, LocalGeometryBuilder, Stroke, node_point};

const PAIRS: [(Corner, Corner); 6] = [
    (Corner::NorthWest, Corner::NorthEast),
    (Corner::NorthWest, Corner::SouthEast),
    (Corner::NorthEast, Corner::SouthWest),
    (Corner::NorthWest, Corner::SouthWest),
    (Corner::NorthEast, Corner::SouthEast),
    (Corner::SouthEast, Corner::SouthWest),
];

#[derive(Debug, Clone, Copy)]
pub struct Primary {
    /// Bend turning strands through a midpoint instead of cutting straight.
    pub rounded: bool,
}

impl Default for Primary {
    fn default() -> Self {
        Self { rounded: true }
    }
}

fn offset(corner: Corner) -> Vec2f {
    Vec2f::from(corner.offset())
}

impl LocalGeometryBuilder for Primary {
    fn anchors(&self, lattice: &Lattice) -> Vec<CellId> {
        lattice
            .cell_ids()
            .filter(|&id| !lattice.cell(id).is_node())
            .collect()
    }

    fn local_geometry(
        &self,
        lattice: &Lattice,
        topology: &Topology,
        cell: CellId,
    ) -> LocalGeometry {
        let p = node_point(lattice, cell);
        let even = lattice.cell(cell).is_even();
        let corner = |c: Corner| p + 0.5 * offset(c);
        let mut geometry = LocalGeometry::default();

        for (a, b) in PAIRS {
            let Some(strand) = topology.strand_between(cell, a, b) else {
                continue;
            };
            let path = strand.path;
            let (ca, cb) = (corner(a), corner(b));
            let diagonal = a.opposite() == b;

            if diagonal || !self.rounded {
                geometry.lines.push(Stroke::on_path(ca, cb, path));
            } else {
                let mid = p + (1.0 / 6.0) * (offset(a) + offset(b));
                geometry.lines.push(Stroke::on_path(ca, mid, path));
                geometry.lines.push(Stroke::on_path(mid, cb, path));
                geometry.circles.push(Joint { centre: mid, path });
            }
            geometry.circles.push(Joint { centre: ca, path });
            geometry.circles.push(Joint { centre: cb, path });

            let over = if even {
                Corner::NorthWest
            } else {
                Corner::NorthEast
            };
            if diagonal && a == over {
                geometry.crossing = Some(Stroke::on_path(ca, cb, path));
            }
        }

        if geometry.crossing.is_some() {
            geometry.polygon = Some(centre_diamond(p));
        }
        geometry
    }
}

fn centre_diamond(p: Point2f) -> Polygon2f {
    Polygon2f {
        points: vec![
            Point2f::new(p.x, p.y - 0.25),
            Point2f::new(p.x + 0.25, p.y),
            Point2f::new(p.x, p.y + 0.25),
            Point2f::new(p.x - 0.25, p.y),
        ],
    }
}

#[cfg(test)]
mod tests {
    use kw_core::{Lattice, Point2f};
    use kw_topo::Topology;

    use super::Primary;
    use crate::geometry::LocalGeometryBuilder;

    fn pt(x: f32, y: f32) -> Point2f {
        Point2f::new(x, y)
    }

    fn close(a: Point2f, b: Point2f) -> bool {
        (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
    }

    #[test]
    fn anchors_are_control_cells() {
        let lattice = Lattice::new(3, 3).expect("valid lattice");
        let anchors = Primary::default().anchors(&lattice);
        assert_eq!(anchors.len(), 12);
        assert!(anchors.iter().all(|&c| !lattice.cell(c).is_node()));
    }

    #[test]
    fn crossing_goes_over_on_the_column_parity_diagonal() {
        let lattice = Lattice::new(3, 3).expect("valid lattice");
        let topology = Topology::build(&lattice).expect("closed topology");

        let even = lattice.id_at(2, 1).expect("in range");
        let geometry = Primary::default().local_geometry(&lattice, &topology, even);
        assert_eq!(geometry.lines.len(), 2);
        assert_eq!(geometry.circles.len(), 4);
        let crossing = geometry.crossing.expect("crossing");
        assert_eq!(crossing.segment.a, pt(1.5, 0.5));
        assert_eq!(crossing.segment.b, pt(2.5, 1.5));
        assert_eq!(geometry.polygon.expect("centre").points[0], pt(2.0, 0.75));

        let odd = lattice.id_at(1, 2).expect("in range");
        let crossing = Primary::default()
            .local_geometry(&lattice, &topology, odd)
            .crossing
            .expect("crossing");
        assert_eq!(crossing.segment.a, pt(1.5, 1.5));
        assert_eq!(crossing.segment.b, pt(0.5, 2.5));
    }

    #[test]
    fn border_strands_bend_through_a_midpoint() {
        let lattice = Lattice::new(3, 3).expect("valid lattice");
        let topology = Topology::build(&lattice).expect("closed topology");
        let top = lattice.id_at(1, 0).expect("in range");

        let rounded = Primary::default().local_geometry(&lattice, &topology, top);
        assert_eq!(rounded.lines.len(), 2);
        assert_eq!(rounded.circles.len(), 3);
        assert!(close(rounded.circles[0].centre, pt(1.0, 1.0 / 3.0)));
        assert!(rounded.crossing.is_none());
        assert!(rounded.polygon.is_none());

        let square = Primary { rounded: false }.local_geometry(&lattice, &topology, top);
        assert_eq!(square.lines.len(), 1);
        assert_eq!(square.lines[0].segment.a, pt(1.5, 0.5));
        assert_eq!(square.lines[0].segment.b, pt(0.5, 0.5));
    }

    #[test]
    fn strokes_carry_their_path() {
        let mut lattice = Lattice::new(3, 3).expect("valid lattice");
        lattice.borders().expect("frame");
        let topology = Topology::build(&lattice).expect("closed topology");
        let primary = Primary::default();

        for cell in primary.anchors(&lattice) {
            let geometry = primary.local_geometry(&lattice, &topology, cell);
            assert!(geometry.lines.iter().all(|s| s.path.is_some()));
            assert!(geometry.circles.iter().all(|j| j.path.is_some()));
        }
    }
}
