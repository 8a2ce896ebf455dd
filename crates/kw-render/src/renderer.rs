use kw_core::{CellId, Lattice, Point2f, Polygon2f, Segment2f};
use kw_topo::Topology;
use tracing::debug;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::geometry::{DisplayVariant, LocalGeometry};
use crate::palette::Palette;
use crate::svg::{SvgElement, num};
use crate::tikz::TikzPicture;

/// Turns a lattice into markup in one display variant.
#[derive(Debug, Clone)]
pub struct KnotRenderer<'a> {
    lattice: &'a Lattice,
    variant: DisplayVariant,
    config: RenderConfig,
}

/// Resolved stroke parameters for one SVG pass.
struct Pen<'c> {
    scale: f32,
    edge: f32,
    foreground: &'c str,
    background: &'c str,
    palette: Palette,
}

impl Pen<'_> {
    fn color(&self, path: Option<usize>) -> &str {
        path.map_or(self.background, |p| self.palette.color(p))
    }

    fn line(&self, segment: &Segment2f, width: f32, stroke: &str, cap: &str) -> SvgElement {
        SvgElement::new("line")
            .num_attr("x1", segment.a.x * self.scale)
            .num_attr("y1", segment.a.y * self.scale)
            .num_attr("x2", segment.b.x * self.scale)
            .num_attr("y2", segment.b.y * self.scale)
            .num_attr("stroke-width", width)
            .attr("stroke", stroke)
            .attr("stroke-linecap", cap)
    }

    fn circle(&self, centre: Point2f, r: f32, fill: &str) -> SvgElement {
        SvgElement::new("circle")
            .num_attr("cx", centre.x * self.scale)
            .num_attr("cy", centre.y * self.scale)
            .num_attr("r", r)
            .attr("fill", fill)
    }

    fn polygon(&self, polygon: &Polygon2f, width: f32, color: &str) -> SvgElement {
        let points = polygon
            .points
            .iter()
            .map(|p| format!("{},{}", num(p.x * self.scale), num(p.y * self.scale)))
            .collect::<Vec<_>>()
            .join(" ");
        SvgElement::new("polygon")
            .attr("points", points)
            .num_attr("stroke-width", width)
            .attr("fill", color)
            .attr("stroke", color)
    }
}

impl<'a> KnotRenderer<'a> {
    pub fn new(lattice: &'a Lattice, variant: DisplayVariant, config: RenderConfig) -> Self {
        Self {
            lattice,
            variant,
            config,
        }
    }

    pub fn variant(&self) -> DisplayVariant {
        self.variant
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Local geometry of every anchor cell, in anchor order.
    pub fn geometry(&self) -> Result<Vec<(CellId, LocalGeometry)>, RenderError> {
        let topology = Topology::build(self.lattice)?;
        Ok(self.geometry_with(&topology))
    }

    fn geometry_with(&self, topology: &Topology) -> Vec<(CellId, LocalGeometry)> {
        let builder = self.variant.builder(self.config.rounded);
        builder
            .anchors(self.lattice)
            .into_iter()
            .map(|cell| (cell, builder.local_geometry(self.lattice, topology, cell)))
            .collect()
    }

    /// Canvas size in pixels: the distance between the outermost cell centres.
    pub fn canvas_size(&self) -> (f32, f32) {
        let s = self.config.scale;
        (
            (self.lattice.width() - 1) as f32 * s,
            (self.lattice.height() - 1) as f32 * s,
        )
    }

    pub fn svg(&self) -> Result<String, RenderError> {
        let palette = Palette::named(&self.config.palette)
            .ok_or_else(|| RenderError::UnknownPalette(self.config.palette.clone()))?;
        let topology = Topology::build(self.lattice)?;
        let geometry = self.geometry_with(&topology);

        let scale = self.config.scale;
        let edge = match self.variant {
            DisplayVariant::Basic | DisplayVariant::Beveled => scale / 8.0,
            _ => scale / 2.0,
        };
        let pen = Pen {
            scale,
            edge,
            foreground: &self.config.foreground,
            background: &self.config.background,
            palette,
        };

        let (width, height) = self.canvas_size();
        let mut root = SvgElement::new("svg")
            .attr("version", "1.1")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("xmlns:xlink", "http://www.w3.org/1999/xlink")
            .attr("align", "center")
            .num_attr("width", width)
            .num_attr("height", height)
            .child(
                SvgElement::new("rect")
                    .num_attr("width", width)
                    .num_attr("height", height)
                    .attr("fill", pen.foreground),
            );

        match self.variant {
            DisplayVariant::Basic | DisplayVariant::Beveled => {
                self.negative(&mut root, &pen, &geometry)
            }
            DisplayVariant::Positive => positive(&mut root, &pen, &geometry),
            DisplayVariant::Ribbon => {
                positive(&mut root, &pen, &geometry);
                stripes(&mut root, &pen, &geometry);
            }
            DisplayVariant::Primary => primary(&mut root, &pen, &geometry),
        }

        debug!(
            variant = %self.variant,
            elements = root.len(),
            paths = topology.loop_count(),
            "svg emitted"
        );
        Ok(root.build())
    }

    /// Every band line as a TikZ stroke, mirrored so north stays up.
    pub fn tikz(&self) -> Result<String, RenderError> {
        let mut picture = TikzPicture::new(self.config.scale / self.config.tikz_scale_divisor);
        for (_, local) in self.geometry()? {
            for stroke in &local.lines {
                picture.line(stroke.segment.a, stroke.segment.b);
            }
        }
        debug!(variant = %self.variant, lines = picture.len(), "tikz emitted");
        Ok(picture.build())
    }

    fn negative(&self, root: &mut SvgElement, pen: &Pen, geometry: &[(CellId, LocalGeometry)]) {
        for (_, local) in geometry {
            if let Some(polygon) = &local.polygon {
                root.push(pen.polygon(polygon, pen.edge, pen.background));
            }
        }
        for (_, junction) in self.lattice.junctions().iter() {
            let (sx, sy) = self.lattice.coord(junction.source);
            let (tx, ty) = self.lattice.coord(junction.target);
            let segment = Segment2f::new(Point2f::cell_center(sx, sy), Point2f::cell_center(tx, ty));
            root.push(pen.line(&segment, pen.edge * 2.0, pen.background, "round"));
        }
        for (_, local) in geometry {
            for stroke in &local.lines {
                root.push(pen.line(&stroke.segment, pen.edge * 1.1, pen.background, "round"));
            }
        }
    }
}

fn positive(root: &mut SvgElement, pen: &Pen, geometry: &[(CellId, LocalGeometry)]) {
    for (_, local) in geometry {
        for stroke in &local.lines {
            root.push(pen.line(&stroke.segment, pen.edge, pen.background, "butt"));
        }
        for joint in &local.circles {
            root.push(pen.circle(joint.centre, pen.edge / 2.0 * 0.95, pen.background));
        }
    }
}

/// Foreground stripe down the middle of every band.
fn stripes(root: &mut SvgElement, pen: &Pen, geometry: &[(CellId, LocalGeometry)]) {
    let width = pen.edge / 3.0;
    for (_, local) in geometry {
        for stroke in &local.lines {
            root.push(pen.line(&stroke.segment, width, pen.foreground, "butt"));
        }
        for joint in &local.circles {
            root.push(pen.circle(joint.centre, width / 2.0, pen.foreground));
        }
    }
}

fn primary(root: &mut SvgElement, pen: &Pen, geometry: &[(CellId, LocalGeometry)]) {
    for (_, local) in geometry {
        for stroke in &local.lines {
            root.push(pen.line(&stroke.segment, pen.edge, pen.color(stroke.path), "butt"));
        }
        for joint in &local.circles {
            root.push(pen.circle(joint.centre, pen.edge / 2.0 * 0.96, pen.color(joint.path)));
        }
        if let Some(crossing) = &local.crossing {
            if let Some(centre) = &local.polygon {
                root.push(pen.polygon(centre, pen.edge / 2.0, pen.foreground));
            }
            root.push(pen.line(
                &crossing.segment,
                pen.edge,
                pen.color(crossing.path),
                "butt",
            ));
        }
    }
}
