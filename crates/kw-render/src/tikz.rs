use std::fmt::Write;

use kw_core::Point2f;

use crate::svg::num;

/// A standalone `tikzpicture` made of straight strokes.
///
/// Lattice `y` grows downward while TikZ `y` grows upward, so every point
/// is mirrored on emission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TikzPicture {
    scale: f32,
    lines: Vec<(Point2f, Point2f)>,
}

impl TikzPicture {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            lines: Vec::new(),
        }
    }

    pub fn line(&mut self, a: Point2f, b: Point2f) -> &mut Self {
        self.lines.push((a, b));
        self
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn build(&self) -> String {
        let mut s = String::from(
            "\\begin{tikzpicture}[framed,background rectangle/.style={ultra thick,draw=black}]\n",
        );
        for (a, b) in &self.lines {
            // Writing into a String cannot fail.
            let _ = writeln!(
                s,
                "  \\draw [line width=3pt, line cap=round] {} -- {};",
                self.point(*a),
                self.point(*b)
            );
        }
        s.push_str("\\end{tikzpicture}\n");
        s
    }

    fn point(&self, p: Point2f) -> String {
        format!("({},{})", num(p.x * self.scale), num(-p.y * self.scale))
    }
}

#[cfg(test)]
mod tests {
    use kw_core::Point2f;

    use super::TikzPicture;

    #[test]
    fn lines_are_scaled_and_mirrored() {
        let mut pic = TikzPicture::new(0.5);
        pic.line(Point2f::new(1.0, 0.0), Point2f::new(1.5, 0.5));
        let out = pic.build();

        assert!(out.starts_with("\\begin{tikzpicture}"));
        assert!(out.contains("\\draw [line width=3pt, line cap=round] (0.5,0) -- (0.75,-0.25);"));
        assert!(out.ends_with("\\end{tikzpicture}\n"));
        assert_eq!(pic.len(), 1);
    }

    #[test]
    fn empty_picture_is_still_well_formed() {
        let out = TikzPicture::new(1.0).build();
        assert_eq!(out.lines().count(), 2);
    }
}
