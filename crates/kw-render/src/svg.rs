use std::fmt::{self, Display, Write};

/// Formats a coordinate with at most three decimals and no trailing zeros.
pub fn num(v: f32) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 {
        return "0".to_string();
    }
    format!("{r}")
}

#[derive(Debug, Clone, PartialEq)]
enum Content {
    Element(SvgElement),
    Text(String),
}

/// A minimal XML element builder for SVG output.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Content>,
}

impl SvgElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.attrs.push((name.into(), value.to_string()));
        self
    }

    /// Attribute holding a coordinate or length.
    pub fn num_attr(self, name: impl Into<String>, value: f32) -> Self {
        self.attr(name, num(value))
    }

    pub fn child(mut self, child: SvgElement) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    pub fn push(&mut self, child: SvgElement) {
        self.children.push(Content::Element(child));
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Content::Text(text.into()));
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, 0)
            .map(|_| out)
            .unwrap_or_default()
    }

    fn write_to(&self, out: &mut String, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(out, "{indent}<{}", self.name)?;
        for (k, v) in &self.attrs {
            write!(out, " {k}=\"{}\"", escape(v))?;
        }
        if self.children.is_empty() {
            return writeln!(out, "/>");
        }
        writeln!(out, ">")?;
        for child in &self.children {
            match child {
                Content::Element(e) => e.write_to(out, depth + 1)?,
                Content::Text(t) => writeln!(out, "{indent}  {}", escape(t))?,
            }
        }
        writeln!(out, "{indent}</{}>", self.name)
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{SvgElement, num};

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(20.0 / 3.0), "6.667");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn nested_elements_and_escaping() {
        let svg = SvgElement::new("svg")
            .attr("width", 40)
            .child(
                SvgElement::new("line")
                    .num_attr("x1", 0.5)
                    .attr("stroke", "#ffb3ba"),
            )
            .child(SvgElement::new("title").text("a < b & c"));

        assert_eq!(
            svg.build(),
            "<svg width=\"40\">\n  <line x1=\"0.5\" stroke=\"#ffb3ba\"/>\n  <title>\n    a &lt; b &amp; c\n  </title>\n</svg>\n"
        );
        assert_eq!(svg.len(), 2);
    }
}
