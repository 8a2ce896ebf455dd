//! Renderers turning knotwork lattices into SVG and TikZ markup.
//!
//! Every display variant is a [`LocalGeometryBuilder`]: it inspects one
//! anchor cell and its neighborhood and returns the polygon, strokes and
//! joints to draw there, in lattice units. [`KnotRenderer`] collects the
//! local geometry of every anchor and styles it for the chosen variant.
//!
//! - `basic` and `beveled` paint the negative space around each Node.
//! - `positive` and `ribbon` draw the bands themselves.
//! - `primary` walks the traced paths and colours each strand by its path.

mod config;
mod error;
mod geometry;
mod negative;
mod palette;
mod positive;
mod primary;
mod renderer;
pub mod svg;
pub mod tikz;

pub use config::RenderConfig;
pub use error::RenderError;
pub use geometry::{DisplayVariant, Joint, LocalGeometry, LocalGeometryBuilder, Stroke};
pub use negative::{Basic, Beveled};
pub use palette::Palette;
pub use positive::Positive;
pub use primary::Primary;
pub use renderer::KnotRenderer;
pub use svg::SvgElement;
pub use tikz::TikzPicture;
