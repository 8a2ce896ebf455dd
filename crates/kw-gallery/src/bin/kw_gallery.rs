use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{Rgb, RgbImage};
use kw_cells::{CellShape, Census, Signature, candidates};
use kw_core::{CellId, Lattice, Point2f, Polygon2f, Segment2f, SplitMix64};
use kw_render::{DisplayVariant, KnotRenderer, LocalGeometry, Palette, RenderConfig};
use kw_topo::{Invariants, Topology};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "kw_gallery")]
#[command(about = "Draw knotwork lattices and run cell signature censuses")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a knot described by a JSON file.
    #[command(name = "render")]
    Render(RenderArgs),
    /// Enumerate cell signatures and render every survivor.
    #[command(name = "census")]
    Census(CensusArgs),
    /// Render a randomly linked knot.
    #[command(name = "random")]
    Random(RandomArgs),
}

#[derive(Args, Debug, Clone)]
struct OutputArgs {
    #[arg(long, default_value = "primary")]
    variant: DisplayVariant,
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct RenderArgs {
    #[arg(long, required = true)]
    spec: PathBuf,
    /// Base name of the artefacts; the spec file stem by default.
    #[arg(long)]
    name: Option<String>,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
struct CensusArgs {
    #[arg(long, default_value = "2x2")]
    cell: CellShape,
    /// Only enumerate signatures with this many links.
    #[arg(long)]
    links: Option<usize>,
    #[arg(long, default_value = "positive")]
    variant: DisplayVariant,
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct RandomArgs {
    #[arg(long, default_value_t = 6)]
    rows: usize,
    #[arg(long, default_value_t = 8)]
    cols: usize,
    /// Percent chance that a Node toggles a junction.
    #[arg(long, default_value_t = 30)]
    probability: u32,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[command(flatten)]
    output: OutputArgs,
}

/// JSON description of a knot to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct KnotSpec {
    rows: usize,
    cols: usize,
    #[serde(default = "default_borders")]
    borders: bool,
    /// Box frames and links `[x1, y1, x2, y2]`, applied in order.
    #[serde(default)]
    frames: Vec<[usize; 4]>,
    /// Control cells `[x, y]` whose junctions are removed.
    #[serde(default)]
    remove: Vec<[usize; 2]>,
    #[serde(default)]
    random: Option<RandomSpec>,
    #[serde(default)]
    render: Option<RenderConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct RandomSpec {
    probability: u32,
    #[serde(default)]
    seed: u64,
}

fn default_borders() -> bool {
    true
}

impl KnotSpec {
    fn build(&self) -> Result<Lattice> {
        let mut lattice = Lattice::new(self.rows, self.cols).context("creating lattice")?;
        if self.borders {
            lattice.borders().context("framing lattice borders")?;
        }
        for &[x1, y1, x2, y2] in &self.frames {
            lattice
                .box_frame((x1, y1), (x2, y2))
                .with_context(|| format!("framing ({x1}, {y1})-({x2}, {y2})"))?;
        }
        for &[x, y] in &self.remove {
            lattice.remove_at(x, y);
        }
        if let Some(random) = self.random {
            lattice.randomize(random.probability, &mut SplitMix64::new(random.seed));
        }
        Ok(lattice)
    }
}

#[derive(Debug, Clone, Serialize)]
struct MetaKnot {
    name: String,
    variant: DisplayVariant,
    rows: usize,
    cols: usize,
    junctions: usize,
    strands: usize,
    invariants: Invariants,
    path_lengths: Vec<usize>,
    spec: KnotSpec,
}

#[derive(Debug, Clone, Serialize)]
struct CensusCell {
    signature: Signature,
    invariants: Invariants,
}

#[derive(Debug, Clone, Serialize)]
struct CensusReport {
    shape: CellShape,
    links: Option<usize>,
    variant: DisplayVariant,
    candidates: usize,
    after_duplicates: usize,
    after_rotations: usize,
    cells: Vec<CensusCell>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Render(args) => run_render(args),
        Command::Census(args) => run_census(args),
        Command::Random(args) => run_random(args),
    }
}

fn run_render(args: RenderArgs) -> Result<()> {
    ensure_file_exists(&args.spec, "knot spec")?;
    let spec: KnotSpec = read_json(&args.spec)?;
    let name = match args.name {
        Some(name) => name,
        None => args
            .spec
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("knot")
            .to_string(),
    };
    draw_knot(&spec, &name, &args.output)
}

fn run_random(args: RandomArgs) -> Result<()> {
    if args.probability > 100 {
        bail!("probability must be a percentage, got {}", args.probability);
    }
    let spec = KnotSpec {
        rows: args.rows,
        cols: args.cols,
        borders: true,
        frames: Vec::new(),
        remove: Vec::new(),
        random: Some(RandomSpec {
            probability: args.probability,
            seed: args.seed,
        }),
        render: None,
    };
    let name = format!("random_{}x{}_{}", args.rows, args.cols, args.seed);
    draw_knot(&spec, &name, &args.output)
}

fn draw_knot(spec: &KnotSpec, name: &str, output: &OutputArgs) -> Result<()> {
    let lattice = spec.build()?;
    let config = spec.render.clone().unwrap_or_default();
    let topology = Topology::build(&lattice).context("tracing knot paths")?;
    let invariants = Invariants::with_topology(&lattice, &topology);
    info!(
        name,
        loops = invariants.loops,
        regions = invariants.regions,
        crossings = invariants.crossings,
        "knot traced"
    );

    fs::create_dir_all(&output.out)
        .with_context(|| format!("creating output directory {}", output.out.display()))?;
    write_markup(&output.out, name, &lattice, output.variant, &config)?;

    let preview = rasterize(&lattice, output.variant, &config)?;
    save_png(output.out.join(format!("{name}.png")), &preview)?;

    write_json(
        output.out.join("meta.json"),
        &MetaKnot {
            name: name.to_string(),
            variant: output.variant,
            rows: lattice.rows(),
            cols: lattice.cols(),
            junctions: lattice.junctions().len(),
            strands: topology.strands().len(),
            invariants,
            path_lengths: topology.paths().iter().map(|p| p.len()).collect(),
            spec: spec.clone(),
        },
    )
}

fn run_census(args: CensusArgs) -> Result<()> {
    let input = candidates(args.cell, args.links);
    let census = Census::run(args.cell, &input);
    info!(
        shape = %args.cell,
        candidates = census.candidates,
        after_duplicates = census.after_duplicates,
        after_rotations = census.after_rotations,
        after_reflections = census.survivors.len(),
        "census reduced"
    );

    let dir = args.out.join(format!("cells_{}", args.cell));
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let config = RenderConfig::default();
    let mut cells = Vec::with_capacity(census.survivors.len());
    for sig in &census.survivors {
        let lattice = args
            .cell
            .build(sig)
            .with_context(|| format!("building cell {sig}"))?;
        let invariants =
            Invariants::compute(&lattice).with_context(|| format!("tracing cell {sig}"))?;
        write_markup(&dir, &sig.label(), &lattice, args.variant, &config)?;
        cells.push(CensusCell {
            signature: sig.clone(),
            invariants,
        });
    }

    write_json(
        dir.join("census.json"),
        &CensusReport {
            shape: census.shape,
            links: args.links,
            variant: args.variant,
            candidates: census.candidates,
            after_duplicates: census.after_duplicates,
            after_rotations: census.after_rotations,
            cells,
        },
    )
}

fn write_markup(
    dir: &Path,
    name: &str,
    lattice: &Lattice,
    variant: DisplayVariant,
    config: &RenderConfig,
) -> Result<()> {
    let renderer = KnotRenderer::new(lattice, variant, config.clone());
    let svg = renderer
        .svg()
        .with_context(|| format!("rendering {name} as svg"))?;
    write_text(dir.join(format!("{name}.svg")), &svg)?;
    let tikz = renderer
        .tikz()
        .with_context(|| format!("rendering {name} as tikz"))?;
    write_text(dir.join(format!("{name}.tex")), &tikz)
}

/// Pixel-space brushes for one raster preview.
struct Brush {
    scale: f32,
    edge: f32,
    foreground: Rgb<u8>,
    background: Rgb<u8>,
    palette: Palette,
}

impl Brush {
    fn color(&self, path: Option<usize>) -> Result<Rgb<u8>> {
        match path {
            Some(p) => parse_color(self.palette.color(p)),
            None => Ok(self.background),
        }
    }
}

/// Paints the same layers as the SVG output into an RGB image.
fn rasterize(
    lattice: &Lattice,
    variant: DisplayVariant,
    config: &RenderConfig,
) -> Result<RgbImage> {
    let renderer = KnotRenderer::new(lattice, variant, config.clone());
    let geometry = renderer.geometry().context("computing knot geometry")?;
    let palette = Palette::named(&config.palette)
        .with_context(|| format!("unknown palette '{}'", config.palette))?;
    let brush = Brush {
        scale: config.scale,
        edge: match variant {
            DisplayVariant::Basic | DisplayVariant::Beveled => config.scale / 8.0,
            _ => config.scale / 2.0,
        },
        foreground: parse_color(&config.foreground)?,
        background: parse_color(&config.background)?,
        palette,
    };

    let (w, h) = renderer.canvas_size();
    let mut img = RgbImage::from_pixel(w.max(1.0) as u32, h.max(1.0) as u32, brush.foreground);

    match variant {
        DisplayVariant::Basic | DisplayVariant::Beveled => {
            for (_, local) in &geometry {
                if let Some(polygon) = &local.polygon {
                    fill_polygon(&mut img, polygon, brush.scale, brush.background);
                }
            }
            for (_, junction) in lattice.junctions().iter() {
                let (sx, sy) = lattice.coord(junction.source);
                let (tx, ty) = lattice.coord(junction.target);
                let segment =
                    Segment2f::new(Point2f::cell_center(sx, sy), Point2f::cell_center(tx, ty));
                draw_line(&mut img, &segment, brush.scale, brush.edge * 2.0, brush.background);
            }
            for (_, local) in &geometry {
                for stroke in &local.lines {
                    let width = brush.edge * 1.1;
                    draw_line(&mut img, &stroke.segment, brush.scale, width, brush.background);
                }
            }
        }
        DisplayVariant::Positive | DisplayVariant::Ribbon => {
            paint_bands(&mut img, &geometry, &brush, brush.edge, brush.background);
            if variant == DisplayVariant::Ribbon {
                paint_bands(&mut img, &geometry, &brush, brush.edge / 3.0, brush.foreground);
            }
        }
        DisplayVariant::Primary => {
            for (_, local) in &geometry {
                for stroke in &local.lines {
                    let color = brush.color(stroke.path)?;
                    draw_line(&mut img, &stroke.segment, brush.scale, brush.edge, color);
                }
                for joint in &local.circles {
                    let centre = joint.centre.scaled(brush.scale);
                    let color = brush.color(joint.path)?;
                    draw_disc(&mut img, centre, brush.edge / 2.0 * 0.96, color);
                }
                if let Some(crossing) = &local.crossing {
                    if let Some(centre) = &local.polygon {
                        fill_polygon(&mut img, centre, brush.scale, brush.foreground);
                    }
                    let color = brush.color(crossing.path)?;
                    draw_line(&mut img, &crossing.segment, brush.scale, brush.edge, color);
                }
            }
        }
    }

    Ok(img)
}

fn paint_bands(
    img: &mut RgbImage,
    geometry: &[(CellId, LocalGeometry)],
    brush: &Brush,
    width: f32,
    color: Rgb<u8>,
) {
    for (_, local) in geometry {
        for stroke in &local.lines {
            draw_line(img, &stroke.segment, brush.scale, width, color);
        }
        for joint in &local.circles {
            draw_disc(img, joint.centre.scaled(brush.scale), width / 2.0, color);
        }
    }
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (ux, uy) = (x as u32, y as u32);
    if ux >= img.width() || uy >= img.height() {
        return;
    }
    img.put_pixel(ux, uy, color);
}

fn draw_disc(img: &mut RgbImage, centre: Point2f, r: f32, color: Rgb<u8>) {
    let r = r.max(0.5);
    let (x0, x1) = ((centre.x - r).floor() as i64, (centre.x + r).ceil() as i64);
    let (y0, y1) = ((centre.y - r).floor() as i64, (centre.y + r).ceil() as i64);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let (dx, dy) = (x as f32 + 0.5 - centre.x, y as f32 + 0.5 - centre.y);
            if dx * dx + dy * dy <= r * r {
                put(img, x, y, color);
            }
        }
    }
}

/// Thick butt-capped stroke: every pixel within `width / 2` of the segment's
/// interior.
fn draw_line(img: &mut RgbImage, segment: &Segment2f, scale: f32, width: f32, color: Rgb<u8>) {
    let a = segment.a.scaled(scale);
    let b = segment.b.scaled(scale);
    let d = b - a;
    let len2 = d.dot(d);
    if len2 <= f32::EPSILON {
        return;
    }
    let half = width / 2.0;
    let x0 = (a.x.min(b.x) - half).floor() as i64;
    let x1 = (a.x.max(b.x) + half).ceil() as i64;
    let y0 = (a.y.min(b.y) - half).floor() as i64;
    let y1 = (a.y.max(b.y) + half).ceil() as i64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Point2f::new(x as f32 + 0.5, y as f32 + 0.5);
            let t = (p - a).dot(d) / len2;
            if !(0.0..=1.0).contains(&t) {
                continue;
            }
            let off = p - (a + t * d);
            if off.dot(off) <= half * half {
                put(img, x, y, color);
            }
        }
    }
}

/// Even-odd fill over the polygon's bounding box.
fn fill_polygon(img: &mut RgbImage, polygon: &Polygon2f, scale: f32, color: Rgb<u8>) {
    let pts: Vec<Point2f> = polygon.points.iter().map(|p| p.scaled(scale)).collect();
    if pts.len() < 3 {
        return;
    }
    let x0 = pts.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor() as i64;
    let x1 = pts.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;
    let y0 = pts.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor() as i64;
    let y1 = pts.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;
    for y in y0..=y1 {
        let py = y as f32 + 0.5;
        for x in x0..=x1 {
            let px = x as f32 + 0.5;
            let mut inside = false;
            for (i, a) in pts.iter().enumerate() {
                let b = pts[(i + 1) % pts.len()];
                if (a.y > py) != (b.y > py) && px < a.x + (py - a.y) * (b.x - a.x) / (b.y - a.y) {
                    inside = !inside;
                }
            }
            if inside {
                put(img, x, y, color);
            }
        }
    }
}

/// `#rrggbb` or one of the colour names used by the default configuration.
fn parse_color(name: &str) -> Result<Rgb<u8>> {
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            bail!("colour '{name}' is not of the form #rrggbb");
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .with_context(|| format!("parsing colour '{name}'"))
        };
        return Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]));
    }
    let rgb = match name.to_ascii_lowercase().as_str() {
        "white" => [255, 255, 255],
        "black" => [0, 0, 0],
        "grey" | "gray" => [128, 128, 128],
        "lightgrey" | "lightgray" => [211, 211, 211],
        "red" => [255, 0, 0],
        "darkred" => [139, 0, 0],
        "green" => [0, 128, 0],
        "darkgreen" => [0, 100, 0],
        "blue" => [0, 0, 255],
        "darkblue" => [0, 0, 139],
        "navy" => [0, 0, 128],
        _ => bail!("unknown colour '{name}'"),
    };
    Ok(Rgb(rgb))
}

fn save_png(path: PathBuf, img: &RgbImage) -> Result<()> {
    img.save(&path)
        .with_context(|| format!("saving image {}", path.display()))?;
    info!(path = %path.display(), "wrote png");
    Ok(())
}

fn write_text(path: PathBuf, text: &str) -> Result<()> {
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = text.len(), "wrote markup");
    Ok(())
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))?;
    info!(path = %path.display(), "wrote json");
    Ok(())
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
