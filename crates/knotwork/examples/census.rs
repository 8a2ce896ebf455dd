//! Example: classify Celtic cells by their knot invariants.
//!
//! Enumerates the signatures of one cell shape, reduces them modulo rotation
//! and reflection, then prints the loop, region and crossing counts of every
//! surviving cell. With `--svg DIR` each cell is also drawn in the chosen
//! display variant.
//!
//! Run from the workspace root:
//!   cargo run -p knotwork --example census -- --help
//!   cargo run -p knotwork --example census -- --cell 2x3 --links 2

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use knotwork::{
    CellShape, Census, DisplayVariant, Invariants, KnotRenderer, RenderConfig, candidates,
};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Classify Celtic cell signatures by loops, regions and crossings")]
struct Args {
    /// Cell shape: 2x2 or 2x3
    #[arg(long, default_value = "2x2")]
    cell: CellShape,

    /// Only enumerate signatures with this many links
    #[arg(long)]
    links: Option<usize>,

    /// Directory receiving one SVG per surviving cell
    #[arg(long)]
    svg: Option<PathBuf>,

    #[arg(long, default_value = "primary")]
    variant: DisplayVariant,

    /// Write the classification as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Serialize)]
struct Row {
    signature: String,
    loops: usize,
    regions: usize,
    crossings: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let input = candidates(args.cell, args.links);
    let census = Census::run(args.cell, &input);
    println!(
        "{} cells: {} candidates, {} unique, {} up to rotation, {} up to reflection",
        args.cell,
        census.candidates,
        census.after_duplicates,
        census.after_rotations,
        census.survivors.len()
    );

    if let Some(dir) = &args.svg {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut rows = Vec::with_capacity(census.survivors.len());
    let mut by_loops: BTreeMap<usize, usize> = BTreeMap::new();
    for sig in &census.survivors {
        let lattice = args.cell.build(sig)?;
        let inv = Invariants::compute(&lattice)?;
        println!(
            "  {:<8} loops {:>2}  regions {:>2}  crossings {:>2}",
            sig.label(),
            inv.loops,
            inv.regions,
            inv.crossings
        );
        *by_loops.entry(inv.loops).or_default() += 1;

        if let Some(dir) = &args.svg {
            let svg = KnotRenderer::new(&lattice, args.variant, RenderConfig::default()).svg()?;
            let path = dir.join(format!("{}.svg", sig.label()));
            fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
        }

        rows.push(Row {
            signature: sig.label(),
            loops: inv.loops,
            regions: inv.regions,
            crossings: inv.crossings,
        });
    }

    for (loops, count) in &by_loops {
        println!("{count} cell(s) with {loops} loop(s)");
    }

    if let Some(path) = &args.json {
        let bytes = serde_json::to_vec_pretty(&rows).context("serializing json")?;
        fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
