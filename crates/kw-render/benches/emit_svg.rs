use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kw_core::{Lattice, SplitMix64};
use kw_render::{DisplayVariant, KnotRenderer, RenderConfig};

fn random_knot(rows: usize, cols: usize) -> Lattice {
    let mut lattice = Lattice::new(rows, cols).expect("valid lattice");
    lattice.borders().expect("frame");
    lattice.randomize(30, &mut SplitMix64::new(0xc0ffee));
    lattice
}

fn bench_emit_svg(c: &mut Criterion) {
    let lattice = random_knot(16, 24);

    for variant in [DisplayVariant::Basic, DisplayVariant::Ribbon, DisplayVariant::Primary] {
        let renderer = KnotRenderer::new(&lattice, variant, RenderConfig::default());
        c.bench_function(&format!("kw_render_svg_{variant}_16x24"), |b| {
            b.iter(|| {
                let svg = black_box(&renderer).svg().expect("svg");
                black_box(svg.len());
            });
        });
    }
}

criterion_group!(benches, bench_emit_svg);
criterion_main!(benches);
