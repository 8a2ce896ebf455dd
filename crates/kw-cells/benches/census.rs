use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kw_cells::{CellShape, Census, all_2x2, build_2x3, with_links};

fn bench_census(c: &mut Criterion) {
    let two_by_two = all_2x2();
    c.bench_function("kw_cells_census_2x2", |b| {
        b.iter(|| {
            let census = Census::run(CellShape::TwoByTwo, black_box(&two_by_two));
            black_box(census.survivors.len());
        });
    });

    let three_links = with_links(3);
    c.bench_function("kw_cells_census_2x3_k3", |b| {
        b.iter(|| {
            let census = Census::run(CellShape::TwoByThree, black_box(&three_links));
            black_box(census.survivors.len());
        });
    });

    c.bench_function("kw_cells_build_2x3_k3", |b| {
        b.iter(|| {
            for sig in &three_links {
                let lattice = build_2x3(black_box(sig)).expect("buildable");
                black_box(lattice.nodes().len());
            }
        });
    });
}

criterion_group!(benches, bench_census);
criterion_main!(benches);
