use broadgrid::{Extent2, Point2, SpatialHash};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn benchmark_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutations");

    let mut grid: SpatialHash<u64> = SpatialHash::new(64.0);

    // Benchmark single point insertion
    group.bench_function("insert_point", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            let x = ((counter % 1000) as f64) * 3.7;
            let y = ((counter / 1000 % 1000) as f64) * 3.7;
            counter += 1;
            grid.insert_point(black_box(counter), black_box(Point2::new(x, y)))
                .unwrap()
        })
    });

    // Benchmark rect insertion (multi-cell footprint)
    let mut rect_grid: SpatialHash<u64> = SpatialHash::new(64.0);
    group.bench_function("insert_rect_3x3", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            let x = ((counter % 1000) as f64) * 3.7;
            let y = ((counter / 1000 % 1000) as f64) * 3.7;
            counter += 1;
            rect_grid
                .insert_rect(
                    black_box(counter),
                    black_box(Point2::new(x, y)),
                    black_box(Extent2::new(150.0, 150.0)),
                )
                .unwrap()
        })
    });

    // Benchmark add/remove churn against a warm grid
    let mut churn_grid: SpatialHash<u64> = SpatialHash::new(64.0);
    for i in 0..10_000u64 {
        let x = ((i % 100) as f64) * 6.4;
        let y = ((i / 100) as f64) * 6.4;
        churn_grid.insert_point(i, Point2::new(x, y)).unwrap();
    }
    group.bench_function("point_churn", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            let id = counter % 10_000;
            let p = Point2::new(((id % 100) as f64) * 6.4, ((id / 100) as f64) * 6.4);
            counter += 1;
            churn_grid.remove_point(black_box(&id), black_box(p));
            churn_grid
                .insert_point(black_box(id), black_box(p))
                .unwrap()
        })
    });

    group.finish();
}

fn benchmark_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    // Setup data for query benchmarks
    let mut grid: SpatialHash<u64> = SpatialHash::new(64.0);
    for i in 0..10_000u64 {
        let x = ((i % 100) as f64) * 6.4;
        let y = ((i / 100) as f64) * 6.4;
        grid.insert_point(i, Point2::new(x, y)).unwrap();
    }

    group.bench_function("query_point", |b| {
        b.iter(|| grid.query_point(black_box(Point2::new(320.0, 320.0))).len())
    });

    group.bench_function("query_rect_5x5_cells", |b| {
        b.iter(|| {
            grid.query_rect(
                black_box(Point2::new(160.0, 160.0)),
                black_box(Extent2::new(320.0, 320.0)),
            )
            .len()
        })
    });

    group.bench_function("query_line_diagonal", |b| {
        b.iter(|| {
            grid.query_line(
                black_box(Point2::new(0.0, 0.0)),
                black_box(Point2::new(640.0, 480.0)),
            )
            .len()
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_mutations, benchmark_queries);
criterion_main!(benches);
