/// Benchmarks comparing a plain loop with the reducer.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridstats::grid::Grid;
use gridstats::statistics::{reduce_all, reduce_along_axis, StatOperation};

fn loop_sum(values: &[f64]) -> f64 {
    let mut total = 0.0;
    for &x in values {
        total += x;
    }
    total
}

fn criterion_benchmark(c: &mut Criterion) {
    for size_k in [64, 1024] {
        let size = size_k * 1024;
        #[allow(clippy::cast_precision_loss)]
        let values: Vec<f64> = (0..size).map(|i| (i as f64).sin()).collect();
        let flat = Grid::from_vec(values.clone());

        c.bench_function(&format!("loop sum({size})"), |b| {
            b.iter(|| loop_sum(black_box(&values)))
        });
        c.bench_function(&format!("reduce_all sum({size})"), |b| {
            b.iter(|| reduce_all(black_box(&flat), StatOperation::Sum).unwrap())
        });
        c.bench_function(&format!("reduce_all std({size})"), |b| {
            b.iter(|| reduce_all(black_box(&flat), StatOperation::Std).unwrap())
        });

        let square = Grid::from_shape_vec(&[1024, size_k], values).unwrap();
        for axis in [0, 1] {
            c.bench_function(&format!("mean axis {axis}({size})"), |b| {
                b.iter(|| reduce_along_axis(black_box(&square), StatOperation::Mean, axis).unwrap())
            });
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
