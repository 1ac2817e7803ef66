//! Benchmarks for block aggregation and output

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mtx_density::matrix::Symmetry;
use mtx_density::{aggregate, write_density_map_to, CoordinateMatrix, DensityConfig, MatrixType};

/// Banded matrix of size n with the given half bandwidth, lower triangle only
/// when `symmetric`
fn banded_matrix(n: u32, half_band: u32, symmetric: bool) -> CoordinateMatrix {
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    for i in 0..n {
        let lo = i.saturating_sub(half_band);
        let hi = if symmetric { i } else { (i + half_band).min(n - 1) };
        for j in lo..=hi {
            rows.push(i);
            cols.push(j);
        }
    }
    let values = vec![1.0; rows.len()];
    let matrix_type = if symmetric {
        MatrixType::real_general().with_symmetry(Symmetry::Symmetric)
    } else {
        MatrixType::real_general()
    };
    CoordinateMatrix::new(n, n, matrix_type, rows, cols, values, None).unwrap()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    for &symmetric in &[false, true] {
        let matrix = banded_matrix(200_000, 4, symmetric);
        let label = if symmetric { "symmetric" } else { "general" };
        for &dst_rows in &[120u32, 1000] {
            group.bench_with_input(
                BenchmarkId::new(label, dst_rows),
                &dst_rows,
                |bench, &dst_rows| {
                    let config = DensityConfig::with_rows(dst_rows);
                    bench.iter(|| aggregate(black_box(&matrix), &config).unwrap())
                },
            );
        }
    }
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let matrix = banded_matrix(200_000, 4, true);
    let map = aggregate(&matrix, &DensityConfig::with_rows(1000)).unwrap();

    c.bench_function("write_symmetric_1000", |bench| {
        bench.iter(|| {
            let mut buf = Vec::with_capacity(64 * 1024);
            write_density_map_to(&mut buf, black_box(&map)).unwrap();
            buf
        })
    });
}

criterion_group!(benches, bench_aggregate, bench_write);
criterion_main!(benches);
