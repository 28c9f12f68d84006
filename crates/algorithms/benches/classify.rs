//! Benchmarks for classification and the full pipeline

use aspectslope_algorithms::pipeline::{aspect_slope_map, AspectSlopeParams};
use aspectslope_algorithms::reclass::{reclassify, ReclassTable, NODATA_CODE};
use aspectslope_algorithms::terrain::HornDerivatives;
use aspectslope_algorithms::AspectSlopeEncoder;
use aspectslope_core::{GeoTransform, Raster};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_dem(size: usize) -> Raster<f64> {
    let mut dem = Raster::new(size, size);
    dem.set_transform(GeoTransform::new(0.0, size as f64, 1.0, -1.0));

    for row in 0..size {
        for col in 0..size {
            let base = (row + col) as f64;
            let variation = ((row * 7 + col * 13) % 100) as f64 / 10.0;
            dem.set(row, col, base + variation).unwrap();
        }
    }
    dem
}

fn create_degrees(size: usize, max: f64) -> Raster<f64> {
    let mut raster = Raster::new(size, size);
    for row in 0..size {
        for col in 0..size {
            let v = ((row * 31 + col * 17) % 3600) as f64 / 3600.0 * max;
            raster.set(row, col, v).unwrap();
        }
    }
    raster
}

fn bench_reclassify(c: &mut Criterion) {
    let mut group = c.benchmark_group("reclassify_aspect");
    let table = ReclassTable::aspect();

    for size in [256, 1024].iter() {
        let aspect = create_degrees(*size, 360.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| reclassify(black_box(&aspect), &table, NODATA_CODE).unwrap())
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_raster");
    let encoder = AspectSlopeEncoder::default();

    for size in [256, 1024].iter() {
        let aspect = create_degrees(*size, 360.0);
        let slope = create_degrees(*size, 90.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| encoder.encode_raster(black_box(&aspect), black_box(&slope)).unwrap())
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("aspect_slope_map");
    let params = AspectSlopeParams::default();

    for size in [256, 512, 1024].iter() {
        let dem = create_dem(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| aspect_slope_map(black_box(&dem), &params, &HornDerivatives).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reclassify, bench_encode, bench_pipeline);
criterion_main!(benches);
