//! Benchmarks for vegetation labelling and tiling

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use verdant_algorithms::imagery::{excess_green, vegetation_mask, BinarizeParams};
use verdant_algorithms::tiling::{tiles, TilerParams};
use verdant_core::RgbRaster;

fn create_image(size: usize) -> RgbRaster {
    let mut img = RgbRaster::new(size, size);
    for row in 0..size {
        for col in 0..size {
            let rgb = [
                ((row * 7 + col * 13) % 256) as u8,
                ((row * 3 + col * 29) % 256) as u8,
                ((row * 11 + col * 5) % 256) as u8,
            ];
            img.set_pixel(row, col, rgb).unwrap();
        }
    }
    img
}

fn bench_excess_green(c: &mut Criterion) {
    let mut group = c.benchmark_group("imagery/excess_green");
    for size in [256, 512, 1024, 2048] {
        let img = create_image(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| excess_green(black_box(&img)).unwrap())
        });
    }
    group.finish();
}

fn bench_vegetation_mask(c: &mut Criterion) {
    let mut group = c.benchmark_group("imagery/vegetation_mask");
    for size in [256, 1024] {
        let img = create_image(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| vegetation_mask(black_box(&img), BinarizeParams::default()).unwrap())
        });
    }
    group.finish();
}

fn bench_tiling(c: &mut Criterion) {
    let mut group = c.benchmark_group("tiling/extract");
    for size in [1024, 4096] {
        let img = create_image(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                tiles(black_box(&img), TilerParams::default())
                    .unwrap()
                    .map(|t| t.unwrap().index())
                    .count()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_excess_green, bench_vegetation_mask, bench_tiling);
criterion_main!(benches);
