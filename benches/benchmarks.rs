use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode};
use rand::Rng;
use rectscale::algo::bicubic::cubic_weight;
use rectscale::split::{is_worth_splitting, split_range};
use rectscale::{draw_scaled_rect, Argb8888Helper, Color32, GRect, PixelPlane, Quality, RayonParallelizer};

fn benchmark_split_heuristic(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_heuristic");

    for &rows in &[16u32, 256, 4096, 65536] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter_custom(|iters| {
                let mut total = Duration::from_secs(0);
                for _ in 0..iters {
                    let start = Instant::now();
                    let mut seen = 0u64;
                    fn recurse(width: u32, y_start: i32, y_end: i32, seen: &mut u64) {
                        let rows = (y_end - y_start + 1) as u32;
                        if is_worth_splitting(1 << 20, 1 << 18, 1.5, width, rows) {
                            let (l, r) = split_range(y_start, y_end);
                            recurse(width, l.0, l.1, seen);
                            recurse(width, r.0, r.1, seen);
                        } else {
                            *seen += rows as u64;
                        }
                    }
                    recurse(1920, 0, rows as i32 - 1, &mut seen);
                    total += start.elapsed();
                    std::hint::black_box(seen);
                }
                total
            })
        });
    }
}

fn benchmark_cubic_weight(c: &mut Criterion) {
    let mut group = c.benchmark_group("cubic_weight");
    group.sample_size(50);

    group.bench_function("dense_sweep", |b| {
        b.iter_custom(|iters| {
            let mut total = Duration::from_secs(0);
            for _ in 0..iters {
                let start = Instant::now();
                let mut acc = 0.0f64;
                let mut x = -2.0f64;
                while x <= 2.0 {
                    acc += cubic_weight(x);
                    x += 0.0001;
                }
                total += start.elapsed();
                std::hint::black_box(acc);
            }
            total
        })
    });
}

fn random_plane(width: u32, height: u32) -> PixelPlane {
    let mut rng = rand::thread_rng();
    let pixels: Vec<Color32> = (0..(width as usize * height as usize))
        .map(|_| rng.gen::<u32>() | 0xFF00_0000)
        .collect();
    PixelPlane::from_rows(width, height, pixels)
}

fn benchmark_draw_scaled_rect(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_scaled_rect");
    group.sample_size(20);
    group.sampling_mode(SamplingMode::Flat);

    let src = random_plane(1920, 1080);
    let src_rect = src.rect();

    for (quality, label) in [(Quality::Nearest, "nearest"), (Quality::Bicubic, "bicubic")] {
        for &(w, h) in &[(3840u32, 2160u32), (960, 540)] {
            group.bench_with_input(
                BenchmarkId::new(label, format!("{w}x{h}")),
                &(w, h),
                |b, &(w, h)| {
                    let dst_rect = GRect::new(0, 0, w, h).unwrap();
                    b.iter_custom(|iters| {
                        let mut total = Duration::from_secs(0);
                        for _ in 0..iters {
                            let mut dst = PixelPlane::new(w, h, 0);
                            let start = Instant::now();
                            {
                                let drawer = dst.as_row_drawer();
                                draw_scaled_rect(
                                    &RayonParallelizer,
                                    &Argb8888Helper,
                                    quality,
                                    &src,
                                    src_rect,
                                    dst_rect,
                                    dst_rect,
                                    &drawer,
                                )
                                .unwrap();
                            }
                            total += start.elapsed();
                            std::hint::black_box(&dst);
                        }
                        total
                    })
                },
            );
        }
    }
}

criterion_group!(
    benches,
    benchmark_split_heuristic,
    benchmark_cubic_weight,
    benchmark_draw_scaled_rect,
);
criterion_main!(benches);
