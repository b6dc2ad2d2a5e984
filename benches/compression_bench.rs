use chrono::Local;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dir_squeeze::{encode_image, ImageResult, NameFilter, RunSummary, SourceFormat};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::PathBuf;
use std::time::Duration;

fn noisy_image(size: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(size, size, |x, y| {
        let v = (x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)) as u8;
        Rgb([v, v.wrapping_add(x as u8), v.wrapping_sub(y as u8)])
    }))
}

fn bench_name_filter(c: &mut Criterion) {
    let filter = NameFilter {
        original_suffix: "_original",
        skip_suffix: "_skip",
        skip_original: true,
        skip_skip: true,
    };
    let names: Vec<String> = (0..1000)
        .map(|i| match i % 3 {
            0 => format!("photo_{i}.jpg"),
            1 => format!("photo_{i}_original.png"),
            _ => format!("photo_{i}_skip.webp"),
        })
        .collect();

    c.bench_function("name_filter_1000", |b| {
        b.iter(|| names.iter().filter(|n| filter.should_skip(black_box(n))).count())
    });
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_image");
    group.sample_size(10);

    for size in [64u32, 256] {
        let img = noisy_image(size);
        for format in [SourceFormat::Jpeg, SourceFormat::Png, SourceFormat::WebP] {
            group.bench_with_input(
                BenchmarkId::new(format.to_string(), size),
                &img,
                |b, img| b.iter(|| encode_image(black_box(img), format, 80)),
            );
        }
    }
    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let results: Vec<ImageResult> = (0..10_000)
        .map(|i| {
            let ext = ["jpg", "png", "webp", "gif"][i % 4];
            ImageResult::compressed(&PathBuf::from(format!("/p/{i}.{ext}")), 4096, 2048 + i as u64)
        })
        .collect();
    let now = Local::now();

    c.bench_function("run_summary_10000", |b| {
        b.iter(|| RunSummary::from_results(black_box(&results), now, now, Duration::from_secs(60)))
    });
}

criterion_group!(benches, bench_name_filter, bench_encode, bench_summary);
criterion_main!(benches);
