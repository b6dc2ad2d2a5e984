#![allow(dead_code)]

use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, Rgb, RgbImage};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Pixel noise so encoders have real work to do.
pub fn noisy_rgb(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = (x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)) as u8;
        Rgb([v, v.wrapping_add(x as u8), v.wrapping_sub(y as u8)])
    })
}

/// Writes a maximum-quality JPEG, which re-encoding at a lower quality shrinks.
pub fn write_jpeg(path: &Path) {
    let file = File::create(path).unwrap();
    let encoder = JpegEncoder::new_with_quality(file, 100);
    noisy_rgb(96, 96).write_with_encoder(encoder).unwrap();
}

pub fn write_png(path: &Path) {
    noisy_rgb(32, 32)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

/// `root/top.jpg`, `root/sub/inner.png`, `root/sub/deeper/note.txt`
/// and `root/keep_skip.jpg`.
pub fn create_photo_tree(root: &Path) -> Vec<PathBuf> {
    let sub = root.join("sub");
    let deeper = sub.join("deeper");
    fs::create_dir_all(&deeper).unwrap();

    let top = root.join("top.jpg");
    let inner = sub.join("inner.png");
    let skipped = root.join("keep_skip.jpg");
    write_jpeg(&top);
    write_png(&inner);
    write_jpeg(&skipped);
    fs::write(deeper.join("note.txt"), b"not an image").unwrap();

    vec![top, inner, skipped]
}

/// Section rows of a CSV report, BOM and line endings stripped.
pub fn csv_rows(path: &Path) -> Vec<String> {
    let text = fs::read_to_string(path).unwrap();
    text.trim_start_matches('\u{feff}')
        .split("\r\n")
        .map(str::to_string)
        .collect()
}

/// The single CSV file in `<root>/summary`.
pub fn only_report(root: &Path) -> PathBuf {
    let reports: Vec<_> = fs::read_dir(root.join("summary"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(reports.len(), 1, "{:?}", reports);
    reports.into_iter().next().unwrap()
}
