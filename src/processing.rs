use crate::backup::{backup_image, BackupOutcome};
use crate::constants::{
    AVIF_ENCODER_SPEED, LIBDEFLATER_HIGH_LEVEL, LIBDEFLATER_LOW_LEVEL, OXIPNG_PRESET,
    ZOPFLI_ITERATIONS,
};
use crate::error::{Result, SqueezeError};
use crate::formats::SourceFormat;
use crate::options::ProcessingOptions;
use crate::result::{ImageResult, ImageStatus};
use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{ColorType, DynamicImage, ImageReader};
use oxipng::{Deflaters, Options};
use std::fs;
use std::io::{Cursor, Write};
use std::num::NonZeroU8;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Loads an image, sniffing the content rather than trusting the extension.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}

/// Drops alpha and narrows to 8 bits for encoders that only take RGB or luma.
fn to_rgb_or_luma(img: &DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::L8 | ColorType::Rgb8 => img.clone(),
        ColorType::L16 | ColorType::La8 | ColorType::La16 => DynamicImage::ImageLuma8(img.to_luma8()),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

/// Narrows to 8-bit RGB or RGBA, keeping alpha when present.
fn to_rgb_or_rgba(img: &DynamicImage) -> DynamicImage {
    match img.color() {
        ColorType::Rgb8 | ColorType::Rgba8 => img.clone(),
        c if c.has_alpha() => DynamicImage::ImageRgba8(img.to_rgba8()),
        _ => DynamicImage::ImageRgb8(img.to_rgb8()),
    }
}

fn png_options(quality: u8) -> Options {
    let mut options = Options::from_preset(OXIPNG_PRESET);
    options.force = false;

    options.deflate = if quality >= 90 {
        Deflaters::Zopfli {
            iterations: NonZeroU8::new(ZOPFLI_ITERATIONS).unwrap_or(NonZeroU8::MIN),
        }
    } else if quality >= 70 {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_HIGH_LEVEL,
        }
    } else {
        Deflaters::Libdeflater {
            compression: LIBDEFLATER_LOW_LEVEL,
        }
    };
    options
}

/// Encodes `img` as `format` at `quality`, returning the encoded bytes.
///
/// JPEG and AVIF honour the quality directly. PNG is lossless and the quality
/// picks how hard oxipng works. WebP output is lossless, the only WebP
/// encoder the codec offers. BMP, TIFF and GIF have no quality knob.
pub fn encode_image(img: &DynamicImage, format: SourceFormat, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();

    match format {
        SourceFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
            to_rgb_or_luma(img).write_with_encoder(encoder)?;
        }
        SourceFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut buffer,
                CompressionType::Best,
                FilterType::Adaptive,
            );
            img.write_with_encoder(encoder)?;
            buffer = oxipng::optimize_from_memory(&buffer, &png_options(quality))
                .map_err(|e| SqueezeError::PngOptimization(e.to_string()))?;
        }
        SourceFormat::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut buffer);
            to_rgb_or_rgba(img).write_with_encoder(encoder)?;
        }
        SourceFormat::Avif => {
            let encoder =
                AvifEncoder::new_with_speed_quality(&mut buffer, AVIF_ENCODER_SPEED, quality);
            to_rgb_or_rgba(img).write_with_encoder(encoder)?;
        }
        SourceFormat::Bmp | SourceFormat::Gif => {
            let image_format = format
                .image_format()
                .ok_or_else(|| SqueezeError::UnsupportedFormat(format.to_string()))?;
            to_rgb_or_rgba(img).write_to(&mut Cursor::new(&mut buffer), image_format)?;
        }
        SourceFormat::Tiff => {
            img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Tiff)?;
        }
        SourceFormat::Heic => {
            return Err(SqueezeError::UnsupportedFormat(format!(
                "{} encoding is not supported",
                format
            )));
        }
    }

    Ok(buffer)
}

/// Replaces `path` with `bytes` via a temporary file in the same directory.
///
/// The original stays intact unless the new content is fully written. The
/// replacement keeps the original's permissions.
fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(path)?.permissions();

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;
    temp.persist(path).map_err(|e| SqueezeError::Io(e.error))?;
    Ok(())
}

/// Decodes `path` and re-encodes it in place.
///
/// # Returns
/// * `Ok((size_before, size_after))` - File sizes in bytes
/// * `Err(SqueezeError)` - Decoding, encoding or writing failed; the file is unchanged
pub fn recompress_in_place(path: &Path, quality: u8) -> Result<(u64, u64)> {
    let format = SourceFormat::from_path(path).ok_or_else(|| {
        SqueezeError::UnsupportedFormat(path.extension().map_or_else(
            || "no extension".to_string(),
            |ext| ext.to_string_lossy().into_owned(),
        ))
    })?;

    let size_before = fs::metadata(path)?.len();
    let img = load_image(path)?;
    let bytes = encode_image(&img, format, quality)?;
    replace_file(path, &bytes)?;
    let size_after = fs::metadata(path)?.len();

    Ok((size_before, size_after))
}

/// Backs up (if enabled) and compresses one file, recording the outcome.
///
/// Never fails: every error becomes the status of the returned result.
pub fn compress_file(path: &Path, options: &ProcessingOptions) -> ImageResult {
    if options.backup {
        match backup_image(path, &options.backup_folder, &options.original_suffix) {
            BackupOutcome::Created(backup) => debug!("Backed up {:?} to {:?}", path, backup),
            BackupOutcome::AlreadyExists(_) => {
                return ImageResult::not_attempted(path, ImageStatus::SkippedBackupExists);
            }
            BackupOutcome::Failed(e) => {
                warn!("Backup of {:?} failed: {}", path, e);
                return ImageResult::not_attempted(path, ImageStatus::BackupFailed(e.to_string()));
            }
        }
    }

    match recompress_in_place(path, options.quality) {
        Ok((before, after)) => {
            debug!("Compressed {:?}: {} -> {} bytes", path, before, after);
            ImageResult::compressed(path, before, after)
        }
        Err(e) => {
            warn!("Failed to compress {:?}: {}", path, e);
            ImageResult::compress_failed(path, e)
        }
    }
}
