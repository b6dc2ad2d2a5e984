//! Image format handling for in-place recompression.
//!
//! Files are always re-encoded in the format their extension names, so the
//! format enum is keyed by extension rather than by sniffed content.
use crate::constants::SUPPORTED_IMAGE_EXTENSIONS;
use crate::error::{Result, SqueezeError};
use image::ImageFormat;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Jpeg,
    Png,
    WebP,
    Bmp,
    Tiff,
    Gif,
    Avif,
    Heic,
}

impl SourceFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(SourceFormat::Jpeg),
            "png" => Some(SourceFormat::Png),
            "webp" => Some(SourceFormat::WebP),
            "bmp" => Some(SourceFormat::Bmp),
            "tiff" => Some(SourceFormat::Tiff),
            "gif" => Some(SourceFormat::Gif),
            "avif" => Some(SourceFormat::Avif),
            "heic" => Some(SourceFormat::Heic),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// The `image` crate encoder for this format, if it has one.
    pub fn image_format(&self) -> Option<ImageFormat> {
        match self {
            SourceFormat::Jpeg => Some(ImageFormat::Jpeg),
            SourceFormat::Png => Some(ImageFormat::Png),
            SourceFormat::WebP => Some(ImageFormat::WebP),
            SourceFormat::Bmp => Some(ImageFormat::Bmp),
            SourceFormat::Tiff => Some(ImageFormat::Tiff),
            SourceFormat::Gif => Some(ImageFormat::Gif),
            SourceFormat::Avif => Some(ImageFormat::Avif),
            SourceFormat::Heic => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Jpeg => "JPEG",
            SourceFormat::Png => "PNG",
            SourceFormat::WebP => "WebP",
            SourceFormat::Bmp => "BMP",
            SourceFormat::Tiff => "TIFF",
            SourceFormat::Gif => "GIF",
            SourceFormat::Avif => "AVIF",
            SourceFormat::Heic => "HEIC",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for SourceFormat {
    type Err = SqueezeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s).ok_or_else(|| SqueezeError::UnsupportedFormat(s.to_string()))
    }
}

/// Check if a file path has one of the supported image extensions (case-insensitive).
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Lowercased extension without the leading dot, or an empty string.
pub fn extension_lowercase(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
