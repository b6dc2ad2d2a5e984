use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqueezeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid thread count: {0}. Must be at least 1")]
    InvalidThreadCount(usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("No target directory given")]
    MissingPath,

    #[error("Failed to parse config file {0}: {1}")]
    Config(PathBuf, serde_yaml::Error),

    #[error("Failed to parse translation table: {0}")]
    Translation(#[from] serde_yaml::Error),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SqueezeError>;
