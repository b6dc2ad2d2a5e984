use crate::formats::extension_lowercase;
use crate::i18n::Translator;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Outcome of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    Compressed,
    /// A backup already existed, so the file was left as is.
    SkippedBackupExists,
    /// The file name carries the original or skip suffix.
    SkippedByName,
    /// The extension matched but the codec could not read the header.
    Unreadable,
    BackupFailed(String),
    CompressFailed(String),
}

/// Report bucket; every result lands in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Compressed,
    SkippedBackup,
    SkippedNamed,
    Unreadable,
    Error,
}

impl ImageStatus {
    pub fn category(&self) -> Category {
        match self {
            ImageStatus::Compressed => Category::Compressed,
            ImageStatus::SkippedBackupExists => Category::SkippedBackup,
            ImageStatus::SkippedByName => Category::SkippedNamed,
            // never reached the codec
            ImageStatus::Unreadable | ImageStatus::BackupFailed(_) => Category::Unreadable,
            ImageStatus::CompressFailed(_) => Category::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ImageStatus::BackupFailed(_) | ImageStatus::CompressFailed(_)
        )
    }

    /// Localised status text for console and CSV output.
    pub fn describe(&self, tr: &Translator) -> String {
        match self {
            ImageStatus::Compressed => tr.t("status.compressed"),
            ImageStatus::SkippedBackupExists => tr.t("status.skipped"),
            ImageStatus::SkippedByName => tr.t("status.skipped_named"),
            ImageStatus::Unreadable => tr.t("status.unreadable"),
            ImageStatus::BackupFailed(e) => tr.format("status.backup_error", &[("error", e)]),
            ImageStatus::CompressFailed(e) => {
                tr.format("status.compress_error", &[("error", e)])
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResult {
    pub path: PathBuf,
    pub size_before: u64,
    pub size_after: u64,
    pub status: ImageStatus,
    pub extension: String,
    pub finished_at: Option<DateTime<Local>>,
}

impl ImageResult {
    pub fn compressed(path: &Path, size_before: u64, size_after: u64) -> Self {
        Self {
            path: path.to_path_buf(),
            size_before,
            size_after,
            status: ImageStatus::Compressed,
            extension: extension_lowercase(path),
            finished_at: Some(Local::now()),
        }
    }

    /// A result that never reached the codec: no sizes, no timestamp.
    pub fn not_attempted(path: &Path, status: ImageStatus) -> Self {
        Self {
            path: path.to_path_buf(),
            size_before: 0,
            size_after: 0,
            status,
            extension: extension_lowercase(path),
            finished_at: None,
        }
    }

    pub fn compress_failed(path: &Path, error: impl ToString) -> Self {
        Self {
            path: path.to_path_buf(),
            size_before: 0,
            size_after: 0,
            status: ImageStatus::CompressFailed(error.to_string()),
            extension: extension_lowercase(path),
            finished_at: Some(Local::now()),
        }
    }

    pub fn category(&self) -> Category {
        self.status.category()
    }

    /// Before/after sizes when both were measured.
    pub fn sizes(&self) -> Option<(u64, u64)> {
        if self.size_before > 0 && self.size_after > 0 {
            Some((self.size_before, self.size_after))
        } else {
            None
        }
    }
}
