use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug)]
pub enum BackupOutcome {
    Created(PathBuf),
    /// A backup from an earlier run is already in place; nothing was copied.
    AlreadyExists(PathBuf),
    Failed(io::Error),
}

/// `<file_dir>/<backup_folder>/<stem><original_suffix>.<ext>`
///
/// The name is assembled from the raw OS string so distinct non-UTF-8
/// stems never collapse onto the same backup.
pub fn backup_path_for(file_path: &Path, backup_folder: &str, original_suffix: &str) -> PathBuf {
    let dir = file_path.parent().unwrap_or_else(|| Path::new(""));
    let mut name = OsString::new();
    if let Some(stem) = file_path.file_stem() {
        name.push(stem);
    }
    name.push(original_suffix);
    if let Some(ext) = file_path.extension() {
        name.push(".");
        name.push(ext);
    }
    dir.join(backup_folder).join(name)
}

/// Copies access and modification times from `src` to `dst`.
fn copy_file_times(src: &Path, dst: &Path) -> io::Result<()> {
    let metadata = fs::metadata(src)?;
    let atime = filetime::FileTime::from_last_access_time(&metadata);
    let mtime = filetime::FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(dst, atime, mtime)
}

/// Copies `file_path` into its sibling backup folder unless a backup exists.
///
/// Never overwrites an existing backup. Permissions come across with the
/// copy; timestamps are applied afterwards.
pub fn backup_image(file_path: &Path, backup_folder: &str, original_suffix: &str) -> BackupOutcome {
    let backup_path = backup_path_for(file_path, backup_folder, original_suffix);

    if let Some(backup_dir) = backup_path.parent() {
        // create_dir_all tolerates a sibling worker creating it first
        if let Err(e) = fs::create_dir_all(backup_dir) {
            return BackupOutcome::Failed(e);
        }
    }

    if backup_path.exists() {
        debug!("Backup already present: {:?}", backup_path);
        return BackupOutcome::AlreadyExists(backup_path);
    }

    if let Err(e) = fs::copy(file_path, &backup_path) {
        return BackupOutcome::Failed(e);
    }

    if let Err(e) = copy_file_times(file_path, &backup_path) {
        warn!("Failed to copy file times to {:?}: {}", backup_path, e);
    }

    BackupOutcome::Created(backup_path)
}
