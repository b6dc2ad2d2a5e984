use crate::error::Result;
use crate::filter::NameFilter;
use crate::formats::is_image_file;
use crate::options::ProcessingOptions;
use image::ImageReader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files found under a root, split by whether they will be compressed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Readable images to hand to the dispatcher.
    pub images: Vec<PathBuf>,
    /// Image files left alone because of their name suffix.
    pub skipped_by_name: Vec<PathBuf>,
    /// Image extensions whose header the codec could not parse.
    pub unreadable: Vec<PathBuf>,
}

/// True when the codec recognises the file and can read its dimensions.
///
/// Only the header is parsed; pixel data is not decoded.
pub fn is_readable_image(path: &Path) -> bool {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(image::ImageError::from)
        .and_then(|reader| reader.into_dimensions())
        .is_ok()
}

fn is_backup_dir(path: &Path, backup_folder: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase() == backup_folder.to_lowercase())
        .unwrap_or(false)
}

/// Recursively collects image files under `root`.
///
/// Any directory below the root whose name matches the backup folder
/// (case-insensitively) is pruned together with everything beneath it. When
/// the root itself matches, only the files directly inside it are left out.
///
/// Traversal errors below the root are logged and skipped; only a root that
/// cannot be read is an error.
pub fn scan_directory(root: &Path, options: &ProcessingOptions) -> Result<ScanResult> {
    let filter = NameFilter::from_options(options);
    let mut scan = ScanResult::default();
    let root_is_backup = root
        .canonicalize()
        .map(|abs| is_backup_dir(&abs, &options.backup_folder))
        .unwrap_or_else(|_| is_backup_dir(root, &options.backup_folder));

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        !(entry.depth() > 0
            && entry.file_type().is_dir()
            && is_backup_dir(entry.path(), &options.backup_folder))
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if root_is_backup && entry.depth() == 1 {
            debug!("Skipping {:?} inside backup folder root", entry.path());
            continue;
        }

        let path = entry.path();
        if !is_image_file(path) {
            continue;
        }

        let filename = entry.file_name().to_string_lossy();
        if filter.should_skip(&filename) {
            debug!("Skipping {:?} by name", path);
            scan.skipped_by_name.push(path.to_path_buf());
        } else if is_readable_image(path) {
            scan.images.push(path.to_path_buf());
        } else {
            debug!("Not a readable image: {:?}", path);
            scan.unreadable.push(path.to_path_buf());
        }
    }

    Ok(scan)
}

/// Paths of every image under `root` that would be compressed.
pub fn collect_image_files(root: &Path, options: &ProcessingOptions) -> Result<Vec<PathBuf>> {
    Ok(scan_directory(root, options)?.images)
}
