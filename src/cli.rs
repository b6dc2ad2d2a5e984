use crate::config::{parse_bool, Settings};
use crate::constants::DEFAULT_CONFIG_FILE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dir-squeeze",
    about = "Compress every image under a directory in place, keeping backups and a CSV report",
    long_about = "dir-squeeze walks a directory tree, backs up each image into a per-folder backup \
                  directory, then re-encodes it in its own format at the chosen quality. \
                  Supported extensions: jpg, jpeg, png, webp, bmp, tiff, gif, avif, heic. \
                  Settings come from the command line, then a YAML config file, then defaults.",
    version,
    after_help = "EXAMPLES:\n  \
    dir-squeeze --path ./photos --compress_quality 80\n  \
    dir-squeeze --path ./photos --backup false --save_summary_to_csv no\n  \
    dir-squeeze --config ./squeeze.yaml --lang_code zh-tw -j 4"
)]
pub struct Args {
    #[arg(long, help = "Directory to process")]
    pub path: Option<PathBuf>,

    #[arg(
        long = "compress_quality",
        visible_alias = "compress-quality",
        short = 'q',
        help = "Compression quality (1-100, default: 85)",
        long_help = "Compression quality from 1 (lowest) to 100 (highest). \
                     For PNG: >=90 uses Zopfli, >=70 uses high compression, <70 uses standard compression."
    )]
    pub compress_quality: Option<u8>,

    #[arg(long, value_parser = parse_bool, help = "Back up originals before compressing (default: true)")]
    pub backup: Option<bool>,

    #[arg(
        long = "backup_folder",
        visible_alias = "backup-folder",
        help = "Name of the per-directory backup folder (default: \"original image\")"
    )]
    pub backup_folder: Option<String>,

    #[arg(
        long = "original_suffix",
        visible_alias = "original-suffix",
        help = "Suffix added to backup file names (default: _original)"
    )]
    pub original_suffix: Option<String>,

    #[arg(
        long = "skip_suffix",
        visible_alias = "skip-suffix",
        help = "File names ending with this suffix are left alone (default: _skip)"
    )]
    pub skip_suffix: Option<String>,

    #[arg(
        long = "skip_original",
        visible_alias = "skip-original",
        value_parser = parse_bool,
        help = "Skip files whose name ends with the original suffix (default: true)"
    )]
    pub skip_original: Option<bool>,

    #[arg(
        long = "skip_skip",
        visible_alias = "skip-skip",
        value_parser = parse_bool,
        help = "Skip files whose name ends with the skip suffix (default: true)"
    )]
    pub skip_skip: Option<bool>,

    #[arg(
        long = "print_image_reduced",
        visible_alias = "print-image-reduced",
        value_parser = parse_bool,
        help = "Print per-file results (default: true)"
    )]
    pub print_image_reduced: Option<bool>,

    #[arg(
        long = "print_summary",
        visible_alias = "print-summary",
        value_parser = parse_bool,
        help = "Print the run summary (default: true)"
    )]
    pub print_summary: Option<bool>,

    #[arg(
        long = "save_summary_to_csv",
        visible_alias = "save-summary-to-csv",
        value_parser = parse_bool,
        help = "Write a CSV report (default: true)"
    )]
    pub save_summary_to_csv: Option<bool>,

    #[arg(
        long = "summary_folder",
        visible_alias = "summary-folder",
        help = "Folder under the target directory for CSV reports (default: summary)"
    )]
    pub summary_folder: Option<String>,

    #[arg(
        long = "summary_filename",
        visible_alias = "summary-filename",
        help = "CSV report name prefix (default: report)"
    )]
    pub summary_filename: Option<String>,

    #[arg(long, help = "YAML config file (default: config.yaml)")]
    pub config: Option<PathBuf>,

    #[arg(
        long = "lang_code",
        visible_alias = "lang-code",
        help = "Message language, e.g. en or zh-tw (default: en)"
    )]
    pub lang_code: Option<String>,

    #[arg(
        short = 'j',
        long,
        help = "Number of parallel threads (default: auto)",
        long_help = "Number of worker threads. If not specified, uses number of CPU cores."
    )]
    pub threads: Option<usize>,

    #[arg(short, long, help = "Show debug diagnostics on stderr")]
    pub verbose: bool,

    #[arg(long, help = "Print a description of the tool and exit")]
    pub about: bool,

    #[arg(long, help = "Print the author and exit")]
    pub author: bool,

    #[arg(long, help = "Print the contact email and exit")]
    pub email: bool,

    #[arg(long, help = "Print the license and exit")]
    pub license: bool,

    #[arg(long, help = "Print the project status and exit")]
    pub status: bool,

    #[arg(long, visible_alias = "github", help = "Print the source repository and exit")]
    pub repository: bool,
}

/// Metadata a user can ask for instead of running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoRequest {
    About,
    Author,
    Email,
    License,
    Status,
    Repository,
}

impl Args {
    /// The command-line layer of settings.
    pub fn settings(&self) -> Settings {
        Settings {
            path: self.path.clone(),
            compress_quality: self.compress_quality,
            backup: self.backup,
            backup_folder: self.backup_folder.clone(),
            original_suffix: self.original_suffix.clone(),
            skip_suffix: self.skip_suffix.clone(),
            skip_original: self.skip_original,
            skip_skip: self.skip_skip,
            print_image_reduced: self.print_image_reduced,
            print_summary: self.print_summary,
            save_summary_to_csv: self.save_summary_to_csv,
            summary_folder: self.summary_folder.clone(),
            summary_filename: self.summary_filename.clone(),
            lang_code: self.lang_code.clone(),
            threads: self.threads,
        }
    }

    /// Config path and whether the user named it.
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        }
    }

    /// Requested metadata, in a fixed order.
    pub fn info_requests(&self) -> Vec<InfoRequest> {
        [
            (self.about, InfoRequest::About),
            (self.author, InfoRequest::Author),
            (self.email, InfoRequest::Email),
            (self.license, InfoRequest::License),
            (self.status, InfoRequest::Status),
            (self.repository, InfoRequest::Repository),
        ]
        .into_iter()
        .filter_map(|(set, request)| set.then_some(request))
        .collect()
    }
}
