pub mod about;
pub mod backup;
pub mod batch;
pub mod cli;
pub mod config;
pub mod constants;
pub mod csv_report;
pub mod error;
pub mod filter;
pub mod formats;
pub mod i18n;
pub mod logger;
pub mod options;
pub mod processing;
pub mod report;
pub mod result;
pub mod utils;
pub mod walker;

pub use backup::{backup_image, backup_path_for, BackupOutcome};
pub use batch::{dispatch, run_directory, RunOutcome};
pub use config::Settings;
pub use csv_report::{render_csv, write_csv_report};
pub use error::{Result, SqueezeError};
pub use filter::NameFilter;
pub use formats::{is_image_file, SourceFormat};
pub use i18n::Translator;
pub use options::ProcessingOptions;
pub use processing::{compress_file, encode_image, recompress_in_place};
pub use report::{render_file_lines, render_summary, RunSummary};
pub use result::{Category, ImageResult, ImageStatus};
pub use walker::{collect_image_files, scan_directory, ScanResult};
