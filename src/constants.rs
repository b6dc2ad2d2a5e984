pub const DEFAULT_QUALITY: u8 = 85;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_BACKUP_FOLDER: &str = "original image";
pub const DEFAULT_ORIGINAL_SUFFIX: &str = "_original";
pub const DEFAULT_SKIP_SUFFIX: &str = "_skip";
pub const DEFAULT_SUMMARY_FOLDER: &str = "summary";
pub const DEFAULT_SUMMARY_FILENAME: &str = "report";
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_LANG_CODE: &str = "en";

/// Directory searched for `<lang_code>.yaml` overrides of the built-in tables.
pub const LANGUAGE_DIR: &str = "language";

pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "bmp", "tiff", "gif", "avif", "heic",
];

pub const ZOPFLI_ITERATIONS: u8 = 15;
pub const LIBDEFLATER_HIGH_LEVEL: u8 = 12;
pub const LIBDEFLATER_LOW_LEVEL: u8 = 8;
pub const OXIPNG_PRESET: u8 = 4;
pub const AVIF_ENCODER_SPEED: u8 = 8;

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{msg} [{elapsed_precise}] {wide_bar:.cyan/blue} {pos}/{len} ({eta})";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const REPORT_FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

pub const PROJECT_STATUS: &str = "Development";
