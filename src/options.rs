use crate::config::Settings;
use crate::constants::{
    DEFAULT_BACKUP_FOLDER, DEFAULT_ORIGINAL_SUFFIX, DEFAULT_QUALITY, DEFAULT_SKIP_SUFFIX,
    DEFAULT_SUMMARY_FILENAME, DEFAULT_SUMMARY_FOLDER, MAX_QUALITY, MIN_QUALITY,
};
use crate::error::{Result, SqueezeError};
use tracing::debug;

/// Resolved, immutable settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub quality: u8,
    pub backup: bool,
    pub backup_folder: String,
    pub original_suffix: String,
    pub skip_suffix: String,
    pub skip_original: bool,
    pub skip_skip: bool,
    pub print_image_reduced: bool,
    pub print_summary: bool,
    pub save_summary_to_csv: bool,
    pub summary_folder: String,
    pub summary_filename: String,
    pub threads: usize,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            backup: true,
            backup_folder: DEFAULT_BACKUP_FOLDER.to_string(),
            original_suffix: DEFAULT_ORIGINAL_SUFFIX.to_string(),
            skip_suffix: DEFAULT_SKIP_SUFFIX.to_string(),
            skip_original: true,
            skip_skip: true,
            print_image_reduced: true,
            print_summary: true,
            save_summary_to_csv: true,
            summary_folder: DEFAULT_SUMMARY_FOLDER.to_string(),
            summary_filename: DEFAULT_SUMMARY_FILENAME.to_string(),
            threads: num_cpus::get(),
        }
    }
}

/// Takes a layered value or falls back to its default, logging the fallback.
fn or_default<T: std::fmt::Debug>(value: Option<T>, key: &str, default: T) -> T {
    match value {
        Some(v) => v,
        None => {
            debug!(key, ?default, "parameter not set, using default");
            default
        }
    }
}

impl ProcessingOptions {
    /// Resolves merged settings into options, validating ranges.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let defaults = Self::default();
        let s = settings.clone();

        let quality = or_default(s.compress_quality, "compress_quality", defaults.quality);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(SqueezeError::InvalidQuality(quality));
        }

        let threads = or_default(s.threads, "threads", defaults.threads);
        if threads == 0 {
            return Err(SqueezeError::InvalidThreadCount(threads));
        }

        Ok(Self {
            quality,
            backup: or_default(s.backup, "backup", defaults.backup),
            backup_folder: or_default(s.backup_folder, "backup_folder", defaults.backup_folder),
            original_suffix: or_default(
                s.original_suffix,
                "original_suffix",
                defaults.original_suffix,
            ),
            skip_suffix: or_default(s.skip_suffix, "skip_suffix", defaults.skip_suffix),
            skip_original: or_default(s.skip_original, "skip_original", defaults.skip_original),
            skip_skip: or_default(s.skip_skip, "skip_skip", defaults.skip_skip),
            print_image_reduced: or_default(
                s.print_image_reduced,
                "print_image_reduced",
                defaults.print_image_reduced,
            ),
            print_summary: or_default(s.print_summary, "print_summary", defaults.print_summary),
            save_summary_to_csv: or_default(
                s.save_summary_to_csv,
                "save_summary_to_csv",
                defaults.save_summary_to_csv,
            ),
            summary_folder: or_default(s.summary_folder, "summary_folder", defaults.summary_folder),
            summary_filename: or_default(
                s.summary_filename,
                "summary_filename",
                defaults.summary_filename,
            ),
            threads,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_settings() {
        let options = ProcessingOptions::from_settings(&Settings::default()).unwrap();
        assert_eq!(options.quality, 85);
        assert!(options.backup);
        assert_eq!(options.backup_folder, "original image");
        assert_eq!(options.original_suffix, "_original");
        assert_eq!(options.skip_suffix, "_skip");
        assert!(options.skip_original && options.skip_skip);
        assert_eq!(options.summary_folder, "summary");
        assert_eq!(options.summary_filename, "report");
        assert!(options.threads >= 1);
    }

    #[test]
    fn test_values_from_settings() {
        let settings = Settings {
            compress_quality: Some(40),
            backup: Some(false),
            skip_suffix: Some("_keep".to_string()),
            threads: Some(2),
            ..Settings::default()
        };
        let options = ProcessingOptions::from_settings(&settings).unwrap();
        assert_eq!(options.quality, 40);
        assert!(!options.backup);
        assert_eq!(options.skip_suffix, "_keep");
        assert_eq!(options.threads, 2);
    }

    #[test]
    fn test_invalid_quality() {
        for q in [0u8, 101, 255] {
            let settings = Settings {
                compress_quality: Some(q),
                ..Settings::default()
            };
            assert!(matches!(
                ProcessingOptions::from_settings(&settings),
                Err(SqueezeError::InvalidQuality(v)) if v == q
            ));
        }
    }

    #[test]
    fn test_zero_threads_rejected() {
        let settings = Settings {
            threads: Some(0),
            ..Settings::default()
        };
        assert!(matches!(
            ProcessingOptions::from_settings(&settings),
            Err(SqueezeError::InvalidThreadCount(0))
        ));
    }
}
