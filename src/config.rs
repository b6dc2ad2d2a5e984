use crate::error::{Result, SqueezeError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One layer of settings: the command line or the YAML config file.
///
/// Every field is optional so layers can be stacked; a value present in a
/// higher layer always wins. Keys match the long command-line flag names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub path: Option<PathBuf>,
    pub compress_quality: Option<u8>,
    pub backup: Option<bool>,
    pub backup_folder: Option<String>,
    pub original_suffix: Option<String>,
    pub skip_suffix: Option<String>,
    pub skip_original: Option<bool>,
    pub skip_skip: Option<bool>,
    pub print_image_reduced: Option<bool>,
    pub print_summary: Option<bool>,
    pub save_summary_to_csv: Option<bool>,
    pub summary_folder: Option<String>,
    pub summary_filename: Option<String>,
    pub lang_code: Option<String>,
    pub threads: Option<usize>,
}

impl Settings {
    /// Loads a YAML config file.
    ///
    /// A missing file yields empty settings. `explicit` only controls whether
    /// that is worth a warning (a user-supplied path) or not (the default path).
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        if !path.exists() {
            if explicit {
                warn!("Config file {:?} not found, using command line and defaults", path);
            } else {
                debug!("No config file at {:?}", path);
            }
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Self::parse(&contents).map_err(|e| SqueezeError::Config(path.to_path_buf(), e))
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Fills every unset field of `self` from `lower`.
    pub fn layered_over(self, lower: Settings) -> Settings {
        Settings {
            path: self.path.or(lower.path),
            compress_quality: self.compress_quality.or(lower.compress_quality),
            backup: self.backup.or(lower.backup),
            backup_folder: self.backup_folder.or(lower.backup_folder),
            original_suffix: self.original_suffix.or(lower.original_suffix),
            skip_suffix: self.skip_suffix.or(lower.skip_suffix),
            skip_original: self.skip_original.or(lower.skip_original),
            skip_skip: self.skip_skip.or(lower.skip_skip),
            print_image_reduced: self.print_image_reduced.or(lower.print_image_reduced),
            print_summary: self.print_summary.or(lower.print_summary),
            save_summary_to_csv: self.save_summary_to_csv.or(lower.save_summary_to_csv),
            summary_folder: self.summary_folder.or(lower.summary_folder),
            summary_filename: self.summary_filename.or(lower.summary_filename),
            lang_code: self.lang_code.or(lower.lang_code),
            threads: self.threads.or(lower.threads),
        }
    }
}

/// Parses the boolean spellings accepted on the command line.
pub fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "t" | "1" => Ok(true),
        "no" | "false" | "f" | "0" => Ok(false),
        _ => Err(format!("boolean value expected, got '{}'", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_yaml_settings() {
        let yaml = "path: ./photos\ncompress_quality: 70\nbackup: false\nbackup_folder: bak\n";
        let settings = Settings::parse(yaml).unwrap();
        assert_eq!(settings.path, Some(PathBuf::from("./photos")));
        assert_eq!(settings.compress_quality, Some(70));
        assert_eq!(settings.backup, Some(false));
        assert_eq!(settings.backup_folder.as_deref(), Some("bak"));
        assert_eq!(settings.skip_skip, None);
    }

    #[test]
    fn test_parse_empty_yaml() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
        assert_eq!(Settings::parse("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let settings = Settings::parse("config: other.yaml\nskip_skip: true\n").unwrap();
        assert_eq!(settings.skip_skip, Some(true));
    }

    #[test]
    fn test_parse_rejects_wrong_type() {
        assert!(Settings::parse("compress_quality: high\n").is_err());
    }

    #[test]
    fn test_cli_layer_wins() {
        let cli = Settings {
            compress_quality: Some(60),
            ..Settings::default()
        };
        let file = Settings {
            compress_quality: Some(90),
            backup: Some(false),
            ..Settings::default()
        };

        let merged = cli.layered_over(file);
        assert_eq!(merged.compress_quality, Some(60));
        assert_eq!(merged.backup, Some(false));
        assert_eq!(merged.summary_folder, None);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load(&temp_dir.path().join("nope.yaml"), true).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"backup: [unclosed\n").unwrap();

        let result = Settings::load(&path, true);
        assert!(matches!(result, Err(SqueezeError::Config(p, _)) if p == path));
    }

    #[test]
    fn test_parse_bool() {
        for v in ["yes", "TRUE", "t", "1"] {
            assert_eq!(parse_bool(v), Ok(true));
        }
        for v in ["no", "False", "F", "0"] {
            assert_eq!(parse_bool(v), Ok(false));
        }
        assert!(parse_bool("maybe").is_err());
    }
}
