use crate::options::ProcessingOptions;
use std::path::Path;

/// Suffix rules deciding whether a file is left alone by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFilter<'a> {
    pub original_suffix: &'a str,
    pub skip_suffix: &'a str,
    pub skip_original: bool,
    pub skip_skip: bool,
}

impl<'a> NameFilter<'a> {
    pub fn from_options(options: &'a ProcessingOptions) -> Self {
        Self {
            original_suffix: &options.original_suffix,
            skip_suffix: &options.skip_suffix,
            skip_original: options.skip_original,
            skip_skip: options.skip_skip,
        }
    }

    /// Returns true when `filename` (no directory part) should be skipped.
    ///
    /// Only the stem is inspected, so `photo_skip.jpg` and `photo_skip.png`
    /// match the same way regardless of extension.
    pub fn should_skip(&self, filename: &str) -> bool {
        let stem = Path::new(filename)
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();

        (self.skip_original && stem.ends_with(self.original_suffix))
            || (self.skip_skip && stem.ends_with(self.skip_suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(skip_original: bool, skip_skip: bool) -> NameFilter<'static> {
        NameFilter {
            original_suffix: "_original",
            skip_suffix: "_skip",
            skip_original,
            skip_skip,
        }
    }

    #[test]
    fn test_skips_original_suffix() {
        assert!(filter(true, false).should_skip("cat_original.jpg"));
        assert!(filter(true, false).should_skip("cat_original.PNG"));
        assert!(!filter(false, false).should_skip("cat_original.jpg"));
    }

    #[test]
    fn test_skips_skip_suffix() {
        assert!(filter(false, true).should_skip("cat_skip.webp"));
        assert!(!filter(true, false).should_skip("cat_skip.webp"));
    }

    #[test]
    fn test_suffix_must_end_stem() {
        let f = filter(true, true);
        assert!(!f.should_skip("cat_original_v2.jpg"));
        assert!(!f.should_skip("_skipper.jpg"));
        assert!(!f.should_skip("cat.jpg"));
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        assert!(!filter(true, true).should_skip("cat_ORIGINAL.jpg"));
    }

    #[test]
    fn test_dotfile_without_extension() {
        // ".hidden_skip" has no extension, the whole name is the stem
        assert!(filter(false, true).should_skip(".hidden_skip"));
    }
}
