use chrono::Local;
use dir_squeeze::utils::calculate_compression_ratio;
use dir_squeeze::{ImageResult, ImageStatus, NameFilter, RunSummary};
use proptest::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

fn filter(skip_original: bool, skip_skip: bool) -> NameFilter<'static> {
    NameFilter {
        original_suffix: "_original",
        skip_suffix: "_skip",
        skip_original,
        skip_skip,
    }
}

fn status_strategy() -> impl Strategy<Value = ImageStatus> {
    prop_oneof![
        Just(ImageStatus::Compressed),
        Just(ImageStatus::SkippedBackupExists),
        Just(ImageStatus::SkippedByName),
        Just(ImageStatus::Unreadable),
        "[a-z ]{0,10}".prop_map(ImageStatus::BackupFailed),
        "[a-z ]{0,10}".prop_map(ImageStatus::CompressFailed),
    ]
}

fn to_result(index: usize, status: ImageStatus, before: u64, after: u64) -> ImageResult {
    let path = PathBuf::from(format!("/p/{index}.jpg"));
    match status {
        ImageStatus::Compressed => ImageResult::compressed(&path, before, after),
        ImageStatus::CompressFailed(e) => ImageResult::compress_failed(&path, e),
        other => ImageResult::not_attempted(&path, other),
    }
}

proptest! {
    #[test]
    fn original_suffix_skipped_for_any_extension(
        prefix in "[a-zA-Z0-9 ]{0,12}",
        ext in "[a-zA-Z]{1,5}",
    ) {
        let name = format!("{prefix}_original.{ext}");
        prop_assert!(filter(true, false).should_skip(&name));
        prop_assert!(filter(true, true).should_skip(&name));
        prop_assert!(!filter(false, true).should_skip(&name));
    }

    #[test]
    fn skip_suffix_skipped_for_any_extension(
        prefix in "[a-zA-Z0-9 ]{0,12}",
        ext in "[a-zA-Z]{1,5}",
    ) {
        let name = format!("{prefix}_skip.{ext}");
        prop_assert!(filter(false, true).should_skip(&name));
        prop_assert!(!filter(true, false).should_skip(&name));
    }

    #[test]
    fn nothing_skipped_when_rules_disabled(name in "[a-zA-Z0-9_ ]{1,20}(\\.[a-z]{1,4})?") {
        prop_assert!(!filter(false, false).should_skip(&name));
    }

    #[test]
    fn plain_names_never_skipped(stem in "[a-z0-9]{1,12}", ext in "[a-z]{3}") {
        let name = format!("{}.{}", stem, ext);
        prop_assert!(!filter(true, true).should_skip(&name));
    }

    #[test]
    fn every_result_counted_in_exactly_one_category(
        entries in prop::collection::vec((status_strategy(), 1u64..1_000_000, 1u64..1_000_000), 0..40)
    ) {
        let results: Vec<_> = entries
            .into_iter()
            .enumerate()
            .map(|(i, (status, before, after))| to_result(i, status, before, after))
            .collect();
        let now = Local::now();
        let s = RunSummary::from_results(&results, now, now, Duration::from_secs(1));

        prop_assert_eq!(s.total, results.len());
        prop_assert_eq!(
            s.compressed + s.skipped_backup + s.skipped_named + s.unreadable + s.errors,
            s.total
        );

        let compressed: Vec<_> = results
            .iter()
            .filter(|r| r.status == ImageStatus::Compressed)
            .collect();
        prop_assert_eq!(s.compressed, compressed.len());
        prop_assert_eq!(s.total_before, compressed.iter().map(|r| r.size_before).sum::<u64>());
        prop_assert_eq!(
            s.by_extension.values().map(|e| e.count).sum::<usize>(),
            compressed.len()
        );
        prop_assert_eq!(s.average_seconds().is_some(), !compressed.is_empty());
    }

    #[test]
    fn compression_ratio_bounded_for_shrinking_files(before in 1u64..u32::MAX as u64, shrink in 0.0f64..1.0) {
        let after = (before as f64 * shrink) as u64;
        let ratio = calculate_compression_ratio(before, after);
        prop_assert!((0.0..=100.0).contains(&ratio));
    }
}
