use crate::constants::TIMESTAMP_FORMAT;
use crate::i18n::Translator;
use crate::result::{Category, ImageResult};
use crate::utils::{
    bytes_to_kib, bytes_to_mib, calculate_compression_ratio, format_elapsed, saved_kib, saved_mib,
};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionStats {
    pub count: usize,
    pub before: u64,
    pub after: u64,
}

/// Aggregate figures for one run, built after all workers have finished.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub elapsed: Duration,
    pub total: usize,
    pub compressed: usize,
    pub skipped_backup: usize,
    pub skipped_named: usize,
    pub unreadable: usize,
    pub errors: usize,
    pub total_before: u64,
    pub total_after: u64,
    /// Keyed by lowercased extension; only compressed files are counted.
    pub by_extension: BTreeMap<String, ExtensionStats>,
}

impl RunSummary {
    pub fn from_results(
        results: &[ImageResult],
        start: DateTime<Local>,
        end: DateTime<Local>,
        elapsed: Duration,
    ) -> Self {
        let mut summary = Self {
            start,
            end,
            elapsed,
            total: results.len(),
            compressed: 0,
            skipped_backup: 0,
            skipped_named: 0,
            unreadable: 0,
            errors: 0,
            total_before: 0,
            total_after: 0,
            by_extension: BTreeMap::new(),
        };

        for result in results {
            match result.category() {
                Category::Compressed => summary.compressed += 1,
                Category::SkippedBackup => summary.skipped_backup += 1,
                Category::SkippedNamed => summary.skipped_named += 1,
                Category::Unreadable => summary.unreadable += 1,
                Category::Error => summary.errors += 1,
            }

            if let Some((before, after)) = result.sizes() {
                summary.total_before += before;
                summary.total_after += after;
                let stats = summary
                    .by_extension
                    .entry(result.extension.clone())
                    .or_default();
                stats.count += 1;
                stats.before += before;
                stats.after += after;
            }
        }

        summary
    }

    /// Seconds of wall time per compressed file, if anything was compressed.
    pub fn average_seconds(&self) -> Option<f64> {
        (self.compressed > 0).then(|| self.elapsed.as_secs_f64() / self.compressed as f64)
    }

    pub fn saved_percent(&self) -> Option<f64> {
        (self.total_before > 0)
            .then(|| calculate_compression_ratio(self.total_before, self.total_after))
    }
}

/// One block per file: the path, then sizes or the status text.
pub fn render_file_lines(results: &[ImageResult], tr: &Translator) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", tr.t("report.header_result"));

    for result in results {
        let _ = writeln!(out, "{}", result.path.display());
        match result.sizes() {
            Some((before, after)) => {
                let line = tr.format(
                    "report.file_line",
                    &[
                        ("before", format!("{:.1}", bytes_to_kib(before))),
                        ("after", format!("{:.1}", bytes_to_kib(after))),
                        ("saved", format!("{:.1}", saved_kib(before, after))),
                        (
                            "percent",
                            format!("{:.1}", calculate_compression_ratio(before, after)),
                        ),
                    ],
                );
                let _ = writeln!(out, "{}", line);
            }
            None => {
                let _ = writeln!(out, "  {}", result.status.describe(tr));
            }
        }
    }
    out
}

pub fn render_summary(summary: &RunSummary, tr: &Translator) -> String {
    let mut lines = vec![
        String::new(),
        tr.t("report.header_summary"),
        tr.format(
            "report.start_time",
            &[("time", summary.start.format(TIMESTAMP_FORMAT).to_string())],
        ),
        tr.format(
            "report.end_time",
            &[("time", summary.end.format(TIMESTAMP_FORMAT).to_string())],
        ),
        tr.format("report.elapsed", &[("elapsed", format_elapsed(summary.elapsed))]),
        tr.format("report.total_images", &[("count", summary.total.to_string())]),
    ];

    lines.push(match summary.average_seconds() {
        Some(avg) => tr.format("report.avg_time", &[("seconds", format!("{:.2}", avg))]),
        None => tr.t("report.no_avg_time"),
    });

    let counts = [
        ("report.compressed_success", summary.compressed),
        ("report.skipped_backup", summary.skipped_backup),
        ("report.skipped_named", summary.skipped_named),
        ("report.error_unreadable", summary.unreadable),
        ("report.error_failed", summary.errors),
    ];
    for (key, count) in counts {
        lines.push(tr.format(key, &[("count", count.to_string())]));
    }

    lines.push(tr.format(
        "report.size_before",
        &[("mb", format!("{:.2}", bytes_to_mib(summary.total_before)))],
    ));
    lines.push(tr.format(
        "report.size_after",
        &[("mb", format!("{:.2}", bytes_to_mib(summary.total_after)))],
    ));
    if let Some(percent) = summary.saved_percent() {
        lines.push(tr.format(
            "report.size_saved",
            &[
                ("mb", format!("{:.2}", saved_mib(summary.total_before, summary.total_after))),
                ("percent", format!("{:.1}", percent)),
            ],
        ));
    }

    lines.push(String::new());
    lines.push(tr.t("report.header_ext_summary"));
    for (ext, stats) in &summary.by_extension {
        lines.push(tr.format(
            "report.ext_format",
            &[
                ("ext", ext.to_uppercase()),
                ("count", stats.count.to_string()),
                ("saved", format!("{:.2}", saved_mib(stats.before, stats.after))),
                (
                    "percent",
                    format!("{:.1}", calculate_compression_ratio(stats.before, stats.after)),
                ),
            ],
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
