use crate::constants::{REPORT_FILE_TIMESTAMP_FORMAT, TIMESTAMP_FORMAT};
use crate::error::Result;
use crate::i18n::Translator;
use crate::options::ProcessingOptions;
use crate::report::RunSummary;
use crate::result::ImageResult;
use crate::utils::{
    bytes_to_kib, bytes_to_mib, calculate_compression_ratio, format_elapsed, saved_mib,
};
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

const BOM: &str = "\u{feff}";
const LINE_END: &str = "\r\n";

/// `<root>/<summary_folder>/<summary_filename>_<timestamp>.csv`
pub fn csv_report_path(root: &Path, options: &ProcessingOptions, at: DateTime<Local>) -> PathBuf {
    root.join(&options.summary_folder).join(format!(
        "{}_{}.csv",
        options.summary_filename,
        at.format(REPORT_FILE_TIMESTAMP_FORMAT)
    ))
}

/// Quotes a field when it contains a delimiter, quote or line break.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

struct CsvWriter {
    out: String,
}

impl CsvWriter {
    fn new() -> Self {
        Self {
            out: String::from(BOM),
        }
    }

    fn row<S: AsRef<str>>(&mut self, fields: &[S]) {
        let line = fields
            .iter()
            .map(|f| escape_field(f.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.out.push_str(&line);
        self.out.push_str(LINE_END);
    }

    fn blank(&mut self) {
        self.out.push_str(LINE_END);
    }
}

/// Renders the three report sections: run summary, per-extension totals
/// and per-file detail.
pub fn render_csv(summary: &RunSummary, results: &[ImageResult], tr: &Translator) -> String {
    let f = |key: &str| tr.t(&format!("csv.fields.{}", key));
    let mut csv = CsvWriter::new();

    csv.row(&[tr.t("csv.section_general")]);
    csv.row(&[f("key"), f("value")]);
    csv.row(&[f("start_time"), summary.start.format(TIMESTAMP_FORMAT).to_string()]);
    csv.row(&[f("end_time"), summary.end.format(TIMESTAMP_FORMAT).to_string()]);
    csv.row(&[f("elapsed"), format_elapsed(summary.elapsed)]);
    match summary.average_seconds() {
        Some(avg) => csv.row(&[f("avg_time"), format!("{:.2}", avg)]),
        None => csv.row(&[f("avg_time"), f("avg_time_unavailable")]),
    }
    csv.row(&[f("total_images"), summary.total.to_string()]);
    csv.row(&[f("compressed"), summary.compressed.to_string()]);
    csv.row(&[f("skipped_backup"), summary.skipped_backup.to_string()]);
    csv.row(&[f("skipped_named"), summary.skipped_named.to_string()]);
    csv.row(&[f("unreadable"), summary.unreadable.to_string()]);
    csv.row(&[f("errors"), summary.errors.to_string()]);
    csv.row(&[f("size_before"), format!("{:.2}", bytes_to_mib(summary.total_before))]);
    csv.row(&[f("size_after"), format!("{:.2}", bytes_to_mib(summary.total_after))]);
    if let Some(percent) = summary.saved_percent() {
        csv.row(&[
            f("size_saved"),
            format!("{:.2}", saved_mib(summary.total_before, summary.total_after)),
        ]);
        csv.row(&[f("size_percent"), format!("{:.1}", percent)]);
    }
    csv.blank();

    csv.row(&[tr.t("csv.section_ext")]);
    csv.row(&[
        f("ext"),
        f("ext_count"),
        f("ext_before"),
        f("ext_after"),
        f("ext_saved"),
        f("ext_percent"),
    ]);
    for (ext, stats) in &summary.by_extension {
        csv.row(&[
            ext.to_uppercase(),
            stats.count.to_string(),
            format!("{:.2}", bytes_to_mib(stats.before)),
            format!("{:.2}", bytes_to_mib(stats.after)),
            format!("{:.2}", saved_mib(stats.before, stats.after)),
            format!("{:.1}", calculate_compression_ratio(stats.before, stats.after)),
        ]);
    }
    csv.blank();

    csv.row(&[tr.t("csv.section_detail")]);
    csv.row(&[
        f("detail_path"),
        f("detail_ext"),
        f("detail_before"),
        f("detail_after"),
        f("detail_percent"),
        f("detail_status"),
        f("detail_time"),
    ]);
    for result in results {
        let (before, after, percent) = match result.sizes() {
            Some((b, a)) => (
                format!("{:.1}", bytes_to_kib(b)),
                format!("{:.1}", bytes_to_kib(a)),
                format!("{:.1}", calculate_compression_ratio(b, a)),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        let finished = result
            .finished_at
            .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default();
        csv.row(&[
            result.path.display().to_string(),
            result.extension.clone(),
            before,
            after,
            percent,
            result.status.describe(tr),
            finished,
        ]);
    }

    csv.out
}

/// Writes the CSV report to `path`, replacing any existing file.
pub fn write_csv_report(
    path: &Path,
    summary: &RunSummary,
    results: &[ImageResult],
    tr: &Translator,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_csv(summary, results, tr))?;
    Ok(())
}
