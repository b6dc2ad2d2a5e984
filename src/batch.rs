use crate::constants::PROGRESS_BAR_TEMPLATE;
use crate::csv_report::{csv_report_path, write_csv_report};
use crate::error::{Result, SqueezeError};
use crate::i18n::Translator;
use crate::options::ProcessingOptions;
use crate::processing::compress_file;
use crate::report::{render_file_lines, render_summary, RunSummary};
use crate::result::{ImageResult, ImageStatus};
use crate::walker::scan_directory;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;
use tracing::{error, info};

/// Everything one run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub results: Vec<ImageResult>,
    pub summary: RunSummary,
    pub csv_path: Option<PathBuf>,
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

/// Runs `task` once per file on a pool of `threads` workers.
///
/// Results are handed to `on_result` on the calling thread as they
/// complete, so the returned vector is in completion order. A task that
/// panics still yields a result for its file.
pub fn dispatch<F, G>(
    files: Vec<PathBuf>,
    threads: usize,
    task: F,
    mut on_result: G,
) -> Result<Vec<ImageResult>>
where
    F: Fn(&Path) -> ImageResult + Sync,
    G: FnMut(&ImageResult),
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    let mut results = Vec::with_capacity(files.len());
    let (tx, rx) = mpsc::channel();
    let task = &task;

    thread::scope(|scope| {
        scope.spawn(move || {
            pool.install(|| {
                files.par_iter().for_each_with(tx, |tx, path| {
                    let result = panic::catch_unwind(AssertUnwindSafe(|| task(path.as_path())))
                        .unwrap_or_else(|payload| {
                            ImageResult::compress_failed(path, panic_message(payload))
                        });
                    // the receiver outlives every sender
                    let _ = tx.send(result);
                });
            });
        });

        for result in rx {
            on_result(&result);
            results.push(result);
        }
    });

    Ok(results)
}

fn progress_bar(len: usize, message: String) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar
}

/// Compresses every eligible image under `root` and reports on the run.
pub fn run_directory(
    root: &Path,
    options: &ProcessingOptions,
    tr: &Translator,
) -> Result<RunOutcome> {
    if !root.is_dir() {
        return Err(SqueezeError::DirectoryNotFound(root.to_path_buf()));
    }

    let start = Local::now();
    let timer = Instant::now();

    let scan = scan_directory(root, options)?;
    println!(
        "{}",
        tr.format("general.start_processing", &[("count", scan.images.len().to_string())])
    );
    info!(
        "{} images, {} skipped by name, {} unreadable, {} workers",
        scan.images.len(),
        scan.skipped_by_name.len(),
        scan.unreadable.len(),
        options.threads
    );

    let progress = progress_bar(scan.images.len(), tr.t("general.processing"));
    let mut results = dispatch(
        scan.images,
        options.threads,
        |path| compress_file(path, options),
        |result| {
            progress.inc(1);
            if options.print_image_reduced {
                progress.suspend(|| {
                    println!("{} - {}", result.status.describe(tr), result.path.display())
                });
            }
        },
    )?;
    progress.finish_and_clear();

    results.extend(
        scan.skipped_by_name
            .iter()
            .map(|p| ImageResult::not_attempted(p, ImageStatus::SkippedByName)),
    );
    results.extend(
        scan.unreadable
            .iter()
            .map(|p| ImageResult::not_attempted(p, ImageStatus::Unreadable)),
    );

    let end = Local::now();
    let summary = RunSummary::from_results(&results, start, end, timer.elapsed());

    if options.print_image_reduced {
        print!("{}", render_file_lines(&results, tr));
    }
    if options.print_summary {
        print!("{}", render_summary(&summary, tr));
    }

    let mut csv_path = None;
    if options.save_summary_to_csv {
        let path = csv_report_path(root, options, end);
        match write_csv_report(&path, &summary, &results, tr) {
            Ok(()) => {
                println!(
                    "{}",
                    tr.format("general.saved_report", &[("path", path.display().to_string())])
                );
                csv_path = Some(path);
            }
            Err(e) => {
                error!("Failed to write report {:?}: {}", path, e);
                eprintln!(
                    "{}",
                    tr.format(
                        "general.save_report_failed",
                        &[("path", path.display().to_string()), ("error", e.to_string())],
                    )
                );
            }
        }
    }

    Ok(RunOutcome {
        results,
        summary,
        csv_path,
    })
}
