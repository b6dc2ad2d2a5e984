//! Number helpers shared by the console and CSV reports.
use std::time::Duration;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

pub fn bytes_to_kib(bytes: u64) -> f64 {
    bytes as f64 / KIB
}

pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / MIB
}

/// Signed byte difference converted to MiB; negative when the output grew.
pub fn saved_mib(before: u64, after: u64) -> f64 {
    (before as f64 - after as f64) / MIB
}

/// Signed byte difference converted to KiB.
pub fn saved_kib(before: u64, after: u64) -> f64 {
    (before as f64 - after as f64) / KIB
}

/// Calculate compression ratio as a percentage
///
/// # Returns
/// * Percentage saved (positive means reduction, negative means increase)
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

/// Formats a duration as `H:MM:SS.mmm`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let seconds = (total_ms / 1_000) % 60;
    let millis = total_ms % 1_000;
    format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}
