/// Bytes per kilobyte for display purposes.
const KB: f64 = 1024.0;
/// Bytes per megabyte for display purposes.
const MB: f64 = 1024.0 * 1024.0;

/// Format a byte count the way the registration list displays it: KB with two
/// decimals below 1 MB, MB with two decimals from 1 MB up. The same MB
/// threshold is used for both the comparison and the conversion, so exactly
/// 1 MiB renders as "1.00 MB".
pub fn human_size(bytes: u64) -> String {
    let bytes = bytes as f64;
    if bytes / MB < 1.0 {
        format!("{:.2} KB", bytes / KB)
    } else {
        format!("{:.2} MB", bytes / MB)
    }
}
