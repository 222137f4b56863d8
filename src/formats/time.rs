/// Formats fractional seconds as `HH:MM:SS.mmm`.
///
/// Callers must pass a finite, non-negative value. Milliseconds are rounded
/// half away from zero before being split, so `59.9996` carries into the
/// next second instead of printing `1000` milliseconds.
pub fn format_vtt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    format_ms(total_ms, '.')
}

fn format_ms(ms: u64, ms_sep: char) -> String {
    let total_seconds = ms / 1000;
    let milli = ms % 1000;

    let sec = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let min = total_minutes % 60;
    let hour = total_minutes / 60;

    format!("{hour:02}:{min:02}:{sec:02}{ms_sep}{milli:03}")
}
