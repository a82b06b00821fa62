//! Small helpers shared by the binary and the library: config/log locations,
//! `key = value` parsing, user settings and timestamp formatting.

pub mod config;
pub mod paths;
pub mod settings;

pub use paths::{config_dir, logs_dir};
pub use settings::Settings;

/// What: Format a UNIX timestamp as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// Inputs:
/// - `ts`: Seconds since the epoch; `None` yields an empty string.
///
/// Output:
/// - Formatted date; negative timestamps are returned as plain numbers.
///
/// Details:
/// - Uses the days-to-civil conversion so no date crate is needed for log lines.
#[must_use]
pub fn ts_to_date(ts: Option<i64>) -> String {
    let Some(t) = ts else {
        return String::new();
    };
    if t < 0 {
        return t.to_string();
    }
    let days = t / 86_400;
    let sod = t % 86_400;
    let (hour, minute, second) = (sod / 3600, (sod % 3600) / 60, sod % 60);

    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}")
}
