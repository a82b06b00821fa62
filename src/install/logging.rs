use std::io::Write;
use std::path::Path;

/// What: Append lines to `file` in `dir`, each prefixed with a UTC timestamp.
///
/// Inputs:
/// - `dir`: Logs directory.
/// - `file`: Log file name.
/// - `entries`: Lines to append.
///
/// Output:
/// - `Ok(())` on success; otherwise an I/O error.
fn append_log(dir: &Path, file: &str, entries: &[String]) -> std::io::Result<()> {
    let path = dir.join(file);
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_secs()).ok());
    let when = crate::util::ts_to_date(now);
    for e in entries {
        writeln!(f, "{when} {e}")?;
    }
    Ok(())
}

/// What: Append installed `name@version` entries to `install_log.log`.
///
/// Input: `entries` to log.
///
/// Output: `Ok(())` on success; otherwise an I/O error.
///
/// # Errors
/// - Returns `Err` when the log file cannot be opened or written to.
pub fn log_installed(entries: &[String]) -> std::io::Result<()> {
    append_log(&crate::util::logs_dir(), "install_log.log", entries)
}

/// What: Append removed library names to `remove_log.log`.
///
/// Input: `names` to log.
///
/// Output: `Ok(())` on success; otherwise an I/O error.
///
/// # Errors
/// - Returns `Err` when the log file cannot be opened or written to.
pub fn log_removed(names: &[String]) -> std::io::Result<()> {
    append_log(&crate::util::logs_dir(), "remove_log.log", names)
}
