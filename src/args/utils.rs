//! Shared utilities for argument processing.

use libmgr::util::Settings;

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
/// - `LIBMGR_TRACE=1` enables TRACE level for filter timing.
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("LIBMGR_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Split an `install` argument into library name and optional version.
///
/// Inputs:
/// - `target`: `Name` or `Name@Version`.
///
/// Output:
/// - `(name, Some(version))`, or `(name, None)` when no version was given.
///
/// Details:
/// - Splits on the last `@`; an empty version counts as none.
pub fn parse_target(target: &str) -> (&str, Option<&str>) {
    match target.trim().rsplit_once('@') {
        Some((name, ver)) if !name.is_empty() => {
            let ver = ver.trim();
            (name.trim(), (!ver.is_empty()).then_some(ver))
        }
        _ => (target.trim(), None),
    }
}

/// What: Merge command-line overrides into settings loaded from `settings.conf`.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
/// - `settings`: Settings from disk (or defaults).
///
/// Output:
/// - Effective settings; flags win over the file.
pub fn effective_settings(args: &crate::args::Args, mut settings: Settings) -> Settings {
    if let Some(p) = &args.priority_type {
        settings.priority_type.clone_from(p);
    }
    if let Some(p) = &args.index {
        settings.index_path.clone_from(p);
    }
    if let Some(p) = &args.installed {
        settings.installed_path = Some(p.clone());
    }
    if let Some(p) = &args.cli {
        settings.cli_path.clone_from(p);
    }
    settings.dry_run |= args.dry_run;
    settings
}
