//! Command-line detail view of one library.

use std::fmt::Write;

use libmgr::logic::resolve;
use libmgr::state::{Library, Release};

/// Append `label: value` when `value` is non-empty.
fn field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        let _ = writeln!(out, "{label:<12}{value}");
    }
}

/// Version text with a `(bundled)` suffix for built-in releases.
fn version_label(r: &Release) -> String {
    if r.builtin {
        format!("{} (bundled)", r.version)
    } else {
        r.version.clone()
    }
}

/// What: Render a library's metadata and resolved install state.
///
/// Inputs:
/// - `lib`: Library from the current snapshot.
///
/// Output:
/// - Multi-line text: metadata of the latest release, installed release,
///   newer and older candidates, and the choosers a row would offer.
pub fn render_library(lib: &Library) -> String {
    let state = resolve(lib);
    let mut out = String::new();
    let _ = writeln!(out, "{}", lib.name);
    if let Some(latest) = lib.latest() {
        field(&mut out, "Author:", &latest.author);
        field(&mut out, "Maintainer:", &latest.maintainer);
        field(&mut out, "Summary:", &latest.sentence);
        field(&mut out, "Details:", &latest.paragraph);
        field(&mut out, "Website:", &latest.website);
        field(&mut out, "Category:", &latest.category);
        field(&mut out, "Types:", &latest.types().join(", "));
        field(&mut out, "Includes:", &latest.includes().join(", "));
    }
    if !lib.in_index {
        field(&mut out, "Note:", "not in the library index");
    }
    let installed = state.installed.map_or_else(|| "none".to_string(), version_label);
    field(&mut out, "Installed:", &installed);
    let join = |rs: &[&Release]| rs.iter().map(|r| version_label(r)).collect::<Vec<_>>().join(", ");
    field(&mut out, "Newer:", &join(&state.newer));
    field(&mut out, "Older:", &join(&state.older));
    let _ = writeln!(out, "{:<12}{:?}", "Action:", state.primary_action());
    if state.show_chooser {
        field(&mut out, "Choose:", &join(&state.candidates()));
    }
    if state.show_downgrade_action {
        field(&mut out, "Switch to:", &join(&state.downgrade_choices()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(version: &str, builtin: bool) -> Release {
        Release {
            name: "Servo".into(),
            version: version.into(),
            author: "Michael Margolis".into(),
            category: "Device Control".into(),
            types: Some(vec!["Arduino".into()]),
            builtin,
            ..Default::default()
        }
    }

    #[test]
    /// What: Detail view lists metadata and the upgrade/downgrade choices
    ///
    /// - Input: Servo 1.0 bundled installed, 1.1 and 1.2 available
    /// - Output: Installed marked bundled; newer listed newest first; switch chooser shown
    fn render_library_shows_state() {
        let mut lib = Library::new(
            "Servo",
            vec![rel("1.1.0", false), rel("1.2.0", false), rel("1.0.0", true)],
        );
        assert!(lib.mark_installed("1.0.0", true));
        let text = render_library(&lib);
        assert!(text.starts_with("Servo\n"));
        assert!(text.contains("Author:     Michael Margolis"));
        assert!(text.contains("Installed:  1.0.0 (bundled)"));
        assert!(text.contains("Newer:      1.2.0, 1.1.0"));
        assert!(!text.contains("Older:"));
        assert!(text.contains("Action:     Update"));
        assert!(text.contains("Switch to:  1.2.0, 1.1.0"));
    }
}
