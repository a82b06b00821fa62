//! Command-line listing of filtered libraries.

use std::fmt::Write;

use libmgr::logic::{LibraryView, PrimaryAction};
use libmgr::state::ViewRow;

/// Short label for a row's main action.
const fn action_label(action: PrimaryAction) -> &'static str {
    match action {
        PrimaryAction::Install => "install",
        PrimaryAction::Update => "update",
        PrimaryAction::Remove => "remove",
        PrimaryAction::None => "-",
    }
}

/// What: Render one line per row.
///
/// Inputs:
/// - `rows`: Rows in display order.
///
/// Output:
/// - Text with lines `<mark> <name> <version> [<action>] <sentence>`.
///
/// Details:
/// - Mark: `*` installed and current, `^` installed with an update, `b` bundled, blank otherwise.
/// - Version: the installed release when present, else the latest.
pub fn render_rows(rows: &[ViewRow<'_>]) -> String {
    let mut out = String::new();
    for row in rows {
        let lib = row.library;
        let action = row.install.primary_action();
        let mark = match row.install.installed {
            Some(_) if action == PrimaryAction::Update => '^',
            Some(r) if r.builtin => 'b',
            Some(_) => '*',
            None => ' ',
        };
        let shown = row.install.installed.or_else(|| lib.latest());
        let version = shown.map_or("", |r| r.version.as_str());
        let sentence = lib.latest().map_or("", |r| r.sentence.as_str());
        let _ = writeln!(
            out,
            "{mark} {:<32} {version:<10} [{}] {sentence}",
            lib.name,
            action_label(action)
        );
    }
    out
}

/// What: Print the filtered view to stdout.
///
/// Inputs:
/// - `view`: Filtered and ordered view.
///
/// Output:
/// - Rows on stdout followed by a count line.
pub fn handle_list(view: &LibraryView) {
    let rows = view.rows();
    tracing::info!(rows = rows.len(), filter = ?view.filter(), "listing libraries");
    print!("{}", render_rows(&rows));
    println!("{} libraries", rows.len());
}
