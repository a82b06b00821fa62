//! Search-token, category and type/status filtering of libraries.

use crate::state::{CategoryFilter, FilterState, Library, TypeFilter};

use super::sort::sort_with_type_priority;

/// What: Build the searchable text of a library.
///
/// Inputs:
/// - `lib`: Library whose latest release provides the text.
///
/// Output:
/// - Lowercased `name paragraph sentence[ includes...]`; `None` without a latest release.
///
/// Details:
/// - Includes are appended only when the release lists some; absent includes
///   add nothing rather than matching anything.
fn search_text(lib: &Library) -> Option<String> {
    let latest = lib.latest()?;
    let mut text = format!("{} {} {}", latest.name, latest.paragraph, latest.sentence);
    if !latest.includes().is_empty() {
        text.push(' ');
        text.push_str(&latest.includes().join(" "));
    }
    Some(text.to_lowercase())
}

/// Whether `lib` passes the category chooser.
fn matches_category(lib: &Library, category: &CategoryFilter) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::Category(c) => lib.latest().is_some_and(|r| r.category == *c),
    }
}

/// Whether `lib` passes the type/status chooser.
fn matches_kind(lib: &Library, kind: &TypeFilter) -> bool {
    match kind {
        TypeFilter::All => true,
        TypeFilter::Installed => lib.installed().is_some(),
        TypeFilter::Updatable => lib.is_updatable(),
        TypeFilter::Type(t) => lib.latest().is_some_and(|r| r.has_type(t)),
    }
}

/// What: Check whether a single library passes every filter.
///
/// Inputs:
/// - `lib`: Candidate library.
/// - `state`: Current filter controls.
///
/// Output:
/// - `true` when category, type/status and all search tokens match.
///
/// Details:
/// - Libraries without releases never match.
#[must_use]
pub fn matches(lib: &Library, state: &FilterState) -> bool {
    if !matches_category(lib, &state.category) || !matches_kind(lib, &state.kind) {
        return false;
    }
    let Some(text) = search_text(lib) else {
        return false;
    };
    state
        .tokens
        .iter()
        .all(|tok| text.contains(&tok.to_lowercase()))
}

/// What: Select the libraries that pass `state`, keeping input order.
///
/// Inputs:
/// - `libs`: Libraries to scan (not modified).
/// - `state`: Current filter controls.
///
/// Output:
/// - Borrowed libraries that match.
pub fn filter_libraries<'a, I>(libs: I, state: &FilterState) -> Vec<&'a Library>
where
    I: IntoIterator<Item = &'a Library>,
{
    libs.into_iter().filter(|l| matches(l, state)).collect()
}

/// What: Filter `libs` then order the result for display.
///
/// Inputs:
/// - `libs`: Libraries to scan.
/// - `state`: Current filter controls.
/// - `priority_type`: Type tag listed first.
///
/// Output:
/// - Matching libraries, priority-type group first, then by name.
pub fn filter_and_sort<'a, I>(libs: I, state: &FilterState, priority_type: &str) -> Vec<&'a Library>
where
    I: IntoIterator<Item = &'a Library>,
{
    let mut out = filter_libraries(libs, state);
    sort_with_type_priority(&mut out, priority_type);
    tracing::trace!(
        tokens = state.tokens.len(),
        matched = out.len(),
        "filtered libraries"
    );
    out
}
