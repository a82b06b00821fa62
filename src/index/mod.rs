//! Library index snapshot, provider contract and refreshable store.
//!
//! The snapshot ([`LibraryIndex`]) owns every `Library`/`Release`; views borrow
//! from it. The [`IndexStore`] hands out snapshots behind `Arc` and swaps them
//! atomically on refresh.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::logic::sort::compare_type_labels;
use crate::state::{Library, Release};

/// Index file loading.
mod persist;
/// Refreshable snapshot holder.
mod store;

pub use persist::{
    IndexLoadError, InstalledEntry, load_index, load_installed, load_releases, parse_index,
    parse_installed,
};
pub use store::{IndexStore, RefreshOutcome};

/// What: Read-only access to the most recently completed index refresh.
///
/// Details:
/// - Implemented by [`IndexStore`]; injected into consumers instead of a global.
/// - A plain `Arc<LibraryIndex>` is a provider of one fixed snapshot.
/// - Chooser lists default to those of the snapshot returned by `libraries`.
pub trait IndexProvider {
    /// Shared handle to the current snapshot of all known libraries.
    fn libraries(&self) -> Arc<LibraryIndex>;

    /// Distinct categories, sorted.
    fn categories(&self) -> Vec<String> {
        LibraryIndex::categories(&self.libraries())
    }

    /// Distinct type labels, in chooser order.
    fn types(&self) -> Vec<String> {
        LibraryIndex::types(&self.libraries())
    }
}

impl IndexProvider for Arc<LibraryIndex> {
    fn libraries(&self) -> Arc<LibraryIndex> {
        Arc::clone(self)
    }
}

/// What: Immutable catalog of libraries plus their installed state.
///
/// Details:
/// - `name_to_idx` maps lowercase names to positions in `libraries` for O(1) lookups.
#[derive(Clone, Debug, Default)]
pub struct LibraryIndex {
    /// Every library, indexed first, then installed-only ones.
    pub libraries: Vec<Library>,
    /// Lowercase name to position in `libraries`.
    name_to_idx: HashMap<String, usize>,
}

impl LibraryIndex {
    /// What: Assemble a snapshot from index releases and the installed listing.
    ///
    /// Inputs:
    /// - `releases`: Flat release entries as published in the index.
    /// - `installed`: Libraries currently installed on disk.
    ///
    /// Output:
    /// - Snapshot grouping releases by library name with installed markers set.
    ///
    /// Details:
    /// - Library order follows first appearance in `releases`.
    /// - Installed entries whose release is unknown (bundled copies, manual
    ///   installs, libraries absent from the index) are added as releases so
    ///   the installed release is always one of the library's releases.
    /// - Installed libraries absent from the index get `in_index = false`.
    #[must_use]
    pub fn from_parts(releases: Vec<Release>, installed: &[InstalledEntry]) -> Self {
        let mut out = Self::default();
        for r in releases {
            let key = r.name.to_lowercase();
            if let Some(&i) = out.name_to_idx.get(&key) {
                out.libraries[i].releases.push(r);
            } else {
                out.name_to_idx.insert(key, out.libraries.len());
                out.libraries.push(Library::new(r.name.clone(), vec![r]));
            }
        }
        for entry in installed {
            out.apply_installed(entry);
        }
        out
    }

    /// What: Mark one installed entry, creating the release or library when missing.
    ///
    /// Inputs:
    /// - `entry`: Installed library name, version and bundled flag.
    ///
    /// Output: none
    fn apply_installed(&mut self, entry: &InstalledEntry) {
        let key = entry.name.to_lowercase();
        let i = if let Some(&i) = self.name_to_idx.get(&key) {
            i
        } else {
            tracing::debug!(library = %entry.name, "installed library not listed in index");
            let mut lib = Library::new(entry.name.clone(), Vec::new());
            lib.in_index = false;
            self.name_to_idx.insert(key, self.libraries.len());
            self.libraries.push(lib);
            self.libraries.len() - 1
        };
        let lib = &mut self.libraries[i];
        let known = lib
            .releases
            .iter()
            .any(|r| r.version == entry.version && r.builtin == entry.builtin);
        if !known {
            // Copy descriptive fields from any indexed release so the row stays searchable
            let template = lib.latest().cloned().unwrap_or_default();
            lib.releases.push(Release {
                name: entry.name.clone(),
                version: entry.version.clone(),
                builtin: entry.builtin,
                sentence: if entry.sentence.is_empty() {
                    template.sentence
                } else {
                    entry.sentence.clone()
                },
                paragraph: template.paragraph,
                category: template.category,
                types: template.types,
                provides_includes: template.provides_includes,
                ..Release::default()
            });
        }
        lib.mark_installed(&entry.version, entry.builtin);
    }

    /// What: Look up a library by name, case-insensitively.
    ///
    /// Inputs:
    /// - `name`: Library name.
    ///
    /// Output: Borrowed library when present.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Library> {
        self.name_to_idx
            .get(&name.to_lowercase())
            .and_then(|&i| self.libraries.get(i))
    }

    /// Whether `name` is listed in the authoritative index.
    #[must_use]
    pub fn is_managed(&self, name: &str) -> bool {
        self.find(name).is_some_and(|l| l.in_index)
    }

    /// Distinct non-empty categories of every release, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .libraries
            .iter()
            .flat_map(|l| l.releases.iter())
            .map(|r| r.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// What: Distinct type labels across every release.
    ///
    /// Inputs: none
    ///
    /// Output:
    /// - Labels ordered for the type chooser (well-known first, then lexical).
    #[must_use]
    pub fn types(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .libraries
            .iter()
            .flat_map(|l| l.releases.iter())
            .flat_map(|r| r.types().iter().map(String::as_str))
            .collect();
        let mut out: Vec<String> = set.into_iter().map(str::to_string).collect();
        out.sort_by(|a, b| compare_type_labels(a, b));
        out
    }

    /// Number of libraries in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    /// Whether the snapshot holds no libraries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}
