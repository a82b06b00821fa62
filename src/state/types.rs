//! Core value types used by libmgr state.

use std::cmp::Ordering;

use crate::logic::version::compare_versions;

/// One published version of a library.
///
/// Field names follow the daemon's `library_index.json` entries so that index
/// files deserialize directly. Optional lists stay `Option` to mirror entries
/// that omit them; consumers go through [`Release::types`] and
/// [`Release::includes`] which treat absence as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Library display name (shared by every release of the same library).
    pub name: String,
    /// Version string as published (semantic-version-like).
    pub version: String,
    /// Author as listed in the index.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    /// Maintainer as listed in the index.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub maintainer: String,
    /// One-line summary.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sentence: String,
    /// Longer description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub paragraph: String,
    /// Project website.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub website: String,
    /// Topic category (e.g. "Communication", "Display").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    /// Type tags (e.g. "Arduino", "Contributed"); absent in some entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Header files the release provides; part of the search surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provides_includes: Option<Vec<String>>,
    /// Bundled with the IDE rather than fetched from the index.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub builtin: bool,
}

impl Release {
    /// What: Return the release's type tags.
    ///
    /// Inputs: none
    ///
    /// Output: Slice of tags; empty when the entry carried no `types` field.
    #[must_use]
    pub fn types(&self) -> &[String] {
        self.types.as_deref().unwrap_or_default()
    }

    /// What: Check whether the release is tagged with `ty`.
    ///
    /// Inputs:
    /// - `ty`: Exact type label to look for.
    ///
    /// Output: `true` when one of the tags equals `ty`.
    #[must_use]
    pub fn has_type(&self, ty: &str) -> bool {
        self.types().iter().any(|t| t == ty)
    }

    /// Provided include files; empty when absent.
    #[must_use]
    pub fn includes(&self) -> &[String] {
        self.provides_includes.as_deref().unwrap_or_default()
    }
}

/// A named library with all its known releases.
///
/// `installed` and `selected` index into `releases`, so an installed release is
/// always one of the library's releases.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Library {
    /// Canonical library name.
    pub name: String,
    /// Every known release, in no particular order.
    pub releases: Vec<Release>,
    /// Position of the installed release in `releases`.
    installed: Option<usize>,
    /// Position of the user's pending choice in `releases`.
    selected: Option<usize>,
    /// Whether the library is listed in the authoritative index.
    pub in_index: bool,
}

impl Library {
    /// What: Build an indexed library from its releases.
    ///
    /// Inputs:
    /// - `name`: Library name.
    /// - `releases`: Releases published in the index.
    ///
    /// Output: Library with nothing installed or selected.
    #[must_use]
    pub fn new(name: impl Into<String>, releases: Vec<Release>) -> Self {
        Self {
            name: name.into(),
            releases,
            installed: None,
            selected: None,
            in_index: true,
        }
    }

    /// What: Mark the release with `version` as installed.
    ///
    /// Inputs:
    /// - `version`: Version string of an existing release.
    /// - `builtin`: Whether the installed copy is the IDE-bundled one.
    ///
    /// Output:
    /// - `true` when a matching release exists and is now installed; `false` otherwise.
    ///
    /// Details:
    /// - Prefers the release whose `builtin` flag matches when a bundled and an
    ///   indexed release share the version; falls back to any release with that version.
    pub fn mark_installed(&mut self, version: &str, builtin: bool) -> bool {
        let pos = self
            .releases
            .iter()
            .position(|r| r.version == version && r.builtin == builtin)
            .or_else(|| self.releases.iter().position(|r| r.version == version));
        if pos.is_some() {
            self.installed = pos;
        }
        pos.is_some()
    }

    /// Clear the installed marker.
    pub const fn clear_installed(&mut self) {
        self.installed = None;
    }

    /// Currently installed release, if any.
    #[must_use]
    pub fn installed(&self) -> Option<&Release> {
        self.installed.and_then(|i| self.releases.get(i))
    }

    /// Pending user choice, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Release> {
        self.selected.and_then(|i| self.releases.get(i))
    }

    /// What: Record `version` as the user's pending choice.
    ///
    /// Inputs:
    /// - `version`: Version string of one of the releases.
    ///
    /// Output: `true` when the release exists; the selection is unchanged otherwise.
    ///
    /// Details:
    /// - Selection never installs anything and never affects install-state resolution.
    pub fn select(&mut self, version: &str) -> bool {
        match self.releases.iter().position(|r| r.version == version) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    /// What: Return the highest-version release.
    ///
    /// Inputs: none
    ///
    /// Output: `None` when the library has no releases.
    ///
    /// Details:
    /// - On equal versions the indexed (non built-in) release wins, then the first listed.
    #[must_use]
    pub fn latest(&self) -> Option<&Release> {
        self.releases.iter().reduce(|best, r| {
            match compare_versions(&r.version, &best.version) {
                Ordering::Greater => r,
                Ordering::Equal if best.builtin && !r.builtin => r,
                _ => best,
            }
        })
    }

    /// Find a release by exact version string.
    #[must_use]
    pub fn release(&self, version: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.version == version)
    }

    /// What: Check whether a strictly newer release than the installed one exists.
    ///
    /// Inputs: none
    ///
    /// Output: `false` when nothing is installed.
    #[must_use]
    pub fn is_updatable(&self) -> bool {
        match (self.installed(), self.latest()) {
            (Some(inst), Some(latest)) => {
                compare_versions(&latest.version, &inst.version) == Ordering::Greater
            }
            _ => false,
        }
    }
}
