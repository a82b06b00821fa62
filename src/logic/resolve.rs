//! Install-state resolution for a single library row.
//!
//! Given a library's releases and its installed release, work out which other
//! releases are upgrades and which are downgrades, and which version choosers
//! the row should offer.

use crate::state::{Library, Release};

use super::version::{compare_versions, is_newer};

/// Main action a row offers for its library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryAction {
    /// Nothing installed; install the selected (or latest) release.
    Install,
    /// Installed with a newer release available.
    Update,
    /// Installed, up to date, and removable.
    Remove,
    /// Installed bundled copy with nothing newer: no action.
    None,
}

/// Resolved install state of one library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallState<'a> {
    /// Installed release, if any.
    pub installed: Option<&'a Release>,
    /// Candidates not newer than the installed release, newest first.
    pub older: Vec<&'a Release>,
    /// Candidates newer than the installed release (all candidates when
    /// nothing is installed), newest first.
    pub newer: Vec<&'a Release>,
    /// Show the plain "version to install" chooser.
    pub show_chooser: bool,
    /// Show the upgrade/downgrade chooser and its button.
    pub show_downgrade_action: bool,
}

impl<'a> InstallState<'a> {
    /// What: Every candidate release, newest first.
    ///
    /// Inputs: none
    ///
    /// Output: `newer` followed by `older`, which is the full descending candidate list.
    #[must_use]
    pub fn candidates(&self) -> Vec<&'a Release> {
        self.newer.iter().chain(self.older.iter()).copied().collect()
    }

    /// Entries offered by the upgrade/downgrade chooser.
    #[must_use]
    pub fn downgrade_choices(&self) -> Vec<&'a Release> {
        if self.show_downgrade_action {
            self.candidates()
        } else {
            Vec::new()
        }
    }

    /// What: Decide the row's main action.
    ///
    /// Inputs: none
    ///
    /// Output:
    /// - `Install` when nothing is installed and something can be installed.
    /// - `Update` when a newer release exists.
    /// - `Remove` for an up-to-date non-bundled install.
    /// - `None` otherwise.
    #[must_use]
    pub fn primary_action(&self) -> PrimaryAction {
        match self.installed {
            None if self.newer.is_empty() => PrimaryAction::None,
            None => PrimaryAction::Install,
            Some(_) if !self.newer.is_empty() => PrimaryAction::Update,
            Some(inst) if !inst.builtin => PrimaryAction::Remove,
            Some(_) => PrimaryAction::None,
        }
    }
}

/// What: Resolve the install state of `lib`.
///
/// Inputs:
/// - `lib`: Library with its releases and installed marker.
///
/// Output:
/// - `InstallState` with candidates partitioned around the installed release.
///
/// Details:
/// - Candidates are every release except the installed one, sorted newest first.
/// - With nothing installed, every candidate counts as newer.
/// - Otherwise a candidate is newer iff strictly greater than the installed version.
/// - The downgrade chooser appears when installed and there is at least one
///   older candidate or more than one newer candidate.
/// - The plain chooser appears when nothing is installed and there is more than one candidate.
/// - The pending selection is never consulted.
#[must_use]
pub fn resolve(lib: &Library) -> InstallState<'_> {
    let installed = lib.installed();
    let mut candidates: Vec<&Release> = lib
        .releases
        .iter()
        .filter(|r| !installed.is_some_and(|inst| std::ptr::eq(*r, inst)))
        .collect();
    // Stable sort keeps index order among equal versions
    candidates.sort_by(|a, b| compare_versions(&b.version, &a.version));

    let (newer, older): (Vec<&Release>, Vec<&Release>) = match installed {
        None => (candidates, Vec::new()),
        Some(inst) => candidates
            .into_iter()
            .partition(|r| is_newer(&r.version, &inst.version)),
    };

    let show_downgrade_action = installed.is_some() && (!older.is_empty() || newer.len() > 1);
    let show_chooser = installed.is_none() && newer.len() > 1;
    InstallState {
        installed,
        older,
        newer,
        show_chooser,
        show_downgrade_action,
    }
}
