//! Translate a user's install/remove request into the transition sent to the dispatcher.

use crate::state::{Library, Release};

/// Concrete transition to hand to the action dispatcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlannedAction<'a> {
    /// Install `release` (fresh install, upgrade or downgrade in place).
    Install {
        /// Release to install.
        release: &'a Release,
    },
    /// Install `release` over an IDE-bundled copy. The bundled copy stays on
    /// disk and is shadowed by the new install.
    ReplaceBuiltIn {
        /// Bundled release currently active.
        builtin: &'a Release,
        /// Release to install.
        release: &'a Release,
    },
    /// Remove the installed copy so the bundled release becomes active again.
    RevertToBuiltIn {
        /// Installed release to remove.
        installed: &'a Release,
    },
    /// Remove `release`.
    Remove {
        /// Release to remove.
        release: &'a Release,
        /// The library is not in the index; the user must confirm since it
        /// cannot be reinstalled from here.
        needs_confirmation: bool,
    },
}

impl PlannedAction<'_> {
    /// What: Name of the library the action concerns.
    ///
    /// Inputs: none
    ///
    /// Output: Library name of the target release.
    #[must_use]
    pub fn library_name(&self) -> &str {
        match self {
            Self::Install { release }
            | Self::ReplaceBuiltIn { release, .. }
            | Self::Remove { release, .. } => &release.name,
            Self::RevertToBuiltIn { installed } => &installed.name,
        }
    }
}

/// Request that cannot be planned.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlanError {
    /// The requested version is not a release of the library.
    #[error("library {library} has no release {version}")]
    UnknownRelease {
        /// Library name.
        library: String,
        /// Requested version.
        version: String,
    },
    /// The requested release is already installed.
    #[error("library {library} {version} is already installed")]
    AlreadyInstalled {
        /// Library name.
        library: String,
        /// Installed version.
        version: String,
    },
    /// Nothing is installed, so there is nothing to remove.
    #[error("library {library} is not installed")]
    NotInstalled {
        /// Library name.
        library: String,
    },
    /// Bundled releases can only be superseded, not removed.
    #[error("library {library} is bundled with the IDE and cannot be removed")]
    BuiltInNotRemovable {
        /// Library name.
        library: String,
    },
}

/// What: Plan installing `version` of `lib`.
///
/// Inputs:
/// - `lib`: Library from the current snapshot.
/// - `version`: Target release version.
///
/// Output:
/// - `RevertToBuiltIn` when the target is bundled and another copy is installed.
/// - `ReplaceBuiltIn` when a non-bundled target replaces an installed bundled copy.
/// - `Install` otherwise.
///
/// # Errors
/// - `UnknownRelease` for versions the library does not have.
/// - `AlreadyInstalled` when the target is the installed release.
///
/// Details:
/// - A non-bundled target prefers the indexed release when a bundled release
///   shares its version.
pub fn plan_install<'a>(lib: &'a Library, version: &str) -> Result<PlannedAction<'a>, PlanError> {
    let target = lib
        .releases
        .iter()
        .filter(|r| r.version == version)
        .min_by_key(|r| r.builtin)
        .ok_or_else(|| PlanError::UnknownRelease {
            library: lib.name.clone(),
            version: version.to_string(),
        })?;
    plan_install_release(lib, target)
}

/// What: Plan installing an already-resolved release of `lib`.
///
/// Inputs:
/// - `lib`: Library owning `target`.
/// - `target`: Release picked from the row's candidates.
///
/// Output: Same rules as [`plan_install`].
///
/// # Errors
/// - `AlreadyInstalled` when `target` is the installed release.
pub fn plan_install_release<'a>(
    lib: &'a Library,
    target: &'a Release,
) -> Result<PlannedAction<'a>, PlanError> {
    let Some(installed) = lib.installed() else {
        return Ok(PlannedAction::Install { release: target });
    };
    if std::ptr::eq(installed, target) {
        return Err(PlanError::AlreadyInstalled {
            library: lib.name.clone(),
            version: target.version.clone(),
        });
    }
    let action = if target.builtin {
        PlannedAction::RevertToBuiltIn { installed }
    } else if installed.builtin {
        PlannedAction::ReplaceBuiltIn {
            builtin: installed,
            release: target,
        }
    } else {
        PlannedAction::Install { release: target }
    };
    tracing::debug!(
        library = %lib.name,
        from = %installed.version,
        to = %target.version,
        ?action,
        "planned install"
    );
    Ok(action)
}

/// What: Plan removing the installed release of `lib`.
///
/// Inputs:
/// - `lib`: Library from the current snapshot.
///
/// Output:
/// - `Remove` with `needs_confirmation` set for libraries absent from the index.
///
/// # Errors
/// - `NotInstalled` when nothing is installed; `BuiltInNotRemovable` for bundled copies.
pub fn plan_remove(lib: &Library) -> Result<PlannedAction<'_>, PlanError> {
    let installed = lib.installed().ok_or_else(|| PlanError::NotInstalled {
        library: lib.name.clone(),
    })?;
    if installed.builtin {
        return Err(PlanError::BuiltInNotRemovable {
            library: lib.name.clone(),
        });
    }
    Ok(PlannedAction::Remove {
        release: installed,
        needs_confirmation: !lib.in_index,
    })
}
