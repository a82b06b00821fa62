//! Per-row view model and its edit state machine.

use crate::logic::resolve::{InstallState, resolve};
use crate::state::{Library, Release};

/// Kind of action a row can dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Install (or upgrade/downgrade to) a release.
    Install,
    /// Remove the installed release.
    Remove,
}

/// Edit state of one row.
///
/// `Idle -> ReleaseSelected -> ActionDispatched -> Idle`; dispatching straight
/// from `Idle` uses the row's default target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RowState {
    /// Nothing pending.
    #[default]
    Idle,
    /// The user picked a release but has not confirmed an action.
    ReleaseSelected {
        /// Chosen version.
        version: String,
    },
    /// An action was handed to the dispatcher and has not finished.
    ActionDispatched {
        /// What was dispatched.
        kind: ActionKind,
        /// Target version.
        version: String,
    },
}

/// Rejected row transition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RowStateError {
    /// The version is not one of the row's candidates.
    #[error("release {version} is not offered for library {library}")]
    UnknownRelease {
        /// Library name.
        library: String,
        /// Requested version.
        version: String,
    },
    /// Nothing suitable to act on (e.g. remove with nothing installed).
    #[error("no release to {kind:?} for library {library}")]
    NoTarget {
        /// Library name.
        library: String,
        /// Requested action.
        kind: ActionKind,
    },
    /// An action is already running for this row.
    #[error("an action for library {library} is already in flight")]
    InFlight {
        /// Library name.
        library: String,
    },
}

/// One displayed row: a borrowed library, its resolved install state and edit state.
#[derive(Clone, Debug)]
pub struct ViewRow<'a> {
    /// Library shown in this row.
    pub library: &'a Library,
    /// Resolved install state.
    pub install: InstallState<'a>,
    /// Current edit state.
    pub state: RowState,
}

impl<'a> ViewRow<'a> {
    /// What: Build a row for `library` in the `Idle` state.
    ///
    /// Inputs:
    /// - `library`: Borrowed library from the current snapshot.
    ///
    /// Output: Row with install state resolved.
    #[must_use]
    pub fn new(library: &'a Library) -> Self {
        Self {
            library,
            install: resolve(library),
            state: RowState::Idle,
        }
    }

    /// What: Record a pending version choice.
    ///
    /// Inputs:
    /// - `version`: One of the row's candidate versions.
    ///
    /// Output:
    /// - `Ok(())` and state `ReleaseSelected`.
    ///
    /// # Errors
    /// - `InFlight` while an action runs; `UnknownRelease` for non-candidates.
    pub fn select(&mut self, version: &str) -> Result<(), RowStateError> {
        if matches!(self.state, RowState::ActionDispatched { .. }) {
            return Err(RowStateError::InFlight {
                library: self.library.name.clone(),
            });
        }
        if !self
            .install
            .candidates()
            .iter()
            .any(|r| r.version == version)
        {
            return Err(RowStateError::UnknownRelease {
                library: self.library.name.clone(),
                version: version.to_string(),
            });
        }
        self.state = RowState::ReleaseSelected {
            version: version.to_string(),
        };
        Ok(())
    }

    /// What: Release an action of `kind` would target.
    ///
    /// Inputs:
    /// - `kind`: Install or remove.
    ///
    /// Output:
    /// - Selected release (install), newest candidate (install from idle), or installed release (remove).
    #[must_use]
    pub fn target(&self, kind: ActionKind) -> Option<&'a Release> {
        match kind {
            ActionKind::Remove => self.install.installed,
            ActionKind::Install => match &self.state {
                RowState::ReleaseSelected { version } => self
                    .install
                    .candidates()
                    .into_iter()
                    .find(|r| r.version == *version),
                _ => self.install.newer.first().copied(),
            },
        }
    }

    /// What: Move the row to `ActionDispatched` and return the target release.
    ///
    /// Inputs:
    /// - `kind`: Install or remove.
    ///
    /// Output:
    /// - Target release to hand to the planner/dispatcher.
    ///
    /// # Errors
    /// - `InFlight` when an action already runs; `NoTarget` when nothing applies.
    pub fn dispatch(&mut self, kind: ActionKind) -> Result<&'a Release, RowStateError> {
        if matches!(self.state, RowState::ActionDispatched { .. }) {
            return Err(RowStateError::InFlight {
                library: self.library.name.clone(),
            });
        }
        let target = self.target(kind).ok_or_else(|| RowStateError::NoTarget {
            library: self.library.name.clone(),
            kind,
        })?;
        self.state = RowState::ActionDispatched {
            kind,
            version: target.version.clone(),
        };
        Ok(target)
    }

    /// Return to `Idle` after completion or cancellation.
    pub fn finish(&mut self) {
        self.state = RowState::Idle;
    }
}
