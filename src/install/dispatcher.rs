use std::fmt;

use crate::index::LibraryIndex;
use crate::state::Release;

/// Progress callback: receives a completion percentage in `0.0..=100.0`.
pub type Progress<'a> = &'a (dyn Fn(f32) + Sync);

/// Operation performed by the dispatcher, used in error context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Library install.
    Install,
    /// Library removal.
    Remove,
    /// Index refresh.
    RefreshIndex,
    /// Dependency lookup.
    ResolveDependencies,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Install => "install",
            Self::Remove => "remove",
            Self::RefreshIndex => "index refresh",
            Self::ResolveDependencies => "dependency resolution",
        })
    }
}

/// Failure reported by an [`ActionDispatcher`]. Never retried by the caller.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The daemon reported a failure for a library operation.
    #[error("{op} failed for library {library}: {message}")]
    Failed {
        /// Operation that failed.
        op: Operation,
        /// Library concerned.
        library: String,
        /// Daemon or OS message.
        message: String,
    },
    /// The index refresh failed.
    #[error("index refresh failed: {message}")]
    RefreshFailed {
        /// Daemon or OS message.
        message: String,
    },
    /// Another action for the same library is still running.
    #[error("an action for library {library} is already in flight")]
    Busy {
        /// Library concerned.
        library: String,
    },
}

impl DispatchError {
    /// What: Build a `Failed` error for `release`.
    ///
    /// Inputs:
    /// - `op`: Operation that failed.
    /// - `release`: Target release.
    /// - `message`: Underlying failure text.
    ///
    /// Output: Error whose message names the library.
    #[must_use]
    pub fn failed(op: Operation, release: &Release, message: impl Into<String>) -> Self {
        Self::Failed {
            op,
            library: release.name.clone(),
            message: message.into(),
        }
    }
}

/// One dependency of a release as reported by the daemon.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct DependencyStatus {
    /// Dependency library name.
    pub name: String,
    /// Version the daemon would install.
    #[serde(default, alias = "version_required")]
    pub version: String,
    /// Installed version, if any.
    #[serde(default, alias = "version_installed")]
    pub installed_version: Option<String>,
}

impl DependencyStatus {
    /// Whether some version of the dependency is installed.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.installed_version
            .as_deref()
            .is_some_and(|v| !v.is_empty())
    }

    /// Release handle used to install this dependency.
    #[must_use]
    pub fn as_release(&self) -> Release {
        Release {
            name: self.name.clone(),
            version: self.version.clone(),
            ..Release::default()
        }
    }
}

/// What: External executor of library actions (the command-line daemon).
///
/// Details:
/// - Every method reports failures with the operation and library in the message.
/// - Implementations must reject or queue a second in-flight action for the
///   same library; [`super::SingleFlight`] adds that to any dispatcher.
pub trait ActionDispatcher: Send + Sync {
    /// Install `release`.
    ///
    /// # Errors
    /// - `DispatchError` when the daemon fails.
    fn install(&self, release: &Release, progress: Progress<'_>) -> Result<(), DispatchError>;

    /// Remove `release`.
    ///
    /// # Errors
    /// - `DispatchError` when the daemon fails.
    fn remove(&self, release: &Release, progress: Progress<'_>) -> Result<(), DispatchError>;

    /// Refresh the index and return the new snapshot.
    ///
    /// # Errors
    /// - `DispatchError::RefreshFailed` when the index cannot be refreshed or read back.
    fn refresh_index(&self, progress: Progress<'_>) -> Result<LibraryIndex, DispatchError>;

    /// List the dependencies of `release` (including the library itself when
    /// the daemon reports it).
    ///
    /// # Errors
    /// - `DispatchError` when the daemon fails.
    fn resolve_dependencies(&self, release: &Release) -> Result<Vec<DependencyStatus>, DispatchError>;
}

impl<D: ActionDispatcher + ?Sized> ActionDispatcher for std::sync::Arc<D> {
    fn install(&self, release: &Release, progress: Progress<'_>) -> Result<(), DispatchError> {
        (**self).install(release, progress)
    }

    fn remove(&self, release: &Release, progress: Progress<'_>) -> Result<(), DispatchError> {
        (**self).remove(release, progress)
    }

    fn refresh_index(&self, progress: Progress<'_>) -> Result<LibraryIndex, DispatchError> {
        (**self).refresh_index(progress)
    }

    fn resolve_dependencies(&self, release: &Release) -> Result<Vec<DependencyStatus>, DispatchError> {
        (**self).resolve_dependencies(release)
    }
}
