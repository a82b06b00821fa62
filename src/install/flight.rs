use std::collections::HashSet;
use std::sync::Mutex;

use super::dispatcher::{ActionDispatcher, DependencyStatus, DispatchError, Progress};
use crate::index::LibraryIndex;
use crate::state::Release;

/// Key reserved for the index refresh slot (not a valid library name).
const REFRESH_KEY: &str = "\u{0}index";

/// What: Wrap a dispatcher so at most one action per library runs at a time.
///
/// Details:
/// - A second install/remove for a library whose action is still running
///   fails fast with `DispatchError::Busy`; nothing is queued.
/// - Index refreshes share a single slot of their own.
#[derive(Debug)]
pub struct SingleFlight<D> {
    /// Wrapped dispatcher.
    inner: D,
    /// Lowercase library names with an action in flight.
    in_flight: Mutex<HashSet<String>>,
}

/// Frees a slot when the guarded action ends.
struct FlightGuard<'a> {
    /// Slot set.
    set: &'a Mutex<HashSet<String>>,
    /// Key held by this guard.
    key: String,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut g = match self.set.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        g.remove(&self.key);
    }
}

impl<D> SingleFlight<D> {
    /// Wrap `inner`.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Wrapped dispatcher.
    pub const fn inner(&self) -> &D {
        &self.inner
    }

    /// What: Claim the slot for `name`.
    ///
    /// Inputs:
    /// - `name`: Library name (or the refresh key).
    ///
    /// Output:
    /// - Guard releasing the slot on drop, or `Busy` when already claimed.
    fn acquire(&self, name: &str) -> Result<FlightGuard<'_>, DispatchError> {
        let key = name.to_lowercase();
        let mut g = match self.in_flight.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !g.insert(key.clone()) {
            tracing::warn!(library = %name, "rejected concurrent action");
            return Err(DispatchError::Busy {
                library: name.to_string(),
            });
        }
        Ok(FlightGuard {
            set: &self.in_flight,
            key,
        })
    }

    /// Whether an action for `name` is running.
    pub fn is_busy(&self, name: &str) -> bool {
        let g = match self.in_flight.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        g.contains(&name.to_lowercase())
    }
}

impl<D: ActionDispatcher> ActionDispatcher for SingleFlight<D> {
    fn install(&self, release: &Release, progress: Progress<'_>) -> Result<(), DispatchError> {
        let _guard = self.acquire(&release.name)?;
        self.inner.install(release, progress)
    }

    fn remove(&self, release: &Release, progress: Progress<'_>) -> Result<(), DispatchError> {
        let _guard = self.acquire(&release.name)?;
        self.inner.remove(release, progress)
    }

    fn refresh_index(&self, progress: Progress<'_>) -> Result<LibraryIndex, DispatchError> {
        let _guard = self.acquire(REFRESH_KEY).map_err(|_| DispatchError::RefreshFailed {
            message: "an index refresh is already running".to_string(),
        })?;
        self.inner.refresh_index(progress)
    }

    fn resolve_dependencies(&self, release: &Release) -> Result<Vec<DependencyStatus>, DispatchError> {
        self.inner.resolve_dependencies(release)
    }
}
