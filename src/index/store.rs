use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::watch;

use super::{IndexProvider, LibraryIndex};

/// Result of an [`IndexStore::refresh`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched snapshot replaced the previous one.
    Replaced,
    /// The refresh was cancelled; the previous snapshot is untouched.
    Cancelled,
    /// Another refresh was in flight; nothing was done.
    AlreadyRunning,
}

/// What: Holder of the current index snapshot.
///
/// Details:
/// - Readers clone the `Arc` and work lock-free on an immutable snapshot.
/// - At most one refresh runs at a time; a refresh swaps the snapshot in a
///   single write only after the fetch fully succeeds.
#[derive(Debug, Default)]
pub struct IndexStore {
    /// Current snapshot.
    current: RwLock<Arc<LibraryIndex>>,
    /// Set while a refresh is in flight.
    refreshing: AtomicBool,
}

/// Clears the in-flight flag when a refresh ends, however it ends.
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// What: Resolve once the cancel flag turns `true`.
///
/// Inputs:
/// - `rx`: Cancellation receiver.
///
/// Output: none
///
/// Details:
/// - A dropped sender without cancellation never resolves, so the fetch wins.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|c| *c).await.is_err() {
        std::future::pending::<()>().await;
    }
}

impl IndexStore {
    /// Create a store holding `initial`.
    #[must_use]
    pub fn new(initial: LibraryIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
            refreshing: AtomicBool::new(false),
        }
    }

    /// What: Return the current snapshot.
    ///
    /// Inputs: none
    ///
    /// Output: Shared handle; stays valid and unchanged across later refreshes.
    #[must_use]
    pub fn snapshot(&self) -> Arc<LibraryIndex> {
        match self.current.read() {
            Ok(g) => Arc::clone(&g),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replace the snapshot wholesale.
    pub fn replace(&self, index: LibraryIndex) {
        let next = Arc::new(index);
        match self.current.write() {
            Ok(mut g) => *g = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Whether a refresh is currently in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    /// What: Run `fetch` and install its result as the new snapshot.
    ///
    /// Inputs:
    /// - `fetch`: Future producing the next snapshot.
    /// - `cancel`: Watch channel; sending `true` abandons the refresh.
    ///
    /// Output:
    /// - `Ok(Replaced)` after a successful swap.
    /// - `Ok(Cancelled)` when cancelled first; `Ok(AlreadyRunning)` when another refresh holds the slot.
    ///
    /// # Errors
    /// - Returns the fetch error unchanged; the previous snapshot stays in place.
    pub async fn refresh<F, E>(
        &self,
        fetch: F,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<RefreshOutcome, E>
    where
        F: Future<Output = Result<LibraryIndex, E>>,
    {
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("index refresh already running");
            return Ok(RefreshOutcome::AlreadyRunning);
        }
        let _guard = RefreshGuard(&self.refreshing);
        tokio::select! {
            res = fetch => {
                let next = res?;
                tracing::info!(libraries = next.len(), "index refreshed");
                self.replace(next);
                Ok(RefreshOutcome::Replaced)
            }
            () = cancelled(&mut cancel) => {
                tracing::info!("index refresh cancelled");
                Ok(RefreshOutcome::Cancelled)
            }
        }
    }
}

impl IndexProvider for IndexStore {
    fn libraries(&self) -> Arc<LibraryIndex> {
        self.snapshot()
    }
}
