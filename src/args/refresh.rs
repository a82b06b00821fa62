//! Command-line index refresh.

use std::sync::Arc;

use libmgr::index::{IndexStore, RefreshOutcome};
use libmgr::install::{ActionDispatcher, DispatchError};
use tokio::sync::watch;

use super::Result;

/// What: Refresh the store through `dispatcher` and report the outcome.
///
/// Inputs:
/// - `store`: Index store whose snapshot is replaced on success.
/// - `dispatcher`: Executor; its blocking refresh runs on the blocking pool.
///
/// Output:
/// - The refresh outcome.
///
/// # Errors
/// - `DispatchError::RefreshFailed` from the daemon; the previous snapshot is kept.
///
/// Details:
/// - A concurrent refresh already in flight is reported and not treated as an error.
pub async fn handle_refresh<D>(store: &IndexStore, dispatcher: Arc<D>) -> Result<RefreshOutcome>
where
    D: ActionDispatcher + 'static,
{
    tracing::info!("library index refresh requested from CLI");
    let (_cancel_tx, cancel_rx) = watch::channel(false);
    let fetch = async move {
        tokio::task::spawn_blocking(move || {
            dispatcher.refresh_index(&|p| tracing::debug!(progress = p, "refreshing index"))
        })
        .await
        .map_err(|e| DispatchError::RefreshFailed {
            message: e.to_string(),
        })?
    };
    let outcome = match store.refresh(fetch, cancel_rx).await {
        Ok(o) => o,
        Err(e) => {
            tracing::error!(error = %e, "library index refresh failed");
            return Err(e.into());
        }
    };
    match outcome {
        RefreshOutcome::Replaced => {
            println!("Library index refreshed: {} libraries", store.snapshot().len());
        }
        RefreshOutcome::Cancelled => println!("Library index refresh cancelled"),
        RefreshOutcome::AlreadyRunning => println!("A library index refresh is already running"),
    }
    Ok(outcome)
}
