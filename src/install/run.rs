//! Carry out a planned action through a dispatcher, asking the user where needed.

use super::dispatcher::{ActionDispatcher, DependencyStatus, DispatchError, Progress};
use crate::logic::PlannedAction;
use crate::state::Release;

/// User answer when an install has missing dependencies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DependencyChoice {
    /// Install the missing dependencies, then the target.
    All,
    /// Install only the target.
    OnlyTarget,
    /// Abort.
    Cancel,
}

/// How a dispatched action ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Every dispatcher call succeeded.
    Completed,
    /// The user declined a confirmation; nothing was dispatched.
    Cancelled,
}

/// What: Questions the presentation layer must answer during an action.
pub trait Confirm {
    /// Confirm removing a library that is not in the index and cannot be
    /// reinstalled from it.
    fn confirm_unmanaged_removal(&mut self, library: &str) -> bool;

    /// Choose what to do when `release` has dependencies that are not installed.
    fn choose_dependencies(&mut self, release: &Release, missing: &[DependencyStatus]) -> DependencyChoice;
}

/// Non-interactive answers, e.g. from a `--yes` flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutoConfirm {
    /// Accept confirmations and install all dependencies.
    pub assume_yes: bool,
}

impl Confirm for AutoConfirm {
    fn confirm_unmanaged_removal(&mut self, _library: &str) -> bool {
        self.assume_yes
    }

    fn choose_dependencies(&mut self, _release: &Release, _missing: &[DependencyStatus]) -> DependencyChoice {
        if self.assume_yes {
            DependencyChoice::All
        } else {
            DependencyChoice::OnlyTarget
        }
    }
}

/// What: Dependencies of `target` that still need installing.
///
/// Inputs:
/// - `deps`: Dependency report from the dispatcher.
/// - `target`: Release being installed.
///
/// Output:
/// - Entries not installed, excluding the target library itself.
#[must_use]
pub fn missing_dependencies(deps: &[DependencyStatus], target: &Release) -> Vec<DependencyStatus> {
    deps.iter()
        .filter(|d| !d.is_installed() && !d.name.eq_ignore_ascii_case(&target.name))
        .cloned()
        .collect()
}

/// What: Install `release`, handling missing dependencies first.
///
/// Inputs:
/// - `dispatcher`: Executor.
/// - `release`: Target release.
/// - `progress`: Progress callback.
/// - `confirm`: User prompts.
///
/// Output: `Completed` or `Cancelled`.
fn install_with_dependencies(
    dispatcher: &dyn ActionDispatcher,
    release: &Release,
    progress: Progress<'_>,
    confirm: &mut dyn Confirm,
) -> Result<ActionOutcome, DispatchError> {
    let deps = dispatcher.resolve_dependencies(release)?;
    let missing = missing_dependencies(&deps, release);
    let choice = if missing.is_empty() {
        DependencyChoice::OnlyTarget
    } else {
        confirm.choose_dependencies(release, &missing)
    };
    match choice {
        DependencyChoice::Cancel => {
            tracing::info!(library = %release.name, "install cancelled at dependency prompt");
            return Ok(ActionOutcome::Cancelled);
        }
        DependencyChoice::All => {
            for dep in &missing {
                tracing::info!(library = %release.name, dependency = %dep.name, "installing dependency");
                dispatcher.install(&dep.as_release(), progress)?;
            }
        }
        DependencyChoice::OnlyTarget => {}
    }
    dispatcher.install(release, progress)?;
    Ok(ActionOutcome::Completed)
}

/// What: Execute `plan` through `dispatcher`.
///
/// Inputs:
/// - `dispatcher`: Executor (typically wrapped in `SingleFlight`).
/// - `plan`: Planned transition.
/// - `progress`: Progress callback forwarded to every dispatcher call.
/// - `confirm`: User prompts for unmanaged removal and missing dependencies.
///
/// Output:
/// - `Completed` after all calls succeed; `Cancelled` when the user declined.
///
/// # Errors
/// - The first `DispatchError`; it is not retried and earlier successful calls are not undone.
///
/// Details:
/// - `ReplaceBuiltIn` installs the new release; the bundled copy is never removed.
/// - `RevertToBuiltIn` removes the installed copy.
pub fn execute(
    dispatcher: &dyn ActionDispatcher,
    plan: &PlannedAction<'_>,
    progress: Progress<'_>,
    confirm: &mut dyn Confirm,
) -> Result<ActionOutcome, DispatchError> {
    match plan {
        PlannedAction::Install { release } => {
            install_with_dependencies(dispatcher, release, progress, confirm)
        }
        PlannedAction::ReplaceBuiltIn { builtin, release } => {
            tracing::info!(
                library = %release.name,
                builtin = %builtin.version,
                target = %release.version,
                "replacing bundled library"
            );
            install_with_dependencies(dispatcher, release, progress, confirm)
        }
        PlannedAction::RevertToBuiltIn { installed } => {
            tracing::info!(library = %installed.name, version = %installed.version, "reverting to bundled library");
            dispatcher.remove(installed, progress)?;
            Ok(ActionOutcome::Completed)
        }
        PlannedAction::Remove {
            release,
            needs_confirmation,
        } => {
            if *needs_confirmation && !confirm.confirm_unmanaged_removal(&release.name) {
                tracing::info!(library = %release.name, "removal of unmanaged library declined");
                return Ok(ActionOutcome::Cancelled);
            }
            dispatcher.remove(release, progress)?;
            Ok(ActionOutcome::Completed)
        }
    }
}
