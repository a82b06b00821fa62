//! Command-line install and remove.

use std::io::{BufRead, Write};
use std::sync::Arc;

use libmgr::index::{IndexProvider, LibraryIndex};
use libmgr::install::{
    ActionDispatcher, ActionOutcome, Confirm, DependencyChoice, DependencyStatus, execute,
};
use libmgr::logic::{PlanError, PlannedAction, plan_install, plan_install_release, plan_remove};
use libmgr::state::Release;

use super::{Result, utils};

/// Prompts answered on the terminal, or automatically with `--yes`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalConfirm {
    /// Skip prompts: confirm removals and install all dependencies.
    pub assume_yes: bool,
}

/// What: Ask `question` and read one line from stdin.
///
/// Inputs:
/// - `question`: Prompt text.
///
/// Output:
/// - Lowercased trimmed answer; empty on read failure.
fn ask(question: &str) -> String {
    print!("{question} ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_lowercase()
}

impl Confirm for TerminalConfirm {
    fn confirm_unmanaged_removal(&mut self, library: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        println!("{library} is not in the library index; once removed it cannot be reinstalled from it.");
        matches!(ask("Remove it anyway? [y/N]").as_str(), "y" | "yes")
    }

    fn choose_dependencies(&mut self, release: &Release, missing: &[DependencyStatus]) -> DependencyChoice {
        if self.assume_yes {
            return DependencyChoice::All;
        }
        println!("{}@{} needs libraries that are not installed:", release.name, release.version);
        for dep in missing {
            println!("  - {}@{}", dep.name, dep.version);
        }
        match ask("Install [A]ll, [o]nly this library, or [c]ancel?").as_str() {
            "" | "a" | "all" => DependencyChoice::All,
            "o" | "only" | "n" | "none" => DependencyChoice::OnlyTarget,
            _ => DependencyChoice::Cancel,
        }
    }
}

/// What: Plan an install request against `snapshot`.
///
/// Inputs:
/// - `snapshot`: Current index.
/// - `target`: `Name` or `Name@Version`.
///
/// Output:
/// - Planned transition; without a version the latest release is the target.
///
/// # Errors
/// - Unknown library, unknown version, or a target that is already installed.
pub fn plan_install_target<'a>(snapshot: &'a LibraryIndex, target: &str) -> Result<PlannedAction<'a>> {
    let (name, version) = utils::parse_target(target);
    let lib = snapshot
        .find(name)
        .ok_or_else(|| format!("library not found: {name}"))?;
    let plan = match version {
        Some(v) => plan_install(lib, v)?,
        None => {
            let latest = lib.latest().ok_or_else(|| PlanError::UnknownRelease {
                library: lib.name.clone(),
                version: "latest".to_string(),
            })?;
            plan_install_release(lib, latest)?
        }
    };
    Ok(plan)
}

/// What: Plan and execute one request synchronously.
///
/// Inputs:
/// - `snapshot`: Current index.
/// - `dispatcher`: Executor.
/// - `plan`: Planner over the snapshot.
/// - `confirm`: Prompt handler.
///
/// Output:
/// - `true` when the dispatcher completed the action.
///
/// # Errors
/// - Planning or dispatch failures.
fn run_planned<'a>(
    snapshot: &'a LibraryIndex,
    dispatcher: &dyn ActionDispatcher,
    plan: impl FnOnce(&'a LibraryIndex) -> Result<PlannedAction<'a>>,
    confirm: &mut dyn Confirm,
) -> Result<bool> {
    let planned = plan(snapshot)?;
    tracing::info!(library = %planned.library_name(), action = ?planned, "dispatching action");
    let progress = |p: f32| tracing::debug!(progress = p, "action progress");
    match execute(dispatcher, &planned, &progress, confirm)? {
        ActionOutcome::Completed => {
            println!("{}: done", planned.library_name());
            Ok(true)
        }
        ActionOutcome::Cancelled => {
            println!("{}: cancelled", planned.library_name());
            Ok(false)
        }
    }
}

/// What: Install `target` (`Name` or `Name@Version`) from the current snapshot.
///
/// Inputs:
/// - `provider`: Source of the current snapshot.
/// - `dispatcher`: Executor, run on the blocking pool.
/// - `target`: Install request.
/// - `assume_yes`: Skip prompts.
///
/// Output:
/// - `true` when something was installed.
///
/// # Errors
/// - Planning failures (unknown library/version, already installed) and dispatch failures.
pub async fn handle_install<D>(
    provider: &dyn IndexProvider,
    dispatcher: Arc<D>,
    target: &str,
    assume_yes: bool,
) -> Result<bool>
where
    D: ActionDispatcher + 'static,
{
    tracing::info!(target = %target, "install requested from CLI");
    let snapshot = provider.libraries();
    let target = target.to_string();
    tokio::task::spawn_blocking(move || {
        let mut confirm = TerminalConfirm { assume_yes };
        run_planned(
            &snapshot,
            dispatcher.as_ref(),
            |s| plan_install_target(s, &target),
            &mut confirm,
        )
    })
    .await?
}

/// What: Remove the installed release of `name`.
///
/// Inputs:
/// - `provider`: Source of the current snapshot.
/// - `dispatcher`: Executor, run on the blocking pool.
/// - `name`: Library name.
/// - `assume_yes`: Confirm removal of libraries absent from the index.
///
/// Output:
/// - `true` when something was removed.
///
/// # Errors
/// - Unknown library, nothing installed, bundled copy, or dispatch failure.
pub async fn handle_remove<D>(
    provider: &dyn IndexProvider,
    dispatcher: Arc<D>,
    name: &str,
    assume_yes: bool,
) -> Result<bool>
where
    D: ActionDispatcher + 'static,
{
    tracing::info!(library = %name, "remove requested from CLI");
    let snapshot = provider.libraries();
    let name = name.to_string();
    tokio::task::spawn_blocking(move || {
        let mut confirm = TerminalConfirm { assume_yes };
        run_planned(
            &snapshot,
            dispatcher.as_ref(),
            |s| {
                let lib = s
                    .find(&name)
                    .ok_or_else(|| format!("library not found: {name}"))?;
                Ok(plan_remove(lib)?)
            },
            &mut confirm,
        )
    })
    .await?
}
