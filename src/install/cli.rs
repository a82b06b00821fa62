use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::dispatcher::{ActionDispatcher, DependencyStatus, DispatchError, Operation, Progress};
use super::logging::{log_installed, log_removed};
use crate::index::{InstalledEntry, LibraryIndex, parse_index, parse_installed};
use crate::state::Release;

/// What: Dispatcher driving the daemon's command-line interface.
///
/// Details:
/// - Every call spawns the CLI and waits for it; run it off the async runtime
///   (e.g. `tokio::task::spawn_blocking`).
/// - In dry-run mode install/remove/update-index only log the command line.
#[derive(Clone, Debug)]
pub struct CliDispatcher {
    /// CLI executable.
    pub cli_path: PathBuf,
    /// Index file the CLI maintains (`library_index.json`).
    pub index_path: PathBuf,
    /// Log commands instead of running mutating ones.
    pub dry_run: bool,
}

/// `lib deps --format json` output.
#[derive(serde::Deserialize)]
struct DepsOutput {
    /// Dependency entries.
    #[serde(default)]
    dependencies: Vec<DependencyStatus>,
}

/// What: Build the `lib install` arguments for `release`.
///
/// Inputs:
/// - `release`: Release to install.
///
/// Output:
/// - Argument vector; dependencies are handled separately, hence `--no-deps`.
#[must_use]
pub fn install_args(release: &Release) -> Vec<String> {
    vec![
        "lib".to_string(),
        "install".to_string(),
        "--no-deps".to_string(),
        format!("{}@{}", release.name, release.version),
    ]
}

/// Arguments of `lib uninstall` for `release`.
#[must_use]
pub fn remove_args(release: &Release) -> Vec<String> {
    vec![
        "lib".to_string(),
        "uninstall".to_string(),
        release.name.clone(),
    ]
}

/// Arguments of `lib deps` for `release`.
#[must_use]
pub fn deps_args(release: &Release) -> Vec<String> {
    vec![
        "lib".to_string(),
        "deps".to_string(),
        format!("{}@{}", release.name, release.version),
        "--format".to_string(),
        "json".to_string(),
    ]
}

impl CliDispatcher {
    /// Create a dispatcher for `cli_path` reading the index at `index_path`.
    #[must_use]
    pub fn new(cli_path: impl Into<PathBuf>, index_path: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            cli_path: cli_path.into(),
            index_path: index_path.into(),
            dry_run,
        }
    }

    /// What: Run the CLI with `args` and capture stdout.
    ///
    /// Inputs:
    /// - `args`: Arguments after the executable.
    ///
    /// Output:
    /// - `Ok(stdout)` on a zero exit status; `Err(message)` otherwise.
    ///
    /// Details:
    /// - The message includes trimmed stderr so daemon errors reach the user.
    fn run(&self, args: &[String]) -> Result<String, String> {
        tracing::debug!(cli = %self.cli_path.display(), ?args, "running cli");
        let out = Command::new(&self.cli_path)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| format!("failed to run {}: {e}", self.cli_path.display()))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            return Err(format!(
                "{} {} exited with {}: {}",
                self.cli_path.display(),
                args.join(" "),
                out.status,
                stderr.trim()
            ));
        }
        String::from_utf8(out.stdout).map_err(|e| e.to_string())
    }

    /// What: Run a mutating command, or only log it in dry-run mode.
    ///
    /// Inputs:
    /// - `args`: Arguments after the executable.
    /// - `progress`: Progress callback.
    ///
    /// Output: `Ok(())` or the failure message.
    fn run_mutating(&self, args: &[String], progress: Progress<'_>) -> Result<(), String> {
        progress(0.0);
        if self.dry_run {
            tracing::info!(command = %format!("{} {}", self.cli_path.display(), args.join(" ")), "DRY RUN");
        } else {
            self.run(args)?;
        }
        progress(100.0);
        Ok(())
    }

    /// What: Ask the daemon which libraries are installed.
    ///
    /// Output:
    /// - Entries from `lib list --format json`, bundled copies flagged.
    ///
    /// # Errors
    /// - `RefreshFailed` when the CLI fails or prints something undecodable.
    ///
    /// Details:
    /// - Read-only, so it runs even in dry-run mode.
    pub fn installed(&self) -> Result<Vec<InstalledEntry>, DispatchError> {
        let fail = |message: String| DispatchError::RefreshFailed { message };
        let list = vec![
            "lib".to_string(),
            "list".to_string(),
            "--format".to_string(),
            "json".to_string(),
        ];
        let body = self.run(&list).map_err(fail)?;
        let installed = parse_installed(&body).map_err(|e| fail(e.to_string()))?;
        tracing::debug!(installed = installed.len(), "listed installed libraries");
        Ok(installed)
    }
}

impl ActionDispatcher for CliDispatcher {
    fn install(&self, release: &Release, progress: Progress<'_>) -> Result<(), DispatchError> {
        self.run_mutating(&install_args(release), progress)
            .map_err(|m| DispatchError::failed(Operation::Install, release, m))?;
        tracing::info!(library = %release.name, version = %release.version, dry_run = self.dry_run, "installed library");
        if !self.dry_run
            && let Err(e) = log_installed(&[format!("{}@{}", release.name, release.version)])
        {
            tracing::warn!(error = %e, "failed to append install log");
        }
        Ok(())
    }

    fn remove(&self, release: &Release, progress: Progress<'_>) -> Result<(), DispatchError> {
        self.run_mutating(&remove_args(release), progress)
            .map_err(|m| DispatchError::failed(Operation::Remove, release, m))?;
        tracing::info!(library = %release.name, dry_run = self.dry_run, "removed library");
        if !self.dry_run
            && let Err(e) = log_removed(std::slice::from_ref(&release.name))
        {
            tracing::warn!(error = %e, "failed to append remove log");
        }
        Ok(())
    }

    fn refresh_index(&self, progress: Progress<'_>) -> Result<LibraryIndex, DispatchError> {
        let fail = |message: String| DispatchError::RefreshFailed { message };
        let update = vec!["lib".to_string(), "update-index".to_string()];
        self.run_mutating(&update, &|p| progress(p * 0.8)).map_err(fail)?;
        let body = std::fs::read_to_string(&self.index_path)
            .map_err(|e| fail(format!("failed to read {}: {e}", self.index_path.display())))?;
        let releases = parse_index(&body).map_err(|e| fail(e.to_string()))?;
        let installed = self.installed()?;
        progress(100.0);
        Ok(LibraryIndex::from_parts(releases, &installed))
    }

    fn resolve_dependencies(&self, release: &Release) -> Result<Vec<DependencyStatus>, DispatchError> {
        let fail = |m: String| DispatchError::failed(Operation::ResolveDependencies, release, m);
        let body = self.run(&deps_args(release)).map_err(fail)?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str::<DepsOutput>(&body)
            .map(|d| d.dependencies)
            .map_err(|e| fail(e.to_string()))
    }
}
