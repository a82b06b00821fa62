//! Command-line argument definition and processing.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use libmgr::index::{IndexStore, LibraryIndex, load_index, load_installed, load_releases};
use libmgr::install::{CliDispatcher, SingleFlight};
use libmgr::logic::LibraryView;
use libmgr::state::{CategoryFilter, FilterState, TypeFilter};
use libmgr::util::Settings;

use super::{Result, action, list, refresh, show, utils};

/// libmgr - browse, filter and manage contributed libraries through the daemon CLI
#[derive(Parser, Debug)]
#[command(name = "libmgr")]
#[command(version)]
#[command(about = "Browse, filter and manage contributed libraries through the daemon CLI", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Log install/remove/update-index commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Search text; every whitespace-separated word must match
    #[arg(short, long)]
    pub search: Option<String>,

    /// Restrict listing to a category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Restrict listing by type or status (all, updatable, installed, or a type label)
    #[arg(short = 't', long = "type")]
    pub kind: Option<String>,

    /// List libraries matching the filters
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Show install state and releases of one library
    #[arg(long, value_name = "NAME")]
    pub show: Option<String>,

    /// Install a library (NAME or NAME@VERSION; latest when no version)
    #[arg(short, long, value_name = "NAME[@VERSION]")]
    pub install: Option<String>,

    /// Remove the installed release of a library
    #[arg(short = 'r', long, value_name = "NAME")]
    pub remove: Option<String>,

    /// Refresh the library index through the daemon before anything else
    #[arg(short = 'y', long)]
    pub refresh: bool,

    /// Answer yes to confirmations and install missing dependencies
    #[arg(long)]
    pub yes: bool,

    /// Type listed first (default from settings, else Arduino)
    #[arg(long)]
    pub priority_type: Option<String>,

    /// Library index file (overrides settings)
    #[arg(long, value_name = "PATH")]
    pub index: Option<PathBuf>,

    /// Installed listing file, as printed by `lib list --format json`
    #[arg(long, value_name = "PATH")]
    pub installed: Option<PathBuf>,

    /// Daemon CLI executable (overrides settings)
    #[arg(long, value_name = "PATH")]
    pub cli: Option<PathBuf>,
}

impl Args {
    /// What: Build the filter snapshot from `--search`, `--category` and `--type`.
    ///
    /// Output: Filter state; absent flags mean no restriction.
    pub fn filter_state(&self) -> FilterState {
        let mut state = self
            .search
            .as_deref()
            .map(FilterState::from_query)
            .unwrap_or_default();
        if let Some(c) = self.category.as_deref().map(str::trim)
            && !c.is_empty()
            && !c.eq_ignore_ascii_case("all")
        {
            state = state.with_category(CategoryFilter::Category(c.to_string()));
        }
        if let Some(k) = &self.kind {
            state = state.with_kind(TypeFilter::from_key(k));
        }
        state
    }

    /// Whether any listing flag was given.
    pub const fn wants_list(&self) -> bool {
        self.list || self.search.is_some() || self.category.is_some() || self.kind.is_some()
    }
}

/// What: Load the starting snapshot for the store.
///
/// Inputs:
/// - `settings`: Effective settings.
/// - `cli`: Daemon CLI, asked for the installed listing when no file is configured.
/// - `refresh_follows`: Start empty on load failure and skip the daemon (a refresh follows).
///
/// Output:
/// - Index with installed markers, or an empty one when a refresh follows.
///
/// # Errors
/// - Read/parse failure of the index or installed file, or a failing `lib list`,
///   unless a refresh follows.
async fn initial_index(
    settings: &Settings,
    cli: &CliDispatcher,
    refresh_follows: bool,
) -> Result<LibraryIndex> {
    if refresh_follows {
        return match load_index(&settings.index_path, settings.installed_path.as_deref()) {
            Ok(idx) => Ok(idx),
            Err(e) => {
                tracing::warn!(error = %e, "could not load index; starting empty before refresh");
                Ok(LibraryIndex::default())
            }
        };
    }
    let releases = load_releases(&settings.index_path)?;
    let installed = match settings.installed_path.as_deref() {
        Some(path) => load_installed(path)?,
        None => {
            let cli = cli.clone();
            tokio::task::spawn_blocking(move || cli.installed()).await??
        }
    };
    let idx = LibraryIndex::from_parts(releases, &installed);
    tracing::debug!(
        libraries = idx.len(),
        installed = installed.len(),
        from_daemon = settings.installed_path.is_none(),
        "loaded startup index"
    );
    Ok(idx)
}

/// What: Process all command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `Ok(())` when every requested step succeeded.
///
/// # Errors
/// - Index load failures, refresh failures and failed install/remove actions.
///
/// Details:
/// - Order: refresh, install/remove (each followed by a refresh unless dry run),
///   then `--show` and listing.
/// - With no action flags the whole index is listed.
pub async fn process_args(args: &Args) -> Result<()> {
    let settings = utils::effective_settings(args, Settings::load());
    tracing::debug!(?settings, "effective settings");

    let cli = CliDispatcher::new(
        settings.cli_path.clone(),
        settings.index_path.clone(),
        settings.dry_run,
    );
    let store = IndexStore::new(initial_index(&settings, &cli, args.refresh).await?);
    let dispatcher = Arc::new(SingleFlight::new(cli));

    if args.refresh {
        refresh::handle_refresh(&store, Arc::clone(&dispatcher)).await?;
    }

    let mutated = if let Some(target) = &args.install {
        action::handle_install(&store, Arc::clone(&dispatcher), target, args.yes).await?
    } else if let Some(name) = &args.remove {
        action::handle_remove(&store, Arc::clone(&dispatcher), name, args.yes).await?
    } else {
        false
    };
    if mutated && !settings.dry_run {
        refresh::handle_refresh(&store, Arc::clone(&dispatcher)).await?;
    }

    let nothing_else = args.show.is_none() && args.install.is_none() && args.remove.is_none();
    if let Some(name) = &args.show {
        let snapshot = store.snapshot();
        let lib = snapshot
            .find(name)
            .ok_or_else(|| format!("library not found: {name}"))?;
        print!("{}", show::render_library(lib));
    }
    if args.wants_list() || (nothing_else && !args.refresh) {
        let mut view = LibraryView::new(&store, settings.priority_type.clone());
        view.set_filter(args.filter_state());
        list::handle_list(&view);
    }
    Ok(())
}
