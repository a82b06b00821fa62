//! Action dispatch: the dispatcher contract, a CLI-backed implementation,
//! per-library single-flight protection and plan execution.

mod cli;
mod dispatcher;
mod flight;
mod logging;
mod run;

pub use cli::{CliDispatcher, deps_args, install_args, remove_args};
pub use dispatcher::{ActionDispatcher, DependencyStatus, DispatchError, Operation, Progress};
pub use flight::SingleFlight;
pub use logging::{log_installed, log_removed};
pub use run::{
    ActionOutcome, AutoConfirm, Confirm, DependencyChoice, execute, missing_dependencies,
};
