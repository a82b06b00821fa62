//! Command-line argument parsing and handling.

pub mod action;
pub mod definition;
pub mod list;
pub mod refresh;
pub mod show;
pub mod utils;

// Re-export commonly used items
pub use definition::{Args, process_args};
pub use utils::determine_log_level;

/// Boxed error used by the command-line handlers.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
