//! View-model state: libraries, releases, filter controls and rows.

pub mod filter;
pub mod row;
pub mod types;

pub use filter::{CategoryFilter, FilterState, TypeFilter};
pub use row::{ActionKind, RowState, RowStateError, ViewRow};
pub use types::{Library, Release};
