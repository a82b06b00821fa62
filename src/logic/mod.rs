//! Core non-UI logic: filtering, ordering, install-state resolution and action planning.

pub mod filter;
pub mod plan;
pub mod resolve;
pub mod sort;
pub mod version;
pub mod view;

// Re-export public APIs to keep short import paths (crate::logic::...)
pub use filter::{filter_and_sort, filter_libraries, matches};
pub use plan::{PlanError, PlannedAction, plan_install, plan_install_release, plan_remove};
pub use resolve::{InstallState, PrimaryAction, resolve};
pub use sort::{
    DEFAULT_PRIORITY_TYPE, compare_type_labels, compare_with_type_priority, sort_with_type_priority,
};
pub use version::{compare_versions, is_newer, parse_version};
pub use view::{FilterChoices, LibraryView};
