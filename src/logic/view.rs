//! Filtered, ordered list of rows over an index snapshot.
//!
//! The view is fed by an [`IndexProvider`] and keeps the `Arc` of the snapshot
//! it was given plus the positions of the visible libraries. Rows are rebuilt wholesale on every filter or snapshot change;
//! the selected row is kept by library name when it survives the rebuild.

use std::sync::Arc;

use crate::index::{IndexProvider, LibraryIndex};
use crate::state::{CategoryFilter, FilterState, Library, TypeFilter, ViewRow};

use super::filter::matches;
use super::sort::compare_with_type_priority;

/// Entries for the category and type choosers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterChoices {
    /// Distinct categories, sorted.
    pub categories: Vec<String>,
    /// Distinct type labels, in chooser order.
    pub types: Vec<String>,
}

impl FilterChoices {
    /// What: Chooser entries as reported by `provider`.
    ///
    /// Inputs:
    /// - `provider`: Index provider.
    ///
    /// Output: Category and type lists.
    #[must_use]
    pub fn from_provider(provider: &dyn IndexProvider) -> Self {
        Self {
            categories: provider.categories(),
            types: provider.types(),
        }
    }

    /// What: Every type/status chooser entry, in display order.
    ///
    /// Inputs: none
    ///
    /// Output: `All`, `Updatable`, `Installed`, then one `Type` per label.
    #[must_use]
    pub fn type_filters(&self) -> Vec<TypeFilter> {
        let mut out = vec![TypeFilter::All, TypeFilter::Updatable, TypeFilter::Installed];
        out.extend(self.types.iter().cloned().map(TypeFilter::Type));
        out
    }

    /// Every category chooser entry, `All` first.
    #[must_use]
    pub fn category_filters(&self) -> Vec<CategoryFilter> {
        let mut out = vec![CategoryFilter::All];
        out.extend(self.categories.iter().cloned().map(CategoryFilter::Category));
        out
    }
}

/// Filtered and ordered view of one snapshot.
#[derive(Clone, Debug)]
pub struct LibraryView {
    /// Snapshot the rows borrow from.
    snapshot: Arc<LibraryIndex>,
    /// Active filter controls.
    filter: FilterState,
    /// Type tag listed first.
    priority_type: String,
    /// Positions in `snapshot.libraries` of visible rows, in display order.
    order: Vec<usize>,
    /// Selected row position within `order`.
    selected: usize,
    /// Chooser entries of the current snapshot.
    choices: FilterChoices,
}

impl LibraryView {
    /// What: Build a view over the provider's current snapshot with no filters.
    ///
    /// Inputs:
    /// - `provider`: Source of the snapshot and chooser entries.
    /// - `priority_type`: Type tag listed first.
    ///
    /// Output: View with every listable library, first row selected.
    #[must_use]
    pub fn new(provider: &dyn IndexProvider, priority_type: impl Into<String>) -> Self {
        let snapshot = provider.libraries();
        let choices = FilterChoices::from_provider(provider);
        let mut view = Self {
            snapshot,
            filter: FilterState::default(),
            priority_type: priority_type.into(),
            order: Vec::new(),
            selected: 0,
            choices,
        };
        view.rebuild();
        view
    }

    /// Active filter controls.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Chooser entries for the current snapshot.
    #[must_use]
    pub const fn choices(&self) -> &FilterChoices {
        &self.choices
    }

    /// Snapshot the rows borrow from.
    #[must_use]
    pub const fn snapshot(&self) -> &Arc<LibraryIndex> {
        &self.snapshot
    }

    /// What: Apply new filter controls and rebuild rows.
    ///
    /// Inputs:
    /// - `filter`: New filter snapshot.
    ///
    /// Output: none (selection preserved by name when possible).
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.rebuild();
    }

    /// What: Swap in the provider's latest snapshot.
    ///
    /// Inputs:
    /// - `provider`: Source of the snapshot produced by the latest completed refresh.
    ///
    /// Output:
    /// - `true` when the chooser entries changed and the filters were reset.
    ///
    /// Details:
    /// - When categories and types are unchanged, the current filters stay.
    /// - Otherwise category and type choosers go back to `All`; search tokens stay.
    pub fn replace_snapshot(&mut self, provider: &dyn IndexProvider) -> bool {
        let choices = FilterChoices::from_provider(provider);
        self.snapshot = provider.libraries();
        let changed = choices != self.choices;
        if changed {
            tracing::debug!(
                categories = choices.categories.len(),
                types = choices.types.len(),
                "filter choices changed; resetting choosers"
            );
            self.choices = choices;
            self.filter.category = CategoryFilter::All;
            self.filter.kind = TypeFilter::All;
        }
        self.rebuild();
        changed
    }

    /// What: Recompute visible positions from scratch.
    ///
    /// Inputs: none
    ///
    /// Output: none
    fn rebuild(&mut self) {
        let prev_name = self.selected_library().map(|l| l.name.clone());
        let libs = &self.snapshot.libraries;
        let mut order: Vec<usize> = libs
            .iter()
            .enumerate()
            .filter(|(_, l)| matches(l, &self.filter))
            .map(|(i, _)| i)
            .collect();
        order.sort_by(|&a, &b| compare_with_type_priority(&libs[a], &libs[b], &self.priority_type));
        self.order = order;
        // Restore by name if possible
        let restored = prev_name.and_then(|name| {
            self.order
                .iter()
                .position(|&i| self.snapshot.libraries[i].name == name)
        });
        self.selected = restored.unwrap_or_else(|| self.selected.min(self.order.len().saturating_sub(1)));
    }

    /// Number of visible rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no row is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visible libraries in display order.
    pub fn libraries(&self) -> impl Iterator<Item = &Library> {
        self.order.iter().map(|&i| &self.snapshot.libraries[i])
    }

    /// What: Build the rows for display.
    ///
    /// Inputs: none
    ///
    /// Output: One `Idle` row per visible library, in display order.
    #[must_use]
    pub fn rows(&self) -> Vec<ViewRow<'_>> {
        self.libraries().map(ViewRow::new).collect()
    }

    /// Position of the selected row.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Library of the selected row.
    #[must_use]
    pub fn selected_library(&self) -> Option<&Library> {
        self.order
            .get(self.selected)
            .and_then(|&i| self.snapshot.libraries.get(i))
    }

    /// What: Move the selection by `delta` rows, clamped to the list.
    ///
    /// Inputs:
    /// - `delta`: Signed row offset.
    ///
    /// Output: none
    pub fn move_selection(&mut self, delta: isize) {
        if self.order.is_empty() {
            self.selected = 0;
            return;
        }
        let max = self.order.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(max);
    }

    /// What: Select the row showing `name`.
    ///
    /// Inputs:
    /// - `name`: Library name (case-insensitive).
    ///
    /// Output: `true` when such a row is visible.
    pub fn select_name(&mut self, name: &str) -> bool {
        let found = self
            .order
            .iter()
            .position(|&i| self.snapshot.libraries[i].name.eq_ignore_ascii_case(name));
        if let Some(pos) = found {
            self.selected = pos;
        }
        found.is_some()
    }
}
