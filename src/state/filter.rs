//! Filter controls snapshot.

/// Category chooser value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No category restriction.
    #[default]
    All,
    /// Only libraries whose latest release is in this category.
    Category(String),
}

/// Type/status chooser value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TypeFilter {
    /// No restriction.
    #[default]
    All,
    /// Installed libraries with a newer release available.
    Updatable,
    /// Installed libraries only.
    Installed,
    /// Libraries whose latest release carries this type tag.
    Type(String),
}

impl TypeFilter {
    /// What: Parse a type chooser value from CLI/config text.
    ///
    /// Inputs:
    /// - `s`: `all`, `updatable`, `installed` (case-insensitive) or a type label.
    ///
    /// Output:
    /// - Matching variant; any other non-empty text becomes `Type(s)` verbatim.
    #[must_use]
    pub fn from_key(s: &str) -> Self {
        let t = s.trim();
        match t.to_lowercase().as_str() {
            "" | "all" => Self::All,
            "updatable" | "upgradable" => Self::Updatable,
            "installed" => Self::Installed,
            _ => Self::Type(t.to_string()),
        }
    }
}

/// Immutable snapshot of every filter control.
///
/// Rebuilt whenever the user edits the search box or a chooser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Search tokens; every one must match.
    pub tokens: Vec<String>,
    /// Category restriction.
    pub category: CategoryFilter,
    /// Type/status restriction.
    pub kind: TypeFilter,
}

impl FilterState {
    /// What: Build a filter state from raw search text.
    ///
    /// Inputs:
    /// - `query`: Free text typed by the user.
    ///
    /// Output:
    /// - State with whitespace-separated tokens and no category/type restriction.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        Self {
            tokens: query.split_whitespace().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    /// Replace the category restriction.
    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Replace the type/status restriction.
    #[must_use]
    pub fn with_kind(mut self, kind: TypeFilter) -> Self {
        self.kind = kind;
        self
    }
}
