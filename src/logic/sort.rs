//! Type-priority ordering of libraries for listings.

use std::cmp::Ordering;

use crate::state::Library;

/// Type label sorted first by default.
pub const DEFAULT_PRIORITY_TYPE: &str = "Arduino";

/// Well-known type labels in the order a type chooser lists them.
const KNOWN_TYPES: [&str; 5] = ["Arduino", "Partner", "Recommended", "Contributed", "Retired"];

/// What: Case-insensitive name comparison with an exact-name tiebreak.
///
/// Inputs:
/// - `a`, `b`: Names to compare.
///
/// Output:
/// - Ordering by lowercase name, then by the raw name so distinct names never tie.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// What: Order two libraries with `priority_type` libraries first.
///
/// Inputs:
/// - `a`, `b`: Libraries to compare.
/// - `priority_type`: Type tag that floats a library to the top.
///
/// Output:
/// - `Ordering` suitable for `sort_by`.
///
/// Details:
/// - Looks at each library's latest release; a missing release or missing
///   type list counts as untagged.
/// - Within the priority group and within the rest, names compare
///   case-insensitively ascending.
#[must_use]
pub fn compare_with_type_priority(a: &Library, b: &Library, priority_type: &str) -> Ordering {
    let pa = a.latest().is_some_and(|r| r.has_type(priority_type));
    let pb = b.latest().is_some_and(|r| r.has_type(priority_type));
    if pa != pb {
        // true before false
        return pb.cmp(&pa);
    }
    let na = a.latest().map_or(a.name.as_str(), |r| r.name.as_str());
    let nb = b.latest().map_or(b.name.as_str(), |r| r.name.as_str());
    compare_names(na, nb)
}

/// Sort `libs` in place by [`compare_with_type_priority`].
pub fn sort_with_type_priority(libs: &mut [&Library], priority_type: &str) {
    libs.sort_by(|a, b| compare_with_type_priority(a, b, priority_type));
}

/// What: Order type labels the way a type chooser presents them.
///
/// Inputs:
/// - `a`, `b`: Type labels.
///
/// Output:
/// - Known labels (`Arduino`, `Partner`, `Recommended`, `Contributed`, `Retired`)
///   in that order, followed by unknown labels in lexical order.
#[must_use]
pub fn compare_type_labels(a: &str, b: &str) -> Ordering {
    let ia = KNOWN_TYPES.iter().position(|t| *t == a);
    let ib = KNOWN_TYPES.iter().position(|t| *t == b);
    match (ia, ib) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
