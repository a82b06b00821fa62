//! Integration tests for filtering and type-priority ordering.

use std::cmp::Ordering;
use std::sync::Arc;

use libmgr as crate_root;

use crate_root::logic::{LibraryView, compare_with_type_priority, filter_and_sort, filter_libraries};
use crate_root::state::{CategoryFilter, FilterState, TypeFilter};

use super::common::fixture_index;

fn names(libs: &[&crate_root::state::Library]) -> Vec<String> {
    libs.iter().map(|l| l.name.clone()).collect()
}

#[test]
/// What: Empty tokens keep every library with a latest release
///
/// Inputs:
/// - Fixture snapshot, default filter.
///
/// Output:
/// - All six libraries, including the unmanaged one.
fn empty_filter_returns_all_listable() {
    let idx = fixture_index();
    let out = filter_libraries(&idx.libraries, &FilterState::default());
    assert_eq!(out.len(), 6);
    assert!(out.iter().any(|l| l.name == "MyLocalLib"));
}

#[test]
/// What: Every token must match name, paragraph, sentence or includes, case-insensitively
///
/// Inputs:
/// - Queries `servo MOTORS`, `adafruit_gfx.h`, `sketchbook`, `servo display`.
///
/// Output:
/// - Servo; Adafruit GFX Library; MyLocalLib; nothing.
fn tokens_match_case_insensitively() {
    let idx = fixture_index();
    let run = |q: &str| names(&filter_libraries(&idx.libraries, &FilterState::from_query(q)));
    assert_eq!(run("servo MOTORS"), vec!["Servo"]);
    assert_eq!(run("adafruit_gfx.h"), vec!["Adafruit GFX Library"]);
    assert_eq!(run("sketchbook"), vec!["MyLocalLib"]);
    assert!(run("servo display").is_empty());
}

#[test]
/// What: Category and type/status choosers restrict results
///
/// Inputs:
/// - `Display` category; `Installed`, `Updatable`, `Type(Arduino)` kinds.
///
/// Output:
/// - Matching subsets; untagged Bounce2 never matches a type.
fn category_and_kind_predicates() {
    let idx = fixture_index();
    let by = |state: FilterState| {
        let mut n = names(&filter_libraries(&idx.libraries, &state));
        n.sort();
        n
    };
    assert_eq!(
        by(FilterState::default().with_category(CategoryFilter::Category("Display".into()))),
        vec!["Adafruit GFX Library"]
    );
    assert_eq!(
        by(FilterState::default().with_kind(TypeFilter::Installed)),
        vec!["MyLocalLib", "Servo", "Wire"]
    );
    assert_eq!(
        by(FilterState::default().with_kind(TypeFilter::Updatable)),
        vec!["Servo"]
    );
    assert_eq!(
        by(FilterState::default().with_kind(TypeFilter::Type("Arduino".into()))),
        vec!["Servo", "Wire"]
    );
}

#[test]
/// What: Priority-type libraries come first, then case-insensitive names
///
/// Inputs:
/// - Fixture with priority `Arduino`, then `Contributed`.
///
/// Output:
/// - Arduino group first; mixed-case names interleave alphabetically.
fn priority_type_then_name_order() {
    let idx = fixture_index();
    let out = filter_and_sort(&idx.libraries, &FilterState::default(), "Arduino");
    assert_eq!(
        names(&out),
        vec![
            "Servo",
            "Wire",
            "Adafruit GFX Library",
            "arduinoJson",
            "Bounce2",
            "MyLocalLib"
        ]
    );
    let out = filter_and_sort(&idx.libraries, &FilterState::default(), "Contributed");
    assert_eq!(out[0].name, "arduinoJson");
}

#[test]
/// What: The ordering is total, antisymmetric and transitive
///
/// Inputs:
/// - Every pair and triple of fixture libraries (one has no type list).
///
/// Output:
/// - Swapping arguments inverts the sign; `a <= b <= c` implies `a <= c`.
fn ordering_is_total() {
    let idx = fixture_index();
    let libs = &idx.libraries;
    let cmp = |a, b| compare_with_type_priority(a, b, "Arduino");
    for a in libs {
        for b in libs {
            assert_eq!(cmp(a, b), cmp(b, a).reverse());
            for c in libs {
                if cmp(a, b) != Ordering::Greater && cmp(b, c) != Ordering::Greater {
                    assert_ne!(cmp(a, c), Ordering::Greater);
                }
            }
        }
    }
}

#[test]
/// What: A view keeps the selected library across filter changes
///
/// Inputs:
/// - Select `Wire`, then filter to Arduino-typed libraries.
///
/// Output:
/// - Wire still selected at its new position.
fn view_preserves_selection_by_name() {
    let mut view = LibraryView::new(&Arc::new(fixture_index()), "Arduino");
    assert!(view.select_name("wire"));
    view.set_filter(FilterState::default().with_kind(TypeFilter::Type("Arduino".into())));
    assert_eq!(view.len(), 2);
    assert_eq!(view.selected_library().map(|l| l.name.as_str()), Some("Wire"));
    assert_eq!(view.selected(), 1);
}
