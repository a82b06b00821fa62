//! Integration tests for install-state resolution and row selection.

use libmgr as crate_root;

use crate_root::index::{InstalledEntry, LibraryIndex};
use crate_root::logic::{PrimaryAction, resolve};
use crate_root::state::{ActionKind, Library, Release, RowState, RowStateError, ViewRow};

use super::common::fixture_index;

fn versions(rs: &[&Release]) -> Vec<String> {
    rs.iter().map(|r| r.version.clone()).collect()
}

fn library(name: &str, vs: &[&str], installed: Option<&str>) -> LibraryIndex {
    let releases = vs
        .iter()
        .map(|v| Release {
            name: name.into(),
            version: (*v).into(),
            ..Default::default()
        })
        .collect();
    let inst: Vec<InstalledEntry> = installed
        .map(|v| InstalledEntry::new(name, v, false))
        .into_iter()
        .collect();
    LibraryIndex::from_parts(releases, &inst)
}

fn only(idx: &LibraryIndex) -> &Library {
    &idx.libraries[0]
}

#[test]
/// What: Installed 1.2.0 splits candidates into descending older and newer lists
///
/// Inputs:
/// - Releases 0.9.0, 1.0.0, 1.2.0, 1.3.0, 2.0.0 in shuffled order; 1.2.0 installed.
///
/// Output:
/// - older `[1.0.0, 0.9.0]`, newer `[2.0.0, 1.3.0]`, downgrade chooser shown.
fn installed_partitions_candidates() {
    let idx = library(
        "Servo",
        &["1.3.0", "0.9.0", "1.2.0", "2.0.0", "1.0.0"],
        Some("1.2.0"),
    );
    let st = resolve(only(&idx));
    assert_eq!(st.installed.map(|r| r.version.as_str()), Some("1.2.0"));
    assert_eq!(versions(&st.older), vec!["1.0.0", "0.9.0"]);
    assert_eq!(versions(&st.newer), vec!["2.0.0", "1.3.0"]);
    assert!(st.show_downgrade_action);
    assert!(!st.show_chooser);
    assert_eq!(st.primary_action(), PrimaryAction::Update);
    assert_eq!(
        versions(&st.downgrade_choices()),
        vec!["2.0.0", "1.3.0", "1.0.0", "0.9.0"]
    );
}

#[test]
/// What: Chooser visibility without an installed release
///
/// Inputs:
/// - Two candidates; one candidate.
///
/// Output:
/// - Plain chooser only with two; neither chooser with one.
fn chooser_visibility_when_not_installed() {
    let two = library("Wire", &["1.0.0", "1.1.0"], None);
    let st = resolve(only(&two));
    assert!(st.show_chooser);
    assert!(!st.show_downgrade_action);
    assert_eq!(versions(&st.newer), vec!["1.1.0", "1.0.0"]);
    assert_eq!(st.primary_action(), PrimaryAction::Install);

    let one = library("Wire", &["1.0.0"], None);
    let st = resolve(only(&one));
    assert!(!st.show_chooser);
    assert!(!st.show_downgrade_action);
}

#[test]
/// What: Selecting a candidate never perturbs the partition
///
/// Inputs:
/// - Installed 1.2.0; select 0.9.0 on the library and on a row.
///
/// Output:
/// - Identical older/newer lists before and after.
fn selection_does_not_change_resolution() {
    let idx = library("Servo", &["0.9.0", "1.2.0", "2.0.0"], Some("1.2.0"));
    let before = resolve(only(&idx));
    let mut lib = only(&idx).clone();
    assert!(lib.select("0.9.0"));
    let after = resolve(&lib);
    assert_eq!(versions(&before.older), versions(&after.older));
    assert_eq!(versions(&before.newer), versions(&after.newer));

    let mut row = ViewRow::new(&lib);
    row.select("0.9.0").expect("candidate");
    assert_eq!(versions(&row.install.older), versions(&before.older));
    assert_eq!(
        row.state,
        RowState::ReleaseSelected {
            version: "0.9.0".into()
        }
    );
}

#[test]
/// What: Row state machine moves Idle -> ReleaseSelected -> ActionDispatched -> Idle
///
/// Inputs:
/// - Installed Servo from the fixture; select 1.2.1, dispatch, try again, finish.
///
/// Output:
/// - Dispatch targets 1.2.1; a second dispatch or selection is `InFlight`;
///   the installed release is not selectable.
fn row_state_machine() {
    let idx = fixture_index();
    let servo = idx.find("servo").expect("servo in fixture");
    let mut row = ViewRow::new(servo);
    assert!(matches!(
        row.select("1.1.8"),
        Err(RowStateError::UnknownRelease { .. })
    ));
    row.select("1.2.1").expect("newer candidate");
    let target = row.dispatch(ActionKind::Install).expect("dispatch");
    assert_eq!(target.version, "1.2.1");
    assert!(matches!(
        row.dispatch(ActionKind::Remove),
        Err(RowStateError::InFlight { .. })
    ));
    assert!(matches!(
        row.select("1.0.0"),
        Err(RowStateError::InFlight { .. })
    ));
    row.finish();
    assert_eq!(row.state, RowState::Idle);
    assert_eq!(
        row.target(ActionKind::Remove).map(|r| r.version.as_str()),
        Some("1.1.8")
    );
}

#[test]
/// What: A bundled install offers no removal and upgrades through the downgrade chooser
///
/// Inputs:
/// - Fixture Wire: bundled 1.0 installed, index release 1.0.
///
/// Output:
/// - Indexed 1.0 is an older candidate; primary action `None`; remove target is the bundled copy.
fn bundled_install_state() {
    let idx = fixture_index();
    let wire = idx.find("Wire").expect("wire in fixture");
    let st = resolve(wire);
    assert!(st.installed.is_some_and(|r| r.builtin));
    assert_eq!(versions(&st.older), vec!["1.0"]);
    assert!(st.newer.is_empty());
    assert!(st.show_downgrade_action);
    assert_eq!(st.primary_action(), PrimaryAction::None);
}
