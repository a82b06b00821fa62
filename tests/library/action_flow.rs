//! Integration tests for planning and dispatching install/remove actions.

use std::sync::Mutex;

use libmgr as crate_root;

use crate_root::index::{InstalledEntry, LibraryIndex};
use crate_root::install::{
    ActionDispatcher, ActionOutcome, AutoConfirm, DependencyStatus, DispatchError, Progress,
    SingleFlight, execute,
};
use crate_root::logic::{PlanError, PlannedAction, plan_install, plan_remove};
use crate_root::state::{ActionKind, Release, ViewRow};

use super::common::fixture_index;

/// Dispatcher recording every call as `op name@version`.
#[derive(Default)]
struct Recorder {
    /// Calls in order.
    calls: Mutex<Vec<String>>,
    /// Dependency report returned for every release.
    deps: Vec<DependencyStatus>,
}

impl Recorder {
    fn record(&self, op: &str, r: &Release) {
        if let Ok(mut c) = self.calls.lock() {
            c.push(format!("{op} {}@{}", r.name, r.version));
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ActionDispatcher for Recorder {
    fn install(&self, release: &Release, progress: Progress<'_>) -> Result<(), DispatchError> {
        progress(100.0);
        self.record("install", release);
        Ok(())
    }

    fn remove(&self, release: &Release, progress: Progress<'_>) -> Result<(), DispatchError> {
        progress(100.0);
        self.record("remove", release);
        Ok(())
    }

    fn refresh_index(&self, _: Progress<'_>) -> Result<LibraryIndex, DispatchError> {
        Ok(fixture_index())
    }

    fn resolve_dependencies(&self, _: &Release) -> Result<Vec<DependencyStatus>, DispatchError> {
        Ok(self.deps.clone())
    }
}

#[test]
/// What: Upgrading from a row dispatches one install of the chosen release
///
/// Inputs:
/// - Fixture Servo (1.1.8 installed); row dispatch with default target.
///
/// Output:
/// - Plan `Install(1.2.1)`; dispatcher sees `install Servo@1.2.1`.
fn row_upgrade_dispatches_install() {
    let idx = fixture_index();
    let servo = idx.find("Servo").expect("servo");
    let mut row = ViewRow::new(servo);
    let target = row.dispatch(ActionKind::Install).expect("target");
    let plan = plan_install(servo, &target.version).expect("plan");
    assert!(matches!(plan, PlannedAction::Install { release } if release.version == "1.2.1"));

    let d = SingleFlight::new(Recorder::default());
    let out = execute(&d, &plan, &|_| {}, &mut AutoConfirm::default());
    assert_eq!(out, Ok(ActionOutcome::Completed));
    row.finish();
    assert_eq!(d.inner().calls(), vec!["install Servo@1.2.1"]);
}

#[test]
/// What: Installing over a bundled copy replaces it without removing it
///
/// Inputs:
/// - Fixture Wire (bundled 1.0 installed); request indexed 1.0.
///
/// Output:
/// - `ReplaceBuiltIn`; only an install call is made.
fn install_over_bundled_copy() {
    let idx = fixture_index();
    let wire = idx.find("Wire").expect("wire");
    let plan = plan_install(wire, "1.0").expect("plan");
    match &plan {
        PlannedAction::ReplaceBuiltIn { builtin, release } => {
            assert!(builtin.builtin);
            assert!(!release.builtin);
        }
        other => panic!("unexpected plan: {other:?}"),
    }
    let d = Recorder::default();
    assert_eq!(
        execute(&d, &plan, &|_| {}, &mut AutoConfirm::default()),
        Ok(ActionOutcome::Completed)
    );
    assert_eq!(d.calls(), vec!["install Wire@1.0"]);
    assert_eq!(
        plan_remove(wire),
        Err(PlanError::BuiltInNotRemovable {
            library: "Wire".into()
        })
    );
}

#[test]
/// What: Choosing the bundled release removes the installed copy
///
/// Inputs:
/// - Servo with bundled 1.0.0 and user-installed 1.2.1; request 1.0.0.
///
/// Output:
/// - `RevertToBuiltIn`; dispatcher removes Servo@1.2.1.
fn revert_to_bundled_release() {
    let rel = |v: &str| Release {
        name: "Servo".into(),
        version: v.into(),
        ..Default::default()
    };
    let idx = LibraryIndex::from_parts(
        vec![rel("1.1.8"), rel("1.2.1")],
        &[
            InstalledEntry::new("Servo", "1.0.0", true),
            InstalledEntry::new("Servo", "1.2.1", false),
        ],
    );
    let servo = idx.find("Servo").expect("servo");
    let plan = plan_install(servo, "1.0.0").expect("plan");
    assert!(matches!(plan, PlannedAction::RevertToBuiltIn { installed } if installed.version == "1.2.1"));
    let d = Recorder::default();
    assert_eq!(
        execute(&d, &plan, &|_| {}, &mut AutoConfirm::default()),
        Ok(ActionOutcome::Completed)
    );
    assert_eq!(d.calls(), vec!["remove Servo@1.2.1"]);
}

#[test]
/// What: Removing a library missing from the index needs confirmation
///
/// Inputs:
/// - Fixture MyLocalLib; declined then accepted.
///
/// Output:
/// - Declined: cancelled, no call. Accepted: one remove call.
fn unmanaged_removal_requires_confirmation() {
    let idx = fixture_index();
    let local = idx.find("MyLocalLib").expect("local lib");
    assert!(!idx.is_managed("MyLocalLib"));
    let plan = plan_remove(local).expect("plan");
    assert!(matches!(
        plan,
        PlannedAction::Remove {
            needs_confirmation: true,
            ..
        }
    ));
    let d = Recorder::default();
    assert_eq!(
        execute(&d, &plan, &|_| {}, &mut AutoConfirm { assume_yes: false }),
        Ok(ActionOutcome::Cancelled)
    );
    assert!(d.calls().is_empty());
    assert_eq!(
        execute(&d, &plan, &|_| {}, &mut AutoConfirm { assume_yes: true }),
        Ok(ActionOutcome::Completed)
    );
    assert_eq!(d.calls(), vec!["remove MyLocalLib@0.1.0"]);
}

#[test]
/// What: Missing dependencies are installed first when accepted
///
/// Inputs:
/// - Adafruit GFX with an uninstalled `Adafruit BusIO` dependency; `--yes` answers.
///
/// Output:
/// - Dependency install precedes the target install.
fn dependencies_install_before_target() {
    let idx = fixture_index();
    let gfx = idx.find("Adafruit GFX Library").expect("gfx");
    let plan = plan_install(gfx, "1.11.9").expect("plan");
    let d = Recorder {
        deps: vec![
            DependencyStatus {
                name: "Adafruit GFX Library".into(),
                version: "1.11.9".into(),
                installed_version: None,
            },
            DependencyStatus {
                name: "Adafruit BusIO".into(),
                version: "1.16.1".into(),
                installed_version: None,
            },
        ],
        ..Default::default()
    };
    assert_eq!(
        execute(&d, &plan, &|_| {}, &mut AutoConfirm { assume_yes: true }),
        Ok(ActionOutcome::Completed)
    );
    assert_eq!(
        d.calls(),
        vec![
            "install Adafruit BusIO@1.16.1",
            "install Adafruit GFX Library@1.11.9"
        ]
    );
}
