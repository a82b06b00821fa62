//! Shared fixtures for the library-manager integration tests.

use libmgr as crate_root;

use crate_root::index::{LibraryIndex, parse_index, parse_installed};

/// Index document covering priority types, missing type lists and includes.
pub const INDEX_JSON: &str = r#"{
  "libraries": [
    {"name": "Servo", "version": "1.1.8", "author": "Michael Margolis",
     "sentence": "Allows Arduino boards to control a variety of servo motors.",
     "paragraph": "This library can control a great number of servos.",
     "category": "Device Control", "types": ["Arduino"],
     "providesIncludes": ["Servo.h"]},
    {"name": "Servo", "version": "1.2.1", "author": "Michael Margolis",
     "sentence": "Allows Arduino boards to control a variety of servo motors.",
     "paragraph": "This library can control a great number of servos.",
     "category": "Device Control", "types": ["Arduino"],
     "providesIncludes": ["Servo.h"]},
    {"name": "Servo", "version": "1.0.0", "category": "Device Control",
     "sentence": "Allows Arduino boards to control servo motors.", "types": ["Arduino"]},
    {"name": "Adafruit GFX Library", "version": "1.11.9",
     "sentence": "Core graphics library for Adafruit displays.",
     "paragraph": "Install this library in addition to the display library for your hardware.",
     "category": "Display", "types": ["Recommended"],
     "providesIncludes": ["Adafruit_GFX.h"]},
    {"name": "arduinoJson", "version": "7.0.4",
     "sentence": "A simple and efficient JSON library.",
     "category": "Data Processing", "types": ["Contributed"]},
    {"name": "Wire", "version": "1.0", "sentence": "Two wire interface.",
     "category": "Communication", "types": ["Arduino"]},
    {"name": "Bounce2", "version": "2.71.0",
     "sentence": "Debouncing library for Arduino and Wiring.",
     "category": "Signal Input/Output"}
  ]
}"#;

/// Installed listing in the daemon's wrapped shape.
pub const INSTALLED_JSON: &str = r#"{
  "installed_libraries": [
    {"library": {"name": "Servo", "version": "1.1.8", "location": "user"}},
    {"library": {"name": "Wire", "version": "1.0", "location": "ide-builtin"}},
    {"library": {"name": "MyLocalLib", "version": "0.1.0", "location": "user",
                 "sentence": "Hand-copied sketchbook library."}}
  ]
}"#;

/// What: Build the fixture snapshot.
///
/// - Input: `INDEX_JSON` and `INSTALLED_JSON`
/// - Output: Snapshot with Servo user-installed, Wire bundled and one unmanaged library
pub fn fixture_index() -> LibraryIndex {
    let releases = parse_index(INDEX_JSON).expect("index fixture parses");
    let installed = parse_installed(INSTALLED_JSON).expect("installed fixture parses");
    LibraryIndex::from_parts(releases, &installed)
}
