use std::fs;
use std::path::{Path, PathBuf};

use crate::state::Release;

use super::LibraryIndex;

/// Failure to read or decode an index or installed-listing file.
#[derive(Debug, thiserror::Error)]
pub enum IndexLoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid JSON of the expected shape.
    #[error("failed to parse {what}: {source}")]
    Parse {
        /// Human-readable name of the document.
        what: String,
        /// Underlying decode error.
        source: serde_json::Error,
    },
}

/// One library reported as installed on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstalledEntry {
    /// Library name.
    pub name: String,
    /// Installed version.
    pub version: String,
    /// Whether the copy is bundled with the IDE or a platform.
    pub builtin: bool,
    /// Summary reported by the daemon, if any.
    pub sentence: String,
}

impl InstalledEntry {
    /// Build an entry without a summary.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>, builtin: bool) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            builtin,
            sentence: String::new(),
        }
    }
}

/// Top-level shape of `library_index.json`.
#[derive(serde::Deserialize)]
struct IndexFile {
    /// Flat list of release entries.
    #[serde(default)]
    libraries: Vec<Release>,
}

/// `library` object inside an installed-listing item.
#[derive(serde::Deserialize)]
struct InstalledLibraryJson {
    /// Library name.
    name: String,
    /// Installed version.
    #[serde(default)]
    version: String,
    /// Install location (`user`, `ide_builtin`, `platform_builtin`, ...).
    #[serde(default)]
    location: String,
    /// Summary.
    #[serde(default)]
    sentence: String,
}

/// One item of the installed listing.
#[derive(serde::Deserialize)]
struct InstalledItemJson {
    /// Library details.
    library: InstalledLibraryJson,
}

/// Installed listing is either a bare array or wrapped in an object.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum InstalledListJson {
    /// `{"installed_libraries": [...]}`
    Wrapped {
        /// Items.
        #[serde(default)]
        installed_libraries: Vec<InstalledItemJson>,
    },
    /// `[...]`
    Bare(Vec<InstalledItemJson>),
}

/// What: Decide whether an install location denotes a bundled copy.
///
/// Inputs:
/// - `location`: Location string reported by the daemon.
///
/// Output:
/// - `true` for IDE- or platform-bundled locations.
///
/// Details:
/// - Accepts the CLI text form (`ide-builtin`, `platform`, `ref-platform`) and
///   the gRPC enum form (`LIBRARY_LOCATION_PLATFORM_BUILTIN`, ...).
fn is_builtin_location(location: &str) -> bool {
    let l = location.to_ascii_lowercase().replace(['-', ' '], "_");
    l.contains("builtin") || l.contains("built_in") || l.ends_with("platform")
}

/// What: Decode the release entries of a `library_index.json` document.
///
/// Inputs:
/// - `json`: Document text.
///
/// Output:
/// - Flat release list, or a parse error.
///
/// # Errors
/// - Returns `IndexLoadError::Parse` when the text is not a valid index document.
pub fn parse_index(json: &str) -> Result<Vec<Release>, IndexLoadError> {
    serde_json::from_str::<IndexFile>(json)
        .map(|f| f.libraries)
        .map_err(|source| IndexLoadError::Parse {
            what: "library index".to_string(),
            source,
        })
}

/// What: Decode the daemon's installed-library listing.
///
/// Inputs:
/// - `json`: Output of `lib list --format json`.
///
/// Output:
/// - Installed entries, or a parse error.
///
/// # Errors
/// - Returns `IndexLoadError::Parse` when the text matches neither accepted shape.
///
/// Details:
/// - Blank input is an empty listing (the daemon prints nothing when no library is installed).
pub fn parse_installed(json: &str) -> Result<Vec<InstalledEntry>, IndexLoadError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let parsed: InstalledListJson =
        serde_json::from_str(json).map_err(|source| IndexLoadError::Parse {
            what: "installed libraries".to_string(),
            source,
        })?;
    let items = match parsed {
        InstalledListJson::Wrapped {
            installed_libraries,
        } => installed_libraries,
        InstalledListJson::Bare(items) => items,
    };
    Ok(items
        .into_iter()
        .map(|it| InstalledEntry {
            builtin: is_builtin_location(&it.library.location),
            name: it.library.name,
            version: it.library.version,
            sentence: it.library.sentence,
        })
        .collect())
}

/// What: Read a file, mapping failures to `IndexLoadError::Io`.
fn read(path: &Path) -> Result<String, IndexLoadError> {
    fs::read_to_string(path).map_err(|source| IndexLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// What: Read and decode the release entries of an index file.
///
/// # Errors
/// - Returns `IndexLoadError` when the file cannot be read or decoded.
pub fn load_releases(index_path: &Path) -> Result<Vec<Release>, IndexLoadError> {
    parse_index(&read(index_path)?)
}

/// What: Read and decode a saved installed listing.
///
/// # Errors
/// - Returns `IndexLoadError` when the file cannot be read or decoded.
pub fn load_installed(path: &Path) -> Result<Vec<InstalledEntry>, IndexLoadError> {
    parse_installed(&read(path)?)
}

/// What: Load a full snapshot from an index file and an optional installed listing.
///
/// Inputs:
/// - `index_path`: Path to `library_index.json`.
/// - `installed_path`: Optional path to a saved installed listing.
///
/// Output:
/// - Assembled `LibraryIndex`, or the first read/parse error.
///
/// # Errors
/// - Returns `IndexLoadError` when a file cannot be read or decoded.
pub fn load_index(
    index_path: &Path,
    installed_path: Option<&Path>,
) -> Result<LibraryIndex, IndexLoadError> {
    let releases = load_releases(index_path)?;
    let installed = match installed_path {
        Some(p) => load_installed(p)?,
        None => Vec::new(),
    };
    let idx = LibraryIndex::from_parts(releases, &installed);
    tracing::debug!(
        path = %index_path.display(),
        libraries = idx.len(),
        installed = installed.len(),
        "loaded library index"
    );
    Ok(idx)
}
