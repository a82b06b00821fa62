//! Version comparison for library releases.
//!
//! Versions are compared with semantic-version precedence after a lenient
//! parse. Anything that still fails to parse ranks below every valid version,
//! so sorting and partitioning stay total.

use std::cmp::Ordering;

use semver::Version;

/// What: Parse a version string leniently into a `semver::Version`.
///
/// Inputs:
/// - `raw`: Version text from an index entry (e.g. `1.2.3`, `1.2`, `v2`).
///
/// Output:
/// - `Some(Version)` when the text is a version after normalisation; `None` otherwise.
///
/// Details:
/// - Trims whitespace and a leading `v`/`V`.
/// - Pads missing minor/patch components with zero (`1.2` becomes `1.2.0`).
/// - Pre-release and build suffixes are kept as written.
#[must_use]
pub fn parse_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix(['v', 'V'])
        .unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(v) = Version::parse(trimmed) {
        return Some(v);
    }
    // Split off pre-release/build suffix before padding the numeric core
    let split = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split);
    let parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }
    let mut padded: Vec<&str> = parts;
    while padded.len() < 3 {
        padded.push("0");
    }
    // Leading zeros are rejected by semver; normalise them through integers
    let nums: Option<Vec<u64>> = padded.iter().map(|p| p.parse::<u64>().ok()).collect();
    let nums = nums?;
    Version::parse(&format!("{}.{}.{}{suffix}", nums[0], nums[1], nums[2])).ok()
}

/// What: Total order over version strings.
///
/// Inputs:
/// - `a`: Left-hand version.
/// - `b`: Right-hand version.
///
/// Output:
/// - `Ordering` of `a` relative to `b`.
///
/// Details:
/// - Parsed versions use semantic-version precedence; build metadata is ignored.
/// - Unparsable versions sort below every parsable one; two unparsable versions
///   compare by their raw text so the order stays total.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_version(a), parse_version(b)) {
        (Some(va), Some(vb)) => va.cmp_precedence(&vb),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.trim().cmp(b.trim()),
    }
}

/// Whether `candidate` is strictly newer than `baseline`.
#[must_use]
pub fn is_newer(candidate: &str, baseline: &str) -> bool {
    compare_versions(candidate, baseline) == Ordering::Greater
}
