//! Configuration file parsing utilities.
//!
//! Helpers for `key = value` files with `#`, `//` and `;` comments.

/// What: Check if a line should be skipped (empty or comment).
///
/// Inputs:
/// - `line`: Line to check
///
/// Output:
/// - `true` if the line should be skipped, `false` otherwise
#[must_use]
pub fn skip_comment_or_empty(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("//")
        || trimmed.starts_with(';')
}

/// What: Parse a key-value pair from a line.
///
/// Inputs:
/// - `line`: Line containing key=value format
///
/// Output:
/// - `Some((key, value))` if parsing succeeds, `None` otherwise
///
/// Details:
/// - Splits on the first `=`; the key is lowercased with `.`, `-` and spaces
///   normalised to `_`; inline comments are stripped from the value.
#[must_use]
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (raw_key, raw_val) = line.trim().split_once('=')?;
    let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
    if key.is_empty() {
        return None;
    }
    Some((key, strip_inline_comment(raw_val.trim()).to_string()))
}

/// What: Drop a trailing `# ...` or `// ...` comment from a value.
///
/// Inputs:
/// - `s`: Raw value text.
///
/// Output:
/// - Trimmed value without the comment. A leading `#` is kept (e.g. a colour).
#[must_use]
pub fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find("//") {
        s = &s[..i];
    }
    let hash = s
        .strip_prefix('#')
        .map_or_else(|| s.find('#'), |rest| rest.find('#').map(|j| j + 1));
    if let Some(i) = hash {
        s = &s[..i];
    }
    s.trim()
}

/// Parse a boolean setting (`true`/`1`/`yes`/`on`, case-insensitive).
#[must_use]
pub fn parse_bool(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Comment and blank lines are skipped
    ///
    /// - Input: Lines with `#`, `//`, `;` and whitespace only
    /// - Output: All skipped; a key line is not
    fn skip_comment_or_empty_variants() {
        for l in ["", "   ", "# c", "// c", "; c"] {
            assert!(skip_comment_or_empty(l), "{l:?}");
        }
        assert!(!skip_comment_or_empty("priority_type = Arduino"));
    }

    #[test]
    /// What: Keys normalise and values lose inline comments
    ///
    /// - Input: `Priority-Type = Partner # note`, `dry.run=yes`, `novalue`
    /// - Output: Normalised pairs; `None` without `=`
    fn parse_key_value_normalises() {
        assert_eq!(
            parse_key_value("Priority-Type = Partner # note"),
            Some(("priority_type".into(), "Partner".into()))
        );
        assert_eq!(
            parse_key_value("dry.run=yes"),
            Some(("dry_run".into(), "yes".into()))
        );
        assert_eq!(parse_key_value("novalue"), None);
        assert_eq!(parse_key_value(" = x"), None);
        assert!(parse_bool("Yes") && parse_bool("1") && !parse_bool("off"));
    }
}
