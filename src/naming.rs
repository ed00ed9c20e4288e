//! Name and destination derivation for discovered files.
//!
//! Every helper, partial and template is addressed by its path relative to
//! the subtree it was discovered in. Names keep their `/`-separated segments
//! and internal dots; only the known trailing suffix is removed:
//!
//! - `title-helper.rhai` → `title-helper`
//! - `nested/moar-nested/nested-helper.rhai` → `nested/moar-nested/nested-helper`
//! - `release.notes.hbs` → `release.notes`
//!
//! Templates reuse the same rule to find their output path: the template
//! suffix is swapped for the page suffix and the result is split into a
//! directory prefix and a final file name.

use std::path::{Component, Path};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum NamingError {
    /// Discovery only yields paths ending in the suffix it filtered on, so
    /// this signals a caller passing a path from somewhere else.
    #[error("'{path}' does not end in '{suffix}'")]
    SuffixMismatch { path: String, suffix: String },
    /// The file name is the suffix alone (`.hbs`, `nested/.rhai`).
    #[error("'{path}' has nothing before '{suffix}' to name it by")]
    EmptyStem { path: String, suffix: String },
}

/// True when the last segment of `relative_path` is exactly `suffix`.
pub fn is_bare_suffix(relative_path: &str, suffix: &str) -> bool {
    let (_, file) = split_destination(relative_path);
    file == suffix
}

/// Strip exactly `suffix` from the end of `relative_path`.
///
/// This is not "drop the last extension": `a.b.hbs` with suffix `.hbs`
/// yields `a.b`. A file name that is only the suffix has no name to derive.
pub fn derive_name<'a>(relative_path: &'a str, suffix: &str) -> Result<&'a str, NamingError> {
    match relative_path.strip_suffix(suffix) {
        Some(name) if !name.is_empty() && !name.ends_with('/') => Ok(name),
        Some(_) => Err(NamingError::EmptyStem {
            path: relative_path.to_string(),
            suffix: suffix.to_string(),
        }),
        None => Err(NamingError::SuffixMismatch {
            path: relative_path.to_string(),
            suffix: suffix.to_string(),
        }),
    }
}

/// Replace the trailing `from` suffix with `to`.
pub fn swap_suffix(relative_path: &str, from: &str, to: &str) -> Result<String, NamingError> {
    derive_name(relative_path, from).map(|stem| format!("{stem}{to}"))
}

/// Split a relative destination into its directory prefix and file name.
///
/// - `"index.html"` → `(None, "index.html")`
/// - `"nested/moar-nested/page.html"` → `(Some("nested/moar-nested"), "page.html")`
pub fn split_destination(relative_path: &str) -> (Option<&str>, &str) {
    match relative_path.rsplit_once('/') {
        Some((dir, file)) if !dir.is_empty() => (Some(dir), file),
        Some((_, file)) => (None, file),
        None => (None, relative_path),
    }
}

/// Render a relative path with `/` separators regardless of host conventions.
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
