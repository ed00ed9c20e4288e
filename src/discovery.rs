//! Suffix-filtered file discovery.
//!
//! Walks one subtree of the input root and returns every regular file whose
//! name ends in a given suffix, as a `/`-separated path relative to that
//! subtree. The result is sorted so batch counts, registration order and
//! report output are identical from run to run.

use crate::naming::{is_bare_suffix, to_forward_slashes};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to walk {dir}: {source}")]
    Walk {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Collect every file under `root/subdir` whose relative path ends in `suffix`.
///
/// A missing `root/subdir` is not an error: a diagnostic is logged and the
/// result is empty. The match is on the trailing characters of the whole
/// relative path, so `a.b.hbs` matches `.hbs`. A file named exactly
/// `suffix` (e.g. `.hbs`) has no name to register or render under and is
/// skipped with a warning.
pub fn collect(root: &Path, subdir: &str, suffix: &str) -> Result<Vec<String>, DiscoveryError> {
    let dir = root.join(subdir);
    if !dir.is_dir() {
        warn!(dir = %dir.display(), suffix, "input directory not found, nothing to collect");
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(&dir).follow_links(false) {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            dir: dir.clone(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&dir) else {
            continue;
        };
        let relative = to_forward_slashes(relative);
        if !relative.ends_with(suffix) {
            continue;
        }
        if is_bare_suffix(&relative, suffix) {
            warn!(file = %relative, suffix, "skipping file with no name before its suffix");
            continue;
        }
        found.push(relative);
    }

    found.sort();
    debug!(dir = %dir.display(), suffix, count = found.len(), "collected files");
    Ok(found)
}
