//! Shared test utilities for the static-pages test suite.
//!
//! Every test gets its own copy of `fixtures/` in a temp directory, used as
//! the app root with the default `static-pages` / `compiled-templates` roots.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! add_template(&tmp, "nested/page.hbs", "<p>hi</p>");
//! let mut compiler = Compiler::new(fixture_config(&tmp));
//! compiler.compile("templates").unwrap();
//! let tree = tree_snapshot(&fixture_config(&tmp).output_dir());
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::config::CompilerConfig;
use crate::naming::to_forward_slashes;

/// Helper names registered from the fixtures, in discovery order.
pub const FIXTURE_HELPERS: &[&str] = &[
    "nested/moar-nested/nested-helper",
    "nested/nested-helper",
    "other-helper",
    "title-helper",
];

/// Partial names registered from the fixtures, in discovery order.
pub const FIXTURE_PARTIALS: &[&str] = &[
    "footer",
    "nested/moar-nested/nested-partial",
    "nested/nested-partial",
    "other-partial",
];

/// Template paths in the fixtures, in discovery order.
pub const FIXTURE_TEMPLATES: &[&str] = &[
    "other-template.hbs",
    "template-with-helper-and-partial.hbs",
    "template.hbs",
];

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Default-rooted config for a fixture copy.
pub fn fixture_config(tmp: &TempDir) -> CompilerConfig {
    CompilerConfig::new(tmp.path(), "static-pages", "compiled-templates").unwrap()
}

pub fn input_dir(tmp: &TempDir) -> PathBuf {
    fixture_config(tmp).input_dir()
}

pub fn helpers_dir(tmp: &TempDir) -> PathBuf {
    input_dir(tmp).join("helpers")
}

pub fn partials_dir(tmp: &TempDir) -> PathBuf {
    input_dir(tmp).join("partials")
}

pub fn templates_dir(tmp: &TempDir) -> PathBuf {
    input_dir(tmp).join("templates")
}

/// Write an extra template into the fixture copy, creating directories.
pub fn add_template(tmp: &TempDir, relative_path: &str, contents: &str) {
    let path = templates_dir(tmp).join(relative_path);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

// =========================================================================
// Output inspection
// =========================================================================

/// Every file under `root` keyed by `/`-separated relative path.
///
/// Empty when `root` does not exist.
pub fn tree_snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    if !root.exists() {
        return BTreeMap::new();
    }
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = to_forward_slashes(e.path().strip_prefix(root).unwrap());
            (rel, std::fs::read(e.path()).unwrap())
        })
        .collect()
}
