//! Compiler configuration.
//!
//! A run is described by three values: the app root (an absolute base path),
//! the input root holding the `helpers/`, `partials/` and `templates/`
//! subtrees, and the output root receiving the generated pages. Both roots
//! are relative to the app root.
//!
//! ## Config File
//!
//! An optional `static-pages.toml` in the app root overrides the defaults:
//!
//! ```toml
//! input_root = "static-pages"         # alias: staticPagesRoot
//! output_root = "compiled-templates"  # alias: outputPath
//! ```
//!
//! Leading and trailing slashes are ignored (`/static-pages/` is the same as
//! `static-pages`). Unknown keys are rejected.
//!
//! ## Validation
//!
//! The output root is removed recursively by cleanup, so it may not be
//! empty or overlap the input root. Both roots must be plain relative
//! paths: `.` and `..` segments are rejected.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file looked up in the app root.
pub const CONFIG_FILENAME: &str = "static-pages.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Immutable description of one compilation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Base path everything else is resolved against. Never read from the
    /// config file: it is the directory the file lives in.
    #[serde(skip)]
    pub app_root: PathBuf,
    /// Subpath holding the `helpers/`, `partials/` and `templates/` trees.
    #[serde(alias = "staticPagesRoot")]
    pub input_root: String,
    /// Subpath receiving generated pages.
    #[serde(alias = "outputPath")]
    pub output_root: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            app_root: PathBuf::new(),
            input_root: "static-pages".to_string(),
            output_root: "compiled-templates".to_string(),
        }
    }
}

/// Trim whitespace and surrounding slashes and collapse repeated separators.
/// Dot segments are left in place so `check_subpath` can reject them.
fn normalize_subpath(raw: &str) -> String {
    raw.trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn check_subpath(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} must not be empty")));
    }
    // `Path::components` drops interior `.` segments, so check the raw
    // segments as well.
    let dotted = value.split('/').any(|segment| segment == "." || segment == "..");
    let escapes = Path::new(value)
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    if dotted || escapes {
        return Err(ConfigError::Validation(format!(
            "{field} must be a plain path inside the app root, got '{value}'"
        )));
    }
    Ok(())
}

impl CompilerConfig {
    /// Build a config from explicit values, normalizing and validating them.
    pub fn new(
        app_root: impl Into<PathBuf>,
        input_root: &str,
        output_root: &str,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            app_root: app_root.into(),
            input_root: normalize_subpath(input_root),
            output_root: normalize_subpath(output_root),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_subpath("input_root", &self.input_root)?;
        check_subpath("output_root", &self.output_root)?;
        let input = Path::new(&self.input_root);
        let output = Path::new(&self.output_root);
        if input.starts_with(output) || output.starts_with(input) {
            return Err(ConfigError::Validation(format!(
                "output_root '{}' overlaps input_root '{}'",
                self.output_root, self.input_root
            )));
        }
        Ok(())
    }

    /// Absolute directory holding the input subtrees.
    pub fn input_dir(&self) -> PathBuf {
        self.app_root.join(&self.input_root)
    }

    /// Absolute directory receiving generated pages.
    pub fn output_dir(&self) -> PathBuf {
        self.app_root.join(&self.output_root)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a TOML table, the base layer user overrides merge onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(CompilerConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `static-pages.toml` from `app_root` as a raw TOML value, if present.
pub fn load_raw_config(app_root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = app_root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load the config for `app_root`: stock defaults, overlaid with the config
/// file if one exists, normalized and validated.
pub fn load_config(app_root: &Path) -> Result<CompilerConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match load_raw_config(app_root)? {
        Some(overlay) => merge_toml(base, rename_aliases(overlay)),
        None => base,
    };
    let parsed: CompilerConfig = merged.try_into()?;
    CompilerConfig::new(app_root, &parsed.input_root, &parsed.output_root)
}

/// Map alias keys onto their canonical names before merging, so an alias in
/// the user file overrides the canonical key in the stock defaults instead of
/// sitting beside it.
fn rename_aliases(overlay: toml::Value) -> toml::Value {
    const ALIASES: &[(&str, &str)] = &[
        ("staticPagesRoot", "input_root"),
        ("outputPath", "output_root"),
    ];
    match overlay {
        toml::Value::Table(mut table) => {
            for (alias, canonical) in ALIASES {
                if let Some(value) = table.remove(*alias) {
                    table.insert((*canonical).to_string(), value);
                }
            }
            toml::Value::Table(table)
        }
        other => other,
    }
}

/// A fully commented `static-pages.toml` with every key at its default.
///
/// Printed by the `gen-config` command.
pub fn stock_config_toml() -> &'static str {
    r##"# static-pages configuration
# ==========================
# Place this file in the app root. All settings are optional; the values
# below are the defaults. Unknown keys are rejected.

# Directory (relative to the app root) holding the inputs:
#   helpers/**/*.rhai    helper scripts, one helper per file
#   partials/**/*.hbs    partial fragments
#   templates/**/*.hbs   page templates
input_root = "static-pages"

# Directory (relative to the app root) receiving the generated pages.
# `static-pages clean` deletes it recursively, so it must not overlap
# input_root.
output_root = "compiled-templates"
"##
}
