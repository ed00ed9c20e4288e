//! Helper and partial registration.
//!
//! A [`Registry`] is the name → definition namespace every render consults.
//! It is an ordinary value built fresh for each compilation run and passed to
//! [`render`](crate::render::render), so two runs never observe each other's
//! registrations.
//!
//! ## Helpers
//!
//! Each `helpers/**/*.rhai` file is a Rhai script. Its return value is the
//! helper's output; positional arguments are available as `params` and
//! key/value arguments as `hash`:
//!
//! ```text
//! // helpers/title-helper.rhai
//! "<h1>Hi, I am a helper.</h1>"
//! ```
//!
//! ## Partials
//!
//! Each `partials/**/*.hbs` file is registered verbatim and inlined wherever
//! a template says `{{> name}}`.
//!
//! ## Naming
//!
//! Both kinds are registered under their relative path with the suffix
//! stripped ([`derive_name`]), so `nested/nested-helper.rhai` becomes
//! `nested/nested-helper`. Registering a name that already exists replaces
//! the previous definition.
//!
//! ## Strictness
//!
//! The underlying engine runs in strict mode: a reference to a helper,
//! partial or value that was never registered fails the render instead of
//! rendering as empty text.

use crate::discovery::{self, DiscoveryError};
use crate::naming::{NamingError, derive_name};
use handlebars::{Handlebars, RenderError, TemplateError};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Suffix of helper script files.
pub const HELPER_SUFFIX: &str = ".rhai";
/// Suffix of partial fragments and page templates.
pub const FRAGMENT_SUFFIX: &str = ".hbs";

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error("Failed to load helper {path}: {source}")]
    HelperLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Failed to read partial {path}: {source}")]
    PartialRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid partial {path}: {source}")]
    PartialParse {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },
}

pub struct Registry {
    engine: Handlebars<'static>,
    helpers: BTreeMap<String, PathBuf>,
    partials: BTreeMap<String, String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .field("partials", &self.partials.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn strict_engine() -> Handlebars<'static> {
    let mut engine = Handlebars::new();
    engine.set_strict_mode(true);
    engine
}

impl Registry {
    pub fn new() -> Self {
        Self {
            engine: strict_engine(),
            helpers: BTreeMap::new(),
            partials: BTreeMap::new(),
        }
    }

    /// Drop every registered helper and partial.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Load `dir/relative_path` as a helper script and register it.
    pub fn register_helper(&mut self, dir: &Path, relative_path: &str) -> Result<(), RegistryError> {
        let name = derive_name(relative_path, HELPER_SUFFIX)?;
        let path = dir.join(relative_path);
        self.engine
            .register_script_helper_file(name, &path)
            .map_err(|source| RegistryError::HelperLoad {
                path: path.clone(),
                source: Box::new(source),
            })?;
        debug!(name, path = %path.display(), "registered helper");
        self.helpers.insert(name.to_string(), path);
        Ok(())
    }

    /// Read `dir/relative_path` verbatim and register it as a partial.
    pub fn register_partial(&mut self, dir: &Path, relative_path: &str) -> Result<(), RegistryError> {
        let name = derive_name(relative_path, FRAGMENT_SUFFIX)?;
        let path = dir.join(relative_path);
        let content = std::fs::read_to_string(&path).map_err(|source| RegistryError::PartialRead {
            path: path.clone(),
            source,
        })?;
        self.engine
            .register_partial(name, &content)
            .map_err(|source| RegistryError::PartialParse {
                path: path.clone(),
                source,
            })?;
        debug!(name, path = %path.display(), "registered partial");
        self.partials.insert(name.to_string(), content);
        Ok(())
    }

    /// Register every helper script under `root/subdir`, in discovery order.
    ///
    /// The first file that fails to load aborts the batch. Returns the
    /// registered names.
    pub fn register_helpers(&mut self, root: &Path, subdir: &str) -> Result<Vec<String>, RegistryError> {
        let dir = root.join(subdir);
        let files = discovery::collect(root, subdir, HELPER_SUFFIX)?;
        let mut names = Vec::with_capacity(files.len());
        for file in &files {
            self.register_helper(&dir, file)?;
            names.push(derive_name(file, HELPER_SUFFIX)?.to_string());
        }
        Ok(names)
    }

    /// Register every partial under `root/subdir`, in discovery order.
    ///
    /// Same batch semantics as [`register_helpers`](Self::register_helpers).
    pub fn register_partials(&mut self, root: &Path, subdir: &str) -> Result<Vec<String>, RegistryError> {
        let dir = root.join(subdir);
        let files = discovery::collect(root, subdir, FRAGMENT_SUFFIX)?;
        let mut names = Vec::with_capacity(files.len());
        for file in &files {
            self.register_partial(&dir, file)?;
            names.push(derive_name(file, FRAGMENT_SUFFIX)?.to_string());
        }
        Ok(names)
    }

    pub fn has_helper(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    pub fn has_partial(&self, name: &str) -> bool {
        self.partials.contains_key(name)
    }

    pub fn helper_names(&self) -> Vec<&str> {
        self.helpers.keys().map(String::as_str).collect()
    }

    pub fn partial_names(&self) -> Vec<&str> {
        self.partials.keys().map(String::as_str).collect()
    }

    /// The raw text a partial was registered with.
    pub fn partial_source(&self, name: &str) -> Option<&str> {
        self.partials.get(name).map(String::as_str)
    }

    /// Render template source against the current registrations with an
    /// empty (`null`) data context.
    pub fn render_source(&self, source: &str) -> Result<String, RenderError> {
        self.engine.render_template(source, &serde_json::Value::Null)
    }
}
