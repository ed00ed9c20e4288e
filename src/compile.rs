//! Compilation pipeline: registration, discovery, rendering and the output tree.
//!
//! A run goes through these steps in order, with no overlap:
//!
//! ```text
//! register helpers → register partials → ensure output root
//!     → discover templates → for each: render → write
//! ```
//!
//! Every run builds its own [`Registry`], so a second run re-registers from
//! scratch and never sees definitions from an earlier one. The first error
//! stops the run; pages written before it stay on disk.
//!
//! ## Output Tree
//!
//! ```text
//! static-pages/templates/              compiled-templates/
//! ├── template.hbs                →    ├── template.html
//! └── nested/                          └── nested/
//!     └── moar-nested/                     └── moar-nested/
//!         └── nested-test.hbs     →            └── nested-test.html
//! ```

use crate::config::CompilerConfig;
use crate::discovery::{self, DiscoveryError};
use crate::fs::{DiskFs, OutputFs};
use crate::naming::{NamingError, split_destination, swap_suffix};
use crate::registry::{FRAGMENT_SUFFIX, Registry, RegistryError};
use crate::render::{self, RenderError};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Subdirectory of the input root holding helper scripts.
pub const HELPERS_SUBDIR: &str = "helpers";
/// Subdirectory of the input root holding partials.
pub const PARTIALS_SUBDIR: &str = "partials";
/// Subdirectory of the input root holding page templates.
pub const TEMPLATES_SUBDIR: &str = "templates";
/// Suffix of generated pages.
pub const PAGE_SUFFIX: &str = ".html";

#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to remove {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One generated page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageOutput {
    /// Template path relative to the templates directory.
    pub source: String,
    /// Page path relative to the output root.
    pub destination: String,
    /// SHA-256 of the rendered text, hex encoded.
    pub digest: String,
}

/// What a successful run registered and wrote.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompileReport {
    pub output_dir: PathBuf,
    pub helpers: Vec<String>,
    pub partials: Vec<String>,
    pub pages: Vec<PageOutput>,
}

fn digest(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

pub struct Compiler<F: OutputFs = DiskFs> {
    config: CompilerConfig,
    fs: F,
}

impl Compiler<DiskFs> {
    pub fn new(config: CompilerConfig) -> Self {
        Self::with_fs(config, DiskFs)
    }
}

impl<F: OutputFs> Compiler<F> {
    pub fn with_fs(config: CompilerConfig, fs: F) -> Self {
        Self { config, fs }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Build a registry holding every helper and partial under the input root.
    pub fn load_registry(&self) -> Result<(Registry, Vec<String>, Vec<String>), CompileError> {
        let input = self.config.input_dir();
        let mut registry = Registry::new();
        let helpers = registry.register_helpers(&input, HELPERS_SUBDIR)?;
        let partials = registry.register_partials(&input, PARTIALS_SUBDIR)?;
        Ok((registry, helpers, partials))
    }

    /// Template paths under `templates_subdir`, relative to it.
    pub fn discover_templates(&self, templates_subdir: &str) -> Result<Vec<String>, CompileError> {
        Ok(discovery::collect(
            &self.config.input_dir(),
            templates_subdir,
            FRAGMENT_SUFFIX,
        )?)
    }

    /// Render every template under `templates_subdir` into the output root.
    pub fn compile(&mut self, templates_subdir: &str) -> Result<CompileReport, CompileError> {
        let (registry, helpers, partials) = self.load_registry()?;

        let output_dir = self.config.output_dir();
        self.fs
            .ensure_dir_all(&output_dir)
            .map_err(|source| CompileError::Write {
                path: output_dir.clone(),
                source,
            })?;

        let templates_dir = self.config.input_dir().join(templates_subdir);
        let templates = self.discover_templates(templates_subdir)?;
        info!(
            helpers = helpers.len(),
            partials = partials.len(),
            templates = templates.len(),
            output = %output_dir.display(),
            "compiling static pages"
        );

        let mut pages = Vec::with_capacity(templates.len());
        for template in templates {
            let html = render::render(&registry, &templates_dir.join(&template))?;
            let destination = swap_suffix(&template, FRAGMENT_SUFFIX, PAGE_SUFFIX)?;
            self.write_page(&output_dir, &destination, &html)?;
            pages.push(PageOutput {
                source: template,
                destination,
                digest: digest(&html),
            });
        }

        Ok(CompileReport {
            output_dir,
            helpers,
            partials,
            pages,
        })
    }

    /// Remove the output root and everything under it. Missing is fine.
    pub fn cleanup(&mut self) -> Result<(), CompileError> {
        let output_dir = self.config.output_dir();
        debug!(output = %output_dir.display(), "removing output directory");
        self.fs
            .remove_dir_all(&output_dir)
            .map_err(|source| CompileError::Cleanup {
                path: output_dir,
                source,
            })
    }

    /// [`cleanup`](Self::cleanup) then [`compile`](Self::compile), so the
    /// output tree holds exactly the pages of this run.
    pub fn rebuild(&mut self, templates_subdir: &str) -> Result<CompileReport, CompileError> {
        self.cleanup()?;
        self.compile(templates_subdir)
    }

    fn write_page(&mut self, output_dir: &Path, destination: &str, html: &str) -> Result<(), CompileError> {
        let target = match split_destination(destination) {
            (None, file) => output_dir.join(file),
            (Some(dir), file) => {
                let dir = output_dir.join(dir);
                self.fs
                    .ensure_dir_all(&dir)
                    .map_err(|source| CompileError::Write {
                        path: dir.clone(),
                        source,
                    })?;
                dir.join(file)
            }
        };
        self.fs
            .write(&target, html)
            .map_err(|source| CompileError::Write {
                path: target.clone(),
                source,
            })?;
        debug!(page = %target.display(), "wrote page");
        Ok(())
    }
}
