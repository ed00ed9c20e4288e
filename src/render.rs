//! Single-template rendering.
//!
//! A template is read verbatim and rendered against a [`Registry`] with no
//! data bound to it: the output depends only on the template text and the
//! helpers and partials registered so far. Callers must finish the run's
//! registration before rendering; a template that references a name the
//! registry does not hold fails with [`RenderError::Template`].

use crate::registry::Registry;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to render template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: handlebars::RenderError,
    },
}

/// Render the template at `path` into output text.
pub fn render(registry: &Registry, path: &Path) -> Result<String, RenderError> {
    let source = std::fs::read_to_string(path).map_err(|source| RenderError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    registry
        .render_source(&source)
        .map_err(|source| RenderError::Template {
            path: path.to_path_buf(),
            source,
        })
}
