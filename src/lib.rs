//! # static-pages
//!
//! A build-time compiler for static pages. It takes a directory of
//! Handlebars templates, plus helper scripts and partial fragments, and
//! writes one HTML file per template into a mirrored output tree.
//!
//! # Input and Output Layout
//!
//! ```text
//! <app-root>/
//! ├── static-pages/                        # input root
//! │   ├── helpers/
//! │   │   ├── title-helper.rhai            # → helper `title-helper`
//! │   │   └── nested/nested-helper.rhai    # → helper `nested/nested-helper`
//! │   ├── partials/
//! │   │   └── footer.hbs                   # → partial `footer`
//! │   └── templates/
//! │       ├── index.hbs
//! │       └── docs/intro.hbs
//! └── compiled-templates/                  # output root
//!     ├── index.html
//!     └── docs/intro.html
//! ```
//!
//! # Pipeline
//!
//! Each run is synchronous and straight-line:
//!
//! ```text
//! Registry (helpers) → Registry (partials) → discovery (templates)
//!     → for each template: render → write
//! ```
//!
//! Pages are rendered exactly once, at build time, with no data bound to
//! them. Output depends only on the template text and the registered helpers
//! and partials.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`discovery`] | Walks a subtree and returns relative paths ending in a suffix |
//! | [`naming`] | Derives registry names and output paths from relative paths |
//! | [`registry`] | Per-run helper/partial namespace backed by Handlebars |
//! | [`render`] | Renders one template file against a registry |
//! | [`fs`] | Output filesystem capability with a disk and an in-memory implementation |
//! | [`compile`] | Orchestrates a run, mirrors the template tree, cleans the output root |
//! | [`config`] | `static-pages.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Registry Per Run
//!
//! The helper/partial namespace is a [`registry::Registry`] value created by
//! each [`compile::Compiler::compile`] call and passed to every render. Runs
//! never share registrations, so nothing has to be reset between them and
//! tests can construct registries freely.
//!
//! ## Strict References
//!
//! A template that names a helper or partial the registry does not hold
//! fails to render. Silent passthrough would ship pages with holes in them.
//!
//! ## Script Helpers
//!
//! Helpers are Rhai scripts loaded at run time through Handlebars'
//! `script_helper` support, so adding a helper means adding a file, not
//! rebuilding the tool.
//!
//! ## No Rollback
//!
//! The first failure stops the run and whatever was written stays. The
//! `build` command cleans the output root first, so a successful build
//! always leaves exactly one page per template.

pub mod compile;
pub mod config;
pub mod discovery;
pub mod fs;
pub mod naming;
pub mod output;
pub mod registry;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;
