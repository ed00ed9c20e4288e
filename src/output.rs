//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Compile
//!
//! ```text
//! Helpers
//! 001 nested/nested-helper
//! 002 title-helper
//!
//! Partials
//! 001 footer
//!
//! Pages
//! 001 template.hbs → template.html
//!     Digest: 3b1f0c9a2d4e
//! 002 nested/page.hbs → nested/page.html
//!     Digest: 9e04a1c77b20
//!
//! Compiled 2 pages → compiled-templates
//! ```
//!
//! ## Check
//!
//! Same `Helpers` and `Partials` sections, then the planned pages without
//! digests, since nothing is rendered.
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::compile::{CompileReport, PAGE_SUFFIX};
use crate::naming::swap_suffix;
use crate::registry::FRAGMENT_SUFFIX;

/// Digest prefix length shown per page; enough to spot changes between runs.
const SHORT_DIGEST: usize = 12;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// A titled list of registered names. Empty lists print `(none)`.
fn names_section<S: AsRef<str>>(title: &str, names: &[S]) -> Vec<String> {
    let mut lines = vec![title.to_string()];
    if names.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, name) in names.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), name.as_ref()));
    }
    lines
}

fn page_line(index: usize, source: &str, destination: &str) -> String {
    format!("{} {} → {}", format_index(index), source, destination)
}

pub fn format_compile_output(report: &CompileReport) -> Vec<String> {
    let mut lines = names_section("Helpers", &report.helpers);
    lines.push(String::new());
    lines.extend(names_section("Partials", &report.partials));
    lines.push(String::new());

    lines.push("Pages".to_string());
    for (i, page) in report.pages.iter().enumerate() {
        lines.push(page_line(i + 1, &page.source, &page.destination));
        let short = &page.digest[..SHORT_DIGEST.min(page.digest.len())];
        lines.push(format!("{}Digest: {}", indent(1), short));
    }
    lines.push(String::new());

    lines.push(format!(
        "Compiled {} → {}",
        plural(report.pages.len(), "page", "pages"),
        report.output_dir.display()
    ));
    lines
}

pub fn print_compile_output(report: &CompileReport) {
    for line in format_compile_output(report) {
        println!("{}", line);
    }
}

/// Format the result of a dry run: what would be registered and written.
pub fn format_check_output(helpers: &[String], partials: &[String], templates: &[String]) -> Vec<String> {
    let mut lines = names_section("Helpers", helpers);
    lines.push(String::new());
    lines.extend(names_section("Partials", partials));
    lines.push(String::new());

    lines.push("Templates".to_string());
    for (i, template) in templates.iter().enumerate() {
        let destination = swap_suffix(template, FRAGMENT_SUFFIX, PAGE_SUFFIX)
            .unwrap_or_else(|_| template.clone());
        lines.push(page_line(i + 1, template, &destination));
    }
    lines.push(String::new());
    lines.push(format!(
        "{} would be written",
        plural(templates.len(), "page", "pages")
    ));
    lines
}

pub fn print_check_output(helpers: &[String], partials: &[String], templates: &[String]) {
    for line in format_check_output(helpers, partials, templates) {
        println!("{}", line);
    }
}
