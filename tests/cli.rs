//! End-to-end tests through the `static-pages` binary.
//!
//! Each test copies `fixtures/` into a temp app root and runs the CLI there.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn copy_dir_recursive(src: &Path, dst: &Path) {
    for entry in std::fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.path().is_dir() {
            std::fs::create_dir_all(&target).unwrap();
            copy_dir_recursive(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), &target).unwrap();
        }
    }
}

fn app_root() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixtures_dir(), tmp.path());
    tmp
}

fn run(app: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_static-pages"))
        .arg("--app-root")
        .arg(app)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run static-pages")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn build_writes_mirrored_tree() {
    let app = app_root();
    let out = run(app.path(), &["build"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let output = app.path().join("compiled-templates");
    assert_eq!(
        std::fs::read_to_string(output.join("template.html")).unwrap(),
        "<h1>This is a basic template</h1>\n<p>it has no helpers</p>\n<p>or partials</p>\n"
    );
    assert!(output.join("other-template.html").exists());
    assert!(output.join("template-with-helper-and-partial.html").exists());
    assert!(stdout(&out).contains("Compiled 3 pages"));
}

#[test]
fn build_json_report_is_machine_readable() {
    let app = app_root();
    let out = run(app.path(), &["build", "--json"]);
    assert!(out.status.success());

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let pages = report["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[2]["source"], "template.hbs");
    assert_eq!(pages[2]["destination"], "template.html");
    assert_eq!(report["helpers"].as_array().unwrap().len(), 4);
    assert_eq!(report["partials"].as_array().unwrap().len(), 4);
}

#[test]
fn output_override_and_clean() {
    let app = app_root();
    assert!(run(app.path(), &["--output", "/public/", "build"]).status.success());
    assert!(app.path().join("public/template.html").exists());

    assert!(run(app.path(), &["--output", "public", "clean"]).status.success());
    assert!(!app.path().join("public").exists());
    assert!(run(app.path(), &["--output", "public", "clean"]).status.success());
}

#[test]
fn config_file_is_honoured() {
    let app = app_root();
    std::fs::write(
        app.path().join("static-pages.toml"),
        "outputPath = \"site\"\n",
    )
    .unwrap();
    assert!(run(app.path(), &["build"]).status.success());
    assert!(app.path().join("site/template.html").exists());
}

#[test]
fn overlapping_output_is_refused() {
    let app = app_root();
    let out = run(app.path(), &["--output", "static-pages", "clean"]);
    assert!(!out.status.success());
    assert!(app.path().join("static-pages/templates/template.hbs").exists());
}

#[test]
fn clean_refuses_dotted_output_root() {
    let app = app_root();
    let out = run(app.path(), &["--output", "./static-pages", "clean"]);
    assert!(!out.status.success());
    assert!(app.path().join("static-pages/templates/template.hbs").exists());
}

#[test]
fn unresolved_partial_fails_the_build() {
    let app = app_root();
    std::fs::write(
        app.path().join("static-pages/templates/broken.hbs"),
        "{{> missing-partial}}",
    )
    .unwrap();
    let out = run(app.path(), &["build"]);
    assert!(!out.status.success());
    assert!(!app.path().join("compiled-templates/broken.html").exists());
}

#[test]
fn check_writes_nothing() {
    let app = app_root();
    let out = run(app.path(), &["check"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("001 other-template.hbs → other-template.html"));
    assert!(!app.path().join("compiled-templates").exists());
}

#[test]
fn gen_config_prints_defaults() {
    let tmp = TempDir::new().unwrap();
    let out = run(tmp.path(), &["gen-config"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("output_root = \"compiled-templates\""));
}
