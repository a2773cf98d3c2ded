//! End-to-end tests for the `urlbar` binary against a temporary config dir

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn urlbar(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_urlbar"))
        .arg("--config-dir")
        .arg(dir)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run urlbar")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_complete_builtin() {
    let dir = TempDir::new().unwrap();
    let out = urlbar(dir.path(), &["complete", "mozilla"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "mozilla.org");
}

#[test]
fn test_complete_full_url_unchanged() {
    let dir = TempDir::new().unwrap();
    let out = urlbar(dir.path(), &["complete", "http://www.mozilla.org"]);
    assert_eq!(stdout(&out), "http://www.mozilla.org");
}

#[test]
fn test_custom_domain_flow() {
    let dir = TempDir::new().unwrap();

    assert!(urlbar(dir.path(), &["autocomplete", "enable"]).status.success());
    assert!(urlbar(dir.path(), &["domains", "add", "680news.com"]).status.success());
    assert_eq!(stdout(&urlbar(dir.path(), &["complete", "68"])), "680news.com");

    assert!(urlbar(dir.path(), &["autocomplete", "disable"]).status.success());
    assert_eq!(stdout(&urlbar(dir.path(), &["complete", "68"])), "68");

    assert!(urlbar(dir.path(), &["autocomplete", "enable"]).status.success());
    assert!(urlbar(dir.path(), &["domains", "remove", "680news.com"]).status.success());
    assert_eq!(stdout(&urlbar(dir.path(), &["complete", "68"])), "68");
}

#[test]
fn test_duplicate_add_fails() {
    let dir = TempDir::new().unwrap();
    assert!(urlbar(dir.path(), &["domains", "add", "680news.com"]).status.success());

    let out = urlbar(dir.path(), &["domains", "add", "680NEWS.com"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("already exists"));

    assert_eq!(stdout(&urlbar(dir.path(), &["domains", "list"])), "680news.com");
}

#[test]
fn test_complete_json() {
    let dir = TempDir::new().unwrap();
    let out = urlbar(dir.path(), &["complete", "--json", "moz"]);
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["completion"], "mozilla.org");
    assert_eq!(value["source"], "builtin");
}
