use assert_cmd::Command;
use predicates::prelude::*;
use std::{fs, path::Path};
use tempfile::TempDir;

const DOC: &str = r#"
asyncapi: 2.6.0
info:
  title: CLI API
  x-twitter: asyncapi
channels:
  user/signedup:
    subscribe:
      operationId: onUserSignedUp
      description: A user signed up.
externalDocs:
  url: https://example.com
"#;

const EMPTY_DOC: &str = "asyncapi: 2.6.0\ninfo:\n  title: Empty\n";

fn write_doc(dir: &Path, name: &str, source: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, source).unwrap();
    path.to_str().unwrap().to_string()
}

fn asyncpage() -> Command {
    let mut cmd = Command::cargo_bin("asyncpage").unwrap();
    cmd.env_remove("ASYNCPAGE_MAX_TEXT_SIZE")
        .env_remove("ASYNCPAGE_COLOR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_generates_index_html() {
    let temp_dir = TempDir::new().unwrap();
    let doc = write_doc(temp_dir.path(), "asyncapi.yaml", DOC);
    let out = temp_dir.path().join("site");

    asyncpage()
        .arg(&doc)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("index.html"));

    let html = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains("<h1>CLI API</h1>"));
    assert!(html.contains("https://twitter.com/asyncapi"));
    assert!(html.contains("maxTextSize: 50000,"));
    assert!(out.join("style.css").exists());
}

#[test]
fn test_no_channels_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let doc = write_doc(temp_dir.path(), "asyncapi.yaml", EMPTY_DOC);
    let out = temp_dir.path().join("site");

    asyncpage()
        .arg(&doc)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!out.join("index.html").exists());
}

#[test]
fn test_stdout_with_param() {
    let temp_dir = TempDir::new().unwrap();
    let doc = write_doc(temp_dir.path(), "asyncapi.yaml", DOC);

    asyncpage()
        .args([doc.as_str(), "--stdout", "--color", "never", "-p", "maxTextSize=5000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("maxTextSize: 5000,"))
        .stdout(predicate::str::contains("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_flag_overrides_param_and_env() {
    let temp_dir = TempDir::new().unwrap();
    let doc = write_doc(temp_dir.path(), "asyncapi.yaml", DOC);

    asyncpage()
        .env("ASYNCPAGE_MAX_TEXT_SIZE", "7000")
        .args([doc.as_str(), "--stdout", "--no-frontmatter", "-p", "maxTextSize=5000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("maxTextSize: 7000,"))
        .stdout(predicate::str::contains("<!-- settings").not());

    asyncpage()
        .args([doc.as_str(), "--stdout", "--max-text-size", "1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("maxTextSize: 1234,"));
}

#[test]
fn test_color_always_highlights() {
    let temp_dir = TempDir::new().unwrap();
    let doc = write_doc(temp_dir.path(), "asyncapi.yaml", DOC);

    asyncpage()
        .args([doc.as_str(), "--stdout", "--color", "always"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b["));
}

#[test]
fn test_raw_json() {
    let temp_dir = TempDir::new().unwrap();
    let doc = write_doc(temp_dir.path(), "asyncapi.yaml", DOC);

    asyncpage()
        .args([doc.as_str(), "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"operationId\": \"onUserSignedUp\""));
}

#[test]
fn test_invalid_param_fails() {
    let temp_dir = TempDir::new().unwrap();
    let doc = write_doc(temp_dir.path(), "asyncapi.yaml", DOC);

    asyncpage()
        .args([doc.as_str(), "--stdout", "-p", "maxTextSize=lots"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid value for parameter maxTextSize"));
}

#[test]
fn test_unsupported_version_fails() {
    let temp_dir = TempDir::new().unwrap();
    let doc = write_doc(
        temp_dir.path(),
        "asyncapi.yaml",
        "asyncapi: 3.0.0\ninfo:\n  title: Next\n",
    );

    asyncpage()
        .arg(&doc)
        .arg("-o")
        .arg(temp_dir.path().join("site"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported AsyncAPI version 3.0.0"));
}

#[test]
fn test_missing_document_fails() {
    let temp_dir = TempDir::new().unwrap();

    asyncpage()
        .arg(temp_dir.path().join("missing.yaml"))
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}
