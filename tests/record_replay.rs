//! Cassette replay integration tests: no renderer program needed.
//!
//! All tests set `ERENDER_REPLAY` to a cassette file so the binary never
//! spawns the live renderer.

use assert_cmd::Command;
use base64::Engine;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;

fn cmd(cassette: &str) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("erender");
    cmd.env("ERENDER_CONFIG", "/nonexistent/erender.toml")
        .env("ERENDER_REPLAY", fixtures_dir().join(cassette).to_str().unwrap())
        .env_remove("ERENDER_REC")
        .env_remove("ERENDER_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

/// Absolute path to the `test_fixtures` directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_fixtures")
}

fn blog_event() -> String {
    let model = std::fs::read_to_string(fixtures_dir().join("blog_model.json")).unwrap();
    serde_json::json!({ "body": model }).to_string()
}

#[test]
fn invoke_returns_base64_svg() {
    let output = cmd("blog_svg.cassette.yaml")
        .arg("invoke")
        .write_stdin(blog_event())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(envelope["statusCode"], 200);
    assert_eq!(envelope["isBase64Encoded"], true);
    assert_eq!(envelope["headers"]["Content-Type"], "image/svg+xml");
    assert_eq!(
        envelope["headers"]["Content-Disposition"],
        "attachment; filename=\"diagrama_er.svg\""
    );

    let image = base64::engine::general_purpose::STANDARD
        .decode(envelope["body"].as_str().unwrap())
        .unwrap();
    assert!(image.starts_with(b"<?xml"), "decoded body should be an SVG document");
}

#[test]
fn renderer_failure_is_echoed_as_500() {
    let event = r#"{"body": {"entities": [{"name": "user", "attributes": [{"name": "id", "type": "int", "primary_key": true}]}],
                   "relations": [{"entity1": "user", "entity2": "Ghost", "cardinality1": "1", "cardinality2": "*"}]}}"#;
    let output = cmd("dangling_relation.cassette.yaml")
        .arg("invoke")
        .write_stdin(event)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let envelope: Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(envelope["statusCode"], 500);
    let body: Value = serde_json::from_str(envelope["body"].as_str().unwrap()).unwrap();
    assert_eq!(body["error"], "Entity 'Ghost' referenced in relation is not defined");
}

#[test]
fn render_writes_explicit_output() {
    let out = tempfile::tempdir().unwrap();
    let out_path = out.path().join("schema.svg");
    let model = fixtures_dir().join("blog_model.json");

    cmd("blog_svg.cassette.yaml")
        .args(["render", "--output", out_path.to_str().unwrap(), model.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved:"));

    let data = std::fs::read(&out_path).unwrap();
    assert!(data.starts_with(b"<?xml"));
}

#[test]
fn render_names_output_after_model() {
    let work_dir = tempfile::tempdir().unwrap();
    let model = fixtures_dir().join("blog_model.json");

    cmd("blog_svg.cassette.yaml")
        .args(["render", model.to_str().unwrap()])
        .current_dir(work_dir.path())
        .assert()
        .success();

    assert!(work_dir.path().join("blog-model.svg").exists());
}

#[test]
fn render_failure_exits_with_renderer_message() {
    let model = fixtures_dir().join("blog_model.json");
    cmd("dangling_relation.cassette.yaml")
        .args(["render", "-o", "/nonexistent/never.svg", model.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entity 'Ghost' referenced in relation is not defined"));
}

#[test]
fn missing_cassette_exits_with_error() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("erender");
    cmd.env("ERENDER_CONFIG", "/nonexistent/erender.toml")
        .env("ERENDER_REPLAY", "/nonexistent/cassette.yaml")
        .arg("invoke")
        .write_stdin(blog_event())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load cassette"));
}
