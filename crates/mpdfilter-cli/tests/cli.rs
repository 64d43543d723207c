use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

fn run_raw(config_home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("mpdfilter")
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run command")
}

fn run_cmd(config_home: &Path, args: &[&str]) -> String {
    let output = run_raw(config_home, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(config_home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let stdout = run_cmd(config_home, &full);
    serde_json::from_str(&stdout).expect("parse json")
}

fn write_config(config_home: &Path, contents: &str) {
    let dir = config_home.join("mpdfilter");
    fs::create_dir_all(&dir).expect("config dir");
    fs::write(dir.join("config.toml"), contents).expect("write config");
}

#[test]
fn serialize_committed_and_pending() {
    let temp = TempDir::new().expect("temp dir");
    let out = run_cmd(
        temp.path(),
        &[
            "serialize",
            "--clause",
            "Artist",
            "==",
            "Muse",
            "--tag",
            "Genre",
            "--op",
            "contains",
            "--value",
            "Rock",
        ],
    );
    assert_eq!(out, "(Artist == 'Muse' AND Genre contains 'Rock')\n");
}

#[test]
fn serialize_nothing_is_empty() {
    let temp = TempDir::new().expect("temp dir");
    let out = run_cmd_json(temp.path(), &["serialize"]);
    assert_eq!(out["expression"], "");
}

#[test]
fn serialize_uses_config_defaults_and_features() {
    let temp = TempDir::new().expect("temp dir");
    write_config(
        temp.path(),
        "default_tag = \"Title\"\ndefault_operator = \"starts_with\"\n[features]\nstarts_with = false\n",
    );

    let out = run_cmd(temp.path(), &["serialize", "--value", "Da"]);
    assert_eq!(out, "(Title =~ '^Da')\n");

    let out = run_cmd(temp.path(), &["serialize", "--value", "Da", "--no-pcre"]);
    assert_eq!(out, "(Title contains 'Da')\n");

    let out = run_cmd(temp.path(), &["serialize", "--value", "Da", "--database-list"]);
    assert_eq!(out, "(Title starts_with 'Da')\n");
}

#[test]
fn parse_prints_crumbs() {
    let temp = TempDir::new().expect("temp dir");
    let out = run_cmd(
        temp.path(),
        &["parse", r"(Artist == 'Muse' AND Title == 'Don\'t' AND Date >= 2000)"],
    );
    assert_eq!(out, "Artist == 'Muse'\nTitle == 'Don't'\n");
}

#[test]
fn parse_json_withholds_trailing_segment_with_pending_input() {
    let temp = TempDir::new().expect("temp dir");
    let expression = "(Artist == 'Muse' AND Genre contains 'Ro')";

    let all = run_cmd_json(temp.path(), &["parse", expression]);
    let items = all.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["tag"], "Genre");
    assert_eq!(items[1]["operator"], "contains");
    assert_eq!(items[1]["value"], "Ro");

    let committed = run_cmd_json(temp.path(), &["parse", expression, "--pending-input"]);
    let items = committed.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["value"], "Muse");
}

#[test]
fn parse_empty_expression() {
    let temp = TempDir::new().expect("temp dir");
    assert_eq!(run_cmd(temp.path(), &["parse", "()"]), "no clauses\n");
}

#[test]
fn invalid_config_exits_with_invalid_input() {
    let temp = TempDir::new().expect("temp dir");
    write_config(temp.path(), "default_tag = \"album artist\"\n");

    let output = run_raw(temp.path(), &["serialize", "--value", "x"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("error: load config"));
}

#[test]
fn missing_explicit_config_is_error() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("nope.toml");
    let output = run_raw(
        temp.path(),
        &["--config", missing.to_str().expect("path"), "parse", ""],
    );
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn empty_tag_with_value_is_rejected() {
    let temp = TempDir::new().expect("temp dir");
    let output = run_raw(temp.path(), &["serialize", "--tag", "", "--value", "x"]);
    assert_eq!(output.status.code(), Some(3));
}
