//! End-to-end tests driving the `life` binary against files on disk.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn life_binary() -> String {
    env!("CARGO_BIN_EXE_life").to_string()
}

/// Runs `life` with HOME and the config directory pointed at `home`, so the
/// user's own configuration never leaks in.
fn life(home: &Path, args: &[&str]) -> Output {
    Command::new(life_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("LIFE_LIFE_FILE")
        .env_remove("LIFE_INCLUDE_DIR")
        .env_remove("LIFE_DEFAULT_TIMEZONE")
        .env_remove("LIFE_END_TIME_POLICY")
        .env_remove("LIFE_TIMEZONE_CARRY")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run life")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn write_log(dir: &Path) -> String {
    std::fs::write(
        dir.join("me.life"),
        "@include \"trips.life\"\n\
         @ist:university\n\
         -- 2020_01_01\n\
         0000-0800: home\n\
         0800-1730: office [work]\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("trips.life"),
        "-- 2019_08_01\n\
         UTC+9\n\
         0900-1800: tokyo [holiday]\n",
    )
    .unwrap();
    dir.join("me.life").display().to_string()
}

#[test]
fn places_reads_file_and_includes() {
    let temp = TempDir::new().unwrap();
    let file = write_log(temp.path());

    let output = life(temp.path(), &["places", "--file", &file]);
    assert!(
        output.status.success(),
        "places should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = stdout(&output);
    assert!(out.contains("tokyo"));
    assert!(out.contains("home"));
    assert!(out.contains("office"));
}

#[test]
fn where_finds_spans_from_included_file() {
    let temp = TempDir::new().unwrap();
    let file = write_log(temp.path());

    let output = life(temp.path(), &["--file", &file, "where", "2019_08_01", "1200"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "tokyo\n");
}

#[test]
fn check_fails_on_skipped_lines() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("bad.life");
    std::fs::write(&file, "-- 2020_01_01\nbadline\n0800-0900: home\n").unwrap();

    let output = life(temp.path(), &["check", "--file", &file.display().to_string()]);
    assert!(!output.status.success(), "check should fail on a bad line");
    let out = stdout(&output);
    assert!(out.contains("Skipped 1 lines:"));
    assert!(out.contains(":2: format error"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 lines skipped"));
}

#[test]
fn check_passes_on_clean_log() {
    let temp = TempDir::new().unwrap();
    let file = write_log(temp.path());

    let output = life(temp.path(), &["check", "--file", &file]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Spans read: 3"));
    assert!(out.contains("No problems found."));
}

#[test]
fn config_file_supplies_log_and_policy() {
    let temp = TempDir::new().unwrap();
    let file = write_log(temp.path());
    let config = temp.path().join("config.toml");
    std::fs::write(
        &config,
        format!("life_file = {file:?}\nend_time_policy = \"inclusive\"\n"),
    )
    .unwrap();

    let output = life(
        temp.path(),
        &["total", "office", "--config", &config.display().to_string()],
    );
    assert!(
        output.status.success(),
        "total should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output), "office: 9h 31m (571 minutes, inclusive)\n");
}

#[test]
fn inclusive_flag_overrides_config() {
    let temp = TempDir::new().unwrap();
    let file = write_log(temp.path());

    let output = life(temp.path(), &["--file", &file, "total", "office"]);
    assert_eq!(stdout(&output), "office: 9h 30m (570 minutes, exclusive)\n");

    let output = life(temp.path(), &["--file", &file, "total", "office", "--inclusive"]);
    assert_eq!(stdout(&output), "office: 9h 31m (571 minutes, inclusive)\n");
}

#[test]
fn export_is_valid_json() {
    let temp = TempDir::new().unwrap();
    let file = write_log(temp.path());

    let output = life(temp.path(), &["--file", &file, "export"]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["days"].as_array().unwrap().len(), 2);
    assert_eq!(value["days"][0]["spans"][0]["start_timezone"], "UTC+9");
    assert_eq!(value["categories"]["university"][0], "ist");
}

#[test]
fn render_output_reparses() {
    let temp = TempDir::new().unwrap();
    let file = write_log(temp.path());

    let output = life(temp.path(), &["--file", &file, "render"]);
    assert!(output.status.success());
    let rendered = temp.path().join("rendered.life");
    std::fs::write(&rendered, &output.stdout).unwrap();

    let again = life(
        temp.path(),
        &["--file", &rendered.display().to_string(), "export"],
    );
    let original = life(temp.path(), &["--file", &file, "export"]);
    let again: serde_json::Value = serde_json::from_slice(&again.stdout).unwrap();
    let original: serde_json::Value = serde_json::from_slice(&original.stdout).unwrap();
    assert_eq!(again["days"], original["days"]);
}

#[test]
fn missing_file_reports_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("none.life").display().to_string();

    let output = life(temp.path(), &["places", "--file", &missing]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}

#[test]
fn no_file_configured_reports_error() {
    let temp = TempDir::new().unwrap();

    let output = life(temp.path(), &["places"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no LIFE file given"));
}
