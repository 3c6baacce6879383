//! End-to-end tests for the `secfolio` CLI.
//!
//! Every command runs against an isolated config directory so tests never
//! touch the real preferences.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Path to the secfolio binary
fn secfolio_bin() -> String {
    std::env::var("CARGO_BIN_EXE_secfolio").unwrap_or_else(|_| "target/debug/secfolio".to_string())
}

/// Runs the CLI with `SECFOLIO_CONFIG_DIR` pointed at `config_dir`.
fn run(args: &[&str], config_dir: &Path) -> Output {
    Command::new(secfolio_bin())
        .env("SECFOLIO_CONFIG_DIR", config_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_contact_config(config_dir: &Path) {
    std::fs::write(
        config_dir.join("config.toml"),
        r#"
[contact]
service_id = "service_abc"
template_id = "template_xyz"
public_key = "pk_123"
"#,
    )
    .unwrap();
}

// ============================================================================
// Listing Commands
// ============================================================================

#[test]
fn test_palettes_json() {
    let dir = TempDir::new().unwrap();
    let output = run(&["palettes", "--json"], dir.path());

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let palettes = json.as_array().unwrap();
    assert_eq!(palettes.len(), 8);
    assert_eq!(palettes[0]["name"], "security");
}

#[test]
fn test_layouts_human() {
    let dir = TempDir::new().unwrap();
    let output = run(&["layouts"], dir.path());

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 14);
    assert!(out.starts_with("modern"));
    assert!(out.contains("spotlight"));
}

// ============================================================================
// Theme and Layout Commands
// ============================================================================

#[test]
fn test_theme_show_default() {
    let dir = TempDir::new().unwrap();
    let output = run(&["theme", "show", "--json"], dir.path());

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["palette"], "security");
    assert_eq!(json["mode"], "dark");
    assert_eq!(json["colors"].as_array().unwrap().len(), 8);
}

#[test]
fn test_theme_set_persists_across_runs() {
    let dir = TempDir::new().unwrap();

    let output = run(&["theme", "set", "tech"], dir.path());
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(dir.path().join("preferences.json").exists());

    let output = run(&["theme", "show", "--json"], dir.path());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["palette"], "tech");
}

#[test]
fn test_theme_set_unknown_palette_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&["theme", "set", "neon"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("neon"));
    assert!(!dir.path().join("preferences.json").exists());
}

#[test]
fn test_theme_toggle_twice() {
    let dir = TempDir::new().unwrap();

    run(&["theme", "toggle"], dir.path());
    let output = run(&["theme", "show", "--json"], dir.path());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["mode"], "light");

    run(&["theme", "toggle"], dir.path());
    let output = run(&["theme", "show", "--json"], dir.path());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["mode"], "dark");
}

#[test]
fn test_theme_mode_invalid() {
    let dir = TempDir::new().unwrap();
    let output = run(&["theme", "mode", "sepia"], dir.path());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_layout_set_and_show() {
    let dir = TempDir::new().unwrap();

    let output = run(&["layout", "set", "magazine"], dir.path());
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let output = run(&["layout", "show"], dir.path());
    assert!(stdout(&output).starts_with("magazine"));

    let output = run(&["layout", "set", "not-a-real-layout"], dir.path());
    assert_eq!(output.status.code(), Some(1));

    let output = run(&["layout", "show"], dir.path());
    assert!(stdout(&output).starts_with("magazine"));
}

#[test]
fn test_corrupt_preferences_fall_back() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("preferences.json"),
        r#"{"theme":"neon","colorMode":"light","layout":"not-a-real-layout"}"#,
    )
    .unwrap();

    let output = run(&["theme", "show", "--json"], dir.path());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["palette"], "security");
    assert_eq!(json["mode"], "light");

    let output = run(&["layout", "show"], dir.path());
    assert!(stdout(&output).starts_with("modern"));
}

// ============================================================================
// Render Command
// ============================================================================

#[test]
fn test_render_with_overrides_does_not_persist() {
    let dir = TempDir::new().unwrap();
    let output = run(
        &["render", "--layout", "terminal", "--palette", "forest", "--mode", "light"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let html = stdout(&output);
    assert!(html.contains("data-layout=\"terminal\""));
    assert!(html.contains("data-palette=\"forest\""));
    assert!(html.contains("data-mode=\"light\""));
    assert!(!dir.path().join("preferences.json").exists());
}

#[test]
fn test_render_to_file() {
    let dir = TempDir::new().unwrap();
    let out_file = dir.path().join("index.html");
    let output = run(
        &["render", "--output", out_file.to_str().unwrap()],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let html = std::fs::read_to_string(out_file).unwrap();
    assert!(html.contains("data-layout=\"modern\""));
}

#[test]
fn test_render_unknown_layout() {
    let dir = TempDir::new().unwrap();
    let output = run(&["render", "--layout", "bento"], dir.path());
    assert_eq!(output.status.code(), Some(1));
}

// ============================================================================
// Config and Contact Commands
// ============================================================================

#[test]
fn test_config_show_json() {
    let dir = TempDir::new().unwrap();
    let output = run(&["config", "show", "--json"], dir.path());

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["appearance"]["initial_mode"], "dark");
    assert_eq!(json["contact"]["configured"], false);
    assert!(json["preferences_file"]
        .as_str()
        .unwrap()
        .ends_with("preferences.json"));
}

#[test]
fn test_config_invalid_toml_is_validation_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[appearance]\ninitial_mode = 3\n").unwrap();

    let output = run(&["config", "show"], dir.path());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_contact_check_placeholder() {
    let dir = TempDir::new().unwrap();
    let output = run(&["contact", "check"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("contact.service_id"));
}

#[test]
fn test_contact_check_configured() {
    let dir = TempDir::new().unwrap();
    write_contact_config(dir.path());

    let output = run(&["contact", "check"], dir.path());
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("service_abc"));
}

#[test]
fn test_initial_mode_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[appearance]\ninitial_mode = \"light\"\n",
    )
    .unwrap();

    let output = run(&["theme", "show", "--json"], dir.path());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["mode"], "light");
}

#[test]
fn test_config_init_writes_defaults_once() {
    let dir = TempDir::new().unwrap();
    let config_file = dir.path().join("config.toml");

    let output = run(&["config", "init"], dir.path());
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(config_file.exists());
    assert!(!dir.path().join("config.toml.tmp").exists());

    let output = run(&["config", "init"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("--force"));

    let output = run(&["config", "init", "--force"], dir.path());
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}

#[test]
fn test_config_set_saves_and_reloads() {
    let dir = TempDir::new().unwrap();

    let output = run(
        &[
            "config",
            "set",
            "--initial-mode",
            "light",
            "--service-id",
            "service_abc",
            "--template-id",
            "template_xyz",
            "--public-key",
            "pk_123",
        ],
        dir.path(),
    );
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let output = run(&["config", "show", "--json"], dir.path());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["appearance"]["initial_mode"], "light");
    assert_eq!(json["contact"]["configured"], true);

    let output = run(&["theme", "show", "--json"], dir.path());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["mode"], "light");
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();

    let output = run(&["config", "set"], dir.path());
    assert_eq!(output.status.code(), Some(1));

    let output = run(&["config", "set", "--initial-mode", "sepia"], dir.path());
    assert_eq!(output.status.code(), Some(1));

    let output = run(&["config", "set", "--endpoint", "ftp://relay.example.com"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_config_show_human_header() {
    let dir = TempDir::new().unwrap();
    let output = run(&["config", "show"], dir.path());

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("secfolio Configuration"));
    assert_eq!(lines.next(), Some("======================"));
}
