//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use riemann::config::AppConfig;
use serial_test::serial;

/// Scratch config directory, unique per test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("riemann-config-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("RIEMANN_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("RIEMANN_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("RIEMANN_WINDOW__TITLE");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load_from(cwd.join("config")).unwrap();
    let builtin = AppConfig::default();
    assert_eq!(config.sampling.range, builtin.sampling.range);
    assert_eq!(config.sampling.step, builtin.sampling.step);
    assert_eq!(config.scene.sphere_color, 0x0000ff);
    assert_eq!(config.functions.colors, vec![0xff0000, 0xff8800, 0xff0088]);
    assert_eq!(config.rendering.background_color, 0x888888);
    assert_eq!(config.camera.eye, [-8.0, 2.0, 8.0]);
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = scratch_dir("user");
    fs::write(dir.join("default.toml"), "[functions]\nslots = 3\n").unwrap();
    fs::write(dir.join("user.toml"), "[functions]\nslots = 1\ninitial = [\"sin(x)\"]\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.functions.slots, 1);
    assert_eq!(config.functions.initial_text(0), "sin(x)");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_nested_env_override() {
    let dir = scratch_dir("env");
    std::env::set_var("RIEMANN_SAMPLING__STEP", "0.05");
    let config = AppConfig::load_from(&dir).unwrap();
    std::env::remove_var("RIEMANN_SAMPLING__STEP");

    assert_eq!(config.sampling.step, 0.05);
    // Untouched sections keep their defaults
    assert_eq!(config.sampling.range, 32.0);
    assert_eq!(config.window.width, 1280);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.functions.slot_count(), 3);
    assert_eq!(config.functions.initial_text(0), "1 / x");
}

#[test]
#[serial]
fn test_bad_value_is_an_error() {
    let dir = scratch_dir("bad");
    fs::write(dir.join("default.toml"), "[sampling]\nstep = \"fast\"\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));

    fs::remove_dir_all(&dir).unwrap();
}
