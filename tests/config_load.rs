use std::path::{Path, PathBuf};

use doclayout_launch::LaunchConfig;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("doclayout-launch.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn loads_full_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
trainer_bin = "/opt/doclayout/bin/doclayout-yolo"
rust_log = "info"

[trainer]
args = ["--seed", "7"]
"#,
    );
    let cfg = LaunchConfig::from_path(&path).unwrap();
    assert_eq!(
        cfg.trainer_bin,
        PathBuf::from("/opt/doclayout/bin/doclayout-yolo")
    );
    assert_eq!(cfg.rust_log.as_deref(), Some("info"));
    assert_eq!(cfg.trainer_args, ["--seed", "7"]);
}

#[test]
fn missing_file_yields_none_and_defaults_hold() {
    assert!(LaunchConfig::from_path(Path::new("/nonexistent/doclayout-launch.toml")).is_none());
    let cfg = LaunchConfig::default();
    assert_eq!(cfg.trainer_bin, PathBuf::from("doclayout-yolo"));
    assert!(cfg.trainer_args.is_empty());
    assert!(cfg.rust_log.is_none());
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "rust_log = \"\"\n");
    let cfg = LaunchConfig::from_path(&path).unwrap();
    assert_eq!(cfg.trainer_bin, PathBuf::from("doclayout-yolo"));
    assert!(cfg.trainer_args.is_empty());
    // Blank log levels are treated as unset, not forwarded.
    assert!(cfg.rust_log.is_none());
}

#[test]
fn env_placeholders_expand_in_trainer_bin() {
    std::env::set_var("DOCLAYOUT_LAUNCH_ROOT_TEST", "/opt/doclayout");
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "trainer_bin = \"${DOCLAYOUT_LAUNCH_ROOT_TEST}/bin/doclayout-yolo\"\n",
    );
    let cfg = LaunchConfig::from_path(&path).unwrap();
    assert_eq!(
        cfg.trainer_bin,
        PathBuf::from("/opt/doclayout/bin/doclayout-yolo")
    );
    std::env::remove_var("DOCLAYOUT_LAUNCH_ROOT_TEST");
}

#[test]
fn tilde_expands_against_home() {
    let Ok(home) = std::env::var("HOME") else {
        return;
    };
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "trainer_bin = \"~/tools/doclayout-yolo\"\n");
    let cfg = LaunchConfig::from_path(&path).unwrap();
    assert_eq!(
        cfg.trainer_bin,
        PathBuf::from(format!("{home}/tools/doclayout-yolo"))
    );
}
