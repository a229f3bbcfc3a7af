use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_CONFIG_NAME: &str = "doclayout-launch.toml";
const CONFIG_ENV: &str = "DOCLAYOUT_LAUNCH_CONFIG";
const DEFAULT_TRAINER_BIN: &str = "doclayout-yolo";

/// Launcher-side settings: where the external trainer lives and what every
/// run gets on top of the resolved arguments.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub trainer_bin: PathBuf,
    /// Extra arguments appended verbatim to every trainer invocation.
    pub trainer_args: Vec<String>,
    /// RUST_LOG value forwarded to the trainer process.
    pub rust_log: Option<String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            trainer_bin: PathBuf::from(DEFAULT_TRAINER_BIN),
            trainer_args: Vec::new(),
            rust_log: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct LaunchConfigFile {
    trainer_bin: Option<String>,
    rust_log: Option<String>,
    trainer: Option<ArgSection>,
}

#[derive(Debug, Deserialize, Default)]
struct ArgSection {
    args: Option<Vec<String>>,
}

impl LaunchConfig {
    /// Load from `DOCLAYOUT_LAUNCH_CONFIG` if set, else from
    /// `doclayout-launch.toml` in the working directory. A missing or
    /// unreadable file yields the defaults.
    pub fn load() -> Self {
        let cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_path(Path::new(&path)).unwrap_or_default(),
            Err(_) => Self::from_path(Path::new(DEFAULT_CONFIG_NAME)).unwrap_or_default(),
        };
        cfg.warn_if_invalid();
        cfg
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let raw = std::fs::read_to_string(path).ok()?;
        let file: LaunchConfigFile = toml::from_str(&raw).ok()?;
        Some(Self::from_file(file))
    }

    fn from_file(file: LaunchConfigFile) -> Self {
        LaunchConfig {
            trainer_bin: file
                .trainer_bin
                .map(|v| expand_path(&v))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TRAINER_BIN)),
            trainer_args: file.trainer.and_then(|t| t.args).unwrap_or_default(),
            rust_log: file.rust_log.filter(|v| !v.trim().is_empty()),
        }
    }

    fn warn_if_invalid(&self) {
        if self.trainer_bin.as_os_str().is_empty() {
            eprintln!("launch config: trainer_bin is empty; runs will fail to start");
        }
    }
}

fn expand_path(raw: &str) -> PathBuf {
    let mut value = raw.to_string();
    if let Some(rest) = value.strip_prefix('~') {
        if let Ok(home) = std::env::var("HOME") {
            value = format!("{home}{rest}");
        }
    }
    PathBuf::from(expand_env(&value))
}

/// Replace `${VAR}` occurrences with the environment value; unknown variables
/// are left in place.
fn expand_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find('}') {
            Some(end) => {
                let key = &rest[start + 2..start + 2 + end];
                match std::env::var(key) {
                    Ok(val) => out.push_str(&val),
                    Err(_) => {
                        out.push_str("${");
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &rest[start + 2 + end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
