//! Settings loader for the uploader.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/cadence.yaml`
//! - User overrides:  `<config home>/cadence/settings.yaml`
//!
//! Merge precedence is user over system. Command-line flags win over both.

use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/cadence.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "cadence/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";

/// Uploader settings; every field is optional so files can be partial.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploaderSettings {
    /// Metrics service base URL.
    pub base_url: Option<String>,
    /// Custom metric name.
    pub source_name: Option<String>,
    /// Seconds between uploads.
    pub interval_secs: Option<f64>,
    /// Milliseconds between clock checks while idle.
    pub resolution_ms: Option<u64>,
    /// Upload count; negative means forever.
    pub max_iterations: Option<i64>,
    /// Retry transport failures too.
    pub tenacious: Option<bool>,
    /// Credentials file; a leading `~/` is expanded.
    pub auth_file: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Skip TLS certificate verification.
    pub insecure_tls: Option<bool>,
}

impl UploaderSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            base_url: overlay.base_url.or(self.base_url),
            source_name: overlay.source_name.or(self.source_name),
            interval_secs: overlay.interval_secs.or(self.interval_secs),
            resolution_ms: overlay.resolution_ms.or(self.resolution_ms),
            max_iterations: overlay.max_iterations.or(self.max_iterations),
            tenacious: overlay.tenacious.or(self.tenacious),
            auth_file: overlay.auth_file.or(self.auth_file),
            timeout_secs: overlay.timeout_secs.or(self.timeout_secs),
            insecure_tls: overlay.insecure_tls.or(self.insecure_tls),
        }
    }
}

/// Load merged settings (user overrides system).
///
/// `config_home` replaces `PRJ_CONFIG_HOME` when given (CLI `--conf`).
pub fn load_settings(config_home: Option<&Path>) -> UploaderSettings {
    let (system_path, user_path) = settings_paths(config_home);
    load_settings_from_paths(&system_path, &user_path)
}

/// System and user settings paths for the current environment.
///
/// The system file is `packages/conf/cadence.yaml` under the project root
/// (`PRJ_ROOT`, else the working directory). The user file is
/// `cadence/settings.yaml` under the config home, which is `config_home` when
/// the CLI passes `--conf`, else `PRJ_CONFIG_HOME`, else `.config`. A relative
/// config home is taken from the project root.
pub fn settings_paths(config_home: Option<&Path>) -> (PathBuf, PathBuf) {
    let root = env_path("PRJ_ROOT")
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let home = config_home
        .map(Path::to_path_buf)
        .or_else(|| env_path("PRJ_CONFIG_HOME"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_HOME_RELATIVE_PATH));
    (
        root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH),
        root.join(home).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH),
    )
}

/// Load and merge two explicit settings files.
pub fn load_settings_from_paths(system: &Path, user: &Path) -> UploaderSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> UploaderSettings {
    if !path.exists() {
        return UploaderSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return UploaderSettings::default();
        }
    };
    match serde_yaml::from_str::<Option<UploaderSettings>>(&raw) {
        Ok(value) => value.unwrap_or_default(),
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            UploaderSettings::default()
        }
    }
}

/// Non-blank environment variable as a path.
fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
}
