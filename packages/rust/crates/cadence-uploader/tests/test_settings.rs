#![allow(missing_docs)]

use std::path::PathBuf;

use cadence_uploader::{UploaderSettings, load_settings_from_paths, settings_paths};
use tempfile::TempDir;

fn write_file(path: PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write yaml");
}

#[test]
fn merge_user_overrides_system() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("packages/conf/cadence.yaml");
    let user = tmp.path().join(".config/cadence/settings.yaml");

    write_file(
        system.clone(),
        r#"
base_url: "https://grok.example.com/"
source_name: "squares"
interval_secs: 300
resolution_ms: 5
tenacious: false
"#,
    );
    write_file(
        user.clone(),
        r#"
interval_secs: 0.5
tenacious: true
auth_file: "~/.grok-auth-data"
"#,
    );

    let settings = load_settings_from_paths(&system, &user);
    assert_eq!(settings.base_url.as_deref(), Some("https://grok.example.com/"));
    assert_eq!(settings.source_name.as_deref(), Some("squares"));
    assert_eq!(settings.interval_secs, Some(0.5));
    assert_eq!(settings.resolution_ms, Some(5));
    assert_eq!(settings.tenacious, Some(true));
    assert_eq!(settings.auth_file.as_deref(), Some("~/.grok-auth-data"));
    assert_eq!(settings.max_iterations, None);
}

#[test]
fn missing_files_yield_defaults() {
    let tmp = TempDir::new().expect("tempdir");
    let settings = load_settings_from_paths(
        &tmp.path().join("absent/system.yaml"),
        &tmp.path().join("absent/user.yaml"),
    );
    assert_eq!(settings, UploaderSettings::default());
}

#[test]
fn malformed_user_file_is_ignored() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("system.yaml");
    let user = tmp.path().join("user.yaml");
    write_file(system.clone(), "source_name: \"squares\"\n");
    write_file(user.clone(), "interval_secs: [not, a, number\n");

    let settings = load_settings_from_paths(&system, &user);
    assert_eq!(settings.source_name.as_deref(), Some("squares"));
    assert_eq!(settings.interval_secs, None);
}

#[test]
fn empty_file_is_ignored() {
    let tmp = TempDir::new().expect("tempdir");
    let system = tmp.path().join("system.yaml");
    let user = tmp.path().join("user.yaml");
    write_file(system.clone(), "max_iterations: 12\n");
    write_file(user.clone(), "");

    let settings = load_settings_from_paths(&system, &user);
    assert_eq!(settings.max_iterations, Some(12));
}

#[test]
fn conf_flag_selects_the_user_config_home() {
    let tmp = TempDir::new().expect("tempdir");
    let (system, user) = settings_paths(Some(tmp.path()));

    assert_eq!(user, tmp.path().join("cadence/settings.yaml"));
    assert!(system.ends_with("packages/conf/cadence.yaml"));
}

#[test]
fn conf_flag_settings_are_loaded() {
    let tmp = TempDir::new().expect("tempdir");
    write_file(
        tmp.path().join("cadence/settings.yaml"),
        "source_name: \"from-conf\"\n",
    );
    let (_, user) = settings_paths(Some(tmp.path()));

    let settings = load_settings_from_paths(&tmp.path().join("absent.yaml"), &user);
    assert_eq!(settings.source_name.as_deref(), Some("from-conf"));
}
