//! Config resolution order and error reporting.

use std::{collections::HashMap, fs, time::Duration};

use roster_model::NumericField;
use rosterctl::config::{
    ConfigLoadError, ConfigLoader, ConfigOverrides,
    sources::{
        ENV_BASE_URL, ENV_CONFIG_PATH, ENV_REQUEST_TIMEOUT, ENV_SORT_FIELD,
        ENV_WINDOW_SIZE, EnvConfig,
    },
};
use tempfile::TempDir;

fn env(vars: &[(&str, &str)]) -> EnvConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvConfig::from_lookup(|key| vars.get(key).cloned())
}

fn write_config(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("roster.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_apply_without_any_source() {
    let load = ConfigLoader::new().load_from_env(env(&[])).unwrap();

    assert_eq!(load.config.base_url.as_str(), "https://swapi.dev/api");
    assert_eq!(load.config.window_size.get(), 4);
    assert_eq!(load.config.sort_field, NumericField::Mass);
    assert_eq!(load.config.request_timeout, None);
    assert!(load.config.metadata.config_path.is_none());
    assert!(
        load.warnings
            .items
            .iter()
            .any(|w| w.message.contains("No roster.toml detected"))
    );
}

#[test]
fn file_values_are_read() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
base_url = "http://localhost:8080/api"
window_size = 6
sort_field = "height"
request_timeout = "15s"
"#,
    );

    let load = ConfigLoader::new()
        .with_config_path(&path)
        .load_from_env(env(&[]))
        .unwrap();

    assert_eq!(load.config.base_url.as_str(), "http://localhost:8080/api");
    assert_eq!(load.config.window_size.get(), 6);
    assert_eq!(load.config.sort_field, NumericField::Height);
    assert_eq!(load.config.request_timeout, Some(Duration::from_secs(15)));
    assert_eq!(load.config.metadata.config_path.as_deref(), Some(path.as_path()));
    assert!(load.warnings.is_empty());
}

#[test]
fn env_beats_file_and_overrides_beat_env() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "window_size = 6\nsort_field = \"height\"\n");

    let env = env(&[
        (ENV_WINDOW_SIZE, "8"),
        (ENV_SORT_FIELD, "mass"),
        (ENV_BASE_URL, "http://env.example/api"),
        (ENV_REQUEST_TIMEOUT, "2m"),
    ]);
    let load = ConfigLoader::new()
        .with_config_path(&path)
        .with_overrides(ConfigOverrides {
            window_size: Some(3),
            ..Default::default()
        })
        .load_from_env(env)
        .unwrap();

    assert_eq!(load.config.window_size.get(), 3);
    assert_eq!(load.config.sort_field, NumericField::Mass);
    assert_eq!(load.config.base_url.host_str(), Some("env.example"));
    assert_eq!(load.config.request_timeout, Some(Duration::from_secs(120)));
}

#[test]
fn config_path_can_come_from_env() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "window_size = 2\n");
    let load = ConfigLoader::new()
        .load_from_env(env(&[(ENV_CONFIG_PATH, path.to_str().unwrap())]))
        .unwrap();
    assert_eq!(load.config.window_size.get(), 2);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .load_from_env(env(&[]))
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
}

#[test]
fn bad_values_name_their_key() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "");

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_from_env(env(&[(ENV_SORT_FIELD, "weight")]))
        .unwrap_err();
    match err {
        ConfigLoadError::InvalidValue { key, value, .. } => {
            assert_eq!(key, ENV_SORT_FIELD);
            assert_eq!(value, "weight");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_from_env(env(&[(ENV_BASE_URL, "not a url")]))
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::InvalidUrl { key: ENV_BASE_URL, .. }));
}

#[test]
fn zero_window_and_bad_scheme_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "window_size = 0\n");
    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_from_env(env(&[]))
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::GuardRail(_)));

    let path = write_config(&dir, "base_url = \"ftp://swapi.dev/api\"\n");
    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_from_env(env(&[]))
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::GuardRail(_)));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "window_size = [\n");
    let err = ConfigLoader::new()
        .with_config_path(&path)
        .load_from_env(env(&[]))
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::Parse { .. }));
}
