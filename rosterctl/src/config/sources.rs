use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const ENV_CONFIG_PATH: &str = "ROSTER_CONFIG";
pub const ENV_BASE_URL: &str = "ROSTER_BASE_URL";
pub const ENV_WINDOW_SIZE: &str = "ROSTER_WINDOW_SIZE";
pub const ENV_SORT_FIELD: &str = "ROSTER_SORT_FIELD";
pub const ENV_REQUEST_TIMEOUT: &str = "ROSTER_REQUEST_TIMEOUT";

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    /// Humantime duration such as `"30s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,
}

/// Raw values read from the process environment. Parsing happens when the
/// loader composes the final config so bad values can be reported by key.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub window_size: Option<String>,
    pub sort_field: Option<String>,
    pub request_timeout: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            config_path: non_empty(ENV_CONFIG_PATH).map(PathBuf::from),
            base_url: non_empty(ENV_BASE_URL),
            window_size: non_empty(ENV_WINDOW_SIZE),
            sort_field: non_empty(ENV_SORT_FIELD),
            request_timeout: non_empty(ENV_REQUEST_TIMEOUT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn blank_env_values_are_ignored() {
        let vars: HashMap<&str, &str> =
            [(ENV_BASE_URL, "  "), (ENV_WINDOW_SIZE, "6")].into_iter().collect();
        let env = EnvConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert!(env.base_url.is_none());
        assert_eq!(env.window_size.as_deref(), Some("6"));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let parsed: Result<FileConfig, _> = toml::from_str("page_size = 4\n");
        assert!(parsed.is_err());
    }
}
