use thiserror::Error;

use super::Config;

/// Window sizes above this still work but no longer fit a terminal row.
pub const WIDE_WINDOW_THRESHOLD: usize = 50;

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("window_size must be at least 1")]
    ZeroWindowSize,
    #[error("base_url scheme '{scheme}' is not supported (use http or https)")]
    UnsupportedScheme { scheme: String },
    #[error("base_url {url} has no host")]
    MissingHost { url: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    match config.base_url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigGuardRailError::UnsupportedScheme {
                scheme: other.to_string(),
            });
        }
    }
    if config.base_url.host_str().is_none() {
        return Err(ConfigGuardRailError::MissingHost {
            url: config.base_url.to_string(),
        });
    }

    if config.window_size.get() > WIDE_WINDOW_THRESHOLD {
        warnings.push_with_hint(
            format!(
                "window_size {} is wider than a terminal can show side by side",
                config.window_size
            ),
            "The list command prints every card; the browser will squeeze them",
        );
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigMetadata;
    use std::num::NonZeroUsize;
    use std::time::Duration;
    use url::Url;

    fn config(url: &str, window: usize) -> Config {
        Config {
            base_url: Url::parse(url).unwrap(),
            window_size: NonZeroUsize::new(window).unwrap(),
            sort_field: Default::default(),
            request_timeout: Some(Duration::from_secs(10)),
            metadata: ConfigMetadata::default(),
        }
    }

    #[test]
    fn default_like_config_passes_cleanly() {
        let warnings =
            apply_guard_rails(&config("https://swapi.dev/api/", 4)).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = apply_guard_rails(&config("ftp://swapi.dev/api/", 4)).unwrap_err();
        assert!(matches!(err, ConfigGuardRailError::UnsupportedScheme { .. }));
    }

    #[test]
    fn wide_window_warns() {
        let warnings =
            apply_guard_rails(&config("https://swapi.dev/api/", 80)).unwrap();
        assert_eq!(warnings.items.len(), 1);
        assert!(warnings.items[0].hint.is_some());
    }
}
