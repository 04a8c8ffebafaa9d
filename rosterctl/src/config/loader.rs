use once_cell::sync::Lazy;
use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use url::Url;

use roster_core::api::routes::DEFAULT_BASE_URL;
use roster_core::session::DEFAULT_WINDOW_SIZE;
use roster_model::NumericField;

use super::{
    Config, ConfigMetadata,
    sources::{
        ENV_BASE_URL, ENV_REQUEST_TIMEOUT, ENV_SORT_FIELD, ENV_WINDOW_SIZE,
        EnvConfig, FileConfig,
    },
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![PathBuf::from("roster.toml"), PathBuf::from("config/roster.toml")]
});

/// Values given on the command line; they beat env and file.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub window_size: Option<usize>,
    pub sort_field: Option<NumericField>,
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.options.overrides = overrides;
        self
    }

    /// Load `.env`, then resolve config from the process environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        let mut load = self.load_from_env(EnvConfig::gather())?;
        load.config.metadata.env_file_loaded = env_file_loaded;
        Ok(load)
    }

    /// Resolve config against an explicit environment snapshot.
    pub fn load_from_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let (config, warnings) = self.compose_config(file_config, env, config_path)?;
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let (path, explicit) = match (&self.options.config_path, &env.config_path) {
            (Some(path), _) => (Some(path.clone()), true),
            (None, Some(path)) => (Some(path.clone()), true),
            (None, None) => (
                DEFAULT_CONFIG_LOCATIONS
                    .iter()
                    .find(|candidate| candidate.exists())
                    .cloned(),
                false,
            ),
        };

        let Some(path) = path else {
            return Ok((None, None));
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            return Ok((None, None));
        }

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }

    fn compose_config(
        &self,
        file_config: Option<FileConfig>,
        env: EnvConfig,
        config_path: Option<PathBuf>,
    ) -> Result<(Config, ConfigWarnings), ConfigLoadError> {
        let mut warnings = ConfigWarnings::default();
        let overrides = &self.options.overrides;

        if config_path.is_none() {
            warnings.push_with_hint(
                "No roster.toml detected; using environment variables and defaults",
                "Pass --config <path> or set ROSTER_CONFIG to use a config file",
            );
        }

        let file = file_config.unwrap_or_default();

        let (base_url_key, raw_base_url) = match (&overrides.base_url, &env.base_url, &file.base_url)
        {
            (Some(url), _, _) => ("--base-url", url.clone()),
            (None, Some(url), _) => (ENV_BASE_URL, url.clone()),
            (None, None, Some(url)) => ("base_url", url.clone()),
            (None, None, None) => ("base_url", DEFAULT_BASE_URL.to_string()),
        };
        let base_url = Url::parse(raw_base_url.trim()).map_err(|source| {
            ConfigLoadError::InvalidUrl {
                key: base_url_key,
                value: raw_base_url.clone(),
                source,
            }
        })?;

        let window_size = match (overrides.window_size, &env.window_size, file.window_size) {
            (Some(size), _, _) => size,
            (None, Some(raw), _) => parse_value(ENV_WINDOW_SIZE, raw, |v| v.parse::<usize>())?,
            (None, None, Some(size)) => size,
            (None, None, None) => DEFAULT_WINDOW_SIZE.get(),
        };
        let window_size =
            NonZeroUsize::new(window_size).ok_or(ConfigGuardRailError::ZeroWindowSize)?;

        let sort_field = match (overrides.sort_field, &env.sort_field, &file.sort_field) {
            (Some(field), _, _) => field,
            (None, Some(raw), _) => parse_value(ENV_SORT_FIELD, raw, |v| v.parse::<NumericField>())?,
            (None, None, Some(raw)) => parse_value("sort_field", raw, |v| v.parse::<NumericField>())?,
            (None, None, None) => NumericField::default(),
        };

        let request_timeout =
            match (overrides.request_timeout, &env.request_timeout, &file.request_timeout) {
                (Some(timeout), _, _) => Some(timeout),
                (None, Some(raw), _) => Some(parse_value(ENV_REQUEST_TIMEOUT, raw, humantime::parse_duration)?),
                (None, None, Some(raw)) => Some(parse_value("request_timeout", raw, humantime::parse_duration)?),
                (None, None, None) => None,
            };

        let config = Config {
            base_url,
            window_size,
            sort_field,
            request_timeout,
            metadata: ConfigMetadata {
                config_path,
                env_file_loaded: false,
            },
        };

        let guard_warnings = validation::apply_guard_rails(&config)?;
        warnings.extend(guard_warnings);

        Ok((config, warnings))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_value<T, E, F>(key: &'static str, raw: &str, parse: F) -> Result<T, ConfigLoadError>
where
    F: FnOnce(&str) -> Result<T, E>,
    E: std::fmt::Display,
{
    parse(raw.trim()).map_err(|err| ConfigLoadError::InvalidValue {
        key,
        value: raw.to_string(),
        reason: err.to_string(),
    })
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid URL in {key}: '{value}'")]
    InvalidUrl {
        key: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
