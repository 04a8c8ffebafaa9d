//! Configuration loading for `rosterctl`.
//!
//! Values resolve in this order, first hit wins: command-line overrides,
//! `ROSTER_*` environment variables (a `.env` file is loaded first when
//! present), the TOML config file, built-in defaults.

pub mod loader;
pub mod sources;
pub mod validation;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use roster_core::SessionOptions;
use roster_model::NumericField;
use url::Url;

pub use loader::{
    ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions,
    ConfigOverrides,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub window_size: NonZeroUsize,
    pub sort_field: NumericField,
    /// `None` waits until the transport gives up.
    pub request_timeout: Option<Duration>,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            window_size: self.window_size,
            sort_field: self.sort_field,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
