use std::io::Write;

use anyhow::Result;

use crate::config::{Config, ConfigWarnings};

/// Print the resolved configuration and any warnings raised while loading it.
pub fn show_config<W: Write>(
    config: &Config,
    warnings: &ConfigWarnings,
    out: &mut W,
) -> Result<()> {
    let source = match &config.metadata.config_path {
        Some(path) => path.display().to_string(),
        None => "(none)".to_string(),
    };
    let timeout = match config.request_timeout {
        Some(timeout) => humantime::format_duration(timeout).to_string(),
        None => "none".to_string(),
    };

    writeln!(out, "config file:     {source}")?;
    writeln!(out, ".env loaded:     {}", config.metadata.env_file_loaded)?;
    writeln!(out, "base_url:        {}", config.base_url)?;
    writeln!(out, "window_size:     {}", config.window_size)?;
    writeln!(out, "sort_field:      {}", config.sort_field)?;
    writeln!(out, "request_timeout: {timeout}")?;

    for warning in &warnings.items {
        writeln!(out, "warning: {}", warning.message)?;
        if let Some(hint) = &warning.hint {
            writeln!(out, "  hint: {hint}")?;
        }
    }
    Ok(())
}
