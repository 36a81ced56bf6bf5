//! Check command implementation
//!
//! Validates the configuration and prints the effective settings.

use std::path::Path;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config_path: &Path, config: &CliConfig) -> Result<()> {
    print!("{}", render(config_path, config)?);
    info!("Configuration check passed");
    Ok(())
}

/// Renders the effective configuration as TOML with its source noted.
pub fn render(config_path: &Path, config: &CliConfig) -> Result<String> {
    config.validate()?;
    let sampler = config.sampler_config()?;

    let source = if config_path.exists() {
        format!("# Loaded from {}", config_path.display())
    } else {
        format!("# {} not found; using defaults", config_path.display())
    };

    Ok(format!(
        "{}\n# Environment overrides (SAMPLER_*) applied\n{}\n# Effective batch size: {}\n",
        source,
        toml::to_string_pretty(config)?,
        sampler.batch_size()
    ))
}
