//! Config command handler.

use taleforge::{ConfigError, TaleforgeConfig, TaleforgeResult};

/// Print the effective configuration as TOML.
pub fn show_config(config: &TaleforgeConfig) -> TaleforgeResult<()> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::new(format!("Failed to render configuration: {}", e)))?;
    print!("{}", rendered);
    Ok(())
}
