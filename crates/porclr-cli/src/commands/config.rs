//! Config command implementations

use std::path::Path;

use colored::Colorize;
use porclr_core::Settings;

use super::load_settings;
use crate::error::{CliError, Result};

/// Run the config show command
///
/// Prints the settings loaded from the file, as TOML or JSON.
pub fn run_config_show(path: Option<&Path>, json: bool) -> Result<()> {
    let settings = load_settings(path)?;

    let rendered = if json {
        serde_json::to_string_pretty(&settings)
            .map_err(|e| CliError::user(format!("Failed to render settings: {}", e)))?
    } else {
        toml::to_string_pretty(&settings)
            .map_err(|e| CliError::user(format!("Failed to render settings: {}", e)))?
    };

    println!("{}", rendered.trim_end());
    Ok(())
}

/// Run the config path command
pub fn run_config_path(path: Option<&Path>) -> Result<()> {
    let resolved = match path {
        Some(path) => path.to_path_buf(),
        None => Settings::default_path()
            .ok_or_else(|| CliError::user("No configuration directory on this platform"))?,
    };

    let marker = if resolved.is_file() {
        "".normal()
    } else {
        " (not created)".dimmed()
    };
    println!("{}{}", resolved.display(), marker);
    Ok(())
}
