//! Common paths for feedgrid data
//!
//! Everything lives under ~/.config/feedgrid/ on all platforms:
//! - config.toml - User configuration
//! - feedgrid.log - Log output while the TUI owns the terminal

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the feedgrid directory (~/.config/feedgrid/), creating it if needed
pub fn app_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join("feedgrid");
    fs::create_dir_all(&dir).context("Failed to create feedgrid directory")?;
    Ok(dir)
}

/// Get the config file path (~/.config/feedgrid/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("config.toml"))
}

/// Get the log file path (~/.config/feedgrid/feedgrid.log)
pub fn log_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("feedgrid.log"))
}
