//! XDG-style path utilities for the configuration directory.
//!
//! Prefers XDG Base Directory conventions over OS-specific locations so the
//! config lives in the same place on Linux and macOS.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "wikimerge";

/// Returns the configuration directory for wikimerge.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/wikimerge` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/wikimerge` otherwise
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }
    Ok(home_dir()?.join(".config").join(APP_DIR))
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
