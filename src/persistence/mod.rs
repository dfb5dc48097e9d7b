pub mod config;
pub mod script;

use std::path::PathBuf;

/// Get or create the rplot config directory (~/.config/rplot/).
pub fn config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("rplot");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
