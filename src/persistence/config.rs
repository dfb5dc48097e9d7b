use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::plot::document::{DEFAULT_INTERPRETER, DEFAULT_SCRIPT_PATH};

/// User-level defaults for rendering.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Command used to run generated scripts.
    pub interpreter_path: String,
    /// File the generated script is written to before it runs.
    pub script_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interpreter_path: DEFAULT_INTERPRETER.to_string(),
            script_path: DEFAULT_SCRIPT_PATH.to_string(),
        }
    }
}

impl Settings {
    /// Fill `script_path` and `interpreter_path` into document args that leave them out.
    pub fn apply_to(&self, document: &mut toml::Table) {
        document
            .entry("interpreter_path")
            .or_insert(toml::Value::String(self.interpreter_path.clone()));
        document
            .entry("script_path")
            .or_insert(toml::Value::String(self.script_path.clone()));
    }
}

/// Path to the settings file.
pub fn settings_path() -> Option<PathBuf> {
    Some(super::config_dir()?.join("config.toml"))
}

/// Load settings from disk, returning defaults if the file doesn't exist or is invalid.
pub fn load_settings() -> Settings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => Settings::default(),
    }
}

pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring invalid settings in {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => {
            // First run: leave a commented file behind for the user to edit.
            let settings = Settings::default();
            if let Err(e) = write_default_settings(path, &settings) {
                log::debug!("could not write {}: {}", path.display(), e);
            }
            settings
        }
    }
}

fn write_default_settings(path: &Path, settings: &Settings) -> std::io::Result<()> {
    let content = format!(
        "# rplot configuration\n\
         \n\
         # Command used to run generated R scripts\n\
         interpreter_path = \"{}\"\n\
         \n\
         # Where the generated script is written before it runs\n\
         script_path = \"{}\"\n",
        settings.interpreter_path, settings.script_path,
    );
    std::fs::write(path, content.as_bytes())
}
