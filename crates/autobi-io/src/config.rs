//! YAML config file loading.

use std::fs;
use std::path::Path;

use autobi_core::config::ConfigFile;

use crate::error::Result;

/// Parse a YAML config file. Unknown keys are rejected so typos surface.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}

pub fn parse_config(text: &str) -> Result<ConfigFile> {
    if text.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    let file: ConfigFile = serde_yaml::from_str(text)?;
    Ok(file)
}
