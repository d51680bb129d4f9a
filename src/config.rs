//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a cheatcodes.toml, and if present we load settings from there.
//! This provides the content directories, file extensions, and where state and logs are kept.

use facet::Facet;
use std::fs;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "cheatcodes.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from cheatcodes.toml or falling back to defaults.
pub struct Config {
    #[facet(default = vec!["cheatcodes".to_string()])]
    /// Paths scanned when none are given on the command line.
    pub content_dirs: Vec<String>,
    #[facet(default = vec!["json".to_string(), "md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = ".cheatcodes-state.json".to_string())]
    /// Key-value store holding the theme preference.
    pub state_file: String,
    #[facet(default = "cheatcodes.log".to_string())]
    /// File receiving log records.
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dirs: vec!["cheatcodes".to_string()],
            file_extensions: vec!["json".to_string(), "md".to_string()],
            state_file: ".cheatcodes-state.json".to_string(),
            log_file: "cheatcodes.log".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from cheatcodes.toml if present.
    pub fn load() -> Self {
        match fs::read_to_string(CONFIG_FILE) {
            Ok(contents) => Self::from_toml(&contents),
            Err(_) => Self::default(),
        }
    }

    #[must_use]
    /// Parse configuration text, keeping defaults for missing keys.
    ///
    /// Text that does not parse is ignored as a whole.
    pub fn from_toml(contents: &str) -> Self {
        if let Ok(config) = facet_toml::from_str::<Self>(contents) {
            return config;
        }
        log::warn!("Ignoring unparseable {CONFIG_FILE}; using defaults");
        Self::default()
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
