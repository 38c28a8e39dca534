//! Configuration file support
//!
//! Loads settings from ~/.luapad.toml (or %USERPROFILE%\.luapad.toml on
//! Windows).
//!
//! Example:
//! ```text
//! # luapad configuration
//! theme = "Matrix Green"
//! line-numbers = true
//! tab-width = 4
//! ```

use std::fs;
use std::path::PathBuf;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the active palette
    pub theme: String,
    /// Whether to show the line-number gutter
    pub show_line_numbers: bool,
    /// Number of spaces inserted for Tab
    pub tab_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Default Dark".to_string(),
            show_line_numbers: true,
            tab_width: 4,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        let home = std::env::var("USERPROFILE").ok();

        #[cfg(not(windows))]
        let home = std::env::var("HOME").ok();

        home.map(|home| PathBuf::from(home).join(".luapad.toml"))
    }

    /// Load configuration, falling back to defaults on any problem
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            if let Ok(contents) = fs::read_to_string(&path) {
                config.apply(&contents);
            }
        }

        config
    }

    /// Apply settings from TOML text; unknown keys and malformed input
    /// are ignored
    fn apply(&mut self, contents: &str) {
        let Ok(table) = contents.parse::<toml::Table>() else {
            return;
        };

        if let Some(value) = table.get("theme").and_then(|v| v.as_str()) {
            self.theme = value.to_string();
        }

        if let Some(value) = table.get("line-numbers").and_then(|v| v.as_bool()) {
            self.show_line_numbers = value;
        }

        if let Some(value) = table.get("tab-width").and_then(|v| v.as_integer()) {
            self.tab_width = (value.max(1) as usize).min(16);
        }
    }

    /// Save current configuration to file
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            let contents = format!(
                "# luapad configuration\n\n\
                 theme = {:?}\n\
                 line-numbers = {}\n\
                 tab-width = {}\n",
                self.theme, self.show_line_numbers, self.tab_width
            );
            fs::write(path, contents)?;
        }
        Ok(())
    }
}
