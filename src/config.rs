use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::tags::DEFAULT_DELIMITER;
use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Character that separates tags in the serialized field and confirms a tag when typed
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_confirm_tag")]
    pub confirm_tag: String,
    #[serde(default = "default_erase_tag")]
    pub erase_tag: String,
    #[serde(default = "default_submit")]
    pub submit: String,
    #[serde(default = "default_clear")]
    pub clear: String,
    #[serde(default = "default_next_field")]
    pub next_field: String,
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_help")]
    pub help: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_chip_bg")]
    pub chip_bg: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            log_level: default_log_level(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            confirm_tag: default_confirm_tag(),
            erase_tag: default_erase_tag(),
            submit: default_submit(),
            clear: default_clear(),
            next_field: default_next_field(),
            quit: default_quit(),
            help: default_help(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            chip_bg: default_chip_bg(),
        }
    }
}

impl Theme {
    /// Preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();

        themes.insert("default".to_string(), Theme::default());

        themes.insert("light".to_string(), Theme {
            fg: "black".to_string(),
            bg: "white".to_string(),
            highlight_bg: "blue".to_string(),
            chip_bg: "lightblue".to_string(),
        });

        themes.insert("monochrome".to_string(), Theme {
            fg: "white".to_string(),
            bg: "black".to_string(),
            highlight_bg: "white".to_string(),
            chip_bg: "darkgray".to_string(),
        });

        themes
    }
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_confirm_tag() -> String {
    "Enter".to_string()
}

fn default_erase_tag() -> String {
    "Backspace".to_string()
}

fn default_submit() -> String {
    "Ctrl+s".to_string()
}

fn default_clear() -> String {
    "Ctrl+l".to_string()
}

fn default_next_field() -> String {
    "Tab".to_string()
}

fn default_quit() -> String {
    "Ctrl+q".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_chip_bg() -> String {
    "cyan".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),
    #[error("Invalid tag delimiter {0:?}: must be a punctuation or symbol character")]
    InvalidDelimiter(char),
    #[error("Invalid key binding: {0}")]
    InvalidKeyBinding(String),
}

impl Config {
    /// Load configuration for a profile, creating the default file if missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            let mut config = Config::default();
            config.save_to_path(&config_path)?;
            Ok(config)
        }
    }

    /// Load configuration from an explicit file (the `--config` flag)
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    /// The delimiter is both a keystroke and a separator. Whitespace and
    /// control characters would be trimmed away, and letters or digits would
    /// be eaten out of ordinary words.
    ///
    /// Form-level bindings are matched before the tag field sees a key, so a
    /// bare printable character there would never reach the input.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = self.delimiter;
        if d.is_whitespace() || d.is_control() || d.is_alphanumeric() {
            return Err(ConfigError::InvalidDelimiter(d));
        }

        let keys = &self.key_bindings;
        let form_bindings = [
            ("submit", &keys.submit),
            ("clear", &keys.clear),
            ("next_field", &keys.next_field),
            ("quit", &keys.quit),
            ("help", &keys.help),
        ];
        for (name, binding) in form_bindings {
            let parsed = utils::parse_key_binding(binding)
                .map_err(|e| ConfigError::InvalidKeyBinding(format!("{}: {}", name, e)))?;
            if matches!(parsed.key_code, KeyCode::Char(_)) && !parsed.requires_ctrl {
                return Err(ConfigError::InvalidKeyBinding(format!(
                    "{} = {:?} needs a Ctrl+ modifier or a special key",
                    name, binding
                )));
            }
        }
        Ok(())
    }

    /// Get the currently active theme: user themes first, then presets, then the built-in default
    pub fn get_active_theme(&self) -> Theme {
        self.themes
            .get(&self.current_theme)
            .cloned()
            .or_else(|| Theme::get_preset_themes().remove(&self.current_theme))
            .unwrap_or_default()
    }

    /// Set the active theme by name
    pub fn set_theme(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.themes.contains_key(name) && !Theme::get_preset_themes().contains_key(name) {
            return Err(ConfigError::ThemeNotFound(name.to_string()));
        }
        self.current_theme = name.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tagcart-config-{}-{}", name, std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("delimiter = \";\"\n[key_bindings]\nsubmit = \"F5\"\n").unwrap();
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.key_bindings.submit, "F5");
        assert_eq!(config.key_bindings.confirm_tag, "Enter");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.current_theme, "default");
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let path = scratch_path("roundtrip");
        let mut config = Config::default();
        config.delimiter = '|';
        config.set_theme("light").unwrap();
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.delimiter, '|');
        assert_eq!(loaded.current_theme, "light");
        assert_eq!(loaded.config_version, Some(CURRENT_CONFIG_VERSION));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn whitespace_delimiter_is_rejected() {
        let path = scratch_path("whitespace");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "delimiter = \" \"\n").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDelimiter(' ')));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn letter_delimiter_is_rejected() {
        let config = Config { delimiter: 'x', ..Config::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDelimiter('x'))));
        assert!(Config { delimiter: ';', ..Config::default() }.validate().is_ok());
    }

    #[test]
    fn bare_character_form_bindings_are_rejected() {
        let mut config = Config::default();
        config.key_bindings.submit = "s".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidKeyBinding(_))));

        config.key_bindings.submit = "Ctrl+s".to_string();
        config.key_bindings.help = "Space".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidKeyBinding(_))));

        config.key_bindings.help = "F1".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_theme_is_rejected_and_active_theme_falls_back() {
        let mut config = Config::default();
        assert!(matches!(config.set_theme("neon"), Err(ConfigError::ThemeNotFound(_))));

        config.current_theme = "neon".to_string();
        assert_eq!(config.get_active_theme(), Theme::default());
    }

    #[test]
    fn user_theme_wins_over_preset_with_same_name() {
        let mut config = Config::default();
        let custom = Theme { chip_bg: "magenta".to_string(), ..Theme::default() };
        config.themes.insert("light".to_string(), custom.clone());
        config.set_theme("light").unwrap();
        assert_eq!(config.get_active_theme(), custom);
    }
}
