//! Application configuration management.
//!
//! This module handles the persistent tagging preferences for keytag: which
//! notation to write, how each tag field receives the key (prepend, append,
//! overwrite, or not at all), the delimiter used when concatenating, and the
//! custom code tables. Configuration is stored in the user's config directory
//! (typically ~/.config/keytag/config.toml).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::CUSTOM_CODE_COUNT;
use crate::tagging::Field;

/// Which rendering of a key gets written to tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notation {
    #[default]
    Keys,
    CustomCodes,
    Both,
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Keys => write!(f, "keys"),
            Notation::CustomCodes => write!(f, "custom-codes"),
            Notation::Both => write!(f, "both"),
        }
    }
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keys" => Ok(Notation::Keys),
            "custom-codes" => Ok(Notation::CustomCodes),
            "both" => Ok(Notation::Both),
            _ => Err(format!(
                "invalid notation '{s}' (expected keys, custom-codes or both)"
            )),
        }
    }
}

/// How a field receives the key on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteBehavior {
    No,
    Prepend,
    Append,
    Overwrite,
}

impl WriteBehavior {
    /// Title, artist and album never get overwritten wholesale; the key
    /// field never gets concatenated.
    pub fn allowed_for(self, field: Field) -> bool {
        match field {
            Field::Title | Field::Artist | Field::Album => !matches!(self, WriteBehavior::Overwrite),
            Field::Comment | Field::Grouping => true,
            Field::Key => matches!(self, WriteBehavior::No | WriteBehavior::Overwrite),
        }
    }
}

impl fmt::Display for WriteBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteBehavior::No => write!(f, "no"),
            WriteBehavior::Prepend => write!(f, "prepend"),
            WriteBehavior::Append => write!(f, "append"),
            WriteBehavior::Overwrite => write!(f, "overwrite"),
        }
    }
}

impl FromStr for WriteBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" => Ok(WriteBehavior::No),
            "prepend" => Ok(WriteBehavior::Prepend),
            "append" => Ok(WriteBehavior::Append),
            "overwrite" => Ok(WriteBehavior::Overwrite),
            _ => Err(format!(
                "invalid write behavior '{s}' (expected no, prepend, append or overwrite)"
            )),
        }
    }
}

/// Per-field write behaviors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldBehaviors {
    #[serde(default = "default_behavior_no")]
    pub title: WriteBehavior,
    #[serde(default = "default_behavior_no")]
    pub artist: WriteBehavior,
    #[serde(default = "default_behavior_no")]
    pub album: WriteBehavior,
    #[serde(default = "default_behavior_overwrite")]
    pub comment: WriteBehavior,
    #[serde(default = "default_behavior_no")]
    pub grouping: WriteBehavior,
    #[serde(default = "default_behavior_no")]
    pub key: WriteBehavior,
}

impl FieldBehaviors {
    pub fn behavior(&self, field: Field) -> WriteBehavior {
        match field {
            Field::Title => self.title,
            Field::Artist => self.artist,
            Field::Album => self.album,
            Field::Comment => self.comment,
            Field::Grouping => self.grouping,
            Field::Key => self.key,
        }
    }

    fn set(&mut self, field: Field, behavior: WriteBehavior) {
        match field {
            Field::Title => self.title = behavior,
            Field::Artist => self.artist = behavior,
            Field::Album => self.album = behavior,
            Field::Comment => self.comment = behavior,
            Field::Grouping => self.grouping = behavior,
            Field::Key => self.key = behavior,
        }
    }
}

impl Default for FieldBehaviors {
    fn default() -> Self {
        Self {
            title: WriteBehavior::No,
            artist: WriteBehavior::No,
            album: WriteBehavior::No,
            comment: WriteBehavior::Overwrite,
            grouping: WriteBehavior::No,
            key: WriteBehavior::No,
        }
    }
}

fn default_behavior_no() -> WriteBehavior {
    WriteBehavior::No
}

fn default_behavior_overwrite() -> WriteBehavior {
    WriteBehavior::Overwrite
}

fn default_field_delimiter() -> String {
    " - ".to_string()
}

/// Camelot wheel codes, indexed by pitch class from A.
fn default_custom_codes_major() -> Vec<String> {
    [4, 11, 6, 1, 8, 3, 10, 5, 12, 7, 2, 9]
        .iter()
        .map(|n| format!("{n}d"))
        .collect()
}

fn default_custom_codes_minor() -> Vec<String> {
    [1, 8, 3, 10, 5, 12, 7, 2, 9, 4, 11, 6]
        .iter()
        .map(|n| format!("{n}m"))
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub what_to_write: Notation,
    #[serde(default = "default_field_delimiter")]
    pub field_delimiter: String,
    #[serde(default)]
    pub skip_tagged_files: bool,
    #[serde(default)]
    pub write: FieldBehaviors,
    #[serde(default = "default_custom_codes_major")]
    pub custom_codes_major: Vec<String>,
    #[serde(default = "default_custom_codes_minor")]
    pub custom_codes_minor: Vec<String>,
    #[serde(default)]
    pub custom_code_silence: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            what_to_write: Notation::Keys,
            field_delimiter: default_field_delimiter(),
            skip_tagged_files: false,
            write: FieldBehaviors::default(),
            custom_codes_major: default_custom_codes_major(),
            custom_codes_minor: default_custom_codes_minor(),
            custom_code_silence: String::new(),
        }
    }

    pub fn config_dir() -> Result<PathBuf, Box<dyn Error>> {
        // Check for XDG_CONFIG_HOME first (useful for testing)
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config).join("keytag")
        } else {
            dirs::config_dir()
                .ok_or("Unable to find config directory")?
                .join("keytag")
        };
        Ok(config_dir)
    }

    pub fn config_path() -> Result<PathBuf, Box<dyn Error>> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            // Return default config instead of error
            return Ok(Default::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;

        Ok(())
    }

    pub fn exists() -> Result<bool, Box<dyn Error>> {
        Ok(Self::config_path()?.exists())
    }

    /// Reject combinations a hand-edited config file could smuggle in.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        for field in Field::ALL {
            let behavior = self.write.behavior(field);
            if !behavior.allowed_for(field) {
                return Err(format!(
                    "write behavior '{behavior}' is not allowed for the {} field",
                    field.name()
                )
                .into());
            }
        }
        if self.custom_codes_major.len() != CUSTOM_CODE_COUNT {
            return Err(format!(
                "custom_codes_major must have {CUSTOM_CODE_COUNT} entries, found {}",
                self.custom_codes_major.len()
            )
            .into());
        }
        if self.custom_codes_minor.len() != CUSTOM_CODE_COUNT {
            return Err(format!(
                "custom_codes_minor must have {CUSTOM_CODE_COUNT} entries, found {}",
                self.custom_codes_minor.len()
            )
            .into());
        }
        Ok(())
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        match key {
            "what_to_write" => self.what_to_write = value.parse()?,
            "field_delimiter" => self.field_delimiter = value.to_string(),
            "skip_tagged_files" => {
                self.skip_tagged_files = value
                    .parse::<bool>()
                    .map_err(|_| "Value must be 'true' or 'false'")?;
            }
            "custom_code_silence" => self.custom_code_silence = value.to_string(),
            _ => {
                if let Some(field_name) = key.strip_prefix("write.") {
                    let field = Field::ALL
                        .into_iter()
                        .find(|field| field.name() == field_name)
                        .ok_or_else(|| format!("Unknown tag field: {field_name}"))?;
                    let behavior: WriteBehavior = value.parse()?;
                    if !behavior.allowed_for(field) {
                        return Err(format!(
                            "write behavior '{behavior}' is not allowed for the {} field",
                            field.name()
                        )
                        .into());
                    }
                    self.write.set(field, behavior);
                } else {
                    return Err(format!("Unknown configuration key: {key}").into());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Use a mutex to ensure tests that modify environment variables don't run concurrently
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.what_to_write, Notation::Keys);
        assert_eq!(config.field_delimiter, " - ");
        assert!(!config.skip_tagged_files);
        assert_eq!(config.write.comment, WriteBehavior::Overwrite);
        assert_eq!(config.write.title, WriteBehavior::No);
        assert_eq!(config.write.key, WriteBehavior::No);
        assert_eq!(config.custom_codes_major.len(), CUSTOM_CODE_COUNT);
        assert_eq!(config.custom_codes_minor.len(), CUSTOM_CODE_COUNT);
        config.validate().unwrap();
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::new();

        config.set_value("what_to_write", "custom-codes").unwrap();
        assert_eq!(config.what_to_write, Notation::CustomCodes);

        config.set_value("field_delimiter", " / ").unwrap();
        assert_eq!(config.field_delimiter, " / ");

        config.set_value("skip_tagged_files", "true").unwrap();
        assert!(config.skip_tagged_files);
        assert!(config.set_value("skip_tagged_files", "maybe").is_err());

        config.set_value("write.title", "prepend").unwrap();
        assert_eq!(config.write.title, WriteBehavior::Prepend);

        config.set_value("write.key", "overwrite").unwrap();
        assert_eq!(config.write.key, WriteBehavior::Overwrite);

        assert!(config.set_value("unknown_key", "value").is_err());
        assert!(config.set_value("write.tempo", "append").is_err());
    }

    #[test]
    fn test_set_value_rejects_disallowed_behaviors() {
        let mut config = Config::new();
        assert!(config.set_value("write.title", "overwrite").is_err());
        assert!(config.set_value("write.artist", "overwrite").is_err());
        assert!(config.set_value("write.key", "prepend").is_err());
        assert!(config.set_value("write.key", "append").is_err());
        // comment and grouping take everything
        config.set_value("write.comment", "prepend").unwrap();
        config.set_value("write.grouping", "overwrite").unwrap();
    }

    #[test]
    fn test_validate_rejects_short_code_tables() {
        let mut config = Config::new();
        config.custom_codes_major.pop();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str("what_to_write = \"both\"").unwrap();
        assert_eq!(config.what_to_write, Notation::Both);
        assert_eq!(config.field_delimiter, " - ");
        assert_eq!(config.write.comment, WriteBehavior::Overwrite);
        assert_eq!(config.custom_codes_major.len(), CUSTOM_CODE_COUNT);
    }

    #[test]
    fn test_config_save_and_load() {
        let _guard = ENV_MUTEX.lock().unwrap();

        let temp_dir = TempDir::new().unwrap();
        let original_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        }

        let mut config = Config::new();
        config.field_delimiter = " | ".to_string();
        config.write.grouping = WriteBehavior::Append;
        config.save().unwrap();

        let config_path = Config::config_path().unwrap();
        assert!(config_path.exists());

        let expected_dir = temp_dir.path().join("keytag");
        assert!(config_path.starts_with(&expected_dir));

        let loaded = Config::load().unwrap();
        assert_eq!(loaded.field_delimiter, " | ");
        assert_eq!(loaded.write.grouping, WriteBehavior::Append);
        assert_eq!(loaded.write.comment, WriteBehavior::Overwrite);

        // Clean up - restore original value if it existed
        unsafe {
            if let Some(original) = original_xdg {
                std::env::set_var("XDG_CONFIG_HOME", original);
            } else {
                std::env::remove_var("XDG_CONFIG_HOME");
            }
        }
    }

    #[test]
    fn test_config_exists() {
        let _guard = ENV_MUTEX.lock().unwrap();

        let temp_dir = TempDir::new().unwrap();
        let original_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        }

        let expected_path = temp_dir.path().join("keytag").join("config.toml");
        assert!(!expected_path.exists());
        assert!(!Config::exists().unwrap());

        let config = Config::new();
        config.save().unwrap();

        assert!(expected_path.exists());
        assert!(Config::exists().unwrap());

        unsafe {
            if let Some(original) = original_xdg {
                std::env::set_var("XDG_CONFIG_HOME", original);
            } else {
                std::env::remove_var("XDG_CONFIG_HOME");
            }
        }
    }
}
