use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::language::Language;
use crate::theme::ThemeKind;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "exhibit";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    /// 1-indexed, like `--slide`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `exhibit config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# Exhibit configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn theme(&self) -> Option<&str> {
        self.defaults.as_ref()?.theme.as_deref()
    }

    pub fn language(&self) -> Option<Language> {
        self.defaults.as_ref()?.language
    }

    pub fn start_slide(&self) -> Option<usize> {
        self.defaults.as_ref()?.start_slide
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                let Some(kind) = ThemeKind::from_name(value) else {
                    anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'.");
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(kind.name().to_string());
            }
            "defaults.language" => {
                let Some(language) = Language::from_tag(value) else {
                    anyhow::bail!("Invalid language: {value}. Must be 'en' or 'fr'.");
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .language = Some(language);
            }
            "defaults.start_slide" => {
                let slide = match value.parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => anyhow::bail!(
                        "Invalid start_slide: {value}. Must be a slide number starting at 1."
                    ),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_slide = Some(slide);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.language, defaults.start_slide"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_valid_keys() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.language", "fr").unwrap();
        config.set("defaults.start_slide", "3").unwrap();

        assert_eq!(config.theme(), Some("dark"));
        assert_eq!(config.language(), Some(Language::Fr));
        assert_eq!(config.start_slide(), Some(3));

        config.set("defaults.theme", "Light").unwrap();
        assert_eq!(config.theme(), Some("light"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "blue").is_err());
        assert!(config.set("defaults.language", "de").is_err());
        assert!(config.set("defaults.start_slide", "0").is_err());
        assert!(config.set("defaults.nope", "1").is_err());
        assert!(config.defaults.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("exhibit-config-{}", std::process::id()));
        let path = dir.join(FILENAME);

        let mut config = Config::default();
        config.set("defaults.language", "FR").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.language(), Some(Language::Fr));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_message() {
        let err = Config::load_from(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }
}
