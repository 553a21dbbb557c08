//! Configuration management for moveez

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Default watch region (ISO 3166-1)
pub const DEFAULT_REGION: &str = "US";

/// Default TMDB response language
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// TMDB API key (v3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_api_key: Option<String>,

    /// OMDb API key; ratings are skipped without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omdb_api_key: Option<String>,

    /// Watch region for provider lookups
    #[serde(default = "default_region")]
    pub region: String,

    /// TMDB response language
    #[serde(default = "default_language")]
    pub language: String,

    /// Custom TMDB host (development/testing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_host: Option<String>,

    /// Custom OMDb host (development/testing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omdb_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            omdb_api_key: None,
            region: default_region(),
            language: default_language(),
            tmdb_host: None,
            omdb_host: None,
            preferences: Preferences::default(),
        }
    }
}

/// Command-line / environment layer applied on top of the file.
///
/// `None` leaves the file value in place.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub tmdb_api_key: Option<String>,
    pub omdb_api_key: Option<String>,
    pub region: Option<String>,
    pub tmdb_host: Option<String>,
    pub omdb_host: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".moveez").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration, treating a missing file as all defaults
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path; the file must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        // TMDB keys provider results by uppercase country code
        config.region = config.region.trim().to_uppercase();
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the resolved path
    pub fn save_at(&self, path: Option<&str>) -> Result<PathBuf> {
        let path = Self::resolve_path(path)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Keys live in here
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Apply flag/env values. Empty strings are ignored.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        if let Some(key) = non_empty(overrides.tmdb_api_key) {
            self.tmdb_api_key = Some(key);
        }
        if let Some(key) = non_empty(overrides.omdb_api_key) {
            self.omdb_api_key = Some(key);
        }
        if let Some(region) = non_empty(overrides.region) {
            self.region = region.to_uppercase();
        }
        if let Some(host) = non_empty(overrides.tmdb_host) {
            self.tmdb_host = Some(host);
        }
        if let Some(host) = non_empty(overrides.omdb_host) {
            self.omdb_host = Some(host);
        }
    }

    /// Check values that would otherwise only fail at request time
    pub fn validate(&self) -> Result<()> {
        let region_ok =
            self.region.len() == 2 && self.region.chars().all(|c| c.is_ascii_alphabetic());
        if !region_ok {
            return Err(ConfigError::Invalid(format!(
                "region must be a two-letter country code, got '{}'",
                self.region
            ))
            .into());
        }
        Ok(())
    }

    /// TMDB key, required by every catalogue command
    pub fn require_tmdb_key(&self) -> Result<&str> {
        self.tmdb_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingTmdbKey.into())
    }
}
