//! Configuration loading for sprintdeck.
//!
//! The configuration file lives at `<config_dir>/sprintdeck/config.toml` and
//! holds a `[settings]` table plus one `[[profiles]]` entry per Jira instance.

mod profile;
mod settings;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use profile::Profile;
pub use settings::{LogFormat, Settings};

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform has no configuration directory.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    ValidationError(String),

    /// The requested profile does not exist.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    /// No profiles are configured.
    #[error("no profiles configured; add a [[profiles]] entry to {0}")]
    NoProfiles(PathBuf),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    /// Where the file was loaded from.
    #[serde(skip)]
    pub path: PathBuf,
}

impl Config {
    /// Default location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if the platform has no config dir.
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("sprintdeck").join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from `path`, or from [`Config::default_path`] when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        Self::from_path(&path)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading configuration");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config =
            toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            })?;
        config.path = path.to_path_buf();
        config.settings = config.settings.normalized();
        config.validate()?;

        info!(profiles = config.profiles.len(), "Configuration loaded");
        Ok(config)
    }

    /// Validate every profile and reject duplicate names.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for profile in &self.profiles {
            profile.validate()?;
            if !names.insert(profile.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate profile name '{}'",
                    profile.name
                )));
            }
        }

        if let Some(default) = &self.settings.default_profile {
            if !names.contains(default.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "default_profile '{}' does not match any profile",
                    default
                )));
            }
        }

        Ok(())
    }

    /// Pick the profile to connect with.
    ///
    /// An explicit name wins, then `settings.default_profile`, then the only
    /// configured profile.
    pub fn select_profile(&self, requested: Option<&str>) -> Result<&Profile> {
        let wanted = requested.or(self.settings.default_profile.as_deref());

        match wanted {
            Some(name) => self
                .profiles
                .iter()
                .find(|p| p.name == name)
                .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string())),
            None => match self.profiles.as_slice() {
                [] => Err(ConfigError::NoProfiles(self.path.clone())),
                [only] => Ok(only),
                _ => Err(ConfigError::ValidationError(
                    "several profiles configured; pass --profile or set settings.default_profile"
                        .to_string(),
                )),
            },
        }
    }
}
