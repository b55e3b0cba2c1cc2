use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config file at {config_path}: {reason}")]
    InvalidConfig {
        config_path: PathBuf,
        reason: String,
    },
}

/// Tag prefixes for the type/taxonomy toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    pub type_prefix: String,
    pub taxonomy_prefix: String,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            type_prefix: "type-marker-".to_string(),
            taxonomy_prefix: "taxonomy-marker-".to_string(),
        }
    }
}

/// Which pipeline stages run. Their order is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StagesConfig {
    pub contextual: bool,
    pub states: bool,
    pub toggle: bool,
}

impl Default for StagesConfig {
    fn default() -> Self {
        Self {
            contextual: true,
            states: true,
            toggle: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site snapshot used when none is given on the command line
    pub site: Option<PathBuf>,
    pub builtin_states: bool,
    pub selected_states: Vec<String>,
    pub deselected_states: Vec<String>,
    pub toggle: ToggleConfig,
    pub stages: StagesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: None,
            builtin_states: true,
            selected_states: Vec::new(),
            deselected_states: Vec::new(),
            toggle: ToggleConfig::default(),
            stages: StagesConfig::default(),
        }
    }
}

impl Config {
    /// `~/.config/extra-classes/config.toml`
    pub fn default_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde("~/.config/extra-classes/config.toml").as_ref())
    }

    /// Load the config at [`Config::default_path`].
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::default_path())
    }

    /// A missing file is `Ok(None)`; callers fall back to [`Config::default`].
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let content = match std::fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::ConfigReadError {
                    config_path: config_path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&content, config_path).map(Some)
    }

    fn from_toml(content: &str, config_path: &Path) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config
            .validate()
            .map_err(|reason| ConfigError::InvalidConfig {
                config_path: config_path.to_path_buf(),
                reason,
            })?;
        Ok(config.with_resolved_site())
    }

    /// Expand `~` and `$VARS` in the snapshot path. A path naming an unset
    /// variable is kept as written so the later read reports it.
    fn with_resolved_site(mut self) -> Self {
        let resolved = self.site.as_deref().and_then(|site| {
            shellexpand::full(&site.to_string_lossy())
                .ok()
                .map(|expanded| PathBuf::from(expanded.as_ref()))
        });
        if resolved.is_some() {
            self.site = resolved;
        }
        self
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        Ok(())
    }

    /// Marker prefixes end up in class names, so they must be non-empty single tokens.
    pub fn validate(&self) -> Result<(), String> {
        for (key, prefix) in [
            ("toggle.type_prefix", &self.toggle.type_prefix),
            ("toggle.taxonomy_prefix", &self.toggle.taxonomy_prefix),
        ] {
            if prefix.is_empty() {
                return Err(format!("{key} must not be empty"));
            }
            if prefix.chars().any(char::is_whitespace) {
                return Err(format!("{key} must not contain whitespace: '{prefix}'"));
            }
        }
        Ok(())
    }
}
