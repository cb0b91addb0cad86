//! Top-level Valence configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{BondConfig, HealthConfig, PatternConfig, ScoringConfig};
use crate::constants::CONFIG_FILE_NAME;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (`ConfigOverrides`)
/// 2. Environment variables (`VALENCE_*`)
/// 3. Project config (`valence.toml` in the analysis root)
/// 4. User config (`~/.valence/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ValenceConfig {
    pub bonds: BondConfig,
    pub health: HealthConfig,
    pub scoring: ScoringConfig,
    pub patterns: PatternConfig,
}

/// Override arguments applied on top of every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub strength_scale: Option<f64>,
    pub max_connectivity: Option<u32>,
    pub max_responsibilities: Option<u32>,
    pub unstable_bond_threshold: Option<f64>,
    pub enforce_component_roles: Option<bool>,
}

impl ValenceConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate every sub-config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bonds.validate()?;
        self.health.validate()?;
        self.scoring.validate()?;
        Ok(())
    }

    /// Path of the user-level config file, if a home directory is known.
    pub fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".valence").join("config.toml"))
    }

    /// Parse a TOML file and merge its set values over `config`.
    fn merge_toml_file(config: &mut ValenceConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let file_config: ValenceConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.merge(&file_config);
        Ok(())
    }

    /// Merge `other` into `self`; only values `other` sets are copied.
    pub fn merge(&mut self, other: &ValenceConfig) {
        self.bonds.merge(&other.bonds);
        self.health.merge(&other.health);
        self.scoring.merge(&other.scoring);
        self.patterns.merge(&other.patterns);
    }

    /// Apply environment variable overrides.
    /// A set variable that does not parse is an error, not a silent fallback.
    fn apply_env_overrides(config: &mut ValenceConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_value::<f64>("VALENCE_BONDS_SCALE")? {
            config.bonds.strength_scale = Some(v);
        }
        if let Some(v) = env_value::<usize>("VALENCE_PARALLEL_EDGE_THRESHOLD")? {
            config.bonds.parallel_edge_threshold = Some(v);
        }
        if let Some(v) = env_value::<u32>("VALENCE_HEALTH_MAX_CONNECTIVITY")? {
            config.health.max_connectivity = Some(v);
        }
        if let Some(v) = env_value::<u32>("VALENCE_HEALTH_MAX_RESPONSIBILITIES")? {
            config.health.max_responsibilities = Some(v);
        }
        if let Some(v) = env_value::<f64>("VALENCE_SCORING_UNSTABLE_BOND_THRESHOLD")? {
            config.scoring.unstable_bond_threshold = Some(v);
        }
        if let Some(v) = env_value::<bool>("VALENCE_PATTERNS_ENFORCE_ROLES")? {
            config.patterns.enforce_component_roles = Some(v);
        }
        Ok(())
    }

    fn apply_overrides(config: &mut ValenceConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.strength_scale {
            config.bonds.strength_scale = Some(v);
        }
        if let Some(v) = overrides.max_connectivity {
            config.health.max_connectivity = Some(v);
        }
        if let Some(v) = overrides.max_responsibilities {
            config.health.max_responsibilities = Some(v);
        }
        if let Some(v) = overrides.unstable_bond_threshold {
            config.scoring.unstable_bond_threshold = Some(v);
        }
        if let Some(v) = overrides.enforce_component_roles {
            config.patterns.enforce_component_roles = Some(v);
        }
    }
}

/// Read and parse `key` from the environment. Unset yields `Ok(None)`.
fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("cannot parse {raw:?}"),
            }),
        Err(_) => Ok(None),
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
