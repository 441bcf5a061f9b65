//! Engine configuration
//!
//! Configuration is read from a TOML file, then overridden by `SMARTCITY_*`
//! environment variables, then validated:
//!
//! ```toml
//! seed = "data/areas.toml"
//! duplicate_policy = "reject"
//!
//! [services]
//! waste = 60
//! traffic = 70
//! energy = 65
//! ```
//!
//! A missing file is not an error; defaults apply.

use crate::selector::Service;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "SMARTCITY_";

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Failed to read config file {path}: {reason}")]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        reason: String,
    },

    /// Config file is not valid TOML for [`EngineConfig`]
    #[error("Failed to parse config file {path}: {reason}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// A value is out of range or malformed
    #[error("Invalid configuration: {key} - {reason}")]
    Invalid {
        /// Offending key
        key: String,
        /// What is wrong with it
        reason: String,
    },
}

impl ConfigError {
    /// Create an invalid configuration error
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// What an assertion does when the name is already stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Refuse the assertion with `DuplicateName`
    #[default]
    Reject,
    /// Replace the stored fact, keeping its position in iteration order
    Overwrite,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Reject => f.write_str("reject"),
            DuplicatePolicy::Overwrite => f.write_str("overwrite"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            other => Err(ConfigError::invalid(
                "duplicate_policy",
                format!("expected `reject` or `overwrite`, got `{other}`"),
            )),
        }
    }
}

/// Thresholds above which an area needs a service.
///
/// A service is needed iff the service's metric is strictly greater than its
/// threshold. The defaults are tuning values, not derived from any data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceThresholds {
    /// Waste level above which waste collection is needed (default 60)
    pub waste: i64,
    /// Traffic level above which traffic management is needed (default 70)
    pub traffic: i64,
    /// Energy level above which energy supply is needed (default 65)
    pub energy: i64,
}

impl Default for ServiceThresholds {
    fn default() -> Self {
        Self {
            waste: 60,
            traffic: 70,
            energy: 65,
        }
    }
}

impl ServiceThresholds {
    /// Threshold for one service
    pub fn threshold(&self, service: Service) -> i64 {
        match service {
            Service::Waste => self.waste,
            Service::Traffic => self.traffic,
            Service::Energy => self.energy,
        }
    }

    /// Replace the threshold for one service
    pub fn set(&mut self, service: Service, threshold: i64) {
        match service {
            Service::Waste => self.waste = threshold,
            Service::Traffic => self.traffic = threshold,
            Service::Energy => self.energy = threshold,
        }
    }
}

/// Knowledge base configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Seed fact file loaded at startup
    pub seed: Option<PathBuf>,
    /// Behavior of `assert` on an existing name
    pub duplicate_policy: DuplicatePolicy,
    /// `can_service` thresholds
    pub services: ServiceThresholds,
}

impl EngineConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            reason: e.to_string(),
        })
    }

    /// Load configuration from a file, falling back to defaults if it is absent.
    ///
    /// A relative `seed` path is resolved against the config file's directory.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file absent, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if let (Some(seed), Some(parent)) = (config.seed.as_mut(), path.parent()) {
            if seed.is_relative() {
                *seed = parent.join(&*seed);
            }
        }

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Apply `SMARTCITY_*` overrides from the process environment
    pub fn merge_with_env(&mut self) -> Result<(), ConfigError> {
        self.merge_with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn merge_with_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));

        if let Some(policy) = var("DUPLICATE_POLICY") {
            self.duplicate_policy = policy.parse()?;
        }
        if let Some(seed) = var("SEED") {
            self.seed = Some(PathBuf::from(seed));
        }
        for service in Service::ALL {
            let suffix = format!("{}_THRESHOLD", service.as_str().to_ascii_uppercase());
            if let Some(raw) = var(&suffix) {
                let threshold = raw.trim().parse::<i64>().map_err(|e| {
                    ConfigError::invalid(format!("{ENV_PREFIX}{suffix}"), e.to_string())
                })?;
                self.services.set(service, threshold);
            }
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(seed) = &self.seed {
            if seed.as_os_str().is_empty() {
                return Err(ConfigError::invalid("seed", "path cannot be empty"));
            }
        }
        Ok(())
    }

    /// Load, apply environment overrides, and validate
    pub fn resolve(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from_file(path)?;
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }
}
