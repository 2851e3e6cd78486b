//! Configuration System
//!
//! Loads session parameters from a TOML file. Every section is optional and
//! falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use haunt_events::{EvidenceKind, GhostClass};

use crate::setup::agents::default_hunter_names;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "haunt.toml";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Complete session configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub session: GeneralConfig,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub hunters: HunterConfig,
    #[serde(default)]
    pub ghost: GhostConfig,
}

/// General session settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Seed for the setup RNG; drawn from entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Counter maxima. Reaching either is terminal for the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub fear_max: u32,
    pub boredom_max: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            fear_max: 10,
            boredom_max: 100,
        }
    }
}

/// Inter-tick delays, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub ghost_wait_us: u64,
    pub hunter_wait_us: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ghost_wait_us: 600,
            hunter_wait_us: 5000,
        }
    }
}

impl TimingConfig {
    pub fn ghost_interval(&self) -> Duration {
        Duration::from_micros(self.ghost_wait_us)
    }

    pub fn hunter_interval(&self) -> Duration {
        Duration::from_micros(self.hunter_wait_us)
    }
}

/// Hunter roster settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HunterConfig {
    pub count: usize,
    /// Names for the first hunters; the rest get default names
    pub names: Vec<String>,
}

impl Default for HunterConfig {
    fn default() -> Self {
        Self {
            count: 4,
            names: Vec::new(),
        }
    }
}

/// Ghost settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    /// Fixed class; random when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<GhostClass>,
    /// Fixed starting room name; a random room other than the van when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_room: Option<String>,
}

impl SessionConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks the values are usable for a session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.hunters.count;
        let max_hunters = EvidenceKind::ALL.len();
        if count == 0 || count > max_hunters {
            return Err(ConfigError::Invalid(format!(
                "hunter count must be between 1 and {}, got {}",
                max_hunters, count
            )));
        }
        if self.hunters.names.len() > count {
            return Err(ConfigError::Invalid(format!(
                "{} hunter names given for {} hunters",
                self.hunters.names.len(),
                count
            )));
        }

        let names = self.hunter_names();
        let unique: HashSet<&str> = names.iter().map(String::as_str).collect();
        if unique.len() != names.len() {
            return Err(ConfigError::Invalid("hunter names must be unique".into()));
        }
        if names.iter().any(|n| n.trim().is_empty()) {
            return Err(ConfigError::Invalid("hunter names must not be empty".into()));
        }

        if self.limits.fear_max == 0 || self.limits.boredom_max == 0 {
            return Err(ConfigError::Invalid(
                "fear_max and boredom_max must be positive".into(),
            ));
        }
        if self.timing.ghost_wait_us >= self.timing.hunter_wait_us {
            return Err(ConfigError::Invalid(format!(
                "ghost_wait_us ({}) must be shorter than hunter_wait_us ({})",
                self.timing.ghost_wait_us, self.timing.hunter_wait_us
            )));
        }
        Ok(())
    }

    /// Names for every hunter, configured names first
    pub fn hunter_names(&self) -> Vec<String> {
        let count = self.hunters.count;
        let mut names: Vec<String> = self.hunters.names.iter().take(count).cloned().collect();
        let defaults = default_hunter_names(count);
        names.extend(defaults.into_iter().skip(names.len()));
        names
    }
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Haunted House Configuration

[session]
# seed = 42

[limits]
fear_max = 10
boredom_max = 100

[timing]
ghost_wait_us = 600
hunter_wait_us = 5000

[hunters]
count = 4
names = []

[ghost]
# class = "phantom"
# start_room = "Kitchen"
"#
    .to_string()
}
