//! Domain types and validators for autodock configuration.
//!
//! Pure functions only: no I/O and no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::descriptor::BaseImages;
use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "engine.binary",
    "logs.tail",
    "images.node",
    "images.python",
    "images.nginx",
];

pub const DEFAULT_ENGINE_BINARY: &str = "docker";
pub const DEFAULT_LOG_TAIL: u32 = 100;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.autodock/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AutodockConfig {
    pub engine: EngineConfig,
    pub logs: LogsConfig,
    pub images: ImagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Container engine executable, looked up on `PATH`.
    pub binary: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_ENGINE_BINARY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogsConfig {
    /// Lines shown by `autodock logs`.
    pub tail: u32,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            tail: DEFAULT_LOG_TAIL,
        }
    }
}

/// Base images of the generated descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImagesConfig {
    pub node: String,
    pub python: String,
    pub nginx: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        let BaseImages {
            node,
            python,
            nginx,
        } = BaseImages::default();
        Self {
            node,
            python,
            nginx,
        }
    }
}

impl AutodockConfig {
    #[must_use]
    pub fn base_images(&self) -> BaseImages {
        BaseImages {
            node: self.images.node.clone(),
            python: self.images.python.clone(),
            nginx: self.images.nginx.clone(),
        }
    }

    /// Current value of a whitelisted key, `None` for unknown keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "engine.binary" => Some(self.engine.binary.clone()),
            "logs.tail" => Some(self.logs.tail.to_string()),
            "images.node" => Some(self.images.node.clone()),
            "images.python" => Some(self.images.python.clone()),
            "images.nginx" => Some(self.images.nginx.clone()),
            _ => None,
        }
    }

    /// Check every value against its key's validator.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> Result<()> {
        for key in VALID_CONFIG_KEYS {
            if let Some(value) = self.get(key) {
                validate_config_value(key, &value)?;
            }
        }
        Ok(())
    }

    /// Validate and apply a key/value pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        let value = value.trim().to_string();
        match key {
            "engine.binary" => self.engine.binary = value,
            "logs.tail" => self.logs.tail = parse_tail(key, &value)?,
            "images.node" => self.images.node = value,
            "images.python" => self.images.python = value,
            "images.nginx" => self.images.nginx = value,
            _ => {}
        }
        Ok(())
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let value = value.trim();
    if key == "logs.tail" {
        parse_tail(key, value)?;
        return Ok(());
    }
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            hint: "Value must be non-empty and contain no whitespace.".to_string(),
        }
        .into());
    }
    Ok(())
}

fn parse_tail(key: &str, value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            hint: "Value must be a positive integer.".to_string(),
        }
        .into()),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
