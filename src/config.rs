//! Push configuration
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! workers = 8
//! cisco_template = "cisco_acl"
//! unknown_vendor = "reject"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::template::CISCO_ACL_TEMPLATE;

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("workers must be at least 1")]
    NoWorkers,
}

/// What to do with a device whose vendor has no renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownVendorPolicy {
    /// Emit an empty config for the device and report nothing
    #[default]
    Empty,
    /// Leave the device out and report an error for it
    Reject,
}

/// Configuration options for push preparation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushConfig {
    /// Size of the render worker pool
    pub workers: usize,

    /// Name of the layout template used for Cisco devices
    pub cisco_template: String,

    /// Handling of vendors without a registered renderer
    pub unknown_vendor: UnknownVendorPolicy,
}

/// TOML structure for deserializing configuration
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    workers: Option<usize>,
    cisco_template: Option<String>,
    unknown_vendor: Option<UnknownVendorPolicy>,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            cisco_template: CISCO_ACL_TEMPLATE.to_string(),
            unknown_vendor: UnknownVendorPolicy::default(),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl PushConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string; absent keys keep their defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();
        let config = Self {
            workers: parsed.workers.unwrap_or(defaults.workers),
            cisco_template: parsed.cisco_template.unwrap_or(defaults.cisco_template),
            unknown_vendor: parsed.unknown_vendor.unwrap_or(defaults.unknown_vendor),
        };
        if config.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        Ok(config)
    }

    /// Set the worker pool size (at least one worker is always used)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the Cisco layout template name
    pub fn with_cisco_template(mut self, name: impl Into<String>) -> Self {
        self.cisco_template = name.into();
        self
    }

    /// Set the unknown vendor policy
    pub fn with_unknown_vendor(mut self, policy: UnknownVendorPolicy) -> Self {
        self.unknown_vendor = policy;
        self
    }
}
