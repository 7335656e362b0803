//! Configuration types for embedding the option registry
//!
//! The registry itself needs no configuration. These types describe the
//! runtime around it: which host backs the options and how often the host
//! is polled for changes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Smallest accepted tick interval
const MIN_TICK_INTERVAL_MS: u64 = 1;

/// Largest accepted tick interval
const MAX_TICK_INTERVAL_MS: u64 = 10_000;

/// Runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Host backing the options
    #[serde(default)]
    pub host: HostConfig,

    /// Polling settings
    #[serde(default)]
    pub poll: PollConfig,
}

impl RuntimeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.host.validate()?;
        self.poll.validate()?;
        Ok(())
    }
}

/// Host configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostConfig {
    /// In-memory selections
    Memory {
        /// Initial selected label per option id
        #[serde(default)]
        values: HashMap<String, String>,
    },

    /// Selections read from a TOML options file
    File {
        /// Path of the options file
        path: String,
        /// Where to write the published schema as JSON (optional)
        #[serde(default)]
        schema_path: Option<String>,
    },
}

impl HostConfig {
    /// Validate the host configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            HostConfig::File { path, schema_path } => {
                if path.is_empty() {
                    return Err(crate::Error::config("Options file path cannot be empty"));
                }
                if schema_path.as_ref().is_some_and(|p| p.is_empty()) {
                    return Err(crate::Error::config("Schema path cannot be empty"));
                }
                Ok(())
            }
            HostConfig::Memory { .. } => Ok(()),
        }
    }

    /// Get the host type name
    pub fn type_name(&self) -> &'static str {
        match self {
            HostConfig::Memory { .. } => "memory",
            HostConfig::File { .. } => "file",
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        HostConfig::Memory {
            values: HashMap::new(),
        }
    }
}

/// Polling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Interval between change checks, in milliseconds (one frame at 60 Hz
    /// by default)
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks (runs until shutdown when unset)
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

impl PollConfig {
    /// Validate the polling configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(crate::Error::config(format!(
                "Tick interval must be between {} and {} ms. Got: {}",
                MIN_TICK_INTERVAL_MS, MAX_TICK_INTERVAL_MS, self.tick_interval_ms
            )));
        }
        if self.max_ticks == Some(0) {
            return Err(crate::Error::config("Max ticks must be > 0 when set"));
        }
        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: None,
        }
    }
}

fn default_tick_interval_ms() -> u64 {
    16
}
