//! Editor configuration
//!
//! Configuration is versioned JSON. Missing fields take their defaults; an
//! unknown version is refused by [`parse_config`] and replaced with defaults by
//! [`load_config_safe`].

use serde::{Deserialize, Serialize};
use services_goal_remote::SinkConfig;
use thiserror::Error;

/// What to do with amount text that does not parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountPolicy {
    /// Write NaN through to the store and the sink on every keystroke
    #[default]
    PropagateInvalid,
    /// Keep NaN in the local mirror only until a number is typed
    WithholdInvalid,
}

/// Goal editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Version of the configuration format
    pub version: u32,
    /// Handling of unparseable amounts
    pub amount_policy: AmountPolicy,
    /// Remote sink settings
    pub sink: SinkConfig,
}

impl EditorConfig {
    /// Current version of the configuration format
    pub const CURRENT_VERSION: u32 = 1;
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            amount_policy: AmountPolicy::default(),
            sink: SinkConfig::default(),
        }
    }
}

/// Errors from reading configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse editor config: {0}")]
    Parse(String),

    #[error("Unsupported editor config version: {0}")]
    UnsupportedVersion(u32),
}

/// Parses configuration from JSON bytes
pub fn parse_config(bytes: &[u8]) -> Result<EditorConfig, ConfigError> {
    let config: EditorConfig =
        serde_json::from_slice(bytes).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if config.version != EditorConfig::CURRENT_VERSION {
        return Err(ConfigError::UnsupportedVersion(config.version));
    }

    Ok(config)
}

/// Parses configuration, falling back to defaults on error
pub fn load_config_safe(bytes: &[u8]) -> EditorConfig {
    parse_config(bytes).unwrap_or_else(|err| {
        tracing::warn!(%err, "using default editor config");
        EditorConfig::default()
    })
}
