//! Configuration system for Switchyard.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $SWITCHYARD_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/switchyard/config.toml
//!   3. ~/.config/switchyard/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchyardConfig {
    pub dispatch: DispatchConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Log (at debug) messages whose sender id has no route.
    pub log_unknown_senders: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Maximum origin-registry entries. Inserts beyond this are refused.
    pub max_entries: usize,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

impl Default for SwitchyardConfig {
    fn default() -> Self {
        Self {
            dispatch: DispatchConfig::default(),
            registry: RegistryConfig::default(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            log_unknown_senders: true,
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { max_entries: 65536 }
    }
}

// ── Path helpers ─────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("switchyard")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {0}: {1}")]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
}

// ── Loading ──────────────────────────────────────────────────────────────────

impl SwitchyardConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::file_path();
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadFailed(path.clone(), e))?;
            toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.clone(), e))?
        } else {
            SwitchyardConfig::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("SWITCHYARD_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        let path = Self::file_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
            }
            let text = toml::to_string_pretty(&SwitchyardConfig::default())
                .map_err(ConfigError::SerializeFailed)?;
            std::fs::write(&path, text)
                .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
        }
        Ok(path)
    }

    /// Apply SWITCHYARD_* env var overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SWITCHYARD_DISPATCH__LOG_UNKNOWN_SENDERS") {
            self.dispatch.log_unknown_senders = v == "true" || v == "1";
        }
        if let Ok(v) = std::env::var("SWITCHYARD_REGISTRY__MAX_ENTRIES") {
            if let Ok(n) = v.parse() {
                self.registry.max_entries = n;
            }
        }
    }
}
