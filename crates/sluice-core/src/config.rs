//! Configuration system for Sluice.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $SLUICE_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/sluice/config.toml
//!   3. ~/.config/sluice/config.toml
//!
//! Only runtime wiring parameters live here. Wire-format widths
//! (FLIT_DATA_BYTES) are build-time constants, not configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SluiceConfig {
    pub channels: ChannelConfig,
    pub elastic: ElasticConfig,
}

/// Bounded-FIFO depths, per channel kind. A depth is the number of items a
/// channel holds before writers see it full.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Raw flit channels between relay stages.
    pub flit_depth: usize,
    /// Payload-data record channels downstream of the extractor.
    pub data_depth: usize,
    /// Metadata record channels. One item per packet, so shallow.
    pub meta_depth: usize,
    /// Per-packet keep/drop decision channel.
    pub decision_depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticConfig {
    /// Whether elastic registers consult the output's full signal before
    /// writing. Disable when the downstream channel is always ready; the
    /// check is then a needless stall.
    pub check_full: bool,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

impl Default for SluiceConfig {
    fn default() -> Self {
        Self {
            channels: ChannelConfig::default(),
            elastic: ElasticConfig::default(),
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            flit_depth: 16,
            data_depth: 32,
            meta_depth: 8,
            decision_depth: 8,
        }
    }
}

impl Default for ElasticConfig {
    fn default() -> Self {
        Self { check_full: true }
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("sluice")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

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

// ── Loading ───────────────────────────────────────────────────────────────────

impl SluiceConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::file_path();
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadFailed(path.clone(), e))?;
            toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.clone(), e))?
        } else {
            SluiceConfig::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("SLUICE_CONFIG")
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
            let text = toml::to_string_pretty(&SluiceConfig::default())
                .map_err(ConfigError::SerializeFailed)?;
            std::fs::write(&path, text)
                .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
        }
        Ok(path)
    }

    /// Apply SLUICE_* env var overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SLUICE_CHANNELS__FLIT_DEPTH") {
            if let Ok(d) = v.parse() {
                self.channels.flit_depth = d;
            }
        }
        if let Ok(v) = std::env::var("SLUICE_CHANNELS__DATA_DEPTH") {
            if let Ok(d) = v.parse() {
                self.channels.data_depth = d;
            }
        }
        if let Ok(v) = std::env::var("SLUICE_CHANNELS__META_DEPTH") {
            if let Ok(d) = v.parse() {
                self.channels.meta_depth = d;
            }
        }
        if let Ok(v) = std::env::var("SLUICE_CHANNELS__DECISION_DEPTH") {
            if let Ok(d) = v.parse() {
                self.channels.decision_depth = d;
            }
        }
        if let Ok(v) = std::env::var("SLUICE_ELASTIC__CHECK_FULL") {
            self.elastic.check_full = v == "true" || v == "1";
        }
    }
}
