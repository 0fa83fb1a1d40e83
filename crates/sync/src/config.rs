// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync subsystem configuration.
//!
//! Settings are stored as TOML (typically `sync.toml` next to the store)
//! and every field has a default, so a missing or partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::EngineConfig;
use crate::queue::QUEUE_KEY;

/// Default settings file name.
pub const SETTINGS_FILE_NAME: &str = "sync.toml";

const STORE_FILE_NAME: &str = "sync.db";

/// Error type for configuration handling.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunable settings for the sync subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncSettings {
    /// Base retry delay in milliseconds (default: 2000).
    #[serde(default = "default_base_backoff_ms")]
    pub base_backoff_ms: u64,
    /// Failed attempts tolerated before an action is dropped (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Originating-agent string sent with every ledger record.
    #[serde(default = "default_agent")]
    pub agent: String,
    /// Store key for the queue snapshot.
    #[serde(default = "default_queue_key")]
    pub queue_key: String,
    /// Path for the SQLite store. Defaults under the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

fn default_base_backoff_ms() -> u64 {
    2_000
}

fn default_max_retries() -> u32 {
    3
}

fn default_agent() -> String {
    concat!("waymark-client/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_queue_key() -> String {
    QUEUE_KEY.to_string()
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            base_backoff_ms: default_base_backoff_ms(),
            max_retries: default_max_retries(),
            agent: default_agent(),
            queue_key: default_queue_key(),
            store_path: None,
        }
    }
}

impl SyncSettings {
    /// Loads settings from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Loads settings, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Writes the settings to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolves the store path, defaulting to the platform data dir.
    pub fn store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("waymark")
                .join(STORE_FILE_NAME)
        })
    }

    /// The engine tuning derived from these settings.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            base_backoff_ms: self.base_backoff_ms,
            max_retries: self.max_retries,
            agent: self.agent.clone(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
