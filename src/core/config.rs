use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SyswardError};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "SYSWARD_DATA_DIR";

const HISTORY_DB_FILE: &str = "history.db";

/// Engine settings, persisted as JSON under the user config directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Where the history database lives
    pub data_dir: PathBuf,
    pub sample_interval_ms: u64,
    /// Pending traffic is flushed to history at most this often
    pub net_commit_interval_secs: u64,
    /// Raw mem-opt and net records older than this are pruned; rollups stay
    pub retention_days: u32,
    pub daily_window_days: u32,
    pub recent_clean_records: usize,
    pub recent_mem_opt_records: usize,
    pub ip_lookup_url: String,
    pub ip_lookup_timeout_secs: u64,
    pub ip_cache_ttl_secs: u64,
    /// Wait between reclaiming memory and measuring again
    pub memory_settle_ms: u64,
    pub default_large_file_mb: u64,
    /// GitHub `owner/name` queried for new releases
    pub update_repo: String,
    /// Start the CPU/memory/network sampling loops with the engine
    pub background_sampling: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            sample_interval_ms: 1000,
            net_commit_interval_secs: 30,
            retention_days: 90,
            daily_window_days: 30,
            recent_clean_records: 100,
            recent_mem_opt_records: 10,
            ip_lookup_url: "http://ip-api.com/json/?fields=query,country,regionName,city,isp".to_string(),
            ip_lookup_timeout_secs: 5,
            ip_cache_ttl_secs: 300,
            memory_settle_ms: 500,
            default_large_file_mb: 50,
            update_repo: "sysward/sysward".to_string(),
            background_sampling: true,
        }
    }
}

impl EngineConfig {
    /// Load from the user config directory, falling back to defaults.
    ///
    /// A missing file yields defaults silently; an unreadable or corrupted one
    /// yields defaults with a warning.
    pub fn load() -> Self {
        let config = match Self::get_config_path() {
            Ok(path) => Self::load_from(&path).unwrap_or_else(|e| {
                warn!("Using default configuration: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        config.with_env_overrides()
    }

    /// Read a config file; a missing file is not an error
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)
            .map_err(|e| SyswardError::config(format!("Failed to read {}: {}", path.display(), e)))?;

        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&data)
            .map_err(|e| SyswardError::config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Apply `SYSWARD_DATA_DIR` if set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            if !dir.is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn history_db_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_DB_FILE)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| SyswardError::config("Could not determine config directory"))?;

        Ok(config_dir.join("sysward").join("config.json"))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".sysward"))
        .unwrap_or_else(|| PathBuf::from(".sysward"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.net_commit_interval_secs, 30);
        assert_eq!(config.retention_days, 90);
        assert_eq!(config.recent_mem_opt_records, 10);
        assert_eq!(config.default_large_file_mb, 50);
        assert!(config.history_db_path().ends_with("history.db"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"sample_interval_ms": 250}"#).unwrap();
        assert_eq!(config.sample_interval_ms, 250);
        assert_eq!(config.memory_settle_ms, 500);
    }
}
