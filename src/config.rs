//! Configuration for school-portal

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{PortalError, Result};
use crate::store::{MemoryStore, RecordStore, SqliteStore};

/// Configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortalConfig {
    /// Quiet period before an edited page is saved automatically
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,

    /// SQLite database file. When unset, records live in memory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Theme used when a tenant has not selected one
    #[serde(default)]
    pub default_theme: Option<String>,

    /// Capacity of the portal event bus
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// `tracing` filter directive passed to [`crate::logging::init`]
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_autosave_delay_ms() -> u64 {
    30_000
}

fn default_event_capacity() -> usize {
    1024
}

fn default_log_filter() -> String {
    "school_portal=info".to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            autosave_delay_ms: default_autosave_delay_ms(),
            database_path: None,
            default_theme: None,
            event_capacity: default_event_capacity(),
            log_filter: default_log_filter(),
        }
    }
}

impl PortalConfig {
    /// Load config from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PortalError::Config(format!("Failed to read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse config from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PortalError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content).map_err(|e| {
            PortalError::Config(format!("Failed to write {}: {}", path.as_ref().display(), e))
        })
    }

    fn validate(&self) -> Result<()> {
        if self.event_capacity == 0 {
            return Err(PortalError::Config("event_capacity must be > 0".into()));
        }
        Ok(())
    }

    /// Autosave debounce delay
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    /// Install the tracing subscriber with `log_filter`
    pub fn init_logging(&self) -> bool {
        crate::logging::init(&self.log_filter)
    }

    /// Open the configured record store
    pub fn open_store(&self) -> Result<Arc<dyn RecordStore>> {
        match &self.database_path {
            Some(path) => Ok(Arc::new(SqliteStore::open(path)?)),
            None => Ok(Arc::new(MemoryStore::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = PortalConfig::default();
        assert_eq!(config.autosave_delay(), Duration::from_secs(30));
        assert!(config.database_path.is_none());
        assert_eq!(config.log_filter, "school_portal=info");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PortalConfig::from_toml_str(
            r#"
autosave_delay_ms = 5000
default_theme = "theme-13"
"#,
        )
        .unwrap();

        assert_eq!(config.autosave_delay_ms, 5000);
        assert_eq!(config.default_theme.as_deref(), Some("theme-13"));
        assert_eq!(config.event_capacity, 1024);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = PortalConfig::from_toml_str("event_capacity = 0").unwrap_err();
        assert!(matches!(err, PortalError::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portal.toml");

        let config = PortalConfig {
            autosave_delay_ms: 1500,
            database_path: Some(dir.path().join("portal.db")),
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = PortalConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = PortalConfig::load("/nonexistent/portal.toml").unwrap_err();
        assert!(matches!(err, PortalError::Config(_)));
    }
}
