//! Dashboard configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::export::get_export_directory;
use crate::generator::mock::DEFAULT_USER_COUNT;
use crate::DashboardError;

/// Environment variable holding the config file path
pub const CONFIG_ENV_VAR: &str = "INSIGHTBOARD_CONFIG";

/// Simulated latency of each async step, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub load_ms: u64,
    pub apply_ms: u64,
    pub refresh_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            load_ms: 1000,
            apply_ms: 800,
            refresh_ms: 1200,
        }
    }
}

impl LatencyConfig {
    /// No simulated latency at all
    pub fn none() -> Self {
        Self {
            load_ms: 0,
            apply_ms: 0,
            refresh_ms: 0,
        }
    }

    pub fn load(&self) -> Duration {
        Duration::from_millis(self.load_ms)
    }

    pub fn apply(&self) -> Duration {
        Duration::from_millis(self.apply_ms)
    }

    pub fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output directory; `None` means the user's downloads folder
    pub directory: Option<PathBuf>,
    pub report_title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            report_title: "Insightboard - User Report".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(get_export_directory)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub user_count: usize,
    /// Fixed generator seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    pub latency: LatencyConfig,
    pub auto_refresh_secs: u64,
    pub export: ExportConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            user_count: DEFAULT_USER_COUNT,
            seed: None,
            latency: LatencyConfig::default(),
            auto_refresh_secs: 30,
            export: ExportConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, DashboardError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self, DashboardError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load from the file named by `INSIGHTBOARD_CONFIG`, or use defaults
    pub fn from_env() -> Result<Self, DashboardError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                tracing::info!("Loading config from {:?}", path);
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.user_count == 0 {
            return Err(DashboardError::Config(
                "user_count must be at least 1".to_string(),
            ));
        }
        if self.auto_refresh_secs == 0 {
            return Err(DashboardError::Config(
                "auto_refresh_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn auto_refresh_period(&self) -> Duration {
        Duration::from_secs(self.auto_refresh_secs)
    }

    /// Defaults with a fixed seed and no latency
    pub fn for_tests(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            latency: LatencyConfig::none(),
            ..Self::default()
        }
    }
}
