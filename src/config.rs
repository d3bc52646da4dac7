use crate::session::SessionConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SOURCE: &str = "https://docs.google.com/spreadsheets/d/106i6RLyxQYh-jgEnPxZ3TX3C-VT3-k7vY-7gdfoLTyI/export?format=csv";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_skip_header")]
    pub skip_header: bool,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
    #[serde(default = "default_parallel_scan_threshold")]
    pub parallel_scan_threshold: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_highlight")]
    pub highlight: bool,
}

fn default_location() -> String {
    DEFAULT_SOURCE.to_string()
}
fn default_skip_header() -> bool {
    true
}
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_quiet_period_ms() -> u64 {
    500
}
fn default_parallel_scan_threshold() -> usize {
    4096
}
fn default_max_results() -> usize {
    100
}
fn default_highlight() -> bool {
    true
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            skip_header: default_skip_header(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: default_quiet_period_ms(),
            parallel_scan_threshold: default_parallel_scan_threshold(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            highlight: default_highlight(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Config {
    /// Load from `path`, or from the first config file found in the usual places
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_path(),
        };

        if let Some(path) = config_path {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    fn find_config_path() -> Option<PathBuf> {
        if let Some(xdg_config) = dirs::config_dir() {
            let xdg_path = xdg_config.join("yuetko/config.toml");
            if xdg_path.exists() {
                return Some(xdg_path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let home_path = home.join(".yuetko.toml");
            if home_path.exists() {
                return Some(home_path);
            }
        }

        let current_path = Path::new(".yuetko.toml");
        if current_path.exists() {
            return Some(current_path.to_path_buf());
        }

        None
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            quiet_period: Duration::from_millis(self.search.quiet_period_ms),
            parallel_scan_threshold: self.search.parallel_scan_threshold,
        }
    }
}
