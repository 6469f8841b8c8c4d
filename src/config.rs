use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::{CheckError, Result};

pub const DEFAULT_API_BASE: &str = "https://haveibeenpwned.com/api/v3";
pub const API_KEY_ENV: &str = "HIBP_API_KEY";
pub const API_BASE_ENV: &str = "PWN_HUNTER_API_BASE";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub api_key: Option<String>,
    pub user_agent: String,
    /// Pause after every address, on top of any server-directed backoff.
    pub spacing_ms: u64,
    /// Added to every Retry-After wait.
    pub retry_margin_ms: u64,
    pub timeout_secs: u64,
    /// `None` retries throttled lookups for as long as the service keeps throttling.
    pub max_retries: Option<u32>,
    pub include_pastes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            user_agent: format!("pwn_hunter/{}", env!("CARGO_PKG_VERSION")),
            spacing_ms: 1500,
            retry_margin_ms: 100,
            timeout_secs: 10,
            max_retries: None,
            include_pastes: true,
        }
    }
}

impl Config {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| CheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data)
            .map_err(|e| CheckError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Overlay `HIBP_API_KEY` and `PWN_HUNTER_API_BASE` when set and non-empty.
    pub fn apply_env(mut self) -> Self {
        if let Some(key) = non_empty_env(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(base) = non_empty_env(API_BASE_ENV) {
            self.api_base = base;
        }
        self
    }

    pub fn spacing(&self) -> Duration {
        Duration::from_millis(self.spacing_ms)
    }

    pub fn retry_margin(&self) -> Duration {
        Duration::from_millis(self.retry_margin_ms)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
