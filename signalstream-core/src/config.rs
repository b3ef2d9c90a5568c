//! Demo configuration — master seed, feed size, simulated latencies.
//!
//! Stored as a TOML file. A missing file means defaults; a malformed file is
//! an error rather than a silent fallback.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::SampleProvider;

/// Simulated latencies, in milliseconds. Fetches are instant by default;
/// mutations take long enough to make the pending states visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub fetch_ms: u64,
    /// Strategy saves and user edits.
    pub save_ms: u64,
    pub delete_ms: u64,
    pub broadcast_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            fetch_ms: 0,
            save_ms: 1000,
            delete_ms: 500,
            broadcast_ms: 1500,
        }
    }
}

impl LatencyConfig {
    pub fn fetch(&self) -> Duration {
        Duration::from_millis(self.fetch_ms)
    }

    pub fn save(&self) -> Duration {
        Duration::from_millis(self.save_ms)
    }

    pub fn delete(&self) -> Duration {
        Duration::from_millis(self.delete_ms)
    }

    pub fn broadcast(&self) -> Duration {
        Duration::from_millis(self.broadcast_ms)
    }
}

/// The complete demo configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Master seed for the generated signal feed.
    pub master_seed: u64,
    /// Number of signals in the feed.
    pub signal_count: usize,
    /// Make every fetch fail, for demoing the error paths.
    pub simulate_outage: bool,
    pub latency: LatencyConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            master_seed: 42,
            signal_count: 25,
            simulate_outage: false,
            latency: LatencyConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read config file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse config TOML: {e}"))
    }

    /// Load from a file if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("serialize config: {e}"))
    }

    /// Build the sample provider this configuration describes.
    pub fn provider(&self) -> SampleProvider {
        SampleProvider::new(self.master_seed)
            .with_signal_count(self.signal_count)
            .with_outage(self.simulate_outage)
    }
}
