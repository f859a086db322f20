//! Runtime configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file contents were not valid JSON5.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json5::Error),
}

const DEFAULT_TPS: u32 = 10;

/// Tick-rate configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Ticks per second. A value of zero is clamped to 1.
    pub tps: u32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self { tps: DEFAULT_TPS }
    }
}

impl TickConfig {
    /// The duration of one tick: `1000 / tps` milliseconds.
    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(u64::from(1000 / self.tps.max(1)))
    }

    /// Loads configuration from a JSON5 file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json5::from_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rate() {
        let config = TickConfig::default();
        assert_eq!(config.tps, 10);
        assert_eq!(config.tick_duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_parse_json5() {
        let config: TickConfig = serde_json5::from_str("{ tps: 20 }").expect("valid config");
        assert_eq!(config.tick_duration(), Duration::from_millis(50));
    }

    #[test]
    fn test_zero_tps_is_clamped() {
        let config = TickConfig { tps: 0 };
        assert_eq!(config.tick_duration(), Duration::from_millis(1000));
    }

    #[test]
    fn test_load_missing_file() {
        let result = TickConfig::load(Path::new("definitely/not/a/real/config.json5"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
