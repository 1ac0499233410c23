use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Front-end configuration, loaded from TOML. Every field has a default so
/// a missing or partial file is fine; a malformed file is a typed error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Viewport height of the simulated scroll container.
    #[serde(default = "default_viewport_height")]
    pub viewport_height: i64,
    /// Rows scrolled per key press in the demo.
    #[serde(default = "default_scroll_step")]
    pub scroll_step: i64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            viewport_height: default_viewport_height(),
            scroll_step: default_scroll_step(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_viewport_height() -> i64 {
    150
}

fn default_scroll_step() -> i64 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.demo.viewport_height, 150);
        assert_eq!(config.demo.scroll_step, 20);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: AppConfig = toml::from_str("[demo]\nscroll_step = 5\n").unwrap();
        assert_eq!(config.demo.scroll_step, 5);
        assert_eq!(config.demo.viewport_height, 150);
    }
}
