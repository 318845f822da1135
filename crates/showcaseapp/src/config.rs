//! # Configuration
//!
//! Settings are declared with [`confique`] and loaded in priority order:
//!
//! 1. **Environment variables**: `SHOWCASE_RELOAD_DEBOUNCE_MS`, `SHOWCASE_MAX_RECOMMENDED`,
//!    `SHOWCASE_DEFAULT_THEME`.
//! 2. **Config file**: `<data dir>/showcase.toml`, if present.
//! 3. **Compiled defaults**: `#[config(default = ...)]` below.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `reload_debounce_ms` | `500` | Storefront reloads closer together than this are dropped |
//! | `max_recommended_services` | `5` | Cap on a featured entry's recommended services |
//! | `default_theme` | `light` | Theme used until one is chosen |

use crate::error::{Result, ShowcaseError};
use crate::model::Theme;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "showcase.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseConfig {
    /// Minimum gap between two storefront reloads, in milliseconds.
    #[config(default = 500, env = "SHOWCASE_RELOAD_DEBOUNCE_MS")]
    pub reload_debounce_ms: u64,

    /// How many services one featured entry may recommend.
    #[config(default = 5, env = "SHOWCASE_MAX_RECOMMENDED")]
    pub max_recommended_services: usize,

    /// "light" or "dark".
    #[config(default = "light", env = "SHOWCASE_DEFAULT_THEME")]
    pub default_theme: String,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            reload_debounce_ms: 500,
            max_recommended_services: 5,
            default_theme: Theme::Light.as_str().to_string(),
        }
    }
}

impl ShowcaseConfig {
    /// Load from the environment and `<data_dir>/showcase.toml`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        let mut builder = Self::builder().env();
        if path.exists() {
            builder = builder.file(&path);
        }
        builder
            .load()
            .map_err(|e| ShowcaseError::Config(e.to_string()))
    }

    pub fn reload_debounce(&self) -> Duration {
        Duration::from_millis(self.reload_debounce_ms)
    }

    /// Unknown theme names fall back to light.
    pub fn default_theme(&self) -> Theme {
        self.default_theme.parse().unwrap_or_else(|e: String| {
            tracing::warn!(value = %self.default_theme, error = %e, "ignoring configured theme");
            Theme::Light
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.reload_debounce(), Duration::from_millis(500));
        assert_eq!(config.max_recommended_services, 5);
        assert_eq!(config.default_theme(), Theme::Light);
    }

    #[test]
    fn test_dark_default_theme() {
        let config = ShowcaseConfig {
            default_theme: "dark".to_string(),
            ..Default::default()
        };
        assert_eq!(config.default_theme(), Theme::Dark);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_light() {
        let config = ShowcaseConfig {
            default_theme: "sepia".to_string(),
            ..Default::default()
        };
        assert_eq!(config.default_theme(), Theme::Light);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "reload_debounce_ms = 250\nmax_recommended_services = 3\n",
        )
        .unwrap();
        let config = ShowcaseConfig::load(dir.path()).unwrap();
        assert_eq!(config.reload_debounce_ms, 250);
        assert_eq!(config.max_recommended_services, 3);
        assert_eq!(config.default_theme, "light");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShowcaseConfig::load(dir.path()).unwrap();
        assert_eq!(config.max_recommended_services, 5);
    }
}
