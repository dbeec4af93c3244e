//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vortex_cart::DEFAULT_STORAGE_KEY;

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["vortex.toml", ".vortex.toml", "vortex.json"];

/// Environment variable that overrides `storage.dir`.
pub const STORAGE_DIR_ENV: &str = "VORTEX_STORAGE_DIR";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where the cart is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Terminal output preferences.
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(STORAGE_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            self.storage.dir = Some(PathBuf::from(dir));
        }
        self
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding the cart file (default: platform data dir).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Key the cart is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: default_key(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Use colors and symbols.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Print the cart after every change.
    #[serde(default)]
    pub show_cart_on_change: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_cart_on_change: false,
        }
    }
}

/// Generate a default vortex.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Vortex cart configuration

[storage]
# dir = "/path/to/cart/data"
key = "{key}"

[output]
color = true
show_cart_on_change = false
"#,
        key = DEFAULT_STORAGE_KEY
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CliConfig = toml::from_str("[storage]\ndir = \"/tmp/cart\"\n").unwrap();
        assert_eq!(config.storage.dir, Some(PathBuf::from("/tmp/cart")));
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
        assert!(config.output.color);
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.key = "shop_cart".to_string();
        config.output.show_cart_on_change = true;

        for name in ["vortex.toml", "vortex.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(CliConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_env_override() {
        let config = CliConfig::default().with_env_overrides(|name| {
            (name == STORAGE_DIR_ENV).then(|| "/srv/vortex".to_string())
        });
        assert_eq!(config.storage.dir, Some(PathBuf::from("/srv/vortex")));

        let config = CliConfig::default().with_env_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.storage.dir, None);
    }
}
