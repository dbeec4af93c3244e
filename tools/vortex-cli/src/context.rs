//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use vortex_cache::{Cache, FileBackend};
use vortex_cart::CartStore;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;
use crate::render::TerminalRenderer;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, verbose: bool, json: bool) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };
        let config = config.with_env_overrides(|name| std::env::var(name).ok());
        let output = Output::new(verbose, json, config.output.color);

        if let Some(ref path) = config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(&config_path) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping unreadable config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory the cart file lives in.
    pub fn storage_dir(&self) -> PathBuf {
        match self.config.storage.dir {
            Some(ref dir) => self.resolve_path(dir),
            None => dirs_path().join("vortex"),
        }
    }

    /// Open the cart store, with the terminal renderer subscribed, and load it.
    pub fn open_store(&self) -> Result<CartStore<FileBackend>> {
        let dir = self.storage_dir();
        let cache = Cache::open_dir(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;

        let mut store = CartStore::new(cache, self.config.storage.key.clone());
        store.subscribe(TerminalRenderer::new(
            self.output.clone(),
            self.config.output.show_cart_on_change,
        ));
        let outcome = store.load();
        tracing::debug!(?outcome, dir = %dir.display(), "cart loaded");
        Ok(store)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}
