//! Configuration loader using figment.
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: enables `<app>.toml`
//! - `yaml-config`: enables `<app>.yaml` and `<app>.yml`
//!
//! Both features can be enabled simultaneously; if so, both file formats are
//! searched and loaded.
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Config file, searched in the current directory, then in the user
//!    config directory (`~/.config/<app>/` on Linux)
//! 3. Environment variables (`<APP>_*`)
//! 4. Programmatic overrides
//!
//! # Environment Variable Mapping
//!
//! Variables are mapped using the upper-cased program name as prefix and
//! `__` as separator. For a program named `hammer`:
//!
//! - `HAMMER_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `HAMMER_DISPATCH__DEFAULT_COMMAND=build` → `dispatch.default_command = "build"`
//!
//! # Example
//!
//! ```rust,ignore
//! use herald_runtime::config::ConfigLoader;
//!
//! // Default locations
//! let config = ConfigLoader::new("hammer").load()?;
//!
//! // A specific file, no environment
//! let config = ConfigLoader::new("hammer")
//!     .file("./ci/hammer.toml")
//!     .without_env()
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "yaml-config", feature = "toml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use tracing::{debug, info, trace};

use super::error::{ConfigError, ConfigResult};
use super::schema::HeraldConfig;

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    /// Program name, used for file names and the env prefix.
    app: String,
    /// Programmatic overrides, merged last.
    overrides: Option<HeraldConfig>,
    /// Search paths for configuration files.
    search_paths: Vec<PathBuf>,
    /// Whether to load environment variables.
    load_env: bool,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader for the program `app`.
    pub fn new(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            overrides: None,
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Adds a search path for configuration files.
    ///
    /// Once any path is added, the default locations are no longer searched.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets a specific configuration file to load.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges configuration programmatically, over every other source.
    pub fn merge(mut self, config: HeraldConfig) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Returns the environment variable prefix, e.g. `HAMMER_`.
    pub fn env_prefix(&self) -> String {
        let mut prefix: String = self
            .app
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        prefix.push('_');
        prefix
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<HeraldConfig> {
        let app = self.app.clone();
        let figment = self.build_figment()?;
        let config: HeraldConfig = figment.extract()?;

        debug!(
            app = %app,
            logging_level = %config.logging.level,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Builds the figment instance with all sources.
    fn build_figment(self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(HeraldConfig::default()));

        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            info!(path = %path.display(), "Loading configuration file");
            figment = Self::merge_config_file(figment, path)?;
        } else {
            figment = self.load_config_files(figment);
        }

        if self.load_env {
            let prefix = self.env_prefix();
            trace!(prefix = %prefix, "Loading environment variables");
            figment = figment.merge(Env::prefixed(&prefix).split("__"));
        }

        if let Some(overrides) = self.overrides {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(figment)
    }

    /// Merges a single config file into the figment, dispatching on file
    /// extension.
    #[cfg_attr(
        not(any(feature = "toml-config", feature = "yaml-config")),
        allow(unused_variables)
    )]
    fn merge_config_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            #[cfg(feature = "toml-config")]
            "toml" => Ok(figment.merge(Toml::file(path))),
            #[cfg(feature = "yaml-config")]
            "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    /// Resolves the effective list of search paths.
    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd);
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(&self.app));
        }
        paths
    }

    /// Merges the first file named `<app>.<ext>` found for each enabled
    /// format.
    #[cfg_attr(
        not(any(feature = "toml-config", feature = "yaml-config")),
        allow(unused_mut, unused_variables)
    )]
    fn load_config_files(&self, mut figment: Figment) -> Figment {
        let search_paths = self.resolve_search_paths();
        let mut found = false;

        #[cfg(feature = "toml-config")]
        if let Some(path) = self.find_file(&search_paths, &["toml"]) {
            info!(path = %path.display(), "Loading configuration file");
            figment = figment.merge(Toml::file(path));
            found = true;
        }

        #[cfg(feature = "yaml-config")]
        if let Some(path) = self.find_file(&search_paths, &["yaml", "yml"]) {
            info!(path = %path.display(), "Loading configuration file");
            figment = figment.merge(Yaml::file(path));
            found = true;
        }

        if !found {
            debug!(app = %self.app, "No configuration file found, using defaults");
        }
        figment
    }

    #[cfg(any(feature = "toml-config", feature = "yaml-config"))]
    fn find_file(&self, search_paths: &[PathBuf], extensions: &[&str]) -> Option<PathBuf> {
        search_paths.iter().find_map(|dir| {
            extensions
                .iter()
                .map(|ext| dir.join(format!("{}.{ext}", self.app)))
                .find(|path| path.exists())
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
