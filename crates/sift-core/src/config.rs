//! Configuration types for sift.
//!
//! [`Config::load`] reads `~/.config/sift/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then layers `SIFT_*`
//! environment variables on top (`SIFT_SEARCH__HOST`, `SIFT_SEARCH__API_KEY`).
//! [`Config::defaults`] returns the built-in defaults without touching the
//! filesystem (useful in tests).
//!
//! The search host and key are never read from ambient state after startup:
//! callers resolve them once into a [`SearchEndpoint`] and pass that around.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[search]
host         = ""
api_key      = ""
collection   = "suppliers"
default_sort = "lead_time_production:asc"
sort_options = ["lead_time_production:asc", "_text_match:desc", "name:asc"]

[ui]
theme                = "default"
facet_pane_width_pct = 28
"#;

const ENV_PREFIX: &str = "SIFT";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/sift/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the search service, e.g. `https://xxxx.a1.typesense.net`.
    #[serde(default)]
    pub host: String,
    /// Search-only API key.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_sort")]
    pub default_sort: String,
    /// Sort keys the `s` key cycles through.
    #[serde(default = "default_sort_options")]
    pub sort_options: Vec<String>,
}

fn default_collection() -> String { "suppliers".to_string() }
fn default_sort() -> String { "lead_time_production:asc".to_string() }
fn default_sort_options() -> Vec<String> {
    vec![
        "lead_time_production:asc".to_string(),
        "_text_match:desc".to_string(),
        "name:asc".to_string(),
    ]
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            api_key: String::new(),
            collection: default_collection(),
            default_sort: default_sort(),
            sort_options: default_sort_options(),
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_facet_pane_width_pct")]
    pub facet_pane_width_pct: u16,
}

fn default_theme() -> String { "default".to_string() }
fn default_facet_pane_width_pct() -> u16 { 28 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            facet_pane_width_pct: default_facet_pane_width_pct(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/sift/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file (which need not exist), layered on top of
    /// the built-in defaults and under the environment.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::layered(Some(path))
    }

    /// The built-in defaults under the environment, skipping the config file.
    /// Used when the file exists but cannot be read.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::layered(None)
    }

    fn layered(file: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// Where and how to reach the search service.
///
/// Host and key are opaque; they are only checked for presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint {
    pub host: String,
    pub api_key: String,
    pub collection: String,
}

impl SearchEndpoint {
    pub fn new(
        host: impl Into<String>,
        api_key: impl Into<String>,
        collection: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let host = host.into();
        let api_key = api_key.into();
        if host.is_empty() {
            return Err(ConfigError::MissingHost);
        }
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self {
            host,
            api_key,
            collection: collection.into(),
        })
    }

    /// Resolve from the `[search]` section, letting explicit overrides (CLI
    /// flags) win when present.
    pub fn resolve(
        search: &SearchConfig,
        host: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            host.unwrap_or(&search.host),
            api_key.unwrap_or(&search.api_key),
            search.collection.as_str(),
        )
    }

    /// `{host}/collections/{collection}/documents/search`
    pub fn search_url(&self) -> String {
        format!(
            "{}/collections/{}/documents/search",
            self.host, self.collection
        )
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("sift")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
