//! Configuration for the Croft CLI.
//!
//! [`CroftConfig`] loads from a TOML file, `CROFT_*` environment variables,
//! and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `CROFT_CONFIG` environment variable
//! 3. XDG default: `~/.config/croft/config.toml`
//! 4. Built-in defaults

use confyg::{env, Confygery};
use croft_cart::CART_STORAGE_KEY;
use croft_content::DEFAULT_FETCH_TIMEOUT;
use croft_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CROFT";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CroftConfig {
    /// Where content documents come from.
    pub content: ContentConfig,

    /// Where the cart snapshot is kept.
    pub cart: CartConfig,
}

/// Content source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content root on disk.
    pub path: String,

    /// Published site to read from instead of `path`.
    pub base_url: Option<String>,

    /// Per-document fetch deadline in milliseconds.
    pub fetch_timeout_ms: u64,
}

/// Cart storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Directory holding cart snapshots. Defaults to the user data dir.
    pub path: Option<String>,

    /// Key the snapshot is stored under.
    pub storage_key: String,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: "content".to_string(),
            base_url: None,
            fetch_timeout_ms: u64::try_from(DEFAULT_FETCH_TIMEOUT.as_millis()).unwrap_or(10_000),
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            path: None,
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl CroftConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("content");
        env_opts.add_section("cart");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("CROFT_CONFIG") {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("croft").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `CROFT_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }

    /// Per-document fetch deadline.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.content.fetch_timeout_ms)
    }

    /// Directory for cart snapshots.
    pub fn cart_dir(&self) -> Result<PathBuf> {
        match &self.cart.path {
            Some(p) => Ok(PathBuf::from(p)),
            None => dirs::data_dir()
                .map(|d| d.join("croft"))
                .ok_or_else(|| Error::config("Could not determine data directory for the cart")),
        }
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
