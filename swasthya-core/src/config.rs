//! Configuration file support for the Swasthya API server
//!
//! Loads server configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.swasthyarc.json` in the working directory
//! 3. `swasthya.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::risk::RiskThresholds;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Origins allowed cross-origin access when no config is specified
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] =
    &["http://localhost:5173", "https://swasthya-ai-six.vercel.app"];

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info";

const CONFIG_FILE_NAMES: &[&str] = &[".swasthyarc.json", "swasthya.config.json"];

/// Server configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SwasthyaConfig {
    /// Interface to bind (default: 0.0.0.0)
    #[serde(default)]
    pub host: Option<String>,

    /// Port to bind (default: 8080)
    #[serde(default)]
    pub port: Option<u16>,

    /// Origins allowed cross-origin access (default: local dev + deployed frontend)
    #[serde(default)]
    pub allowed_origins: Option<Vec<String>>,

    /// tracing filter directive, overridden by RUST_LOG (default: info)
    #[serde(default)]
    pub log_filter: Option<String>,

    /// Custom risk level thresholds
    #[serde(default)]
    pub thresholds: Option<ThresholdConfig>,
}

/// Custom risk level thresholds, both exclusive
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Scores above this are MEDIUM (default: 40)
    pub medium: Option<i32>,
    /// Scores above this are HIGH (default: 70)
    pub high: Option<i32>,
}

impl ThresholdConfig {
    fn to_thresholds(&self) -> RiskThresholds {
        let defaults = RiskThresholds::default();
        RiskThresholds {
            medium: self.medium.unwrap_or(defaults.medium),
            high: self.high.unwrap_or(defaults.high),
        }
    }
}

/// Resolved configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub log_filter: String,
    pub thresholds: RiskThresholds,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl SwasthyaConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref host) = self.host {
            if host.trim().is_empty() {
                anyhow::bail!("host must not be empty");
            }
        }

        if self.port == Some(0) {
            anyhow::bail!("port must be between 1 and 65535 (got 0)");
        }

        if let Some(ref origins) = self.allowed_origins {
            if origins.is_empty() {
                anyhow::bail!("allowed_origins must list at least one origin");
            }
            let mut seen = HashSet::new();
            for origin in origins {
                validate_origin(origin)
                    .with_context(|| format!("invalid allowed_origins entry: {}", origin))?;
                if !seen.insert(origin.as_str()) {
                    anyhow::bail!("duplicate allowed_origins entry: {}", origin);
                }
            }
        }

        if let Some(ref t) = self.thresholds {
            let resolved = t.to_thresholds();
            if resolved.medium >= resolved.high {
                anyhow::bail!(
                    "thresholds.medium ({}) must be less than thresholds.high ({})",
                    resolved.medium,
                    resolved.high
                );
            }
        }

        if let Some(ref filter) = self.log_filter {
            if filter.trim().is_empty() {
                anyhow::bail!("log_filter must not be empty");
            }
        }

        Ok(())
    }

    /// Resolve config into its final form
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let allowed_origins = match &self.allowed_origins {
            Some(origins) => origins.clone(),
            None => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(ResolvedConfig {
            host: self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            allowed_origins,
            log_filter: self
                .log_filter
                .clone()
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            thresholds: self
                .thresholds
                .as_ref()
                .map(ThresholdConfig::to_thresholds)
                .unwrap_or_default(),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        SwasthyaConfig::default().resolve()
    }

    /// `host:port` string for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check whether an origin is on the allow-list (exact match)
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
    }
}

/// Check an origin is `scheme://host[:port]` with no path or trailing slash
fn validate_origin(origin: &str) -> Result<()> {
    let rest = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
        .ok_or_else(|| anyhow::anyhow!("origin must start with http:// or https://"))?;

    if rest.is_empty() {
        anyhow::bail!("origin has no host");
    }
    if rest.contains('/') {
        anyhow::bail!("origin must not contain a path or trailing slash");
    }
    if rest.chars().any(char::is_whitespace) {
        anyhow::bail!("origin must not contain whitespace");
    }

    Ok(())
}

/// Discover and load a config file from a directory
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(SwasthyaConfig, PathBuf)>> {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<SwasthyaConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: SwasthyaConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in `dir`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(dir: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(dir)? {
            Some((config, path)) => (config, Some(path)),
            None => (SwasthyaConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
