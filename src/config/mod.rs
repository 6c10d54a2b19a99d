/// Configuration management for the site builder
///
/// Handles upstream server settings, filesystem locations, run defaults and
/// publishing credentials. Values come from the process environment (after
/// `.env` is loaded), then an optional JSON override file, then CLI flags.

pub mod niche;

pub use niche::{NicheConfig, NicheConfigError};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment keys that must be present before a full deployment proceeds
pub const REQUIRED_ENV_VARS: &[&str] = &["OPENAI_API_KEY", "ANTHROPIC_API_KEY", "GCS_SERVER_URL"];

/// Environment keys that are reported when missing but never block a run
pub const OPTIONAL_ENV_VARS: &[&str] = &["VERCEL_TOKEN", "GCP_PROJECT_ID"];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// External product server configuration
    pub server: ServerConfig,
    /// Filesystem locations
    pub paths: PathsConfig,
    /// Defaults used when the CLI does not name a niche/brand/audience
    pub site: SiteDefaults,
    /// Publishing credentials and git settings
    pub deploy: DeployConfig,
}

/// Product server (scraper API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the running product server (e.g., "http://10.0.0.5:8000")
    pub url: Option<String>,
    /// Timeout for each status probe in seconds
    pub status_timeout_secs: u64,
    /// Timeout for the product sample fetch in seconds
    pub product_fetch_timeout_secs: u64,
    /// Source names that must appear in the server's `/sites` listing
    pub expected_sources: Vec<String>,
}

/// Filesystem locations used during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Parent directory of generated projects: {output_dir}/{brand_slug}
    pub output_dir: PathBuf,
    /// Directory holding {niche}.json configuration files
    pub niche_config_dir: PathBuf,
    /// Directory holding {brand_slug}-deployment.json records
    pub deployed_dir: PathBuf,
    /// Directory receiving integration_{timestamp}.log files
    pub log_dir: PathBuf,
}

/// Run defaults mirrored from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteDefaults {
    pub niche: String,
    pub brand_name: String,
    pub target_audience: String,
}

/// Deployment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    pub vercel_token: Option<String>,
    pub gcp_project_id: Option<String>,
    /// Remote the git publisher force-pushes to
    pub git_remote_url: Option<String>,
    /// Branch the git publisher force-pushes to
    pub git_branch: String,
}

impl Default for Config {
    /// Default configuration read from the process environment
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl Config {
    /// Build a configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset so that `FOO=` in a `.env` file
    /// behaves like a missing key.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            server: ServerConfig {
                url: get("GCS_SERVER_URL").map(|url| url.trim_end_matches('/').to_string()),
                status_timeout_secs: get("STATUS_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
                product_fetch_timeout_secs: get("PRODUCT_FETCH_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(15),
                expected_sources: parse_list(&get_or("PRODUCT_SOURCES", "amazon,cabelas")),
            },
            paths: PathsConfig {
                output_dir: PathBuf::from(get_or("OUTPUT_DIRECTORY", "./generated")),
                niche_config_dir: PathBuf::from(get_or("NICHE_CONFIG_DIR", "./config")),
                deployed_dir: PathBuf::from(get_or("DEPLOYED_DIRECTORY", "./deployed")),
                log_dir: PathBuf::from(get_or("LOG_DIRECTORY", "./logs")),
            },
            site: SiteDefaults {
                niche: get_or("SITE_NICHE", "outdoor-adventure"),
                brand_name: get_or("BRAND_NAME", "Adventure Gear Pro"),
                target_audience: get_or(
                    "TARGET_AUDIENCE",
                    "Outdoor enthusiasts, hikers, and campers",
                ),
            },
            deploy: DeployConfig {
                vercel_token: get("VERCEL_TOKEN"),
                gcp_project_id: get("GCP_PROJECT_ID"),
                git_remote_url: get("GIT_REMOTE_URL"),
                git_branch: get_or("GIT_BRANCH", "main"),
            },
        }
    }

    /// Load the environment-backed defaults and apply an optional JSON override file
    pub fn load(override_file: Option<&Path>) -> Result<Self> {
        let config = Self::default();
        match override_file {
            Some(path) => config.with_overrides_from(path),
            None => Ok(config),
        }
    }

    /// Deep-merge a JSON file over this configuration
    ///
    /// The file may name any subset of fields, e.g.
    /// `{ "paths": { "output_dir": "./sites" } }`.
    pub fn with_overrides_from(self, path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let overrides: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Config file '{}' is not valid JSON", path.display()))?;
        self.with_overrides(overrides)
    }

    /// Deep-merge an in-memory JSON value over this configuration
    pub fn with_overrides(self, overrides: Value) -> Result<Self> {
        let mut base = serde_json::to_value(&self)?;
        merge_json(&mut base, overrides);
        serde_json::from_value(base).context("Config overrides do not match the configuration schema")
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.server.status_timeout_secs)
    }

    pub fn product_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.server.product_fetch_timeout_secs)
    }
}

/// Presence check of the environment keys a deployment depends on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentReport {
    pub missing_required: Vec<String>,
    pub missing_optional: Vec<String>,
}

impl EnvironmentReport {
    pub fn is_ready(&self) -> bool {
        self.missing_required.is_empty()
    }
}

/// Validate that required keys are set (presence only, not correctness)
pub fn validate_environment<F>(lookup: F) -> EnvironmentReport
where
    F: Fn(&str) -> Option<String>,
{
    let missing = |keys: &[&str]| -> Vec<String> {
        keys.iter()
            .filter(|key| lookup(key).map_or(true, |value| value.trim().is_empty()))
            .map(|key| key.to_string())
            .collect()
    };

    let report = EnvironmentReport {
        missing_required: missing(REQUIRED_ENV_VARS),
        missing_optional: missing(OPTIONAL_ENV_VARS),
    };

    for key in &report.missing_optional {
        tracing::warn!("⚠️ Optional environment variable not set: {}", key);
    }
    if report.is_ready() {
        tracing::info!("✅ Environment validation passed");
    } else {
        tracing::error!("❌ Missing required environment variables: {:?}", report.missing_required);
    }

    report
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            for (key, value) in override_map {
                match base_map.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
