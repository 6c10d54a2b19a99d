/// Site generation data types
///
/// Requests, generated files and the report returned after a successful run.

use crate::config::NicheConfigError;
use crate::upstream::ValidationFailure;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Input for one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRequest {
    /// Human-readable brand (e.g., "Adventure Gear Pro")
    pub brand_name: String,
    /// Niche configuration to load (e.g., "outdoor-adventure")
    pub niche: String,
    /// Audience description shown in generated copy
    pub target_audience: String,
    /// Base URL of the product server
    pub api_url: String,
    /// Validate the product server before writing anything
    #[serde(default = "default_validate_server")]
    pub validate_server: bool,
}

fn default_validate_server() -> bool {
    true
}

impl SiteRequest {
    pub fn new(brand_name: &str, niche: &str, target_audience: &str, api_url: &str) -> Self {
        Self {
            brand_name: brand_name.to_string(),
            niche: niche.to_string(),
            target_audience: target_audience.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            validate_server: true,
        }
    }

    /// Skip the pre-generation server validation
    pub fn without_validation(mut self) -> Self {
        self.validate_server = false;
        self
    }
}

/// One rendered output file, relative to the project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Result of a successful generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub brand_name: String,
    pub niche: String,
    pub brand_slug: String,
    pub api_url: String,
    /// {output_dir}/{brand_slug}
    pub project_path: PathBuf,
    /// Written files, absolute or relative to the working directory
    pub generated_files: Vec<PathBuf>,
    /// Total reported by the product server (0 when the fetch failed)
    pub product_count: u64,
    /// Number of products embedded as fallback data
    pub sample_size: usize,
    pub duration_seconds: f64,
    pub generated_at: DateTime<Utc>,
    pub next_steps: Vec<String>,
}

/// Generation failures; each aborts the run
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Server validation failed: {0}")]
    ServerValidation(#[from] ValidationFailure),

    #[error(transparent)]
    NicheConfig(#[from] NicheConfigError),

    #[error("Brand name '{brand}' does not produce a usable slug")]
    InvalidBrand { brand: String },

    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
