/// Deployment record persistence
///
/// One JSON document per brand at {deployed_dir}/{brand_slug}-deployment.json.
/// Redeploying a brand overwrites its record.

use crate::pipeline::{DeploymentSummary, PipelineError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Version tag written into every record
pub const SYSTEM_VERSION: &str = "1.0.0";

/// Persisted outcome of a full deployment run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRecord {
    #[serde(flatten)]
    pub summary: DeploymentSummary,
    pub run_id: Uuid,
    pub deployed_at: DateTime<Utc>,
    pub system_version: String,
}

impl DeploymentRecord {
    pub fn new(summary: DeploymentSummary) -> Self {
        Self {
            summary,
            run_id: Uuid::new_v4(),
            deployed_at: Utc::now(),
            system_version: SYSTEM_VERSION.to_string(),
        }
    }
}

/// Path of the record for a brand slug
pub fn record_path(dir: &Path, brand_slug: &str) -> PathBuf {
    dir.join(format!("{brand_slug}-deployment.json"))
}

/// Write the record, creating `dir` if needed
pub fn save_record(dir: &Path, record: &DeploymentRecord) -> Result<PathBuf, PipelineError> {
    fs::create_dir_all(dir).map_err(|source| PipelineError::Record {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = record_path(dir, &record.summary.brand_slug);
    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, json).map_err(|source| PipelineError::Record {
        path: path.clone(),
        source,
    })?;

    tracing::info!("💾 Deployment record saved: {}", path.display());
    Ok(path)
}

/// Read the record for a brand slug
pub fn load_record(dir: &Path, brand_slug: &str) -> Result<DeploymentRecord, PipelineError> {
    let path = record_path(dir, brand_slug);
    let raw = fs::read_to_string(&path).map_err(|source| PipelineError::Record {
        path: path.clone(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}
