/// Deployment pipeline layer
///
/// Orchestrates a full run (status, generation, publish, verification) and
/// persists its outcome as a per-brand deployment record.

// End-to-end run orchestration
pub mod orchestrator;

// {slug}-deployment.json persistence
pub mod record;

// Soft post-deploy checks
pub mod verify;

pub use orchestrator::{DeploymentPipeline, DeploymentRequest, DeploymentSummary, LOW_PRODUCT_WARNING};
pub use record::{load_record, record_path, save_record, DeploymentRecord, SYSTEM_VERSION};
pub use verify::{verify_deployment, SystemValidation};

use crate::publish::PublishError;
use crate::site::GenerationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Site generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Publishing failed: {0}")]
    Publish(#[from] PublishError),

    #[error("Deployment record error at {}: {source}", .path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize deployment record: {0}")]
    Serialize(#[from] serde_json::Error),
}
