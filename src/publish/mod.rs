/// Publishing layer
///
/// Ships a generated project directory either to a git remote or to a hosting
/// provider and reports the resulting URL. Publishing is best-effort: failures
/// are fatal to the publish step only and generated files stay on disk.

pub mod git;
pub mod hosted;

pub use git::{GitIdentity, GitPublisher, DEFAULT_COMMIT_TEMPLATE};
pub use hosted::HostedPublisher;

use crate::site::GenerationReport;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// What to publish
#[derive(Debug, Clone)]
pub struct PublishRequest {
    pub project_dir: PathBuf,
    pub brand_name: String,
    pub brand_slug: String,
    pub niche: String,
}

impl From<&GenerationReport> for PublishRequest {
    fn from(report: &GenerationReport) -> Self {
        Self {
            project_dir: report.project_path.clone(),
            brand_name: report.brand_name.clone(),
            brand_slug: report.brand_slug.clone(),
            niche: report.niche.clone(),
        }
    }
}

/// Where the project ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishOutcome {
    /// "git" or "vercel"
    pub target: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Project directory {} does not exist", .path.display())]
    MissingProject { path: PathBuf },

    #[error("Failed to run `{command}`: {source}")]
    GitSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {}: {stderr}", exit_code(.status))]
    GitCommand {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

fn exit_code(status: &Option<i32>) -> String {
    status.map_or_else(|| "unknown".to_string(), |code| code.to_string())
}

/// Selected publishing backend
#[derive(Debug, Clone)]
pub enum PublishTarget {
    Git(GitPublisher),
    Hosted(HostedPublisher),
}

impl PublishTarget {
    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome, PublishError> {
        match self {
            PublishTarget::Git(publisher) => publisher.publish(request).await,
            PublishTarget::Hosted(publisher) => publisher.publish(request).await,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PublishTarget::Git(_) => "git",
            PublishTarget::Hosted(_) => "vercel",
        }
    }
}
