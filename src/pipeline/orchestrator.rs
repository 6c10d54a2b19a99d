/// Deployment pipeline
///
/// status check -> generate -> publish -> verify -> summarize -> persist.
/// Generation and publish failures abort the run; the status pre-check and
/// post-deploy verification only log.

use crate::pipeline::record::{save_record, DeploymentRecord};
use crate::pipeline::verify::{verify_deployment, SystemValidation};
use crate::pipeline::PipelineError;
use crate::publish::{HostedPublisher, PublishRequest, PublishTarget};
use crate::site::{SiteGenerator, SiteRequest};
use crate::upstream::UpstreamClient;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

/// Below this many products the run continues with a warning
pub const LOW_PRODUCT_WARNING: u64 = 5;

/// Input for one deployment run
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    pub niche: String,
    pub brand_name: String,
    /// Defaults to "{niche} enthusiasts"
    pub target_audience: Option<String>,
    pub api_url: String,
    pub gcp_project_id: Option<String>,
    pub validate_server: bool,
}

impl DeploymentRequest {
    pub fn new(niche: &str, brand_name: &str, api_url: &str) -> Self {
        Self {
            niche: niche.to_string(),
            brand_name: brand_name.to_string(),
            target_audience: None,
            api_url: api_url.trim_end_matches('/').to_string(),
            gcp_project_id: None,
            validate_server: true,
        }
    }

    fn site_request(&self) -> SiteRequest {
        let audience = self
            .target_audience
            .clone()
            .filter(|audience| !audience.trim().is_empty())
            .unwrap_or_else(|| format!("{} enthusiasts", self.niche));
        let request = SiteRequest::new(&self.brand_name, &self.niche, &audience, &self.api_url);
        if self.validate_server {
            request
        } else {
            request.without_validation()
        }
    }
}

/// Outcome of a full deployment run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentSummary {
    pub brand_name: String,
    pub niche: String,
    pub brand_slug: String,
    pub scraper_api_url: String,
    /// Public URL of the site
    pub website_url: String,
    /// "git" or "vercel"
    pub publish_target: String,
    /// Remote or deployment URL reported by the publisher
    pub publish_url: String,
    pub products_count: u64,
    /// None when verification was disabled
    pub validation: Option<SystemValidation>,
    pub deployment_time_seconds: f64,
    pub generated_files: usize,
    pub project_path: PathBuf,
    pub gcp_project_id: Option<String>,
    pub next_steps: Vec<String>,
}

/// Runs generation and publishing end to end
pub struct DeploymentPipeline {
    generator: SiteGenerator,
    publisher: PublishTarget,
    deployed_dir: PathBuf,
    verify: bool,
}

impl DeploymentPipeline {
    pub fn new(generator: SiteGenerator, publisher: PublishTarget, deployed_dir: impl Into<PathBuf>) -> Self {
        Self {
            generator,
            publisher,
            deployed_dir: deployed_dir.into(),
            verify: true,
        }
    }

    /// Enable or disable post-deploy verification
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub async fn run(&self, request: &DeploymentRequest) -> Result<DeploymentSummary, PipelineError> {
        let started = Instant::now();
        tracing::info!("🚀 Starting deployment: {} ({})", request.brand_name, request.niche);

        // Step 1: server status (advisory; generation performs the strict check)
        let settings = self.generator.settings();
        let status = UpstreamClient::new(&request.api_url)
            .with_timeouts(settings.status_timeout, settings.fetch_timeout)
            .check_status()
            .await;
        if status.products_count < LOW_PRODUCT_WARNING {
            tracing::warn!("⚠️ Only {} products found, site may look empty", status.products_count);
        }

        // Step 2: generate
        let report = self.generator.generate(&request.site_request()).await?;

        // Step 3: publish
        let outcome = self.publisher.publish(&PublishRequest::from(&report)).await?;
        let website_url = match &self.publisher {
            PublishTarget::Hosted(_) => outcome.url.clone(),
            PublishTarget::Git(_) => HostedPublisher::site_url(&report.brand_slug),
        };

        // Step 4: verify
        let validation = if self.verify {
            Some(verify_deployment(&request.api_url, &website_url).await)
        } else {
            None
        };

        // Step 5: summarize
        let mut next_steps = report.next_steps.clone();
        next_steps.push(format!("Visit {website_url}"));
        if request.gcp_project_id.is_none() {
            next_steps.push("Set GCP_PROJECT_ID to record the hosting project".to_string());
        }

        let summary = DeploymentSummary {
            brand_name: report.brand_name.clone(),
            niche: report.niche.clone(),
            brand_slug: report.brand_slug.clone(),
            scraper_api_url: request.api_url.clone(),
            website_url,
            publish_target: self.publisher.name().to_string(),
            publish_url: outcome.url,
            products_count: status.products_count,
            validation,
            deployment_time_seconds: started.elapsed().as_secs_f64(),
            generated_files: report.generated_files.len(),
            project_path: report.project_path.clone(),
            gcp_project_id: request.gcp_project_id.clone(),
            next_steps,
        };

        // Step 6: persist
        save_record(&self.deployed_dir, &DeploymentRecord::new(summary.clone()))?;

        tracing::info!(
            "🎉 Deployment complete: {} in {:.1}s",
            summary.website_url,
            summary.deployment_time_seconds
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audience_defaults_to_niche_enthusiasts() {
        let request = DeploymentRequest::new("outdoor-adventure", "Trail Kit", "http://api:8000/");
        let site = request.site_request();
        assert_eq!(site.target_audience, "outdoor-adventure enthusiasts");
        assert_eq!(site.api_url, "http://api:8000");
        assert!(site.validate_server);

        let explicit = DeploymentRequest {
            target_audience: Some("Climbers".to_string()),
            validate_server: false,
            ..request
        };
        let site = explicit.site_request();
        assert_eq!(site.target_audience, "Climbers");
        assert!(!site.validate_server);
    }
}
