/// Site File Generator
///
/// Composes the server checks, niche configuration, template renderer and
/// file catalog into one generation run:
///
/// 1. Validate the product server (optional, fail fast, nothing written)
/// 2. Load the niche configuration
/// 3. Derive the brand slug and create the project skeleton
/// 4. Fetch a product sample (soft failure: empty sample)
/// 5. Build the TemplateContext
/// 6. Render and write every catalog entry

use crate::config::{Config, NicheConfig};
use crate::site::catalog::SITE_CATALOG;
use crate::site::context::{build_context, ContextInputs};
use crate::site::layout::{create_project_skeleton, slugify, write_site};
use crate::site::types::{GeneratedFile, GenerationError, GenerationReport, SiteRequest};
use crate::template::{render, unresolved_placeholders, TemplateContext};
use crate::upstream::{validate_status, UpstreamClient, PRODUCT_FETCH_TIMEOUT, STATUS_TIMEOUT};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Number of products embedded as fallback data
pub const DEFAULT_SAMPLE_LIMIT: usize = 6;

/// Generator settings derived from the application configuration
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub output_dir: PathBuf,
    pub niche_config_dir: PathBuf,
    pub expected_sources: Vec<String>,
    pub sample_limit: usize,
    pub status_timeout: Duration,
    pub fetch_timeout: Duration,
}

impl GeneratorSettings {
    pub fn new(output_dir: impl Into<PathBuf>, niche_config_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            niche_config_dir: niche_config_dir.into(),
            expected_sources: vec!["amazon".to_string(), "cabelas".to_string()],
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            status_timeout: STATUS_TIMEOUT,
            fetch_timeout: PRODUCT_FETCH_TIMEOUT,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            output_dir: config.paths.output_dir.clone(),
            niche_config_dir: config.paths.niche_config_dir.clone(),
            expected_sources: config.server.expected_sources.clone(),
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            status_timeout: config.status_timeout(),
            fetch_timeout: config.product_fetch_timeout(),
        }
    }
}

/// Generates Next.js affiliate site projects
#[derive(Debug, Clone)]
pub struct SiteGenerator {
    settings: GeneratorSettings,
}

impl SiteGenerator {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Run a full generation stamped with the current time
    pub async fn generate(&self, request: &SiteRequest) -> Result<GenerationReport, GenerationError> {
        self.generate_at(request, Utc::now()).await
    }

    /// Run a full generation with an explicit timestamp
    ///
    /// Identical requests, server data and timestamps produce byte-identical projects.
    pub async fn generate_at(
        &self,
        request: &SiteRequest,
        generated_at: DateTime<Utc>,
    ) -> Result<GenerationReport, GenerationError> {
        let started = Instant::now();
        tracing::info!(
            "🏗️ Generating site '{}' for niche '{}'",
            request.brand_name,
            request.niche
        );

        let client = UpstreamClient::new(&request.api_url)
            .with_timeouts(self.settings.status_timeout, self.settings.fetch_timeout);

        if request.validate_server {
            let status = client.check_status().await;
            validate_status(&status, &self.settings.expected_sources)?;
        } else {
            tracing::warn!("⚠️ Skipping product server validation");
        }

        let niche = NicheConfig::load(&self.settings.niche_config_dir, &request.niche)?;

        let brand_slug = slugify(&request.brand_name);
        if brand_slug.is_empty() {
            return Err(GenerationError::InvalidBrand {
                brand: request.brand_name.clone(),
            });
        }
        let project_dir = create_project_skeleton(&self.settings.output_dir, &brand_slug)?;

        let catalog = client.fetch_product_sample().await;

        let context = build_context(&ContextInputs {
            request,
            brand_slug: &brand_slug,
            niche: &niche,
            catalog: &catalog,
            sample_limit: self.settings.sample_limit,
            generated_at,
        });
        let files = render_site(&context);
        let generated_files = write_site(&project_dir, &files)?;

        let sample_size = catalog.sample(self.settings.sample_limit).len();
        let duration_seconds = started.elapsed().as_secs_f64();
        tracing::info!(
            "✅ Generated {} files in {} ({:.2}s)",
            generated_files.len(),
            project_dir.display(),
            duration_seconds
        );

        Ok(GenerationReport {
            brand_name: request.brand_name.clone(),
            niche: request.niche.clone(),
            brand_slug,
            api_url: request.api_url.clone(),
            next_steps: next_steps(&project_dir, &request.api_url),
            project_path: project_dir,
            generated_files,
            product_count: catalog.total(),
            sample_size,
            duration_seconds,
            generated_at,
        })
    }
}

/// Render every catalog entry against `context`
///
/// Unresolved placeholders are left in place and reported at warn level.
pub fn render_site(context: &TemplateContext) -> Vec<GeneratedFile> {
    SITE_CATALOG
        .iter()
        .map(|entry| {
            let missing = unresolved_placeholders(entry.template, context);
            if !missing.is_empty() {
                tracing::warn!("⚠️ Unresolved placeholders in {}: {:?}", entry.path, missing);
            }
            GeneratedFile {
                path: PathBuf::from(entry.path),
                content: render(entry.template, context),
            }
        })
        .collect()
}

fn next_steps(project_dir: &std::path::Path, api_url: &str) -> Vec<String> {
    vec![
        format!("cd {}", project_dir.display()),
        "npm install".to_string(),
        "npm run dev".to_string(),
        format!("Set SCRAPER_API_URL={} in the hosting environment", api_url),
    ]
}
