/// Command-line interface
///
/// `site-builder [--debug] [--config FILE] <status|generate|deploy|push>`.
/// Flags override the configuration file, which overrides the environment.

use crate::config::{validate_environment, Config};
use crate::pipeline::{DeploymentPipeline, DeploymentRequest, DeploymentSummary};
use crate::publish::{GitPublisher, HostedPublisher, PublishTarget};
use crate::site::{GenerationReport, GeneratorSettings, SiteGenerator, SiteRequest};
use crate::upstream::{validate_status, UpstreamClient};
use anyhow::{anyhow, bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate and deploy affiliate sites backed by a live product API", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// JSON file overriding environment configuration
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check the product server and print its status
    Status {
        /// Product server base URL (default: GCS_SERVER_URL)
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Generate a site project without publishing it
    Generate {
        #[command(flatten)]
        site: SiteArgs,

        /// Generate even if the product server fails validation
        #[arg(long)]
        skip_validation: bool,
    },
    /// Generate, deploy to the hosting provider and record the deployment
    Deploy {
        #[command(flatten)]
        site: SiteArgs,

        /// GCP project hosting the product server
        #[arg(long)]
        gcp_project: Option<String>,

        /// Vercel API token
        #[arg(long)]
        vercel_token: Option<String>,

        /// Skip post-deploy verification
        #[arg(long)]
        no_verify: bool,
    },
    /// Generate, force-push to a git remote and record the deployment
    Push {
        #[command(flatten)]
        site: SiteArgs,

        /// Remote repository URL (default: GIT_REMOTE_URL)
        #[arg(long)]
        repo: Option<String>,

        /// Branch to force-push (default: GIT_BRANCH or main)
        #[arg(long)]
        branch: Option<String>,

        /// Generate even if the product server fails validation
        #[arg(long)]
        skip_validation: bool,
    },
}

/// Site selection shared by generate/deploy/push
#[derive(Debug, Clone, Args)]
pub struct SiteArgs {
    /// Niche configuration name (default: SITE_NICHE)
    #[arg(long)]
    pub niche: Option<String>,

    /// Brand name (default: BRAND_NAME)
    #[arg(long)]
    pub brand: Option<String>,

    /// Target audience (default: TARGET_AUDIENCE)
    #[arg(long)]
    pub audience: Option<String>,

    /// Product server base URL (default: GCS_SERVER_URL)
    #[arg(long)]
    pub api_url: Option<String>,
}

impl SiteArgs {
    fn niche(&self, config: &Config) -> String {
        self.niche.clone().unwrap_or_else(|| config.site.niche.clone())
    }

    fn brand(&self, config: &Config) -> String {
        self.brand.clone().unwrap_or_else(|| config.site.brand_name.clone())
    }

    fn audience(&self, config: &Config) -> String {
        self.audience
            .clone()
            .unwrap_or_else(|| config.site.target_audience.clone())
    }
}

/// Execute the parsed command
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Status { api_url } => status(&config, api_url).await,
        Commands::Generate { site, skip_validation } => generate(&config, &site, skip_validation).await,
        Commands::Deploy {
            site,
            gcp_project,
            vercel_token,
            no_verify,
        } => deploy(&config, &site, gcp_project, vercel_token, no_verify).await,
        Commands::Push {
            site,
            repo,
            branch,
            skip_validation,
        } => push(&config, &site, repo, branch, skip_validation).await,
    }
}

fn resolve_api_url(flag: Option<String>, config: &Config) -> Result<String> {
    flag.or_else(|| config.server.url.clone())
        .map(|url| url.trim_end_matches('/').to_string())
        .ok_or_else(|| anyhow!("No product server URL: pass --api-url or set GCS_SERVER_URL"))
}

async fn status(config: &Config, api_url: Option<String>) -> Result<()> {
    let api_url = resolve_api_url(api_url, config)?;
    let status = UpstreamClient::new(&api_url)
        .with_timeouts(config.status_timeout(), config.product_fetch_timeout())
        .check_status()
        .await;

    println!("{}", serde_json::to_string_pretty(&status)?);

    match validate_status(&status, &config.server.expected_sources) {
        Ok(()) => {
            println!("✅ Server ready: {} products", status.products_count);
            Ok(())
        }
        Err(failure) => bail!("Server not ready: {}", failure),
    }
}

async fn generate(config: &Config, site: &SiteArgs, skip_validation: bool) -> Result<()> {
    let api_url = resolve_api_url(site.api_url.clone(), config)?;
    let mut request = SiteRequest::new(&site.brand(config), &site.niche(config), &site.audience(config), &api_url);
    if skip_validation {
        request = request.without_validation();
    }

    let generator = SiteGenerator::new(GeneratorSettings::from_config(config));
    let report = generator.generate(&request).await?;
    print_generation_report(&report);
    Ok(())
}

async fn deploy(
    config: &Config,
    site: &SiteArgs,
    gcp_project: Option<String>,
    vercel_token: Option<String>,
    no_verify: bool,
) -> Result<()> {
    let environment = validate_environment(|key| std::env::var(key).ok());
    if !environment.is_ready() {
        bail!(
            "Missing required environment variables: {}",
            environment.missing_required.join(", ")
        );
    }

    let api_url = resolve_api_url(site.api_url.clone(), config)?;
    let mut request = DeploymentRequest::new(&site.niche(config), &site.brand(config), &api_url);
    request.target_audience = Some(site.audience(config));
    request.gcp_project_id = gcp_project.or_else(|| config.deploy.gcp_project_id.clone());

    let token = vercel_token.or_else(|| config.deploy.vercel_token.clone());
    let pipeline = DeploymentPipeline::new(
        SiteGenerator::new(GeneratorSettings::from_config(config)),
        PublishTarget::Hosted(HostedPublisher::new(token)),
        config.paths.deployed_dir.clone(),
    )
    .with_verification(!no_verify);

    let summary = pipeline.run(&request).await?;
    print_deployment_summary(&summary);
    Ok(())
}

async fn push(
    config: &Config,
    site: &SiteArgs,
    repo: Option<String>,
    branch: Option<String>,
    skip_validation: bool,
) -> Result<()> {
    let api_url = resolve_api_url(site.api_url.clone(), config)?;
    let remote = repo
        .or_else(|| config.deploy.git_remote_url.clone())
        .ok_or_else(|| anyhow!("No git remote: pass --repo or set GIT_REMOTE_URL"))?;
    let branch = branch.unwrap_or_else(|| config.deploy.git_branch.clone());

    let mut request = DeploymentRequest::new(&site.niche(config), &site.brand(config), &api_url);
    request.target_audience = Some(site.audience(config));
    request.gcp_project_id = config.deploy.gcp_project_id.clone();
    request.validate_server = !skip_validation;

    let pipeline = DeploymentPipeline::new(
        SiteGenerator::new(GeneratorSettings::from_config(config)),
        PublishTarget::Git(GitPublisher::new(&remote, &branch)),
        config.paths.deployed_dir.clone(),
    )
    .with_verification(false);

    let summary = pipeline.run(&request).await?;
    print_deployment_summary(&summary);
    Ok(())
}

fn print_generation_report(report: &GenerationReport) {
    println!();
    println!("✅ Site generated: {}", report.brand_name);
    println!("   📁 Project: {}", report.project_path.display());
    println!("   📄 Files: {}", report.generated_files.len());
    println!(
        "   📦 Products: {} ({} embedded as fallback)",
        report.product_count, report.sample_size
    );
    println!("   ⏱️  Duration: {:.2}s", report.duration_seconds);
    println!();
    println!("Next steps:");
    for (i, step) in report.next_steps.iter().enumerate() {
        println!("   {}. {}", i + 1, step);
    }
}

fn print_deployment_summary(summary: &DeploymentSummary) {
    let mark = |ok: bool| if ok { "✅" } else { "❌" };

    println!();
    println!("🎉 Deployment complete: {}", summary.brand_name);
    println!("   🌐 Website: {}", summary.website_url);
    println!("   📤 Published via {}: {}", summary.publish_target, summary.publish_url);
    println!("   🔗 Product API: {}", summary.scraper_api_url);
    println!("   📦 Products: {}", summary.products_count);
    println!("   📄 Files: {}", summary.generated_files);
    println!("   ⏱️  Time: {:.1}s", summary.deployment_time_seconds);
    if let Some(validation) = &summary.validation {
        println!("   {} Product API healthy", mark(validation.scraper_api_healthy));
        println!("   {} Website loads", mark(validation.website_loads));
        println!("   {} API integration working", mark(validation.api_integration_working));
    }
    println!();
    println!("Next steps:");
    for (i, step) in summary.next_steps.iter().enumerate() {
        println!("   {}. {}", i + 1, step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "site-builder",
            "generate",
            "--niche",
            "outdoor-adventure",
            "--brand",
            "Trail Kit",
            "--skip-validation",
            "--debug",
        ])
        .expect("parses");
        assert!(cli.debug);
        match cli.command {
            Commands::Generate { site, skip_validation } => {
                assert_eq!(site.brand.as_deref(), Some("Trail Kit"));
                assert!(skip_validation);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn api_url_prefers_flag_then_config() {
        let mut config = Config::from_lookup(|_| None);
        assert!(resolve_api_url(None, &config).is_err());

        config.server.url = Some("http://config:8000".to_string());
        assert_eq!(resolve_api_url(None, &config).expect("config"), "http://config:8000");
        assert_eq!(
            resolve_api_url(Some("http://flag:9000/".to_string()), &config).expect("flag"),
            "http://flag:9000"
        );
    }
}
