/// Site Builder: affiliate site generation backed by a live product API
///
/// This library checks an external product server, renders a Next.js site
/// project from a declarative template catalog and publishes the result to a
/// git remote or a hosting provider.

// Core configuration and niche configuration store
pub mod config;

// External product server - JSON contract, status probing, validation policy
pub mod upstream;

// Placeholder rendering - pure {{key}} expansion
pub mod template;

// Site generation - file catalog, context assembly, project layout
pub mod site;

// Publishing - git force-push and hosted deployment
pub mod publish;

// End-to-end deployment runs and persisted deployment records
pub mod pipeline;

// Command-line interface
pub mod cli;

// Logging setup for the binary
pub mod telemetry;

// Re-export commonly used types for external consumers
pub use config::{Config, NicheConfig};
pub use pipeline::{DeploymentPipeline, DeploymentRecord, DeploymentRequest, DeploymentSummary};
pub use publish::{GitPublisher, HostedPublisher, PublishTarget};
pub use site::{GenerationReport, GeneratorSettings, SiteGenerator, SiteRequest};
pub use template::{render, TemplateContext};
pub use upstream::{ServerStatus, UpstreamClient};
