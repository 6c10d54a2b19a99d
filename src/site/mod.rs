/// Site generation layer
///
/// Turns a brand, a niche configuration and live product data into a
/// complete Next.js project directory.

// Request, report and error types
pub mod types;

// Declarative file catalog and skeleton layout
pub mod catalog;

// TemplateContext assembly
pub mod context;

// Slugs, skeleton creation and file writing
pub mod layout;

// Generation pipeline
pub mod generator;

pub use catalog::{CatalogEntry, FileKind, PROJECT_DIRECTORIES, SITE_CATALOG};
pub use generator::{render_site, GeneratorSettings, SiteGenerator, DEFAULT_SAMPLE_LIMIT};
pub use layout::slugify;
pub use types::{GeneratedFile, GenerationError, GenerationReport, SiteRequest};
