/// Niche configuration store
///
/// A niche (e.g. "outdoor-adventure") is described by one JSON document at
/// {niche_config_dir}/{niche}.json. The document drives site metadata, theme
/// colors and marketing copy for every generated file. Loaded once per run
/// and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while resolving a niche configuration
#[derive(Debug, Error)]
pub enum NicheConfigError {
    #[error("Configuration file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Invalid niche name '{niche}': expected lowercase letters, digits, '-' or '_'")]
    InvalidName { niche: String },

    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Complete configuration for one niche
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NicheConfig {
    /// Site metadata (niche id, brand, categories)
    pub site_config: SiteConfig,
    /// Visual theme (color scheme, typography)
    #[serde(default)]
    pub design_config: DesignConfig,
    /// Marketing copy variants
    #[serde(default)]
    pub content_strategy: ContentStrategy,
    #[serde(default)]
    pub seo_optimization: SeoOptimization,
    /// How the generated site talks to the product server
    #[serde(default)]
    pub api_integration: ApiIntegration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Niche identifier exposed to the generated site (e.g., "outdoor-adventure")
    pub niche: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub target_audience: String,
    /// Category slugs used for navigation and /category/[slug] pages
    #[serde(default)]
    pub primary_categories: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignConfig {
    /// Named color slots: primary, secondary, accent, background, ...
    #[serde(default)]
    pub color_scheme: BTreeMap<String, String>,
    /// Named font slots: heading, body, accent
    #[serde(default)]
    pub typography: BTreeMap<String, String>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub hero_style: Option<String>,
    #[serde(default)]
    pub card_style: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentStrategy {
    #[serde(default)]
    pub hero_headlines: Vec<String>,
    #[serde(default)]
    pub value_propositions: Vec<String>,
    #[serde(default)]
    pub primary_ctas: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoOptimization {
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiIntegration {
    #[serde(default)]
    pub data_sources: Vec<String>,
    #[serde(default)]
    pub update_frequency: Option<String>,
    #[serde(default)]
    pub cache_duration: Option<String>,
    #[serde(default = "default_fallback_enabled")]
    pub fallback_enabled: bool,
}

impl Default for ApiIntegration {
    fn default() -> Self {
        Self {
            data_sources: Vec::new(),
            update_frequency: None,
            cache_duration: None,
            fallback_enabled: true,
        }
    }
}

fn default_fallback_enabled() -> bool {
    true
}

impl NicheConfig {
    /// Load {dir}/{niche}.json
    ///
    /// The niche name doubles as a file name, so anything that is not a plain
    /// slug is rejected before touching the filesystem.
    pub fn load(dir: &Path, niche: &str) -> Result<Self, NicheConfigError> {
        if !is_plain_slug(niche) {
            return Err(NicheConfigError::InvalidName { niche: niche.to_string() });
        }

        let path = dir.join(format!("{niche}.json"));
        if !path.is_file() {
            return Err(NicheConfigError::NotFound { path });
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| NicheConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config: NicheConfig = serde_json::from_str(&raw)
            .map_err(|source| NicheConfigError::Malformed { path: path.clone(), source })?;

        tracing::debug!("📋 Loaded niche configuration: {}", path.display());
        Ok(config)
    }

    /// Color for a named slot, or the given fallback
    pub fn color<'a>(&'a self, slot: &str, fallback: &'a str) -> &'a str {
        self.design_config
            .color_scheme
            .get(slot)
            .map(String::as_str)
            .unwrap_or(fallback)
    }

    /// Font family for a named slot, or the given fallback
    pub fn font<'a>(&'a self, slot: &str, fallback: &'a str) -> &'a str {
        self.design_config
            .typography
            .get(slot)
            .map(String::as_str)
            .unwrap_or(fallback)
    }
}

impl ContentStrategy {
    pub fn headline(&self) -> &str {
        first_or(&self.hero_headlines, "Gear Up for Adventure")
    }

    pub fn value_proposition(&self) -> &str {
        first_or(&self.value_propositions, "Quality gear at great prices")
    }

    pub fn call_to_action(&self) -> &str {
        first_or(&self.primary_ctas, "Shop Now")
    }
}

fn first_or<'a>(items: &'a [String], fallback: &'a str) -> &'a str {
    items.first().map(String::as_str).unwrap_or(fallback)
}

fn is_plain_slug(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}
