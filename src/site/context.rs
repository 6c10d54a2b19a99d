/// TemplateContext assembly
///
/// Resolves every value a site template can reference from the request, the
/// niche configuration, the product sample and the run timestamp. The result
/// is a pure function of its inputs.

use crate::config::NicheConfig;
use crate::site::types::SiteRequest;
use crate::template::TemplateContext;
use crate::upstream::ProductCatalog;
use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde_json::{json, Value};

/// Inputs for one context build
pub struct ContextInputs<'a> {
    pub request: &'a SiteRequest,
    pub brand_slug: &'a str,
    pub niche: &'a NicheConfig,
    pub catalog: &'a ProductCatalog,
    /// Maximum number of products embedded as fallback data
    pub sample_limit: usize,
    pub generated_at: DateTime<Utc>,
}

/// Build the context consumed by every template in the site catalog
pub fn build_context(inputs: &ContextInputs<'_>) -> TemplateContext {
    let request = inputs.request;
    let niche = inputs.niche;
    let site = &niche.site_config;
    let strategy = &niche.content_strategy;

    let generated_at = inputs.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);
    let audience = target_audience(request, niche);
    let tagline = non_empty(&site.tagline).unwrap_or_else(|| strategy.value_proposition().to_string());
    let description = non_empty(&site.description)
        .or_else(|| non_empty(&niche.seo_optimization.meta_description))
        .unwrap_or_else(|| format!("Hand-picked products for {audience}."));

    let sample = inputs.catalog.sample(inputs.sample_limit);
    let sample_products = serde_json::to_value(&sample).unwrap_or_else(|_| json!([]));

    let hero = json!({
        "headline": strategy.headline(),
        "subtitle": strategy.value_proposition(),
        "ctaText": strategy.call_to_action(),
    });

    let seo = json!({
        "title": format!("{} - {}", request.brand_name, strategy.headline()),
        "description": non_empty(&niche.seo_optimization.meta_description).unwrap_or_else(|| description.clone()),
        "keywords": niche.seo_optimization.keywords,
    });

    let site_object = json!({
        "brandName": request.brand_name,
        "brandSlug": inputs.brand_slug,
        "niche": site.niche,
        "tagline": tagline,
        "description": description,
        "targetAudience": audience,
        "apiUrl": request.api_url,
        "generatedAt": generated_at,
    });

    // Free text bound for JS/JSON source is emitted as a JSON string literal
    let package_description = json_literal(&format!("Affiliate marketing website for {}", request.brand_name));

    let sources = &niche.api_integration.data_sources;
    let product_sources = if sources.is_empty() {
        "live product API".to_string()
    } else {
        sources.join(", ")
    };

    TemplateContext::new()
        .with("brand_name", request.brand_name.as_str())
        .with("brand_slug", inputs.brand_slug)
        .with("niche", request.niche.as_str())
        .with("site_niche", site.niche.as_str())
        .with("tagline", tagline.as_str())
        .with("site_description", description.as_str())
        .with("api_url", request.api_url.as_str())
        .with("api_url_json", json_literal(&request.api_url))
        .with("generated_at", generated_at.as_str())
        .with("copyright_year", inputs.generated_at.year())
        .with("total_products", inputs.catalog.total())
        .with("sample_count", sample.len())
        .with("sample_products", sample_products)
        .with("categories", json!(site.primary_categories))
        .with("categories_list", site.primary_categories.join(", "))
        .with("call_to_action_json", json_literal(strategy.call_to_action()))
        .with("hero", hero)
        .with("seo", seo)
        .with("site", site_object)
        .with("package_description", package_description)
        .with("color_scheme", json!(niche.design_config.color_scheme))
        .with("color_primary", niche.color("primary", "#2D5016"))
        .with("color_secondary", niche.color("secondary", "#8FBC8F"))
        .with("color_accent", niche.color("accent", "#F4A460"))
        .with("color_background", niche.color("background", "#F5F5DC"))
        .with("color_text", niche.color("text", "#2F4F2F"))
        .with("font_heading", niche.font("heading", "Montserrat"))
        .with("font_body", niche.font("body", "Open Sans"))
        .with("font_accent", niche.font("accent", "Roboto Slab"))
        .with("product_sources", product_sources)
        .with(
            "update_frequency",
            niche.api_integration.update_frequency.as_deref().unwrap_or("on every request"),
        )
}

/// Audience from the request, then the niche configuration, then "{niche} enthusiasts"
fn target_audience(request: &SiteRequest, niche: &NicheConfig) -> String {
    non_empty(&request.target_audience)
        .or_else(|| non_empty(&niche.site_config.target_audience))
        .unwrap_or_else(|| format!("{} enthusiasts", request.niche))
}

fn json_literal(text: &str) -> String {
    Value::String(text.to_string()).to_string()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
