/// Declarative catalog of generated site files
///
/// Each entry maps a logical file to its template and its fixed output path.
/// Templates are compiled into the binary so a generation run depends only on
/// the niche configuration and the product server.

use serde::Serialize;

/// Role of a generated file within the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileKind {
    Page,
    Component,
    Style,
    BuildConfig,
    Manifest,
    RuntimeConfig,
    Documentation,
}

/// One logical output file
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Logical name (e.g., "home_page")
    pub name: &'static str,
    pub kind: FileKind,
    /// Output path relative to the project directory
    pub path: &'static str,
    pub template: &'static str,
}

/// Subdirectories created before any file is written
pub const PROJECT_DIRECTORIES: &[&str] = &[
    "pages",
    "pages/api",
    "pages/category",
    "components",
    "styles",
    "public",
    "config",
];

macro_rules! entry {
    ($name:literal, $kind:ident, $path:literal, $template:literal) => {
        CatalogEntry {
            name: $name,
            kind: FileKind::$kind,
            path: $path,
            template: include_str!(concat!("../../templates/", $template)),
        }
    };
}

/// Every file of a generated project, in write order
pub const SITE_CATALOG: &[CatalogEntry] = &[
    entry!("home_page", Page, "pages/index.js", "pages/index.js.tmpl"),
    entry!("category_page", Page, "pages/category/[slug].js", "pages/category/slug.js.tmpl"),
    entry!("products_api", Page, "pages/api/products.js", "pages/api/products.js.tmpl"),
    entry!("navigation", Component, "components/Navigation.js", "components/Navigation.js.tmpl"),
    entry!("hero", Component, "components/Hero.js", "components/Hero.js.tmpl"),
    entry!("product_grid", Component, "components/ProductGrid.js", "components/ProductGrid.js.tmpl"),
    entry!("product_card", Component, "components/ProductCard.js", "components/ProductCard.js.tmpl"),
    entry!("footer", Component, "components/Footer.js", "components/Footer.js.tmpl"),
    entry!("global_styles", Style, "styles/globals.css", "styles/globals.css.tmpl"),
    entry!("tailwind_config", BuildConfig, "tailwind.config.js", "project/tailwind.config.js.tmpl"),
    entry!("postcss_config", BuildConfig, "postcss.config.js", "project/postcss.config.js.tmpl"),
    entry!("package_manifest", Manifest, "package.json", "project/package.json.tmpl"),
    entry!("next_config", RuntimeConfig, "next.config.js", "project/next.config.js.tmpl"),
    entry!("env_example", RuntimeConfig, ".env.example", "project/env.example.tmpl"),
    entry!("vercel_config", RuntimeConfig, "vercel.json", "project/vercel.json.tmpl"),
    entry!("readme", Documentation, "README.md", "project/README.md.tmpl"),
    entry!("deployment_guide", Documentation, "DEPLOYMENT.md", "project/DEPLOYMENT.md.tmpl"),
];
