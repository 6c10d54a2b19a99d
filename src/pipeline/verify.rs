/// Post-deployment verification
///
/// Soft checks only: every probe failure becomes `false`, never an error.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Timeout for the product server health probe
pub const API_HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for requests against the deployed site
pub const SITE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemValidation {
    /// `{api}/health` answered 200
    pub scraper_api_healthy: bool,
    /// `{site}` answered 200
    pub website_loads: bool,
    /// `{site}/api/products` answered 200 with `count > 0`
    pub api_integration_working: bool,
}

impl SystemValidation {
    pub fn all_passed(&self) -> bool {
        self.scraper_api_healthy && self.website_loads && self.api_integration_working
    }
}

/// Probe the product server and the deployed site
pub async fn verify_deployment(api_url: &str, website_url: &str) -> SystemValidation {
    tracing::info!("🔍 Validating complete system");
    let http = reqwest::Client::new();
    let api_url = api_url.trim_end_matches('/');
    let website_url = website_url.trim_end_matches('/');

    let scraper_api_healthy = responds_ok(&http, &format!("{api_url}/health"), API_HEALTH_TIMEOUT).await;
    let website_loads = responds_ok(&http, website_url, SITE_TIMEOUT).await;
    let api_integration_working = proxy_serves_products(&http, website_url).await;

    let validation = SystemValidation {
        scraper_api_healthy,
        website_loads,
        api_integration_working,
    };
    if validation.all_passed() {
        tracing::info!("✅ System validation passed");
    } else {
        tracing::warn!("⚠️ System validation incomplete: {:?}", validation);
    }
    validation
}

async fn responds_ok(http: &reqwest::Client, url: &str, timeout: Duration) -> bool {
    match http.get(url).timeout(timeout).send().await {
        Ok(response) => response.status() == StatusCode::OK,
        Err(e) => {
            tracing::debug!("⏭️ {} unreachable: {}", url, e);
            false
        }
    }
}

async fn proxy_serves_products(http: &reqwest::Client, website_url: &str) -> bool {
    let url = format!("{website_url}/api/products");
    let response = match http.get(&url).timeout(SITE_TIMEOUT).send().await {
        Ok(response) if response.status() == StatusCode::OK => response,
        Ok(response) => {
            tracing::debug!("⏭️ {} returned {}", url, response.status());
            return false;
        }
        Err(e) => {
            tracing::debug!("⏭️ {} unreachable: {}", url, e);
            return false;
        }
    };

    let body = match response.text().await {
        Ok(body) => body,
        Err(_) => return false,
    };
    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|data| data.get("count").and_then(Value::as_u64))
        .is_some_and(|count| count > 0)
}
