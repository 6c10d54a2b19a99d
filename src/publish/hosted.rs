/// Hosted deployment publisher
///
/// Stub integration point for the hosting provider: no network deployment is
/// performed, the expected production URL is derived from the brand slug.

use crate::publish::{PublishError, PublishOutcome, PublishRequest};

#[derive(Debug, Clone, Default)]
pub struct HostedPublisher {
    token: Option<String>,
}

impl HostedPublisher {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// Production URL for a brand slug
    pub fn site_url(slug: &str) -> String {
        format!("https://{slug}.vercel.app")
    }

    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome, PublishError> {
        if !request.project_dir.is_dir() {
            return Err(PublishError::MissingProject {
                path: request.project_dir.clone(),
            });
        }

        if self.token.is_none() {
            tracing::warn!("⚠️ No Vercel token configured; deploy manually with `npx vercel --prod`");
        }

        let url = Self::site_url(&request.brand_slug);
        tracing::info!("🌐 Hosted deployment URL: {}", url);
        Ok(PublishOutcome {
            target: "vercel".to_string(),
            url,
        })
    }
}
