/// Pre-generation validation of the product server
///
/// A server passes when it is healthy, reports at least one product and lists
/// at least one of the expected product sources.

use crate::upstream::types::ServerStatus;
use thiserror::Error;

/// Reason a server status was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("server not healthy: {reason}")]
    Unhealthy { reason: String },

    #[error("no products found on server (count: {count})")]
    NoProducts { count: u64 },

    #[error("expected product sources {expected:?} not found; available: {available:?}")]
    MissingSources {
        expected: Vec<String>,
        available: Vec<String>,
    },
}

/// Check a status record against the validation policy
///
/// Sources are matched case-insensitively against the JSON text of the
/// available site list, so `"Amazon.com"` satisfies `"amazon"`. An empty
/// `expected_sources` list disables the source check.
pub fn validate_status(status: &ServerStatus, expected_sources: &[String]) -> Result<(), ValidationFailure> {
    if !status.healthy {
        return Err(ValidationFailure::Unhealthy {
            reason: status.error.clone().unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    if status.products_count < 1 {
        return Err(ValidationFailure::NoProducts {
            count: status.products_count,
        });
    }

    if !expected_sources.is_empty() {
        let haystack = serde_json::to_string(&status.available_sites)
            .unwrap_or_default()
            .to_lowercase();
        let found = expected_sources
            .iter()
            .any(|source| haystack.contains(&source.to_lowercase()));
        if !found {
            return Err(ValidationFailure::MissingSources {
                expected: expected_sources.to_vec(),
                available: status.available_sites.clone(),
            });
        }
    }

    tracing::info!(
        "✅ Server validated: {} products from {:?}",
        status.products_count,
        status.available_sites
    );
    Ok(())
}
