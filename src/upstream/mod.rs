/// Upstream product server layer
///
/// Talks to the already-running scraper API:
/// - Record types for its JSON contract
/// - Status probing and product fetching with explicit timeouts
/// - The validation policy applied before generation

// JSON contract types (ProductRecord, ProductCatalog, ServerStatus)
pub mod types;

// reqwest-based client with soft-failing probes
pub mod client;

// Pre-generation validation policy
pub mod validation;

pub use client::{UpstreamClient, UpstreamError, PRODUCT_FETCH_TIMEOUT, STATUS_TIMEOUT};
pub use types::{Price, ProductCatalog, ProductRecord, ServerStatus};
pub use validation::{validate_status, ValidationFailure};
