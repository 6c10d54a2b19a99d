/// Product server record types
///
/// Mirrors the JSON contract of the running scraper API:
/// `GET /products` -> { count, products: [...] } and `GET /sites` -> { sites: [...] }.
/// Records are deserialized leniently because they are scraped data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Product price as reported by a scraper: a number, or text such as "$129.99"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl Price {
    /// Numeric value, stripping currency symbols from textual prices
    pub fn amount(&self) -> Option<f64> {
        match self {
            Price::Amount(value) => Some(*value),
            Price::Text(text) => {
                let cleaned: String = text
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.')
                    .collect();
                cleaned.parse().ok()
            }
        }
    }
}

/// A single product owned by the external server
///
/// Unknown fields (e.g. "id", "source", "scraped_at") are kept in `extra` so
/// the embedded sample carries everything the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub affiliate_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Body of `GET /products`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    /// Total reported by the server; authoritative for counts even when it
    /// disagrees with `products.len()`
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: Option<u64>,
    /// Raw product items; converted to `ProductRecord` on demand so a single
    /// odd record cannot invalidate the whole response
    #[serde(default, deserialize_with = "null_as_empty")]
    pub products: Vec<Value>,
}

impl ProductCatalog {
    /// Empty catalog used when the product fetch fails
    pub fn empty() -> Self {
        Self {
            count: Some(0),
            products: Vec::new(),
        }
    }

    /// Reported total, falling back to the array length when `count` is absent
    pub fn total(&self) -> u64 {
        self.count.unwrap_or(self.products.len() as u64)
    }

    /// `(count, products.len())` when the two disagree
    pub fn count_mismatch(&self) -> Option<(u64, usize)> {
        match self.count {
            Some(count) if count != self.products.len() as u64 => Some((count, self.products.len())),
            _ => None,
        }
    }

    /// First `limit` products that parse as records, in server order
    pub fn sample(&self, limit: usize) -> Vec<ProductRecord> {
        self.products
            .iter()
            .filter_map(|item| match serde_json::from_value::<ProductRecord>(item.clone()) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!("⏭️ Skipping unparseable product record: {}", e);
                    None
                }
            })
            .take(limit)
            .collect()
    }
}

/// Whole non-negative numbers, numeric text or nothing; anything else counts as absent
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.is_finite() && *value >= 0.0 && value.fract() == 0.0)
                .map(|value| value as u64)
        }),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    };
    Ok(count)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `GET /sites`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SitesResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sites: Vec<Value>,
}

impl SitesResponse {
    /// Site entries as text; non-string entries keep their JSON form
    pub fn into_names(self) -> Vec<String> {
        self.sites
            .into_iter()
            .map(|site| match site {
                Value::String(name) => name,
                other => other.to_string(),
            })
            .collect()
    }
}

/// Reduced view of the product server's health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStatus {
    /// True iff `/health` answered 200 and no probe failed in transport
    pub healthy: bool,
    /// `count` field of `/products` (0 when the endpoint is not 200)
    pub products_count: u64,
    /// `sites` field of `/sites` (empty when the endpoint is not 200)
    pub available_sites: Vec<String>,
    /// Base URL that was probed
    pub url: String,
    pub last_checked: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerStatus {
    /// Status for a server that could not be probed
    pub fn unreachable(url: &str, error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            products_count: 0,
            available_sites: Vec::new(),
            url: url.to_string(),
            last_checked: Utc::now(),
            error: Some(error.into()),
        }
    }
}
