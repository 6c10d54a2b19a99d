/// Template context
///
/// The resolved mapping of placeholder name -> value for one generation run.
/// Values are JSON so that nested structures (product samples, hero copy,
/// color schemes) can be embedded into generated JavaScript as literals.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Named values available for `{{key}}` substitution
///
/// Ordered by key so that debug output and serialized snapshots are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateContext {
    values: BTreeMap<String, Value>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}
