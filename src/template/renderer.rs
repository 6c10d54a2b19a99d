/// Placeholder substitution
///
/// `{{key}}` tokens are expanded in one left-to-right pass. Substituted text is
/// never re-scanned, so the result does not depend on key order and a value
/// that itself contains `{{...}}` is emitted literally.

use crate::template::context::TemplateContext;
use serde_json::Value;
use std::collections::BTreeSet;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Expand every `{{key}}` whose key exists in `context`
///
/// Tokens with unknown keys are left verbatim in the output.
pub fn render(template: &str, context: &TemplateContext) -> String {
    expand(template, context, |_| {})
}

/// Identifier-like `{{key}}` tokens that `render` would leave unexpanded
///
/// Tokens whose content is not a plain identifier (letters, digits, `_`) are
/// ignored, since JSX object literals such as `style={{ width: 4 }}` share the
/// same delimiters.
pub fn unresolved_placeholders(template: &str, context: &TemplateContext) -> BTreeSet<String> {
    let mut missing = BTreeSet::new();
    expand(template, context, |key| {
        if is_identifier(key) {
            missing.insert(key.to_string());
        }
    });
    missing
}

/// Text form of a context value
///
/// Strings are inserted verbatim; arrays and objects as two-space indented
/// JSON; other scalars as their JSON text.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

fn expand<F>(template: &str, context: &TemplateContext, mut on_missing: F) -> String
where
    F: FnMut(&str),
{
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let inner = &rest[start + OPEN.len()..];

        if let Some(end) = inner.find(CLOSE) {
            let key = &inner[..end];
            if let Some(value) = context.get(key) {
                output.push_str(&value_text(value));
                rest = &inner[end + CLOSE.len()..];
                continue;
            }
            // "{{{key}}}" reaches here with key "{key"; the rescan below picks up "{{key}}"
            if !key.starts_with('{') {
                on_missing(key);
            }
        }

        // Emit a single brace and rescan from the next character
        output.push('{');
        rest = &rest[start + 1..];
    }

    output.push_str(rest);
    output
}

fn is_identifier(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> TemplateContext {
        TemplateContext::new()
            .with("brand_name", "Adventure Gear Pro")
            .with("brand", "SHORT")
            .with("count", 12)
            .with("ratio", 4.5)
            .with("enabled", true)
            .with("nothing", Value::Null)
    }

    #[test]
    fn templates_without_placeholders_are_unchanged() {
        let ctx = context();
        for template in [
            "",
            "plain text",
            "const style = { a: 1 };",
            "<div style={{ margin: 0 }}>",
            "unclosed {{ brace",
            "}} stray close {",
        ] {
            assert_eq!(render(template, &ctx), template);
        }
    }

    #[test]
    fn known_keys_are_substituted_everywhere() {
        let out = render("{{brand_name}} / {{brand_name}} / {{count}}", &context());
        assert_eq!(out, "Adventure Gear Pro / Adventure Gear Pro / 12");
    }

    #[test]
    fn scalars_use_json_text() {
        let out = render("{{ratio}} {{enabled}} {{nothing}}", &context());
        assert_eq!(out, "4.5 true null");
    }

    #[test]
    fn missing_keys_survive_literally() {
        let ctx = context();
        assert_eq!(render("Hello {{missing}}!", &ctx), "Hello {{missing}}!");
        assert_eq!(
            unresolved_placeholders("{{missing}} {{brand}} {{ style: 1 }}", &ctx),
            BTreeSet::from(["missing".to_string()])
        );
    }

    #[test]
    fn prefix_keys_do_not_interfere() {
        // "brand" is a prefix of "brand_name"; order of keys cannot matter
        let out = render("{{brand}}-{{brand_name}}", &context());
        assert_eq!(out, "SHORT-Adventure Gear Pro");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let ctx = TemplateContext::new()
            .with("first", "{{second}}")
            .with("second", "expanded");
        assert_eq!(render("{{first}}", &ctx), "{{second}}");
    }

    #[test]
    fn triple_braces_keep_the_outer_brace() {
        let ctx = TemplateContext::new().with("key", "VALUE");
        assert_eq!(render("{{{key}}}", &ctx), "{VALUE}");
        assert!(unresolved_placeholders("{{{key}}}", &ctx).is_empty());
    }

    #[test]
    fn structures_are_pretty_printed_json() {
        let ctx = TemplateContext::new().with("items", json!([{ "name": "Tent" }]));
        let out = render("const ITEMS = {{items}};", &ctx);
        assert_eq!(out, "const ITEMS = [\n  {\n    \"name\": \"Tent\"\n  }\n];");
    }
}
