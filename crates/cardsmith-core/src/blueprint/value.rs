//! Lenient accessors for LLM-produced blueprint JSON.
//!
//! The copywriter is asked for a fixed shape but may return strings where
//! lists were expected (or the other way round). These helpers read fields
//! without trusting their types.

use serde_json::Value;

/// Keys checked, in order, when an image entry is an object.
const IMAGE_URL_KEYS: [&str; 3] = ["image_url", "url", "src"];

/// Nested field lookup, e.g. `field(bp, &["messaging", "headline"])`.
pub fn field<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(key))
}

/// Scalar text, trimmed. Non-string values use their JSON form.
pub fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Interpret a value as a list of non-empty strings.
///
/// Arrays map element-wise; strings split on newlines first, then commas.
pub fn as_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| text(Some(item)))
            .filter(|item| !item.is_empty())
            .collect(),
        Some(other) => {
            let whole = text(Some(other));
            let parts: Vec<&str> = if whole.contains('\n') {
                whole.lines().collect()
            } else if whole.contains(',') {
                whole.split(',').collect()
            } else {
                vec![whole.as_str()]
            };
            parts
                .into_iter()
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()
        }
    }
}

/// First image URL found in a string, object or (nested) array.
pub fn first_image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string),
        Value::Object(map) => IMAGE_URL_KEYS.iter().find_map(|key| match map.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }),
        Value::Array(items) => items.iter().find_map(first_image_url),
        _ => None,
    }
}

/// Every image URL in a value, deduplicated, with internal whitespace removed.
pub fn collect_image_urls(value: Option<&Value>) -> Vec<String> {
    let mut urls = Vec::new();
    if let Some(value) = value {
        collect_into(value, &mut urls);
    }
    urls
}

fn collect_into(value: &Value, urls: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(s) => push_url(s, urls),
        Value::Object(map) => {
            for key in IMAGE_URL_KEYS {
                if let Some(Value::String(s)) = map.get(key) {
                    push_url(s, urls);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_into(item, urls);
            }
        }
        other => push_url(&other.to_string(), urls),
    }
}

fn push_url(raw: &str, urls: &mut Vec<String>) {
    let collapsed: String = raw.split_whitespace().collect();
    if !collapsed.is_empty() && !urls.contains(&collapsed) {
        urls.push(collapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_walks_nested_objects() {
        let bp = json!({"messaging": {"headline": "Hi"}});
        assert_eq!(field(&bp, &["messaging", "headline"]), Some(&json!("Hi")));
        assert_eq!(field(&bp, &["messaging", "body"]), None);
        assert_eq!(field(&bp, &["visual_direction", "palette"]), None);
    }

    #[test]
    fn test_text_handles_scalars() {
        assert_eq!(text(None), "");
        assert_eq!(text(Some(&json!(null))), "");
        assert_eq!(text(Some(&json!("  hi "))), "hi");
        assert_eq!(text(Some(&json!(3))), "3");
    }

    #[test]
    fn test_as_list_variants() {
        assert_eq!(as_list(Some(&json!(["a", " ", "b"]))), vec!["a", "b"]);
        assert_eq!(as_list(Some(&json!("one\ntwo, three"))), vec!["one", "two, three"]);
        assert_eq!(as_list(Some(&json!("red, gold"))), vec!["red", "gold"]);
        assert_eq!(as_list(Some(&json!("single"))), vec!["single"]);
        assert!(as_list(Some(&json!(""))).is_empty());
        assert!(as_list(None).is_empty());
    }

    #[test]
    fn test_first_image_url_shapes() {
        assert_eq!(first_image_url(&json!(" https://a/1.png ")), Some("https://a/1.png".into()));
        assert_eq!(first_image_url(&json!({"src": "https://a/2.png"})), Some("https://a/2.png".into()));
        assert_eq!(
            first_image_url(&json!(["", {"url": "https://a/3.png"}])),
            Some("https://a/3.png".into())
        );
        assert_eq!(first_image_url(&json!([])), None);
        assert_eq!(first_image_url(&json!(5)), None);
    }

    #[test]
    fn test_collect_image_urls_dedups_and_collapses_whitespace() {
        let value = json!([
            "https://a/1.png",
            {"image_url": " https://a/2.png?x=c\nompress "},
            ["https://a/1.png"]
        ]);
        assert_eq!(
            collect_image_urls(Some(&value)),
            vec!["https://a/1.png", "https://a/2.png?x=compress"]
        );
    }
}
