//! Recovering structured output from LLM text.
//!
//! Models wrap JSON in prose, code fences and trailing notes. Recovery scans
//! for the first balanced `{...}` (then `[...]`) segment, ignoring brackets
//! inside string literals, and only accepts JSON objects.

use serde_json::Value;

use super::value::first_image_url;

/// Parse the blueprint object out of raw LLM text.
///
/// Returns `None` when no JSON object can be recovered.
pub fn parse_blueprint(raw: &str) -> Option<Value> {
    let payload = raw.trim();
    if payload.is_empty() {
        return None;
    }

    json_candidates(payload)
        .into_iter()
        .filter_map(|candidate| serde_json::from_str::<Value>(candidate).ok())
        .find(Value::is_object)
}

fn json_candidates(payload: &str) -> Vec<&str> {
    let mut candidates = Vec::new();
    for (open, close) in [('{', '}'), ('[', ']')] {
        if let Some(segment) = first_balanced_segment(payload, open, close) {
            candidates.push(segment);
        }
    }
    if candidates.is_empty() {
        candidates.push(payload);
    }
    candidates
}

/// The first `open`-started segment whose brackets balance.
fn first_balanced_segment(text: &str, open: char, close: char) -> Option<&str> {
    text.match_indices(open)
        .find_map(|(start, _)| balanced_segment(text, start, open, close))
}

/// Smallest substring starting at `start` with balanced `open`/`close`.
///
/// Brackets inside double-quoted strings (with backslash escapes) are ignored.
pub fn balanced_segment(text: &str, start: usize, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
        } else if ch == open {
            depth += 1;
        } else if ch == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                let end = start + offset + ch.len_utf8();
                return Some(&text[start..end]);
            }
        }
    }
    None
}

/// Extract a complete HTML document from an LLM response.
///
/// Prefers a fenced ```` ```html ```` block; otherwise takes the span from
/// `<!DOCTYPE` or `<html` through the last `</html>`.
pub fn extract_html(raw: &str) -> Option<String> {
    if let Some(fenced) = fenced_block(raw, "html") {
        if fenced.to_ascii_lowercase().contains("<html") {
            return Some(fenced.to_string());
        }
    }

    let lowered = raw.to_ascii_lowercase();
    let start = lowered.find("<!doctype").or_else(|| lowered.find("<html"))?;
    let end = lowered.rfind("</html>")? + "</html>".len();
    (end > start).then(|| raw[start..end].trim().to_string())
}

fn fenced_block<'a>(raw: &'a str, language: &str) -> Option<&'a str> {
    let opener = format!("```{language}");
    let lowered = raw.to_ascii_lowercase();
    let start = lowered.find(&opener)? + opener.len();
    let body_start = start + raw[start..].find('\n')? + 1;
    let body_end = body_start + raw[body_start..].find("```")?;
    Some(raw[body_start..body_end].trim())
}

/// Make sure every locked asset is listed in `image_assets.must_use`.
///
/// Creates the section when missing and converts a scalar `must_use` into a
/// list. Returns the URLs that had to be appended.
pub fn ensure_must_use(blueprint: &mut Value, locked_assets: &[String]) -> Vec<String> {
    if locked_assets.is_empty() {
        return Vec::new();
    }
    let Some(root) = blueprint.as_object_mut() else {
        return Vec::new();
    };

    let assets = root
        .entry("image_assets")
        .or_insert_with(|| Value::Object(Default::default()));
    if !assets.is_object() {
        *assets = Value::Object(Default::default());
    }
    let Some(assets) = assets.as_object_mut() else {
        return Vec::new();
    };

    let must_use = assets
        .entry("must_use")
        .or_insert_with(|| Value::Array(Vec::new()));
    let mut entries = match must_use.take() {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    };

    let present: Vec<String> = entries.iter().filter_map(first_image_url).collect();
    let missing: Vec<String> = locked_assets
        .iter()
        .filter(|url| !present.contains(url))
        .cloned()
        .collect();
    entries.extend(missing.iter().cloned().map(Value::String));
    *must_use = Value::Array(entries);
    missing
}
