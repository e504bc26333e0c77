//! Static HTML preview of a card blueprint.
//!
//! The page has no JavaScript so it can be saved straight to a `.html` file
//! and opened in a browser.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::value::{as_list, field, first_image_url, text};

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$").expect("Invalid hex color pattern")
});

const PREVIEW_CSS: &str = r#"
    :root { color-scheme: light; font-family: 'Helvetica Neue', Arial, sans-serif; }
    body { margin: 0; padding: 2rem; background: #f3f4f6; color: #1f2933; }
    .preview { max-width: 960px; margin: 0 auto; display: grid; gap: 2rem; }
    @media (min-width: 900px) { .preview { grid-template-columns: 2fr 1fr; align-items: start; } }
    .card { position: relative; border-radius: 20px; overflow: hidden; min-height: 340px;
            display: flex; box-shadow: 0 20px 40px rgba(15, 23, 42, 0.18);
            background: linear-gradient(135deg, rgba(255,255,255,0.94), rgba(255,255,255,0.85)); }
    .card__hero { flex: 1; display: flex; align-items: center; justify-content: center;
                  padding: 3rem 2.5rem; position: relative;
                  background-size: cover; background-position: center; }
    .card__hero::after { content: ""; position: absolute; inset: 0;
                         background: rgba(17, 24, 39, 0.55); opacity: var(--overlay); }
    .card__content { position: relative; z-index: 1; width: 100%; text-align: center;
                     color: var(--text-color); }
    .card__summary { text-transform: uppercase; letter-spacing: 0.3em; font-size: 0.75rem;
                     margin-bottom: 1rem; opacity: 0.8; }
    .card__headline { font-size: clamp(2.2rem, 3vw + 1.5rem, 3.2rem); margin: 0 0 1.5rem 0;
                      line-height: 1.1; }
    .card__body { font-size: 1.05rem; line-height: 1.6; margin: 0 0 2rem 0; white-space: pre-line; }
    .card__closing { font-size: 1rem; font-weight: 600; margin: 0; }
    .details { background: white; border-radius: 16px; padding: 1.5rem;
               box-shadow: 0 12px 24px rgba(15, 23, 42, 0.08); }
    .details h2 { margin-top: 0; font-size: 1.25rem; }
    .details ul { padding-left: 1.2rem; }
    .details li { margin-bottom: 0.5rem; }
    .palette { list-style: none; padding: 0; margin: 0; display: flex; flex-wrap: wrap; gap: 0.75rem; }
    .palette li { display: flex; align-items: center; gap: 0.5rem; font-size: 0.95rem; }
    .palette__chip { width: 28px; height: 28px; border-radius: 50%; background: #e5e7eb;
                     border: 1px solid rgba(15,23,42,0.15); }
    .meta { list-style: none; padding: 0; margin: 1rem 0 0 0; font-size: 0.95rem; }
    footer { margin-top: 2rem; font-size: 0.85rem; color: #4b5563; text-align: center; }
"#;

/// Render a standalone HTML preview page for a blueprint object.
pub fn blueprint_to_html(blueprint: &Value) -> String {
    let summary = text(blueprint.get("card_summary"));
    let headline = Some(text(field(blueprint, &["messaging", "headline"])))
        .filter(|h| !h.is_empty())
        .or_else(|| Some(summary.clone()).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| "Your Card Headline".to_string());
    let body = text(field(blueprint, &["messaging", "body"]));
    let closing = text(field(blueprint, &["messaging", "closing"]));

    let palette = field(blueprint, &["visual_direction", "palette"]);
    let typography = text(field(blueprint, &["visual_direction", "typography"]));
    let layout = text(field(blueprint, &["visual_direction", "layout"]));
    let background_plan = text(field(blueprint, &["visual_direction", "background_image_plan"]));

    let background_image = select_background_image(blueprint.get("image_assets"));

    let production_notes = as_list(blueprint.get("production_notes"));
    let next_questions = as_list(blueprint.get("next_questions"));

    let palette_markup = palette_markup(palette);
    let production_markup =
        list_items(&production_notes).unwrap_or_else(|| "<li>No production notes provided.</li>".to_string());
    let questions_markup =
        list_items(&next_questions).unwrap_or_else(|| "<li>No outstanding questions.</li>".to_string());

    let meta: Vec<String> = [
        ("Typography", &typography),
        ("Layout", &layout),
        ("Background Plan", &background_plan),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("<li><strong>{label}:</strong> {}</li>", escape_html(value)))
    .collect();
    let meta_block = if meta.is_empty() {
        String::new()
    } else {
        format!("<ul class=\"meta\">{}</ul>", meta.concat())
    };

    let (hero_style, overlay, text_color) = match &background_image {
        Some(url) => {
            let safe_url = url.replace('"', "%22").replace('\'', "%27");
            (
                format!(" style=\"background-image: url('{safe_url}');\""),
                "1",
                "#f9fafb",
            )
        }
        None => (String::new(), "0", "#1f2933"),
    };

    let summary_block = optional_block("div", "card__summary", &summary);
    let body_block = optional_block("p", "card__body", &body);
    let closing_block = optional_block("p", "card__closing", &closing);
    let headline = escape_html(&headline);
    let css = PREVIEW_CSS;

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Card Preview</title>
  <style>{css}    .card {{ --overlay: {overlay}; --text-color: {text_color}; }}
  </style>
</head>
<body>
  <div class="preview">
    <div class="card">
      <div class="card__hero"{hero_style}>
        <div class="card__content">
          {summary_block}
          <h1 class="card__headline">{headline}</h1>
          {body_block}
          {closing_block}
        </div>
      </div>
    </div>
    <aside class="details">
      <h2>Design Direction</h2>
      <h3>Palette</h3>
      <ul class="palette">{palette_markup}</ul>
      {meta_block}
      <h3>Production Notes</h3>
      <ul>{production_markup}</ul>
      <h3>Open Questions</h3>
      <ul>{questions_markup}</ul>
    </aside>
  </div>
  <footer>Generated from your card blueprint. Feel free to customise the HTML further.</footer>
</body>
</html>"#
    )
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

fn optional_block(tag: &str, class: &str, content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    format!("<{tag} class=\"{class}\">{}</{tag}>", escape_html(content))
}

fn list_items(items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item)))
            .collect(),
    )
}

fn palette_markup(palette: Option<&Value>) -> String {
    let entries = as_list(palette);
    if entries.is_empty() {
        let fallback = Some(text(palette))
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "Not specified".to_string());
        return format!("<li>{}</li>", escape_html(&fallback));
    }
    entries
        .iter()
        .map(|entry| {
            let chip_style = if HEX_COLOR.is_match(entry) {
                format!(" style=\"background:{entry};\"")
            } else {
                String::new()
            };
            format!(
                "<li><span class=\"palette__chip\"{chip_style}></span><span>{}</span></li>",
                escape_html(entry)
            )
        })
        .collect()
}

/// First `must_use` image, else the first `pexels_options` image.
fn select_background_image(image_assets: Option<&Value>) -> Option<String> {
    let assets = image_assets?;
    ["must_use", "pexels_options"]
        .into_iter()
        .find_map(|key| assets.get(key).and_then(first_image_url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_includes_core_content() {
        let blueprint = json!({
            "card_summary": "Elegant wedding invitation",
            "messaging": {
                "headline": "Celebrate with us",
                "body": "Join us for a joyful union",
                "closing": "With love, A&B"
            },
            "visual_direction": {
                "palette": ["#FADADD", "#C5A3FF", "ivory"],
                "typography": "Script headline with serif body",
                "layout": "Centered folded layout",
                "background_image_plan": "Watercolour wash backdrop"
            },
            "image_assets": {
                "must_use": ["https://example.com/custom.jpg"],
                "pexels_options": ["https://images.example/alt.jpg"]
            },
            "production_notes": ["Print on 300gsm cotton paper", "Gold foil accents"],
            "next_questions": ["Confirm RSVP deadline"]
        });

        let html = blueprint_to_html(&blueprint);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Celebrate with us"));
        assert!(html.contains("Join us for a joyful union"));
        assert!(html.contains("With love, A&amp;B"));
        assert!(html.contains("url('https://example.com/custom.jpg')"));
        assert!(!html.contains("alt.jpg"));
        assert!(html.contains("style=\"background:#FADADD;\""));
        assert!(html.contains("<span>ivory</span>"));
        assert!(html.contains("<strong>Typography:</strong>"));
        assert!(html.contains("Gold foil accents"));
        assert!(html.contains("Confirm RSVP deadline"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_handles_missing_sections() {
        let blueprint = json!({"messaging": {"headline": "Simple Hello"}, "image_assets": {}});
        let html = blueprint_to_html(&blueprint);
        assert!(html.contains("Simple Hello"));
        assert!(html.contains("No production notes provided."));
        assert!(html.contains("No outstanding questions."));
        assert!(html.contains("<li>Not specified</li>"));
        assert!(!html.contains("background-image"));
        assert!(!html.contains("class=\"meta\""));
    }

    #[test]
    fn test_headline_fallbacks() {
        let html = blueprint_to_html(&json!({"card_summary": "Diwali greetings"}));
        assert!(html.contains("<h1 class=\"card__headline\">Diwali greetings</h1>"));

        let html = blueprint_to_html(&json!({}));
        assert!(html.contains("Your Card Headline"));
    }

    #[test]
    fn test_background_falls_back_to_inspiration_objects() {
        let blueprint = json!({
            "image_assets": {
                "must_use": [],
                "pexels_options": [{"image_url": "https://images.pexels.com/1.jpeg", "photographer": "A"}]
            }
        });
        let html = blueprint_to_html(&blueprint);
        assert!(html.contains("url('https://images.pexels.com/1.jpeg')"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = blueprint_to_html(&json!({"messaging": {"headline": "<script>alert('x')</script>"}}));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"));
    }

    #[test]
    fn test_quotes_in_background_url_are_neutralised() {
        let blueprint = json!({"image_assets": {"must_use": "https://x.example/a'b\".png"}});
        let html = blueprint_to_html(&blueprint);
        assert!(html.contains("url('https://x.example/a%27b%22.png')"));
    }
}
