//! Prompt for turning a blueprint into a finished HTML/CSS card.

use serde_json::Value;

use super::value::{as_list, collect_image_urls, field, text};

/// Compose instructions for an LLM to render the blueprint as a standalone
/// HTML document.
pub fn build_card_html_prompt(blueprint: &Value) -> String {
    let summary = text(blueprint.get("card_summary"));
    let headline = text(field(blueprint, &["messaging", "headline"]));
    let body = text(field(blueprint, &["messaging", "body"]));
    let closing = text(field(blueprint, &["messaging", "closing"]));

    let palette = as_list(field(blueprint, &["visual_direction", "palette"]));
    let typography = text(field(blueprint, &["visual_direction", "typography"]));
    let layout = text(field(blueprint, &["visual_direction", "layout"]));
    let background_plan = text(field(blueprint, &["visual_direction", "background_image_plan"]));

    let must_use = collect_image_urls(field(blueprint, &["image_assets", "must_use"]));
    let inspirations = collect_image_urls(field(blueprint, &["image_assets", "pexels_options"]));

    let production_notes = as_list(blueprint.get("production_notes"));
    let next_questions = as_list(blueprint.get("next_questions"));

    let mut lines: Vec<String> = vec![
        "You are an expert HTML/CSS designer creating a single invitation or greeting card.".into(),
        "Produce a complete <html> document with inline <style> so the design renders standalone."
            .into(),
        "Do not include any JavaScript.".into(),
    ];

    if !summary.is_empty() {
        push_section(&mut lines, "Design intent:", vec![summary]);
    }

    let copy: Vec<String> = [("Headline", headline), ("Body", body), ("Closing", closing)]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect();
    push_section(&mut lines, "Card copy:", copy);

    let mut direction = Vec::new();
    if !palette.is_empty() {
        direction.push("Palette:".to_string());
        direction.extend(palette.iter().map(|color| format!("  - {color}")));
    }
    for (label, value) in [
        ("Typography", typography),
        ("Layout guidance", layout),
        ("Background plan", background_plan),
    ] {
        if !value.is_empty() {
            direction.push(format!("{label}: {value}"));
        }
    }
    push_section(&mut lines, "Visual direction:", direction);

    let mut imagery = Vec::new();
    if !must_use.is_empty() {
        imagery.push("Embed these user-provided images as hero/background assets:".to_string());
        imagery.extend(must_use.iter().map(|url| format!("  - {url}")));
    }
    if !inspirations.is_empty() {
        imagery.push("Optionally reference these Pexels inspirations for mood:".to_string());
        imagery.extend(inspirations.iter().map(|url| format!("  - {url}")));
    }
    push_section(&mut lines, "Imagery cues:", imagery);

    push_section(
        &mut lines,
        "Production notes (honour in layout decisions):",
        production_notes,
    );
    push_section(
        &mut lines,
        "Open questions from the brief (avoid guessing details):",
        next_questions,
    );

    push_section(
        &mut lines,
        "Accessibility and formatting requirements:",
        vec![
            "Make text readable with sufficient contrast.".to_string(),
            "Use semantic HTML structure with clearly separated sections.".to_string(),
            "Keep the layout responsive for both desktop and mobile widths.".to_string(),
        ],
    );

    lines.join("\n").trim().to_string()
}

fn push_section(lines: &mut Vec<String>, heading: &str, items: Vec<String>) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(heading.to_string());
    lines.extend(items.into_iter().map(|item| format!("- {item}")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_includes_core_sections() {
        let blueprint = json!({
            "card_summary": "Elegant engagement announcement",
            "messaging": {
                "headline": "She said yes!",
                "body": "Join us as we toast to a lifetime of love.",
                "closing": "With love, Priya & Arjun"
            },
            "visual_direction": {
                "palette": ["#D4AF37", "#F8EDEB"],
                "typography": "Modern serif for headings with clean sans body",
                "layout": "Split layout with photo on the left and copy on the right",
                "background_image_plan": "Subtle glitter gradient with soft vignette"
            },
            "image_assets": {
                "must_use": ["https://example.com/uploads/couple.jpg"],
                "pexels_options": [
                    {"image_url": " https://images.pexels.com/photos/12345/pexels-photo.jpeg?auto=c\nompress "}
                ]
            },
            "production_notes": ["Use foil-friendly colour choices"],
            "next_questions": ["Confirm final RSVP date"]
        });

        let prompt = build_card_html_prompt(&blueprint);
        assert!(prompt.contains("- Elegant engagement announcement"));
        assert!(prompt.contains("- Headline: She said yes!"));
        assert!(prompt.contains("-   - #D4AF37"));
        assert!(prompt.contains("-   - https://example.com/uploads/couple.jpg"));
        assert!(prompt.contains("https://images.pexels.com/photos/12345/pexels-photo.jpeg?auto=compress"));
        assert!(prompt.contains("- Typography: Modern serif"));
        assert!(prompt.contains("- Use foil-friendly colour choices"));
        assert!(prompt.contains("- Confirm final RSVP date"));
        assert!(prompt.contains("Do not include any JavaScript."));
    }

    #[test]
    fn test_minimal_blueprint() {
        let prompt = build_card_html_prompt(&json!({}));
        assert!(prompt.contains("Do not include any JavaScript."));
        assert!(prompt.contains("Accessibility and formatting requirements"));
        assert!(!prompt.contains("Card copy:"));
        assert!(!prompt.contains("Imagery cues:"));
    }

    #[test]
    fn test_duplicate_image_urls_listed_once() {
        let blueprint = json!({
            "image_assets": {"must_use": ["https://a/1.png", "https://a/1.png"]}
        });
        let prompt = build_card_html_prompt(&blueprint);
        assert_eq!(prompt.matches("https://a/1.png").count(), 1);
    }
}
