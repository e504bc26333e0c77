//! Terminal rendering of the blueprint outcome.
//!
//! Styled output for humans, or a single JSON document for `--json`.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use serde_json::{Value, json};

use cardsmith_types::blueprint::{BackgroundPhoto, BlueprintOutcome, BlueprintRequest, GeneratedHtml};

/// Print the collected requirement summary.
pub fn print_summary(summary: &str) {
    println!();
    println!("  {}", style("Here's the summary so far:").bold());
    for line in summary.lines() {
        println!("  {line}");
    }
    println!();
}

/// Print the blueprint (or the raw LLM text when no JSON could be parsed),
/// the HTML preview, the HTML prompt, the final HTML and the inspirations.
pub fn print_outcome(outcome: &BlueprintOutcome, generated: Option<&GeneratedHtml>) {
    match &outcome.blueprint {
        Some(blueprint) => {
            println!("\n{}", style("Card Blueprint Ready!").green().bold());
            let pretty = serde_json::to_string_pretty(blueprint)
                .unwrap_or_else(|_| blueprint.to_string());
            println!("{pretty}");
        }
        None => {
            println!(
                "\n{}",
                style("Could not parse JSON from the LLM. Raw response below:")
                    .yellow()
                    .bold()
            );
            println!("{}", outcome.raw_output);
        }
    }

    if let Some(preview) = &outcome.html_preview {
        println!("\n{}", style("HTML Preview:").bold());
        println!("{preview}");
        println!(
            "\n{}",
            style("Save this HTML to a .html file and open it in a browser to see the card.").dim()
        );
    }

    if let Some(prompt) = &outcome.html_prompt {
        println!("\n{}", style("HTML generation prompt:").bold());
        println!("{prompt}");
        println!(
            "\n{}",
            style("Paste this prompt into any code-generation model to get a bespoke card HTML.")
                .dim()
        );
    }

    if let Some(generated) = generated {
        match &generated.html {
            Some(html) => {
                println!("\n{}", style("Final HTML from the LLM:").bold());
                println!("{html}");
            }
            None => {
                println!(
                    "\n{}",
                    style("The LLM replied but no clean HTML document could be extracted. Raw response below:")
                        .yellow()
                        .bold()
                );
                println!("{}", generated.raw);
            }
        }
    }

    if let Some(error) = &outcome.inspiration_error {
        println!(
            "\n  {} Background inspiration search failed: {}",
            style("!").yellow().bold(),
            style(error).dim()
        );
    }

    if !outcome.inspirations.is_empty() {
        println!("\n{}", style("Inspiring backgrounds from Pexels:").bold());
        println!("{}", inspirations_table(&outcome.inspirations));
    }
}

/// Table of background photos: preview URL, photographer, average colour.
pub fn inspirations_table(photos: &[BackgroundPhoto]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Preview").fg(Color::White),
        Cell::new("Photographer").fg(Color::White),
        Cell::new("Avg. Color").fg(Color::White),
    ]);

    for photo in photos {
        table.add_row(vec![
            Cell::new(&photo.image_url).fg(Color::Cyan),
            Cell::new(&photo.photographer).fg(Color::Magenta),
            Cell::new(photo.avg_color.as_deref().unwrap_or("")).fg(Color::DarkGrey),
        ]);
    }

    table
}

/// The HTML to write with `--html-out`: the final render if one was
/// extracted, else the preview.
pub fn html_to_save<'a>(
    outcome: &'a BlueprintOutcome,
    generated: Option<&'a GeneratedHtml>,
) -> Option<&'a str> {
    generated
        .and_then(|g| g.html.as_deref())
        .or(outcome.html_preview.as_deref())
}

/// Single JSON document printed with `--json`.
pub fn outcome_document(
    request: &BlueprintRequest,
    outcome: &BlueprintOutcome,
    generated: Option<&GeneratedHtml>,
) -> Value {
    json!({
        "request": request,
        "outcome": outcome,
        "generated_html": generated,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use uuid::Uuid;

    use super::*;

    fn outcome(preview: Option<&str>) -> BlueprintOutcome {
        BlueprintOutcome {
            raw_output: "{}".into(),
            blueprint: Some(json!({"card_summary": "x"})),
            inspirations: vec![BackgroundPhoto {
                id: 7,
                url: "https://www.pexels.com/photo/7/".into(),
                photographer: "Ravi".into(),
                photographer_url: "https://www.pexels.com/@ravi".into(),
                image_url: "https://images.pexels.com/7.jpeg".into(),
                avg_color: None,
            }],
            html_preview: preview.map(str::to_string),
            html_prompt: None,
            inspiration_error: None,
        }
    }

    #[test]
    fn test_inspirations_table_rows() {
        let rendered = inspirations_table(&outcome(None).inspirations).to_string();
        assert!(rendered.contains("Photographer"));
        assert!(rendered.contains("Ravi"));
        assert!(rendered.contains("https://images.pexels.com/7.jpeg"));
    }

    #[test]
    fn test_html_to_save_prefers_generated() {
        let outcome = outcome(Some("<html>preview</html>"));
        let generated = GeneratedHtml {
            html: Some("<html>final</html>".into()),
            raw: String::new(),
        };
        assert_eq!(html_to_save(&outcome, Some(&generated)), Some("<html>final</html>"));

        let failed = GeneratedHtml {
            html: None,
            raw: "sorry".into(),
        };
        assert_eq!(html_to_save(&outcome, Some(&failed)), Some("<html>preview</html>"));
        assert_eq!(html_to_save(&outcome, None), Some("<html>preview</html>"));
    }

    #[test]
    fn test_outcome_document_shape() {
        let request = BlueprintRequest {
            session_id: Uuid::now_v7(),
            slots: BTreeMap::new(),
            locked_assets: vec!["https://a/1.png".into()],
            background_query: "birthday".into(),
        };
        let doc = outcome_document(&request, &outcome(None), None);
        assert_eq!(doc["request"]["locked_assets"][0], "https://a/1.png");
        assert_eq!(doc["outcome"]["blueprint"]["card_summary"], "x");
        assert_eq!(doc["outcome"]["inspirations"][0]["photographer"], "Ravi");
        assert!(doc["generated_html"].is_null());
    }
}
