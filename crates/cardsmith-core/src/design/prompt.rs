//! System prompts and task messages for the design crew.
//!
//! Two agents run in sequence: the Requirement Analyst distils the
//! requirements into a brief, then the Copywriter & Layout Specialist turns
//! brief plus requirements into the final blueprint JSON.

pub const ANALYST_NAME: &str = "Requirement Analyst";

pub const COPYWRITER_NAME: &str = "Copywriter & Layout Specialist";

pub const HTML_DESIGNER_NAME: &str = "HTML Card Designer";

pub const ANALYST_SYSTEM: &str = "You are the Requirement Analyst, an experienced design \
strategist who structures card design projects. Your goal is to transform user requirements \
into a sharp design direction for a card. Make sure every requirement is clearly defined and \
highlight any missing detail.";

pub const COPYWRITER_SYSTEM: &str = "You are the Copywriter & Layout Specialist, an \
award-winning card designer who balances typography and layout. Your goal is to deliver a \
final blueprint with messaging, layout and imagery guidance. Every image the user provided \
must appear in the blueprint, and the tone must suit the occasion.";

pub const HTML_DESIGNER_SYSTEM: &str = "You are an expert front-end designer. Reply with a \
single complete HTML document and nothing else.";

/// Task for the analyst: summarise the requirements into a brief.
pub fn analyst_task(requirements_json: &str) -> String {
    format!(
        "Here are all the details of the card project:\n\
         ```json\n{requirements_json}\n```\n\n\
         Write a concise creative brief that summarises the card's goals, target audience and \
         critical constraints. If any important information is missing, list it.\n\n\
         Respond with a JSON object with the fields \"brief\" and \"gaps\"."
    )
}

/// Task for the copywriter: produce the blueprint JSON.
pub fn copywriter_task(requirements_json: &str, analysis: &str, must_use: &[String]) -> String {
    let must_use_block = if must_use.is_empty() {
        "The user did not provide any images; leave \"must_use\" as an empty list.".to_string()
    } else {
        let urls: Vec<String> = must_use.iter().map(|url| format!("- {url}")).collect();
        format!(
            "These user-provided image URLs MUST all appear verbatim in \"must_use\":\n{}",
            urls.join("\n")
        )
    };

    format!(
        "Project details:\n\
         ```json\n{requirements_json}\n```\n\n\
         Brief from the Requirement Analyst:\n{analysis}\n\n\
         Now prepare the complete card blueprint. Present the deliverables as a single JSON \
         object with these keys:\n\
         - \"card_summary\": short overview of the concept.\n\
         - \"messaging\": an object with \"headline\", \"body\" and \"closing\".\n\
         - \"visual_direction\": an object with \"palette\", \"typography\", \"layout\" and \
         \"background_image_plan\".\n\
         - \"image_assets\": \"must_use\" (every user-provided URL) and \"pexels_options\" \
         (the top 3 inspirations).\n\
         - \"production_notes\": any printing or export instructions.\n\
         - \"next_questions\": any details that are still missing.\n\n\
         {must_use_block}\n\
         In \"background_image_plan\" explain which visuals are used and how."
    )
}

/// Task for the optional final HTML render.
pub fn html_render_task(html_prompt: &str) -> String {
    format!("{html_prompt}\n\nReturn only the HTML document, wrapped in a ```html code block.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyst_task_embeds_requirements() {
        let task = analyst_task("{\"occasion\": \"Birthday\"}");
        assert!(task.contains("```json\n{\"occasion\": \"Birthday\"}\n```"));
        assert!(task.contains("\"brief\""));
        assert!(task.contains("\"gaps\""));
    }

    #[test]
    fn test_copywriter_task_restates_must_use_urls() {
        let task = copywriter_task("{}", "brief", &["https://a/1.png".to_string()]);
        assert!(task.contains("- https://a/1.png"));
        assert!(task.contains("MUST all appear verbatim"));
        for key in ["card_summary", "messaging", "visual_direction", "image_assets", "next_questions"] {
            assert!(task.contains(key), "missing key {key}");
        }
    }

    #[test]
    fn test_copywriter_task_without_images() {
        let task = copywriter_task("{}", "brief", &[]);
        assert!(task.contains("did not provide any images"));
    }
}
