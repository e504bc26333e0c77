//! Blueprint request and outcome types.
//!
//! A [`BlueprintRequest`] is what the interview hands to the generative
//! backend. A [`BlueprintOutcome`] is what comes back: the raw LLM text,
//! the parsed JSON blueprint when one could be recovered, and the extras
//! derived from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interview::SlotName;

/// Structured request for the generative backend.
///
/// Contains every slot (unfilled ones as `None`) and the full ordered list
/// of locked asset URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintRequest {
    pub session_id: Uuid,
    pub slots: BTreeMap<SlotName, Option<String>>,
    pub locked_assets: Vec<String>,
    /// Query used for background inspiration search.
    pub background_query: String,
}

impl BlueprintRequest {
    /// Value of a slot, if filled.
    pub fn slot(&self, name: SlotName) -> Option<&str> {
        self.slots.get(&name).and_then(|v| v.as_deref())
    }
}

/// A background photo suggested by the image search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundPhoto {
    pub id: u64,
    pub url: String,
    pub photographer: String,
    pub photographer_url: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_color: Option<String>,
}

/// Result of a blueprint generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintOutcome {
    /// Final text returned by the backend, verbatim.
    pub raw_output: String,
    /// Parsed JSON object, or `None` when the text held no JSON object.
    pub blueprint: Option<serde_json::Value>,
    #[serde(default)]
    pub inspirations: Vec<BackgroundPhoto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_prompt: Option<String>,
    /// Error text from a failed inspiration search (generation still ran).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspiration_error: Option<String>,
}

/// Result of asking the LLM to turn a blueprint into a final HTML document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedHtml {
    /// Extracted `<html>` document, when one was found.
    pub html: Option<String>,
    /// The raw LLM response.
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_slot_keys_as_snake_case() {
        let mut slots = BTreeMap::new();
        slots.insert(SlotName::CardType, Some("personal".to_string()));
        slots.insert(SlotName::Deadline, None);
        let request = BlueprintRequest {
            session_id: Uuid::now_v7(),
            slots,
            locked_assets: vec!["https://example.com/a.png".to_string()],
            background_query: "birthday".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["slots"]["card_type"], "personal");
        assert!(json["slots"]["deadline"].is_null());
        assert_eq!(json["locked_assets"][0], "https://example.com/a.png");
    }

    #[test]
    fn test_request_slot_accessor() {
        let mut slots = BTreeMap::new();
        slots.insert(SlotName::Occasion, Some("Birthday".to_string()));
        slots.insert(SlotName::Tone, None);
        let request = BlueprintRequest {
            session_id: Uuid::now_v7(),
            slots,
            locked_assets: vec![],
            background_query: String::new(),
        };

        assert_eq!(request.slot(SlotName::Occasion), Some("Birthday"));
        assert_eq!(request.slot(SlotName::Tone), None);
        assert_eq!(request.slot(SlotName::Size), None);
    }

    #[test]
    fn test_photo_avg_color_optional() {
        let json = r#"{"id":1,"url":"u","photographer":"p","photographer_url":"pu","image_url":"i"}"#;
        let photo: BackgroundPhoto = serde_json::from_str(json).unwrap();
        assert!(photo.avg_color.is_none());
        let out = serde_json::to_string(&photo).unwrap();
        assert!(!out.contains("avg_color"));
    }
}
