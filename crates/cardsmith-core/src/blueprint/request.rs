//! Blueprint request building.
//!
//! Turns a finished interview into the structured request handed to the
//! generative backend. Every slot is carried (empty ones as `None`) and the
//! locked asset list is copied verbatim, in order.

use cardsmith_types::blueprint::{BackgroundPhoto, BlueprintRequest};
use cardsmith_types::error::InterviewError;
use cardsmith_types::interview::{InterviewPhase, InterviewState, SlotName};
use serde_json::{Map, Value, json};

use crate::interview::state::InterviewStateExt;

/// Fallback background search query when no descriptive slot is filled.
pub const DEFAULT_BACKGROUND_QUERY: &str = "beautiful card background";

/// Build the blueprint request for a finished interview.
///
/// Fails with [`InterviewError::NotReady`] unless the interview is `Ready`.
pub fn build_request(state: &InterviewState) -> Result<BlueprintRequest, InterviewError> {
    if state.phase != InterviewPhase::Ready {
        return Err(InterviewError::NotReady(state.phase));
    }
    Ok(snapshot_request(state))
}

/// Build the request without checking the phase.
fn snapshot_request(state: &InterviewState) -> BlueprintRequest {
    let slots = SlotName::ALL
        .into_iter()
        .map(|name| (name, state.slot_value(name).map(str::to_string)))
        .collect();
    BlueprintRequest {
        session_id: state.session_id,
        slots,
        locked_assets: state.locked_urls(),
        background_query: background_query(state),
    }
}

/// Search query for background inspirations.
///
/// Joins occasion, tone, colour palette and visual style.
pub fn background_query(state: &InterviewState) -> String {
    let keywords: Vec<&str> = [
        SlotName::Occasion,
        SlotName::Tone,
        SlotName::ColorPalette,
        SlotName::VisualStyle,
    ]
    .into_iter()
    .filter_map(|name| state.slot_value(name))
    .collect();

    if keywords.is_empty() {
        DEFAULT_BACKGROUND_QUERY.to_string()
    } else {
        keywords.join(" ")
    }
}

/// Requirement summary handed to the design crew as JSON.
///
/// Keys are the slot names plus `image_urls` and `pexels_inspirations`.
pub fn to_summary_json(request: &BlueprintRequest, inspirations: &[BackgroundPhoto]) -> Value {
    let mut summary = Map::new();
    for name in SlotName::ALL {
        let value = request
            .slot(name)
            .map_or(Value::Null, |v| Value::String(v.to_string()));
        summary.insert(name.as_str().to_string(), value);
    }
    summary.insert(
        "image_urls".to_string(),
        Value::Array(
            request
                .locked_assets
                .iter()
                .map(|url| Value::String(url.clone()))
                .collect(),
        ),
    );
    summary.insert(
        "pexels_inspirations".to_string(),
        Value::Array(
            inspirations
                .iter()
                .map(|photo| {
                    json!({
                        "id": photo.id,
                        "url": photo.url,
                        "photographer": photo.photographer,
                        "photographer_url": photo.photographer_url,
                        "image_url": photo.image_url,
                        "avg_color": photo.avg_color,
                    })
                })
                .collect(),
        ),
    );
    Value::Object(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::machine::{InterviewMachine, TurnOutcome};
    use crate::interview::state::new_interview_state;
    use cardsmith_types::interview::{LockedAsset, SlotSource};
    use uuid::Uuid;

    fn ready_state() -> InterviewState {
        let mut state = new_interview_state(Uuid::now_v7());
        state.fill_slot(SlotName::Occasion, "Birthday", SlotSource::UserStated);
        state.fill_slot(SlotName::CardType, "personal", SlotSource::UserStated);
        state.fill_slot(SlotName::Size, "A5", SlotSource::UserStated);
        state.fill_slot(SlotName::Tone, "playful", SlotSource::Inferred);
        state.locked_assets = vec![
            LockedAsset { url: "https://x.example/B.png".to_string() },
            LockedAsset { url: "https://x.example/a.png".to_string() },
        ];
        state.phase = InterviewPhase::Ready;
        state
    }

    #[test]
    fn test_build_request_requires_ready() {
        let mut state = ready_state();
        state.phase = InterviewPhase::CollectingOptional;
        let err = build_request(&state).unwrap_err();
        assert!(matches!(err, InterviewError::NotReady(InterviewPhase::CollectingOptional)));
    }

    #[test]
    fn test_build_request_keeps_every_slot_and_asset() {
        let state = ready_state();
        let request = build_request(&state).unwrap();

        assert_eq!(request.session_id, state.session_id);
        assert_eq!(request.slots.len(), SlotName::ALL.len());
        assert_eq!(request.slot(SlotName::Occasion), Some("Birthday"));
        assert_eq!(request.slot(SlotName::Tone), Some("playful"));
        assert!(request.slots.contains_key(&SlotName::Deadline));
        assert_eq!(request.slot(SlotName::Deadline), None);
        assert_eq!(
            request.locked_assets,
            vec!["https://x.example/B.png", "https://x.example/a.png"]
        );
    }

    #[test]
    fn test_background_query_joins_descriptive_slots() {
        let mut state = ready_state();
        assert_eq!(background_query(&state), "Birthday playful");

        state.fill_slot(SlotName::VisualStyle, "floral", SlotSource::UserStated);
        state.fill_slot(SlotName::ColorPalette, "pastel pink", SlotSource::UserStated);
        assert_eq!(background_query(&state), "Birthday playful pastel pink floral");
    }

    #[test]
    fn test_background_query_fallback() {
        let state = new_interview_state(Uuid::now_v7());
        assert_eq!(background_query(&state), DEFAULT_BACKGROUND_QUERY);
    }

    #[test]
    fn test_summary_json_shape() {
        let request = build_request(&ready_state()).unwrap();
        let photo = BackgroundPhoto {
            id: 42,
            url: "https://www.pexels.com/photo/42".to_string(),
            photographer: "Ana".to_string(),
            photographer_url: "https://www.pexels.com/@ana".to_string(),
            image_url: "https://images.pexels.com/42.jpeg".to_string(),
            avg_color: Some("#AABBCC".to_string()),
        };

        let json = to_summary_json(&request, &[photo]);
        assert_eq!(json["occasion"], "Birthday");
        assert!(json["deadline"].is_null());
        assert_eq!(json["image_urls"][0], "https://x.example/B.png");
        assert_eq!(json["image_urls"][1], "https://x.example/a.png");
        assert_eq!(json["pexels_inspirations"][0]["id"], 42);
        assert_eq!(json["pexels_inspirations"][0]["avg_color"], "#AABBCC");
    }

    #[test]
    fn test_machine_request_matches_build_request() {
        let mut machine = InterviewMachine::new();
        for answer in ["birthday", "personal", "A5"] {
            machine.next_question();
            machine.ingest(answer);
        }
        let TurnOutcome::Ready(emitted) = machine.ingest("done") else {
            panic!("expected ready");
        };
        assert_eq!(build_request(machine.state()).unwrap(), emitted);
    }
}
