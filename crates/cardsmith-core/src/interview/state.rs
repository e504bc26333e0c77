//! InterviewState lifecycle helpers.
//!
//! `InterviewState` lives in `cardsmith-types`, so slot access and phase
//! bookkeeping are provided through the `InterviewStateExt` extension trait.

use std::collections::BTreeSet;

use cardsmith_types::interview::{
    InterviewPhase, InterviewState, Slot, SlotName, SlotSource,
};
use uuid::Uuid;

use super::detector;

/// Create a fresh interview: every slot empty, collecting mandatory slots.
pub fn new_interview_state(session_id: Uuid) -> InterviewState {
    InterviewState {
        session_id,
        phase: InterviewPhase::CollectingMandatory,
        slots: SlotName::ALL.into_iter().map(Slot::empty).collect(),
        locked_assets: Vec::new(),
        asked: BTreeSet::new(),
        active_question: None,
        request_emitted: false,
        greeted: false,
    }
}

/// Slot access and phase bookkeeping for `InterviewState`.
pub trait InterviewStateExt {
    fn slot(&self, name: SlotName) -> Option<&Slot>;

    /// Value of a filled slot, trimmed. `None` when empty or blank.
    fn slot_value(&self, name: SlotName) -> Option<&str>;

    fn is_filled(&self, name: SlotName) -> bool;

    /// Set a slot's value. Blank values are ignored and return `false`.
    fn fill_slot(&mut self, name: SlotName, value: &str, source: SlotSource) -> bool;

    /// Fill a slot with an inferred value unless it is already filled.
    fn infer_slot(&mut self, name: SlotName, value: &str) -> bool;

    /// Unfilled mandatory slots, in priority order.
    fn missing_mandatory(&self) -> Vec<SlotName>;

    fn is_core_complete(&self) -> bool;

    /// Whether the card type mentions a business card.
    fn is_business_card(&self) -> bool;

    /// Lock URLs as must-use assets, returning the newly locked ones.
    fn lock_urls(&mut self, urls: &[String]) -> Vec<String>;

    fn locked_urls(&self) -> Vec<String>;

    /// Move from mandatory to optional collection once the core is complete.
    ///
    /// Returns `true` when the phase changed.
    fn refresh_phase(&mut self) -> bool;
}

impl InterviewStateExt for InterviewState {
    fn slot(&self, name: SlotName) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    fn slot_value(&self, name: SlotName) -> Option<&str> {
        self.slot(name)
            .filter(|slot| slot.is_filled())
            .and_then(|slot| slot.value.as_deref())
            .map(str::trim)
    }

    fn is_filled(&self, name: SlotName) -> bool {
        self.slot(name).is_some_and(Slot::is_filled)
    }

    fn fill_slot(&mut self, name: SlotName, value: &str, source: SlotSource) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        match self.slots.iter_mut().find(|slot| slot.name == name) {
            Some(slot) => {
                slot.value = Some(value.to_string());
                slot.source = Some(source);
                true
            }
            None => {
                self.slots.push(Slot {
                    name,
                    mandatory: name.is_mandatory(),
                    value: Some(value.to_string()),
                    source: Some(source),
                });
                true
            }
        }
    }

    fn infer_slot(&mut self, name: SlotName, value: &str) -> bool {
        if self.is_filled(name) {
            return false;
        }
        self.fill_slot(name, value, SlotSource::Inferred)
    }

    fn missing_mandatory(&self) -> Vec<SlotName> {
        SlotName::MANDATORY
            .into_iter()
            .filter(|name| !self.is_filled(*name))
            .collect()
    }

    fn is_core_complete(&self) -> bool {
        self.missing_mandatory().is_empty()
    }

    fn is_business_card(&self) -> bool {
        self.slot_value(SlotName::CardType)
            .is_some_and(|card_type| card_type.to_lowercase().contains("business"))
    }

    fn lock_urls(&mut self, urls: &[String]) -> Vec<String> {
        detector::lock_assets(&mut self.locked_assets, urls)
    }

    fn locked_urls(&self) -> Vec<String> {
        self.locked_assets.iter().map(|asset| asset.url.clone()).collect()
    }

    fn refresh_phase(&mut self) -> bool {
        if self.phase == InterviewPhase::CollectingMandatory && self.is_core_complete() {
            self.phase = InterviewPhase::CollectingOptional;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> InterviewState {
        new_interview_state(Uuid::now_v7())
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = state();
        assert_eq!(state.phase, InterviewPhase::CollectingMandatory);
        assert_eq!(state.slots.len(), SlotName::ALL.len());
        assert!(state.slots.iter().all(|slot| !slot.is_filled()));
        assert!(state.locked_assets.is_empty());
        assert_eq!(state.missing_mandatory(), SlotName::MANDATORY.to_vec());
    }

    #[test]
    fn test_fill_slot_rejects_blank() {
        let mut state = state();
        assert!(!state.fill_slot(SlotName::Occasion, "   ", SlotSource::UserStated));
        assert!(!state.is_filled(SlotName::Occasion));

        assert!(state.fill_slot(SlotName::Occasion, "  Birthday ", SlotSource::UserStated));
        assert_eq!(state.slot_value(SlotName::Occasion), Some("Birthday"));
        assert_eq!(
            state.slot(SlotName::Occasion).and_then(|s| s.source),
            Some(SlotSource::UserStated)
        );
    }

    #[test]
    fn test_infer_slot_never_overwrites() {
        let mut state = state();
        state.fill_slot(SlotName::Size, "A5", SlotSource::UserStated);
        assert!(!state.infer_slot(SlotName::Size, "A4"));
        assert_eq!(state.slot_value(SlotName::Size), Some("A5"));

        assert!(state.infer_slot(SlotName::Tone, "fun"));
        assert_eq!(
            state.slot(SlotName::Tone).and_then(|s| s.source),
            Some(SlotSource::Inferred)
        );
    }

    #[test]
    fn test_missing_mandatory_in_priority_order() {
        let mut state = state();
        state.fill_slot(SlotName::CardType, "personal", SlotSource::UserStated);
        assert_eq!(state.missing_mandatory(), vec![SlotName::Occasion, SlotName::Size]);
    }

    #[test]
    fn test_refresh_phase_requires_all_mandatory() {
        let mut state = state();
        state.fill_slot(SlotName::Occasion, "Birthday", SlotSource::UserStated);
        state.fill_slot(SlotName::CardType, "personal", SlotSource::UserStated);
        assert!(!state.refresh_phase());
        assert_eq!(state.phase, InterviewPhase::CollectingMandatory);

        state.fill_slot(SlotName::Size, "A5", SlotSource::UserStated);
        assert!(state.refresh_phase());
        assert_eq!(state.phase, InterviewPhase::CollectingOptional);
        assert!(!state.refresh_phase());
    }

    #[test]
    fn test_is_business_card() {
        let mut state = state();
        assert!(!state.is_business_card());
        state.fill_slot(SlotName::CardType, "Business invitation", SlotSource::Inferred);
        assert!(state.is_business_card());
    }

    #[test]
    fn test_lock_urls_dedups() {
        let mut state = state();
        let urls = vec!["https://a.example/1.png".to_string()];
        assert_eq!(state.lock_urls(&urls), urls);
        assert!(state.lock_urls(&urls).is_empty());
        assert_eq!(state.locked_urls(), urls);
    }
}
