//! The interview question bank.
//!
//! Questions are asked in bank order. Mandatory questions always take
//! priority; optional ones are asked once each, skipped when their slot was
//! already filled or their condition does not hold.

use cardsmith_types::interview::{InterviewState, QuestionId, SlotName};

use super::state::InterviewStateExt;

/// When a question is relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    /// Only for cards whose type mentions "business".
    BusinessCard,
}

/// A question that can be put to the user.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: QuestionId,
    pub condition: Condition,
}

impl Question {
    const fn slot(name: SlotName) -> Self {
        Self {
            id: QuestionId::Slot(name),
            condition: Condition::Always,
        }
    }

    const fn business_slot(name: SlotName) -> Self {
        Self {
            id: QuestionId::Slot(name),
            condition: Condition::BusinessCard,
        }
    }

    /// Slot answered by this question, if any.
    pub fn slot_name(&self) -> Option<SlotName> {
        match self.id {
            QuestionId::Slot(name) => Some(name),
            QuestionId::ImageUrls => None,
        }
    }

    pub fn is_mandatory(&self) -> bool {
        self.slot_name().is_some_and(SlotName::is_mandatory)
    }

    /// Whether the question applies to the current state.
    pub fn applies(&self, state: &InterviewState) -> bool {
        match self.condition {
            Condition::Always => true,
            Condition::BusinessCard => state.is_business_card(),
        }
    }

    /// Render the question text for the current state.
    pub fn render(&self, state: &InterviewState) -> String {
        let name = match self.id {
            QuestionId::ImageUrls => {
                return "Do you have any image or logo URLs that must appear on the card?"
                    .to_string();
            }
            QuestionId::Slot(name) => name,
        };
        match name {
            SlotName::Occasion => "What occasion is this card for?".to_string(),
            SlotName::CardType => "Is this a personal card or a business card? If it's for a \
                business, please share the brand or company name too."
                .to_string(),
            SlotName::Size => {
                "What size should the card be? (e.g. 5x7 inch, A5, or a digital format like an \
                 Instagram post)"
                    .to_string()
            }
            SlotName::Recipient => {
                "Who is the card for? A name or relation helps.".to_string()
            }
            SlotName::Relationship => {
                "What is your relationship with the recipient? (e.g. friend, client, parents)"
                    .to_string()
            }
            SlotName::Tone => {
                let occasion = state.slot_value(SlotName::Occasion).unwrap_or("the card");
                format!("What tone should {occasion} have? (e.g. elegant, fun, professional)")
            }
            SlotName::MessageFocus => {
                "What should the message focus on? Any keyword or feeling that must come through?"
                    .to_string()
            }
            SlotName::PersonalizationDetails => {
                "Any personal details or inside jokes you'd like to add?".to_string()
            }
            SlotName::ColorPalette => "Which colours or colour combinations do you prefer?".to_string(),
            SlotName::Typography => {
                "What kind of fonts do you like? (e.g. handwritten, modern sans, serif)".to_string()
            }
            SlotName::VisualStyle => {
                "What style should the background or illustrations have? (minimal, floral, \
                 abstract, ...)"
                    .to_string()
            }
            SlotName::MustIncludeElements => {
                "Are there elements or phrases that must be on the card?".to_string()
            }
            SlotName::CallToAction => {
                "Should the card carry a call to action or contact details?".to_string()
            }
            SlotName::BrandNotes => {
                "Any brand guidelines or logo colours to follow?".to_string()
            }
            SlotName::DeliveryFormat => {
                "What is the final format? (print-ready PDF, social media post, ...)".to_string()
            }
            SlotName::Deadline => "When do you need the card? Any deadline or event date?".to_string(),
            SlotName::AdditionalNotes => {
                "Anything else we should keep in mind?".to_string()
            }
        }
    }
}

/// Every question, in the order they are asked.
pub static QUESTION_BANK: [Question; 18] = [
    Question::slot(SlotName::Occasion),
    Question::slot(SlotName::CardType),
    Question::slot(SlotName::Size),
    Question::slot(SlotName::Recipient),
    Question::slot(SlotName::Relationship),
    Question::slot(SlotName::Tone),
    Question::slot(SlotName::MessageFocus),
    Question::slot(SlotName::PersonalizationDetails),
    Question::slot(SlotName::ColorPalette),
    Question::slot(SlotName::Typography),
    Question::slot(SlotName::VisualStyle),
    Question::slot(SlotName::MustIncludeElements),
    Question::business_slot(SlotName::CallToAction),
    Question::business_slot(SlotName::BrandNotes),
    Question::slot(SlotName::DeliveryFormat),
    Question::slot(SlotName::Deadline),
    Question {
        id: QuestionId::ImageUrls,
        condition: Condition::Always,
    },
    Question::slot(SlotName::AdditionalNotes),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::state::new_interview_state;
    use cardsmith_types::interview::SlotSource;
    use uuid::Uuid;

    fn find(id: QuestionId) -> Option<&'static Question> {
        QUESTION_BANK.iter().find(|q| q.id == id)
    }

    #[test]
    fn test_bank_covers_every_slot_once() {
        for slot in SlotName::ALL {
            let count = QUESTION_BANK
                .iter()
                .filter(|q| q.slot_name() == Some(slot))
                .count();
            assert_eq!(count, 1, "slot {slot} should have exactly one question");
        }
        assert!(find(QuestionId::ImageUrls).is_some());
    }

    #[test]
    fn test_mandatory_questions_come_first() {
        let mandatory: Vec<bool> = QUESTION_BANK.iter().map(Question::is_mandatory).collect();
        assert_eq!(&mandatory[..3], &[true, true, true]);
        assert!(mandatory[3..].iter().all(|m| !m));
    }

    #[test]
    fn test_business_questions_depend_on_card_type() {
        let mut state = new_interview_state(Uuid::now_v7());
        let cta = find(QuestionId::Slot(SlotName::CallToAction)).unwrap();
        assert!(!cta.applies(&state));

        state.fill_slot(SlotName::CardType, "Business card for Acme", SlotSource::UserStated);
        assert!(cta.applies(&state));
    }

    #[test]
    fn test_tone_question_mentions_occasion() {
        let mut state = new_interview_state(Uuid::now_v7());
        let tone = find(QuestionId::Slot(SlotName::Tone)).unwrap();
        assert!(tone.render(&state).contains("the card"));

        state.fill_slot(SlotName::Occasion, "Diwali", SlotSource::UserStated);
        assert!(tone.render(&state).contains("Diwali"));
    }

    #[test]
    fn test_mandatory_question_texts() {
        let state = new_interview_state(Uuid::now_v7());
        let texts: Vec<String> = QUESTION_BANK[..3].iter().map(|q| q.render(&state)).collect();
        assert!(texts[0].to_lowercase().contains("occasion"));
        assert!(texts[1].to_lowercase().contains("personal"));
        assert!(texts[2].to_lowercase().contains("size"));
    }
}
