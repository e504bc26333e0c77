//! The requirement interview state machine.
//!
//! `InterviewMachine` owns one session's `InterviewState` and drives it
//! through `CollectingMandatory -> CollectingOptional -> Ready`:
//!
//! - every utterance is scanned for URLs first, in any phase;
//! - answers fill the active question's slot, mandatory slots first;
//! - a completion token moves to `Ready` only when occasion, card type and
//!   size are all filled, and yields the blueprint request exactly once.

use cardsmith_types::blueprint::BlueprintRequest;
use cardsmith_types::error::InterviewError;
use cardsmith_types::interview::{
    InterviewPhase, InterviewState, QuestionId, SlotName, SlotSource,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::blueprint::request::build_request;

use super::detector;
use super::extract::{
    infer_card_type, infer_colors, infer_deadline, infer_size, infer_tone, infer_visual_style,
    merge_text,
};
use super::questions::{QUESTION_BANK, Question};
use super::state::{InterviewStateExt, new_interview_state};

/// Inputs that end the interview and start generation (case-insensitive).
pub const COMPLETION_TOKENS: [&str; 4] = ["done", "generate", "design banao", "design shuru karo"];

/// Answers to optional questions that mean "nothing to add".
const SKIP_ANSWERS: [&str; 7] = ["no", "none", "nope", "nothing", "n/a", "na", "nahi"];

/// Whether `text` is a completion token.
pub fn is_completion_token(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    COMPLETION_TOKENS.contains(&normalized.as_str())
}

/// Result of feeding one user utterance to the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Blank input; nothing changed.
    Ignored,

    /// The utterance was recorded.
    Recorded {
        /// Slot the answer was written to, if any.
        filled: Option<SlotName>,
        /// Other slots filled by inference from the same text.
        inferred: Vec<SlotName>,
        /// URLs locked by this utterance.
        locked: Vec<String>,
        /// The mandatory slots became complete on this turn.
        advanced: bool,
    },

    /// A completion token arrived while mandatory slots were still empty.
    PrematureCompletion {
        missing: Vec<SlotName>,
        /// The question for the first missing slot, asked again.
        question: String,
    },

    /// The interview is complete; the request is handed out only here.
    Ready(BlueprintRequest),

    /// The interview already finished; no new request is produced.
    AlreadyReady { locked: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnswerTarget {
    Slot(SlotName),
    ImageUrls,
    Notes,
}

/// Drives a single card requirement interview.
#[derive(Debug, Clone)]
pub struct InterviewMachine {
    state: InterviewState,
}

impl Default for InterviewMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewMachine {
    pub fn new() -> Self {
        Self::with_session_id(Uuid::now_v7())
    }

    pub fn with_session_id(session_id: Uuid) -> Self {
        Self {
            state: new_interview_state(session_id),
        }
    }

    pub fn state(&self) -> &InterviewState {
        &self.state
    }

    pub fn phase(&self) -> InterviewPhase {
        self.state.phase
    }

    /// Greeting text, returned only the first time it is requested.
    pub fn welcome(&mut self) -> Option<String> {
        if self.state.greeted {
            return None;
        }
        self.state.greeted = true;
        Some(
            "Hi! I'm your card design assistant. A few questions and we'll have a great card. \
             Type 'done' whenever the details feel complete and I'll start the design."
                .to_string(),
        )
    }

    /// Pick the next question and make it the active one.
    ///
    /// Missing mandatory slots always come first. Returns `None` when there is
    /// nothing left to ask (or the interview is finished).
    pub fn next_question(&mut self) -> Option<String> {
        if self.state.phase == InterviewPhase::Ready {
            self.state.active_question = None;
            return None;
        }

        let state = &self.state;
        let next = QUESTION_BANK
            .iter()
            .find(|q| q.is_mandatory() && !question_slot_filled(state, q) && q.applies(state))
            .or_else(|| {
                QUESTION_BANK.iter().find(|q| {
                    !state.asked.contains(&q.id) && q.applies(state) && !question_slot_filled(state, q)
                })
            });

        match next {
            Some(question) => {
                debug!(question = ?question.id, "Asking next question");
                self.state.active_question = Some(question.id);
                self.state.asked.insert(question.id);
                Some(question.render(&self.state))
            }
            None => {
                self.state.active_question = None;
                None
            }
        }
    }

    /// Prompt shown once the question bank is exhausted.
    pub fn completion_prompt(&self) -> String {
        "That covers everything I wanted to ask. Add anything else you like, or type 'done' to \
         generate the design."
            .to_string()
    }

    /// Feed one user utterance to the machine.
    pub fn ingest(&mut self, utterance: &str) -> TurnOutcome {
        let locked = self.state.lock_urls(&detector::extract_urls(utterance));
        if !locked.is_empty() {
            info!(count = locked.len(), "Locked image URLs as must-use assets");
        }

        let text = utterance.trim();
        if text.is_empty() {
            return TurnOutcome::Ignored;
        }

        if self.state.phase == InterviewPhase::Ready {
            return TurnOutcome::AlreadyReady { locked };
        }

        if is_completion_token(text) {
            return match self.complete() {
                Ok(request) => TurnOutcome::Ready(request),
                Err(InterviewError::AlreadyEmitted) => TurnOutcome::AlreadyReady { locked },
                Err(InterviewError::NotReady(_)) => {
                    let missing = self.state.missing_mandatory();
                    info!(?missing, "Completion requested before mandatory slots were filled");
                    let question = self
                        .next_question()
                        .unwrap_or_else(|| self.completion_prompt());
                    TurnOutcome::PrematureCompletion { missing, question }
                }
            };
        }

        self.record_answer(text, locked)
    }

    /// Finish the interview and produce the blueprint request.
    ///
    /// Fails with `NotReady` while mandatory slots are missing and with
    /// `AlreadyEmitted` once the request has been handed out.
    pub fn complete(&mut self) -> Result<BlueprintRequest, InterviewError> {
        if self.state.request_emitted {
            return Err(InterviewError::AlreadyEmitted);
        }
        if !self.state.is_core_complete() {
            return Err(InterviewError::NotReady(self.state.phase));
        }

        self.state.phase = InterviewPhase::Ready;
        self.state.active_question = None;
        let request = build_request(&self.state)?;
        self.state.request_emitted = true;
        info!(
            session_id = %self.state.session_id,
            locked_assets = self.state.locked_assets.len(),
            "Interview ready, blueprint request built"
        );
        Ok(request)
    }

    /// Unfilled mandatory slots, in priority order.
    pub fn missing_mandatory(&self) -> Vec<SlotName> {
        self.state.missing_mandatory()
    }

    /// Human-readable summary of everything collected so far.
    pub fn summary(&self) -> String {
        let mut lines = vec!["Collected requirements:".to_string()];
        for name in SlotName::ALL {
            match self.state.slot_value(name) {
                Some(value) => lines.push(format!("  {}: {value}", name.label())),
                None if name.is_mandatory() => lines.push(format!("  {}: (missing)", name.label())),
                None => {}
            }
        }
        if !self.state.locked_assets.is_empty() {
            lines.push("  Image URLs:".to_string());
            for asset in &self.state.locked_assets {
                lines.push(format!("    - {}", asset.url));
            }
        }
        lines.join("\n")
    }

    fn record_answer(&mut self, text: &str, locked: Vec<String>) -> TurnOutcome {
        let target = self.answer_target();
        let cleaned = detector::strip_urls(text);

        let mut filled = None;
        let mut inferred = Vec::new();
        if !cleaned.is_empty() {
            filled = self.apply_answer(target, &cleaned);
            inferred = self.infer_from(&cleaned, target);
            self.state.active_question = None;
        } else if target == AnswerTarget::ImageUrls {
            self.state.active_question = None;
        }

        let advanced = self.state.refresh_phase();
        if advanced {
            info!("All mandatory slots filled, collecting optional details");
        }
        debug!(?filled, ?inferred, locked = locked.len(), "Recorded answer");

        TurnOutcome::Recorded {
            filled,
            inferred,
            locked,
            advanced,
        }
    }

    /// Where the next answer belongs.
    ///
    /// The active question wins unless its slot is already filled; otherwise
    /// the first missing mandatory slot, and finally the free-form notes.
    fn answer_target(&self) -> AnswerTarget {
        match self.state.active_question {
            Some(QuestionId::Slot(name)) if !self.state.is_filled(name) => AnswerTarget::Slot(name),
            Some(QuestionId::ImageUrls) => AnswerTarget::ImageUrls,
            _ => match self.state.missing_mandatory().first() {
                Some(name) => AnswerTarget::Slot(*name),
                None => AnswerTarget::Notes,
            },
        }
    }

    fn apply_answer(&mut self, target: AnswerTarget, answer: &str) -> Option<SlotName> {
        let skippable = !matches!(target, AnswerTarget::Slot(name) if name.is_mandatory());
        if skippable && SKIP_ANSWERS.contains(&answer.to_lowercase().as_str()) {
            return None;
        }

        let (name, value) = match target {
            AnswerTarget::Slot(name) => (name, answer.to_string()),
            AnswerTarget::ImageUrls => {
                let name = SlotName::MustIncludeElements;
                (name, merge_text(self.state.slot_value(name), answer))
            }
            AnswerTarget::Notes => {
                let name = SlotName::AdditionalNotes;
                (name, merge_text(self.state.slot_value(name), answer))
            }
        };
        self.state
            .fill_slot(name, &value, SlotSource::UserStated)
            .then_some(name)
    }

    /// Fill other slots mentioned in passing.
    ///
    /// Card type and size first. Optional slots are inferred once the
    /// mandatory ones are complete, including on the turn that completes them.
    fn infer_from(&mut self, text: &str, target: AnswerTarget) -> Vec<SlotName> {
        let mut candidates: Vec<(SlotName, Option<String>)> = Vec::new();
        if target == AnswerTarget::Slot(SlotName::Occasion) {
            candidates.push((SlotName::CardType, infer_card_type(text)));
        }
        candidates.push((SlotName::Size, infer_size(text)));
        let mut inferred = self.apply_inferred(candidates);

        if self.state.is_core_complete() {
            inferred.extend(self.apply_inferred(vec![
                (SlotName::Tone, infer_tone(text)),
                (SlotName::ColorPalette, infer_colors(text)),
                (SlotName::VisualStyle, infer_visual_style(text)),
                (SlotName::Deadline, infer_deadline(text)),
            ]));
        }
        inferred
    }

    fn apply_inferred(&mut self, candidates: Vec<(SlotName, Option<String>)>) -> Vec<SlotName> {
        let mut inferred = Vec::new();
        for (name, value) in candidates {
            let Some(value) = value else { continue };
            if self.state.infer_slot(name, &value) {
                debug!(slot = %name, value = %value, "Inferred slot value");
                inferred.push(name);
            }
        }
        inferred
    }
}

fn question_slot_filled(state: &InterviewState, question: &Question) -> bool {
    question.slot_name().is_some_and(|name| state.is_filled(name))
}
