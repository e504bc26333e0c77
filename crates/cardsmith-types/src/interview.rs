//! Requirement interview types.
//!
//! A card interview collects a fixed set of named slots. Three of them
//! (occasion, card type, size) are mandatory and must be filled before a
//! blueprint can be requested. Image URLs found anywhere in the user's
//! input are locked as must-use assets.
//!
//! Lifecycle logic lives in `cardsmith-core::interview`; this module only
//! holds the data shapes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of a requirement slot.
///
/// Declaration order is the canonical order used for summaries and for the
/// blueprint request payload. The first three variants are the mandatory
/// slots, in the priority order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotName {
    Occasion,
    CardType,
    Size,
    Recipient,
    Relationship,
    Tone,
    MessageFocus,
    PersonalizationDetails,
    ColorPalette,
    Typography,
    VisualStyle,
    MustIncludeElements,
    CallToAction,
    BrandNotes,
    DeliveryFormat,
    Deadline,
    AdditionalNotes,
}

impl SlotName {
    /// Every slot, in canonical order.
    pub const ALL: [SlotName; 17] = [
        SlotName::Occasion,
        SlotName::CardType,
        SlotName::Size,
        SlotName::Recipient,
        SlotName::Relationship,
        SlotName::Tone,
        SlotName::MessageFocus,
        SlotName::PersonalizationDetails,
        SlotName::ColorPalette,
        SlotName::Typography,
        SlotName::VisualStyle,
        SlotName::MustIncludeElements,
        SlotName::CallToAction,
        SlotName::BrandNotes,
        SlotName::DeliveryFormat,
        SlotName::Deadline,
        SlotName::AdditionalNotes,
    ];

    /// Mandatory slots in the fixed priority order they are collected.
    pub const MANDATORY: [SlotName; 3] = [SlotName::Occasion, SlotName::CardType, SlotName::Size];

    /// Whether this slot must be filled before generation.
    pub fn is_mandatory(self) -> bool {
        Self::MANDATORY.contains(&self)
    }

    /// Human-readable label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            SlotName::Occasion => "Occasion",
            SlotName::CardType => "Card type",
            SlotName::Size => "Size",
            SlotName::Recipient => "Recipient",
            SlotName::Relationship => "Relationship",
            SlotName::Tone => "Tone",
            SlotName::MessageFocus => "Message focus",
            SlotName::PersonalizationDetails => "Personal details",
            SlotName::ColorPalette => "Color palette",
            SlotName::Typography => "Typography",
            SlotName::VisualStyle => "Visual style",
            SlotName::MustIncludeElements => "Must include",
            SlotName::CallToAction => "Call to action",
            SlotName::BrandNotes => "Brand notes",
            SlotName::DeliveryFormat => "Delivery format",
            SlotName::Deadline => "Deadline",
            SlotName::AdditionalNotes => "Additional notes",
        }
    }

    /// Stable snake_case key, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SlotName::Occasion => "occasion",
            SlotName::CardType => "card_type",
            SlotName::Size => "size",
            SlotName::Recipient => "recipient",
            SlotName::Relationship => "relationship",
            SlotName::Tone => "tone",
            SlotName::MessageFocus => "message_focus",
            SlotName::PersonalizationDetails => "personalization_details",
            SlotName::ColorPalette => "color_palette",
            SlotName::Typography => "typography",
            SlotName::VisualStyle => "visual_style",
            SlotName::MustIncludeElements => "must_include_elements",
            SlotName::CallToAction => "call_to_action",
            SlotName::BrandNotes => "brand_notes",
            SlotName::DeliveryFormat => "delivery_format",
            SlotName::Deadline => "deadline",
            SlotName::AdditionalNotes => "additional_notes",
        }
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        SlotName::ALL
            .into_iter()
            .find(|slot| slot.as_str() == normalized)
            .ok_or_else(|| format!("invalid slot name: '{s}'"))
    }
}

/// Where a slot value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSource {
    /// The user answered the question for this slot directly.
    UserStated,
    /// Extracted from an answer to a different question.
    Inferred,
}

/// A single requirement slot and its current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub name: SlotName,
    pub mandatory: bool,
    pub value: Option<String>,
    pub source: Option<SlotSource>,
}

impl Slot {
    /// An empty slot.
    pub fn empty(name: SlotName) -> Self {
        Self {
            name,
            mandatory: name.is_mandatory(),
            value: None,
            source: None,
        }
    }

    /// Whether the slot holds a non-blank value.
    pub fn is_filled(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.trim().is_empty())
    }
}

/// A user-supplied image URL that must appear verbatim in the final request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedAsset {
    pub url: String,
}

/// Phase of the requirement interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    CollectingMandatory,
    CollectingOptional,
    Ready,
}

impl fmt::Display for InterviewPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterviewPhase::CollectingMandatory => write!(f, "collecting_mandatory"),
            InterviewPhase::CollectingOptional => write!(f, "collecting_optional"),
            InterviewPhase::Ready => write!(f, "ready"),
        }
    }
}

/// Identifier of a question in the interview question bank.
///
/// Every slot has a question; `ImageUrls` is the extra question that asks
/// for must-use image or logo links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    Slot(SlotName),
    ImageUrls,
}

/// Complete state of one interview session.
///
/// Owned exclusively by the session that created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewState {
    pub session_id: Uuid,
    pub phase: InterviewPhase,
    /// One entry per [`SlotName`], in canonical order.
    pub slots: Vec<Slot>,
    /// Append-only, deduplicated by exact URL string.
    pub locked_assets: Vec<LockedAsset>,
    /// Questions that have already been put to the user.
    pub asked: BTreeSet<QuestionId>,
    /// The question the next answer belongs to.
    pub active_question: Option<QuestionId>,
    /// Set once the blueprint request has been produced.
    pub request_emitted: bool,
    pub greeted: bool,
}
