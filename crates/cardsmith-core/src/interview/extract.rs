//! Best-effort slot extraction from free text.
//!
//! These heuristics fill slots the user mentioned in passing, for example a
//! size given while answering the occasion question. They are keyword and
//! pattern based; anything they miss is still asked for explicitly.

use std::sync::LazyLock;

use regex::Regex;

/// Canonical card types and the keywords that hint at them.
const CARD_TYPE_KEYWORDS: &[(&str, &[&str])] = &[
    ("personal", &["personal"]),
    ("business", &["business", "corporate", "company"]),
    ("invitation", &["invitation", "invite"]),
];

const TONE_KEYWORDS: &[&str] = &[
    "elegant",
    "fun",
    "funny",
    "playful",
    "formal",
    "professional",
    "warm",
    "heartfelt",
    "romantic",
    "festive",
    "cheerful",
    "classy",
    "modern",
    "minimal",
    "vintage",
    "casual",
    "emotional",
    "luxurious",
];

const VISUAL_STYLE_KEYWORDS: &[&str] = &[
    "minimal",
    "minimalist",
    "floral",
    "abstract",
    "watercolor",
    "watercolour",
    "vintage",
    "retro",
    "geometric",
    "botanical",
    "rustic",
    "boho",
    "marble",
    "glitter",
    "illustrated",
    "cartoon",
    "photographic",
    "gradient",
];

const COLOR_WORDS: &[&str] = &[
    "red", "blue", "green", "yellow", "orange", "purple", "pink", "gold", "golden", "silver",
    "black", "white", "navy", "teal", "maroon", "beige", "ivory", "cream", "lavender", "peach",
    "pastel", "turquoise", "burgundy", "mint", "coral",
];

static PAPER_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(a[3-7])\b").expect("Invalid paper size pattern"));

static DIMENSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+(?:\.\d+)?\s*[x×]\s*\d+(?:\.\d+)?(?:\s*(?:inches|inch|in|cm|mm|px)\b)?")
        .expect("Invalid dimensions pattern")
});

static FORMAT_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(square|story|post)\b").expect("Invalid format word pattern")
});

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("Invalid hex color pattern")
});

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("Invalid word pattern"));

static DEADLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        \b(?:by|before|until|till|on)\s+
        (?:
            tomorrow|today|tonight
          | (?:next|this)\s+(?:week|weekend|month|year
                | monday|tuesday|wednesday|thursday|friday|saturday|sunday
                | january|february|march|april|may|june|july|august|september
                | october|november|december)\b
          | \d{1,2}(?:st|nd|rd|th)?\b(?:\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\b)?
          | (?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{1,2}(?:st|nd|rd|th)?\b
        )
        | \b(?:tomorrow|next\s+week|next\s+month|this\s+weekend)\b",
    )
    .expect("Invalid deadline pattern")
});

/// Infer the card type from keywords in `text`.
///
/// Multiple distinct types are joined with a space in order of first
/// appearance, e.g. "business invitation".
pub fn infer_card_type(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    let mut hits: Vec<(usize, &str)> = CARD_TYPE_KEYWORDS
        .iter()
        .filter_map(|(card_type, keywords)| {
            keywords
                .iter()
                .find_map(|keyword| lowered.find(keyword))
                .map(|index| (index, *card_type))
        })
        .collect();
    if hits.is_empty() {
        return None;
    }
    hits.sort_by_key(|(index, _)| *index);
    let types: Vec<&str> = hits.into_iter().map(|(_, card_type)| card_type).collect();
    Some(types.join(" "))
}

/// Infer a card size from paper sizes, dimensions or format words.
pub fn infer_size(text: &str) -> Option<String> {
    if let Some(m) = PAPER_SIZE.find(text) {
        return Some(m.as_str().to_uppercase());
    }
    if let Some(m) = DIMENSIONS.find(text) {
        return Some(m.as_str().trim().to_string());
    }
    FORMAT_WORD.find(text).map(|m| m.as_str().to_lowercase())
}

/// Infer tone keywords, comma separated in order of appearance.
pub fn infer_tone(text: &str) -> Option<String> {
    join_words(text, |word| TONE_KEYWORDS.contains(&word))
}

/// Infer imagery style keywords, comma separated in order of appearance.
pub fn infer_visual_style(text: &str) -> Option<String> {
    join_words(text, |word| VISUAL_STYLE_KEYWORDS.contains(&word))
}

/// Infer colour words and hex codes, comma separated in order of appearance.
pub fn infer_colors(text: &str) -> Option<String> {
    let mut hits: Vec<(usize, String)> = HEX_COLOR
        .find_iter(text)
        .map(|m| (m.start(), m.as_str().to_string()))
        .collect();
    for m in WORD.find_iter(text) {
        let word = m.as_str().to_lowercase();
        if COLOR_WORDS.contains(&word.as_str()) {
            hits.push((m.start(), word));
        }
    }
    hits.sort_by_key(|(index, _)| *index);
    dedup_join(hits.into_iter().map(|(_, hit)| hit))
}

/// Infer a deadline phrase such as "by 25th December" or "next week".
pub fn infer_deadline(text: &str) -> Option<String> {
    DEADLINE.find(text).map(|m| m.as_str().trim().to_string())
}

/// Merge `addition` into an optional free-text value.
///
/// Additions already contained in the existing text (case-insensitive) are
/// dropped; otherwise they are appended with a `; ` separator.
pub fn merge_text(existing: Option<&str>, addition: &str) -> String {
    match existing.map(str::trim).filter(|e| !e.is_empty()) {
        None => addition.to_string(),
        Some(existing) if existing.to_lowercase().contains(&addition.to_lowercase()) => {
            existing.to_string()
        }
        Some(existing) => format!("{existing}; {addition}"),
    }
}

fn join_words(text: &str, keep: impl Fn(&str) -> bool) -> Option<String> {
    dedup_join(
        WORD.find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .filter(|word| keep(word)),
    )
}

fn dedup_join(items: impl Iterator<Item = String>) -> Option<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    (!seen.is_empty()).then(|| seen.join(", "))
}
