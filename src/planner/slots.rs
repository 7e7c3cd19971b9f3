//! Slot schema: the fixed interview sequence, its prompts, and how each
//! answer is parsed.

use serde::{Deserialize, Serialize};

use super::profile::{SlotValue, TripProfile};

/// Placeholder used when a prompt references a value not yet collected.
const DESTINATION_PLACEHOLDER: &str = "your destination";

/// Characters accepted as a date-range delimiter.
const RANGE_DELIMITERS: &[char] = &['-', '\u{2013}', '\u{2014}'];

/// Characters that separate items when multi-value list parsing is enabled.
const LIST_DELIMITERS: &[char] = &[',', ';'];

/// The 12 trip attributes, in interview order.
///
/// Declaration order is the interview order: `Ord` and [`SlotId::ALL`] both
/// follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    Destination,
    Duration,
    Dates,
    Origin,
    Budget,
    Purpose,
    Preferences,
    Dietary,
    Interests,
    Mobility,
    Accommodation,
    MustSee,
}

impl SlotId {
    /// Every slot in interview order.
    pub const ALL: [SlotId; 12] = [
        SlotId::Destination,
        SlotId::Duration,
        SlotId::Dates,
        SlotId::Origin,
        SlotId::Budget,
        SlotId::Purpose,
        SlotId::Preferences,
        SlotId::Dietary,
        SlotId::Interests,
        SlotId::Mobility,
        SlotId::Accommodation,
        SlotId::MustSee,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Destination => "destination",
            Self::Duration => "duration",
            Self::Dates => "dates",
            Self::Origin => "origin",
            Self::Budget => "budget",
            Self::Purpose => "purpose",
            Self::Preferences => "preferences",
            Self::Dietary => "dietary",
            Self::Interests => "interests",
            Self::Mobility => "mobility",
            Self::Accommodation => "accommodation",
            Self::MustSee => "must_see",
        }
    }

    /// Human-readable label for trip summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Destination => "Destination",
            Self::Duration => "Duration",
            Self::Dates => "Dates",
            Self::Origin => "Origin",
            Self::Budget => "Budget",
            Self::Purpose => "Purpose",
            Self::Preferences => "Preferences",
            Self::Dietary => "Dietary",
            Self::Interests => "Interests",
            Self::Mobility => "Mobility",
            Self::Accommodation => "Accommodation",
            Self::MustSee => "Must-see",
        }
    }

    /// How answers to this slot are interpreted.
    pub fn parser(&self) -> ParserKind {
        match self {
            Self::Duration => ParserKind::Integer,
            Self::Dates => ParserKind::DelimitedRange,
            Self::Preferences | Self::Interests => ParserKind::List,
            _ => ParserKind::FreeText,
        }
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build the question asked for `slot`.
///
/// Pure: reads earlier answers from `profile` but never changes it.
pub fn prompt_for(slot: SlotId, profile: &TripProfile) -> String {
    match slot {
        SlotId::Destination => "Where would you like to go?".to_string(),
        SlotId::Duration => {
            let destination = profile
                .display_value(SlotId::Destination)
                .unwrap_or_else(|| DESTINATION_PLACEHOLDER.to_string());
            format!("How many days will you be in {destination}?")
        }
        SlotId::Dates => "What are your travel dates? (e.g., July 15-20, 2023)".to_string(),
        SlotId::Origin => "Where will you be traveling from?".to_string(),
        SlotId::Budget => {
            "What's your approximate budget? (low/medium/high or specific amount)".to_string()
        }
        SlotId::Purpose => {
            "What's the main purpose of your trip? (vacation, business, etc.)".to_string()
        }
        SlotId::Preferences => {
            "What kind of activities do you enjoy? (culture, nature, nightlife, etc.)".to_string()
        }
        SlotId::Dietary => "Any dietary preferences or restrictions?".to_string(),
        SlotId::Interests => "Any specific interests within those preferences?".to_string(),
        SlotId::Mobility => "Any mobility concerns or walking preferences?".to_string(),
        SlotId::Accommodation => "What type of accommodation do you prefer?".to_string(),
        SlotId::MustSee => "Any must-see attractions you want included?".to_string(),
    }
}

/// Heuristic used to turn a raw utterance into a slot value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParserKind {
    FreeText,
    Integer,
    DelimitedRange,
    List,
}

/// Outcome of parsing one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAnswer {
    pub value: SlotValue,
    /// True when the heuristic did not match and the raw text was kept instead.
    pub degraded: bool,
}

impl ParserKind {
    /// Parse `raw` for this kind. Never fails: a miss degrades to raw text.
    pub fn parse(&self, raw: &str, split_lists: bool) -> ParsedAnswer {
        match self {
            Self::FreeText => parse_free_text(raw),
            Self::Integer => parse_integer(raw),
            Self::DelimitedRange => parse_range(raw),
            Self::List => parse_list(raw, split_lists),
        }
    }
}

fn parse_free_text(raw: &str) -> ParsedAnswer {
    ParsedAnswer {
        value: SlotValue::Text(raw.to_string()),
        degraded: false,
    }
}

fn parse_integer(raw: &str) -> ParsedAnswer {
    let all_digits = !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit());
    if all_digits {
        // Digit strings too large for u32 fall through to raw capture.
        if let Ok(n) = raw.parse::<u32>() {
            return ParsedAnswer {
                value: SlotValue::Integer(n),
                degraded: false,
            };
        }
    }
    ParsedAnswer {
        value: SlotValue::Text(raw.to_string()),
        degraded: true,
    }
}

fn parse_range(raw: &str) -> ParsedAnswer {
    ParsedAnswer {
        value: SlotValue::Text(raw.to_string()),
        degraded: !raw.contains(RANGE_DELIMITERS),
    }
}

fn parse_list(raw: &str, split_lists: bool) -> ParsedAnswer {
    if split_lists {
        let items: Vec<String> = raw
            .split(LIST_DELIMITERS)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if !items.is_empty() {
            return ParsedAnswer {
                value: SlotValue::List(items),
                degraded: false,
            };
        }
    }
    ParsedAnswer {
        value: SlotValue::List(vec![raw.to_string()]),
        degraded: false,
    }
}
