//! Trip profile: the answers collected so far.

use serde::{Deserialize, Serialize};

use super::slots::SlotId;

/// A collected answer.
///
/// Serialized untagged so the profile exports as a flat key-value map:
/// integers as numbers, text as strings, lists as arrays of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Integer(u32),
    Text(String),
    List(Vec<String>),
}

impl SlotValue {
    /// An empty list counts as no answer.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::List(items) if items.is_empty())
    }
}

impl std::fmt::Display for SlotValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => write!(f, "{}", items.join(", ")),
        }
    }
}

/// Answers for one conversation, one field per slot.
///
/// Absent answers serialize as `null` so every export carries all 12 keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripProfile {
    pub destination: Option<SlotValue>,
    pub duration: Option<SlotValue>,
    pub dates: Option<SlotValue>,
    pub origin: Option<SlotValue>,
    pub budget: Option<SlotValue>,
    pub purpose: Option<SlotValue>,
    pub preferences: Option<SlotValue>,
    pub dietary: Option<SlotValue>,
    pub interests: Option<SlotValue>,
    pub mobility: Option<SlotValue>,
    pub accommodation: Option<SlotValue>,
    pub must_see: Option<SlotValue>,
}

impl TripProfile {
    pub fn get(&self, slot: SlotId) -> Option<&SlotValue> {
        match slot {
            SlotId::Destination => self.destination.as_ref(),
            SlotId::Duration => self.duration.as_ref(),
            SlotId::Dates => self.dates.as_ref(),
            SlotId::Origin => self.origin.as_ref(),
            SlotId::Budget => self.budget.as_ref(),
            SlotId::Purpose => self.purpose.as_ref(),
            SlotId::Preferences => self.preferences.as_ref(),
            SlotId::Dietary => self.dietary.as_ref(),
            SlotId::Interests => self.interests.as_ref(),
            SlotId::Mobility => self.mobility.as_ref(),
            SlotId::Accommodation => self.accommodation.as_ref(),
            SlotId::MustSee => self.must_see.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: SlotId) -> &mut Option<SlotValue> {
        match slot {
            SlotId::Destination => &mut self.destination,
            SlotId::Duration => &mut self.duration,
            SlotId::Dates => &mut self.dates,
            SlotId::Origin => &mut self.origin,
            SlotId::Budget => &mut self.budget,
            SlotId::Purpose => &mut self.purpose,
            SlotId::Preferences => &mut self.preferences,
            SlotId::Dietary => &mut self.dietary,
            SlotId::Interests => &mut self.interests,
            SlotId::Mobility => &mut self.mobility,
            SlotId::Accommodation => &mut self.accommodation,
            SlotId::MustSee => &mut self.must_see,
        }
    }

    /// Whether `slot` holds a non-empty answer.
    pub fn is_answered(&self, slot: SlotId) -> bool {
        self.get(slot).is_some_and(|v| !v.is_empty())
    }

    /// Store an answer. Answered slots are never overwritten; returns false
    /// (and leaves the profile untouched) if `slot` already has one.
    pub fn record(&mut self, slot: SlotId, value: SlotValue) -> bool {
        if self.is_answered(slot) {
            tracing::warn!(slot = %slot, "Refusing to overwrite an answered slot");
            return false;
        }
        *self.slot_mut(slot) = Some(value);
        true
    }

    /// First unanswered slot in interview order, or `None` when complete.
    pub fn pending_slot(&self) -> Option<SlotId> {
        SlotId::ALL.into_iter().find(|slot| !self.is_answered(*slot))
    }

    pub fn is_complete(&self) -> bool {
        self.pending_slot().is_none()
    }

    pub fn answered_count(&self) -> usize {
        SlotId::ALL
            .iter()
            .filter(|slot| self.is_answered(**slot))
            .count()
    }

    /// Answer rendered as display text, or `None` if unanswered.
    pub fn display_value(&self, slot: SlotId) -> Option<String> {
        self.get(slot)
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }

    /// Items of a list-valued slot; empty if unanswered or scalar.
    pub fn list(&self, slot: SlotId) -> &[String] {
        match self.get(slot) {
            Some(SlotValue::List(items)) => items,
            _ => &[],
        }
    }

    /// Trip length in days, when the duration answer parsed as an integer.
    pub fn duration_days(&self) -> Option<u32> {
        match self.duration {
            Some(SlotValue::Integer(n)) => Some(n),
            _ => None,
        }
    }

    /// "Your Trip Details" summary: one markdown line per answered slot.
    pub fn summary_lines(&self) -> Vec<String> {
        SlotId::ALL
            .into_iter()
            .filter_map(|slot| {
                self.display_value(slot)
                    .map(|value| format!("- **{}:** {}", slot.label(), value))
            })
            .collect()
    }
}
