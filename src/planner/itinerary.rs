//! Itinerary renderer: turns a completed trip profile into a markdown plan.
//!
//! Rendering is deterministic and never fails. Missing answers degrade to
//! fixed fallback strings so a partial profile still produces a document.

use serde::{Deserialize, Serialize};

use crate::enrich::{DestinationInsight, NO_ACTIVITIES};

use super::profile::{SlotValue, TripProfile};
use super::slots::SlotId;

const DESTINATION_FALLBACK: &str = "Your Destination";
const DURATION_FALLBACK: &str = "unspecified";
const NOT_SPECIFIED: &str = "Not specified";
const DEFAULT_PREFERENCE: &str = "Leisure";

/// A rendered itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryDocument {
    /// Title line without markdown decoration.
    pub title: String,
    /// Full markdown document, title included.
    pub text: String,
}

/// Render the itinerary for `profile`.
pub fn render(profile: &TripProfile) -> ItineraryDocument {
    build(profile, None)
}

/// Render the itinerary with an extra section built from web enrichment.
///
/// The insight is embedded verbatim; it never changes the structure of the
/// rest of the document.
pub fn render_with_insight(profile: &TripProfile, insight: &DestinationInsight) -> ItineraryDocument {
    build(profile, Some(insight))
}

fn build(profile: &TripProfile, insight: Option<&DestinationInsight>) -> ItineraryDocument {
    let destination = profile
        .display_value(SlotId::Destination)
        .unwrap_or_else(|| DESTINATION_FALLBACK.to_string());
    let duration = profile
        .display_value(SlotId::Duration)
        .unwrap_or_else(|| DURATION_FALLBACK.to_string());
    let title = format!("{destination} Travel Itinerary ({duration} days)");

    let or_not_specified =
        |slot: SlotId| profile.display_value(slot).unwrap_or_else(|| NOT_SPECIFIED.to_string());

    let mut parts = vec![format!("# {title}"), String::new()];

    parts.push(format!("**Travel Dates:** {}  ", or_not_specified(SlotId::Dates)));
    parts.push(format!("**Departing From:** {}  ", or_not_specified(SlotId::Origin)));
    parts.push(format!("**Trip Purpose:** {}  ", or_not_specified(SlotId::Purpose)));
    parts.push(format!("**Budget:** {}  ", or_not_specified(SlotId::Budget)));
    parts.push(format!("**Travel Style:** {}", or_not_specified(SlotId::Preferences)));

    if let Some(insight) = insight {
        parts.push(String::new());
        parts.push(format!("## About {destination}"));
        parts.push(insight.summary.clone());
        parts.push(String::new());
        parts.push("**Suggested activities:**".to_string());
        if insight.activities.is_empty() {
            parts.push(format!("- {NO_ACTIVITIES}"));
        } else {
            parts.extend(insight.activities.iter().map(|a| format!("- {a}")));
        }
    }

    let accommodation = profile
        .display_value(SlotId::Accommodation)
        .unwrap_or_else(|| "accommodation".to_string());
    parts.push(String::new());
    parts.push("## Day 1: Arrival and Exploration".to_string());
    parts.push(format!(
        "- Morning: Arrive in {destination}, check into your {accommodation}"
    ));
    parts.push("- Afternoon: Walking tour of the downtown area".to_string());
    parts.push("- Evening: Dinner at a local restaurant".to_string());

    let dietary = profile
        .display_value(SlotId::Dietary)
        .unwrap_or_else(|| "no particular".to_string());
    let first_preference = profile
        .list(SlotId::Preferences)
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_PREFERENCE.to_string());
    parts.push(String::new());
    parts.push("## Day 2: Cultural Highlights".to_string());
    parts.push("- Morning: Visit main museums and historical sites".to_string());
    parts.push(format!(
        "- Afternoon: Local cuisine tasting (dietary needs: {dietary})"
    ));
    parts.push(format!("- Evening: {first_preference}"));

    if let Some(heading) = remaining_days_heading(profile) {
        let interests = profile
            .display_value(SlotId::Interests)
            .unwrap_or_else(|| "the local neighbourhoods".to_string());
        parts.push(String::new());
        parts.push(format!("## {heading}: Custom Activities"));
        parts.push(format!("- Activities built around {interests}"));
        if let Some(must_see) = profile.display_value(SlotId::MustSee) {
            parts.push(format!("- Reserve time for {must_see}"));
        }
        parts.push("- Flexible time to revisit favourites".to_string());
    }

    parts.push(String::new());
    parts.push("## Notes".to_string());
    parts.push(format!(
        "- Mobility: {}",
        profile
            .display_value(SlotId::Mobility)
            .unwrap_or_else(|| "none noted".to_string())
    ));
    parts.push(format!(
        "- Accommodation: {}",
        profile
            .display_value(SlotId::Accommodation)
            .unwrap_or_else(|| "not specified".to_string())
    ));
    parts.push(format!(
        "- Must-see: {}",
        profile
            .display_value(SlotId::MustSee)
            .unwrap_or_else(|| "none noted".to_string())
    ));

    ItineraryDocument {
        title,
        text: parts.join("\n"),
    }
}

/// Heading for the collapsed block covering day 3 to the end of the trip.
fn remaining_days_heading(profile: &TripProfile) -> Option<String> {
    match profile.get(SlotId::Duration) {
        Some(SlotValue::Integer(n)) if *n >= 4 => Some(format!("Days 3-{n}")),
        Some(SlotValue::Integer(3)) => Some("Day 3".to_string()),
        Some(SlotValue::Integer(_)) => None,
        _ => Some("Day 3 onward".to_string()),
    }
}
