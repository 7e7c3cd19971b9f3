//! Destination enrichment: optional, best-effort context for itineraries.
//!
//! An enricher looks a destination up in external sources and returns a short
//! summary plus a few activity suggestions. It must never fail: every network
//! or parse problem is logged and replaced with fallback text, so enrichment
//! can only ever add to an itinerary, never block one.

pub mod web;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::planner::{Conversation, SlotId};

pub use web::WebEnricher;

/// Shown when no activity suggestions could be found.
pub const NO_ACTIVITIES: &str = "No activity suggestions found.";

/// Summary used when the encyclopedia lookup fails or comes back empty.
pub fn no_summary(destination: &str) -> String {
    format!("No summary available for {destination}.")
}

/// Opaque text fragments embedded in an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationInsight {
    pub summary: String,
    pub activities: Vec<String>,
}

impl DestinationInsight {
    /// The insight returned when every source failed.
    pub fn fallback(destination: &str) -> Self {
        Self {
            summary: no_summary(destination),
            activities: Vec::new(),
        }
    }
}

/// Source of destination context.
#[async_trait]
pub trait DestinationEnricher: Send + Sync {
    /// Look up `destination`. Infallible: failures degrade to fallback text.
    async fn lookup(&self, destination: &str) -> DestinationInsight;
}

/// Look the destination up only when `convo` is about to render a new
/// itinerary; otherwise the enricher is not called.
pub async fn insight_for(
    enricher: Option<&dyn DestinationEnricher>,
    convo: &Conversation,
) -> Option<DestinationInsight> {
    let enricher = enricher?;
    if convo.itinerary().is_some() || !convo.profile().is_complete() {
        return None;
    }
    let destination = convo
        .profile()
        .display_value(SlotId::Destination)
        .unwrap_or_default();
    Some(enricher.lookup(&destination).await)
}
