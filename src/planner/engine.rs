//! Dialogue engine: one conversation's state machine.
//!
//! A [`Conversation`] owns the trip profile, the conversation log, and the
//! generated itinerary. The pending slot is never stored: it is always the
//! first unanswered slot in interview order, so it cannot drift from the
//! profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::enrich::DestinationInsight;
use crate::error::ExportError;
use crate::export::TripExport;

use super::itinerary::{ItineraryDocument, render, render_with_insight};
use super::profile::TripProfile;
use super::slots::{SlotId, prompt_for};

/// First assistant message of a new conversation.
pub const GREETING: &str = "Hello! I'm your travel planning assistant. Where would you like to go?";

/// First assistant message after a reset.
pub const RESTART_GREETING: &str = "Hello! Where would you like to go?";

/// Sent once every slot is answered.
pub const COMPLETION_NOTICE: &str =
    "I have all the information I need! Ask for your itinerary whenever you're ready.";

/// Shown above a freshly generated itinerary.
pub const ITINERARY_INTRO: &str = "Here's your personalized itinerary:";

/// What to do with an empty or whitespace-only answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankInput {
    /// Store it as given; the slot counts as answered.
    #[default]
    Accept,
    /// Leave the slot empty and ask the same question again.
    Reprompt,
}

/// Per-conversation parsing policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub blank_input: BlankInput,
    /// Split list answers on `,` and `;` instead of storing one item.
    pub split_lists: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// One line of the conversation log. Display only; never read by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub speaker: Speaker,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl LogEntry {
    fn new(speaker: Speaker, message: impl Into<String>) -> Self {
        Self {
            speaker,
            message: message.into(),
            at: Utc::now(),
        }
    }
}

/// What the assistant needs next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum NextPrompt {
    Ask { slot: SlotId, prompt: String },
    Complete,
}

impl NextPrompt {
    /// Text to show the user.
    pub fn message(&self) -> &str {
        match self {
            Self::Ask { prompt, .. } => prompt,
            Self::Complete => COMPLETION_NOTICE,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Result of one turn.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    /// Assistant message for this turn.
    pub message: String,
    /// Slot written this turn, if any.
    pub recorded: Option<SlotId>,
    pub next: NextPrompt,
}

/// Result of asking for the itinerary.
#[derive(Debug, Clone)]
pub enum GenerateOutcome {
    Generated(ItineraryDocument),
    /// An itinerary already exists for this profile; it is returned unchanged.
    AlreadyGenerated(ItineraryDocument),
    Incomplete { pending: SlotId },
}

/// One user's conversation.
#[derive(Debug, Clone)]
pub struct Conversation {
    options: EngineOptions,
    profile: TripProfile,
    log: Vec<LogEntry>,
    itinerary: Option<ItineraryDocument>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl Conversation {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            profile: TripProfile::default(),
            log: vec![LogEntry::new(Speaker::Assistant, GREETING)],
            itinerary: None,
        }
    }

    pub fn profile(&self) -> &TripProfile {
        &self.profile
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn itinerary(&self) -> Option<&ItineraryDocument> {
        self.itinerary.as_ref()
    }

    /// Next slot to ask about, derived from the profile.
    pub fn pending_slot(&self) -> Option<SlotId> {
        self.profile.pending_slot()
    }

    pub fn next_prompt(&self) -> NextPrompt {
        match self.pending_slot() {
            Some(slot) => NextPrompt::Ask {
                slot,
                prompt: prompt_for(slot, &self.profile),
            },
            None => NextPrompt::Complete,
        }
    }

    /// Take one user utterance as the answer to the pending slot.
    ///
    /// Both the utterance and the reply are appended to the log.
    pub fn submit_utterance(&mut self, raw: &str) -> Reply {
        self.log.push(LogEntry::new(Speaker::User, raw));
        let reply = self.transition(raw);
        self.log
            .push(LogEntry::new(Speaker::Assistant, reply.message.clone()));
        reply
    }

    fn transition(&mut self, raw: &str) -> Reply {
        let Some(slot) = self.pending_slot() else {
            debug!("Utterance received after profile completed; nothing to record");
            return Reply {
                message: COMPLETION_NOTICE.to_string(),
                recorded: None,
                next: NextPrompt::Complete,
            };
        };

        if self.options.blank_input == BlankInput::Reprompt && raw.trim().is_empty() {
            debug!(slot = %slot, "Blank answer rejected; asking again");
            let next = self.next_prompt();
            return Reply {
                message: next.message().to_string(),
                recorded: None,
                next,
            };
        }

        let parsed = slot.parser().parse(raw, self.options.split_lists);
        if parsed.degraded {
            debug!(slot = %slot, "Answer did not match slot heuristic; storing raw text");
        }
        let recorded = self.profile.record(slot, parsed.value).then_some(slot);

        let next = self.next_prompt();
        match &next {
            NextPrompt::Ask { slot: next_slot, .. } => info!(
                answered = %slot,
                next = %next_slot,
                progress = self.profile.answered_count(),
                "Slot recorded"
            ),
            NextPrompt::Complete => info!(answered = %slot, "Trip profile complete"),
        }

        Reply {
            message: next.message().to_string(),
            recorded,
            next,
        }
    }

    /// Clear every answer and the log. Returns the restart greeting.
    pub fn reset(&mut self) -> &'static str {
        self.profile = TripProfile::default();
        self.itinerary = None;
        self.log = vec![LogEntry::new(Speaker::Assistant, RESTART_GREETING)];
        info!("Conversation reset");
        RESTART_GREETING
    }

    /// Render the itinerary once the profile is complete.
    ///
    /// The first successful call renders and stores the document; later calls
    /// return the stored copy and ignore `insight`.
    pub fn generate_itinerary(&mut self, insight: Option<&DestinationInsight>) -> GenerateOutcome {
        if let Some(doc) = &self.itinerary {
            return GenerateOutcome::AlreadyGenerated(doc.clone());
        }
        if let Some(pending) = self.pending_slot() {
            debug!(pending = %pending, "Itinerary requested before profile completed");
            return GenerateOutcome::Incomplete { pending };
        }

        let doc = match insight {
            Some(insight) => render_with_insight(&self.profile, insight),
            None => render(&self.profile),
        };
        info!(title = %doc.title, enriched = insight.is_some(), "Itinerary generated");

        self.log.push(LogEntry::new(Speaker::Assistant, ITINERARY_INTRO));
        self.log.push(LogEntry::new(Speaker::Assistant, doc.text.clone()));
        self.itinerary = Some(doc.clone());
        GenerateOutcome::Generated(doc)
    }

    /// Snapshot of the profile and generated itinerary for download.
    pub fn export(&self) -> Result<TripExport, ExportError> {
        let itinerary = self.itinerary.as_ref().ok_or(ExportError::NotGenerated)?;
        Ok(TripExport::new(self.profile.clone(), itinerary))
    }
}
