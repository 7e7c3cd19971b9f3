//! Trip planner: the conversational slot-filling flow.
//!
//! The assistant asks a fixed sequence of questions, stores each answer in a
//! `TripProfile`, and once every slot is filled renders a templated
//! itinerary. Slot extraction is deterministic (digit and delimiter checks,
//! otherwise raw text); there is no language model in the loop.

pub mod commands;
pub mod engine;
pub mod itinerary;
pub mod profile;
pub mod routes;
pub mod slots;

pub use commands::Command;
pub use engine::{
    BlankInput, Conversation, EngineOptions, GenerateOutcome, LogEntry, NextPrompt, Reply, Speaker,
};
pub use itinerary::{ItineraryDocument, render, render_with_insight};
pub use profile::{SlotValue, TripProfile};
pub use routes::{PlannerRouteState, planner_routes};
pub use slots::{ParserKind, SlotId, prompt_for};
