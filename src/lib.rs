//! Trip Assist: conversational travel-itinerary planner.

pub mod channels;
pub mod config;
pub mod enrich;
pub mod error;
pub mod export;
pub mod planner;
pub mod session;
