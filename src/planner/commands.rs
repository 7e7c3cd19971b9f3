//! Control commands recognized ahead of slot parsing.
//!
//! Anything that is not a known command is an ordinary answer to the pending
//! slot. There is deliberately no "change <slot>" command: answered slots are
//! final for the life of a conversation.

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// An answer for the pending slot.
    Answer(String),
    /// Start over with an empty profile.
    Reset,
    /// Render (or re-show) the itinerary.
    Itinerary,
    /// Write the itinerary and profile to the export directory.
    Export,
    /// Show the collected trip details.
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse a raw input line.
    ///
    /// The answer keeps the input exactly as given; only command matching is
    /// trimmed and case-insensitive.
    pub fn parse(content: &str) -> Command {
        let lower = content.trim().to_lowercase();
        match lower.as_str() {
            "/reset" | "/restart" | "/new" => Command::Reset,
            "/itinerary" | "/generate" => Command::Itinerary,
            "/export" | "/download" => Command::Export,
            "/status" | "/details" => Command::Status,
            "/help" | "/?" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            _ => Command::Answer(content.to_string()),
        }
    }
}

/// Help text listing the commands.
pub const HELP_TEXT: &str = "\
Answer each question to build your trip. Commands:
  /status     show the trip details collected so far
  /itinerary  generate your itinerary once every question is answered
  /export     save the itinerary and trip details to disk
  /reset      start over
  /quit       exit";
