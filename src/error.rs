//! Error types for Trip Assist.
//!
//! The dialogue engine and itinerary renderer never fail; these errors belong
//! to the layers around them (configuration, enrichment, export, sessions).

use uuid::Uuid;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Web-enrichment errors. Never shown to the user; converted to fallback text.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("Request to {source_name} failed: {reason}")]
    RequestFailed { source_name: String, reason: String },

    #[error("{source_name} returned status {status}")]
    BadStatus { source_name: String, status: u16 },

    #[error("{source_name} returned no usable content")]
    Empty { source_name: String },

    #[error("Lookup timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Itinerary export errors.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("No itinerary has been generated yet")]
    NotGenerated,

    #[error("Failed to serialize export: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session {id} not found")]
    NotFound { id: Uuid },
}
