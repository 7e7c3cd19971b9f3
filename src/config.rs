//! Configuration types, loaded from `TRIP_ASSIST_*` environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::planner::{BlankInput, EngineOptions};

pub const DEFAULT_WIKIPEDIA_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary";
pub const DEFAULT_SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

/// Web-enrichment settings.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Whether itineraries are enriched with web lookups.
    pub enabled: bool,
    /// Base URL of a page-summary endpoint; the title is appended as a path segment.
    pub wikipedia_url: String,
    /// HTML search endpoint taking a `q` query parameter.
    pub search_url: String,
    /// Upper bound on a whole lookup.
    pub timeout: Duration,
    /// Maximum activity suggestions kept.
    pub max_activities: usize,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            wikipedia_url: DEFAULT_WIKIPEDIA_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            timeout: Duration::from_secs(5),
            max_activities: 5,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port for the JSON API; the API is not served when unset.
    pub http_port: Option<u16>,
    /// Directory where `/export` writes files.
    pub export_dir: PathBuf,
    /// When set, logs go to a daily rolling file here instead of stderr.
    pub log_dir: Option<PathBuf>,
    pub engine: EngineOptions,
    pub enrich: EnrichConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_port: None,
            export_dir: PathBuf::from("./exports"),
            log_dir: None,
            engine: EngineOptions::default(),
            enrich: EnrichConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = get("TRIP_ASSIST_HTTP_PORT") {
            config.http_port = Some(parse_value("TRIP_ASSIST_HTTP_PORT", &port)?);
        }
        if let Some(dir) = get("TRIP_ASSIST_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }
        config.log_dir = get("TRIP_ASSIST_LOG_DIR").map(PathBuf::from);

        if let Some(policy) = get("TRIP_ASSIST_BLANK_INPUT") {
            config.engine.blank_input = match policy.trim().to_lowercase().as_str() {
                "accept" => BlankInput::Accept,
                "reprompt" => BlankInput::Reprompt,
                other => {
                    return Err(ConfigError::InvalidValue {
                        key: "TRIP_ASSIST_BLANK_INPUT".to_string(),
                        message: format!("expected 'accept' or 'reprompt', got '{other}'"),
                    });
                }
            };
        }
        if let Some(split) = get("TRIP_ASSIST_SPLIT_LISTS") {
            config.engine.split_lists = parse_bool("TRIP_ASSIST_SPLIT_LISTS", &split)?;
        }

        if let Some(enabled) = get("TRIP_ASSIST_ENRICH") {
            config.enrich.enabled = parse_bool("TRIP_ASSIST_ENRICH", &enabled)?;
        }
        if let Some(url) = get("TRIP_ASSIST_WIKIPEDIA_URL") {
            config.enrich.wikipedia_url = url;
        }
        if let Some(url) = get("TRIP_ASSIST_SEARCH_URL") {
            config.enrich.search_url = url;
        }
        if let Some(secs) = get("TRIP_ASSIST_ENRICH_TIMEOUT_SECS") {
            let secs: u64 = parse_value("TRIP_ASSIST_ENRICH_TIMEOUT_SECS", &secs)?;
            config.enrich.timeout = Duration::from_secs(secs);
        }
        if let Some(max) = get("TRIP_ASSIST_MAX_ACTIVITIES") {
            config.enrich.max_activities = parse_value("TRIP_ASSIST_MAX_ACTIVITIES", &max)?;
        }

        Ok(config)
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}
