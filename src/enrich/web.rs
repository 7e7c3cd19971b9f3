//! Web-backed enricher: encyclopedia summary plus a search-results scrape.

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

use crate::config::EnrichConfig;
use crate::error::EnrichError;

use super::{DestinationEnricher, DestinationInsight, no_summary};

/// Maximum sentences kept from the encyclopedia extract.
const SUMMARY_SENTENCES: usize = 2;

const USER_AGENT: &str = concat!("trip-assist/", env!("CARGO_PKG_VERSION"));

/// Page-summary payload; only the plain-text extract is used.
#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: Option<String>,
}

/// Looks destinations up on a Wikipedia-style summary endpoint and scrapes
/// activity ideas from an HTML search results page.
pub struct WebEnricher {
    client: reqwest::Client,
    config: EnrichConfig,
    result_link: Regex,
    tag: Regex,
}

impl WebEnricher {
    pub fn new(config: EnrichConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client, using defaults: {}", e);
                reqwest::Client::new()
            });
        Self {
            client,
            config,
            result_link: Regex::new(r#"(?s)<a[^>]*class="[^"]*result__a[^"]*"[^>]*>(.*?)</a>"#)
                .expect("static pattern"),
            tag: Regex::new(r"<[^>]+>").expect("static pattern"),
        }
    }

    /// Fetch the first sentences of the destination's encyclopedia entry.
    async fn fetch_summary(&self, destination: &str) -> Result<String, EnrichError> {
        let source_name = "wikipedia".to_string();
        let title = destination.trim().replace(' ', "_");
        let mut url =
            reqwest::Url::parse(&self.config.wikipedia_url).map_err(|e| EnrichError::RequestFailed {
                source_name: source_name.clone(),
                reason: e.to_string(),
            })?;
        // Pushed as one segment so `/`, `?` and `#` in the title are percent-encoded.
        url.path_segments_mut()
            .map_err(|()| EnrichError::RequestFailed {
                source_name: source_name.clone(),
                reason: format!("{} cannot take a page title", self.config.wikipedia_url),
            })?
            .pop_if_empty()
            .push(&title);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EnrichError::RequestFailed {
                source_name: source_name.clone(),
                reason: e.to_string(),
            })?;
        if !resp.status().is_success() {
            return Err(EnrichError::BadStatus {
                source_name,
                status: resp.status().as_u16(),
            });
        }

        let page: PageSummary = resp.json().await.map_err(|e| EnrichError::RequestFailed {
            source_name: source_name.clone(),
            reason: e.to_string(),
        })?;
        let summary = first_sentences(page.extract.as_deref().unwrap_or(""), SUMMARY_SENTENCES);
        if summary.is_empty() {
            return Err(EnrichError::Empty { source_name });
        }
        Ok(summary)
    }

    /// Scrape result titles for "things to do" in the destination.
    async fn fetch_activities(&self, destination: &str) -> Result<Vec<String>, EnrichError> {
        let source_name = "search".to_string();
        let query = format!("top things to do in {}", destination.trim());

        let resp = self
            .client
            .get(&self.config.search_url)
            .query(&[("q", query.as_str())])
            .send()
            .await
            .map_err(|e| EnrichError::RequestFailed {
                source_name: source_name.clone(),
                reason: e.to_string(),
            })?;
        if !resp.status().is_success() {
            return Err(EnrichError::BadStatus {
                source_name,
                status: resp.status().as_u16(),
            });
        }

        let html = resp.text().await.map_err(|e| EnrichError::RequestFailed {
            source_name: source_name.clone(),
            reason: e.to_string(),
        })?;
        let activities = self.extract_activities(&html);
        if activities.is_empty() {
            return Err(EnrichError::Empty { source_name });
        }
        Ok(activities)
    }

    fn extract_activities(&self, html: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for cap in self.result_link.captures_iter(html) {
            let text = decode_entities(self.tag.replace_all(&cap[1], "").trim());
            if !text.is_empty() && !out.contains(&text) {
                out.push(text);
            }
            if out.len() >= self.config.max_activities {
                break;
            }
        }
        out
    }
}

#[async_trait]
impl DestinationEnricher for WebEnricher {
    async fn lookup(&self, destination: &str) -> DestinationInsight {
        if destination.trim().is_empty() {
            return DestinationInsight::fallback(destination);
        }

        let lookups = async {
            tokio::join!(
                self.fetch_summary(destination),
                self.fetch_activities(destination)
            )
        };
        let (summary, activities) = match tokio::time::timeout(self.config.timeout, lookups).await
        {
            Ok(results) => results,
            Err(_) => {
                let e = EnrichError::Timeout {
                    secs: self.config.timeout.as_secs(),
                };
                tracing::warn!(destination, "Destination lookup abandoned: {}", e);
                return DestinationInsight::fallback(destination);
            }
        };

        let summary = summary.unwrap_or_else(|e| {
            tracing::warn!(destination, "Summary lookup failed: {}", e);
            no_summary(destination)
        });
        let activities = activities.unwrap_or_else(|e| {
            tracing::warn!(destination, "Activity lookup failed: {}", e);
            Vec::new()
        });

        tracing::debug!(destination, activities = activities.len(), "Destination enriched");
        DestinationInsight {
            summary,
            activities,
        }
    }
}

/// First `n` sentences of `text`, whitespace-normalized.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or end of text.
/// Abbreviations such as `St.` count as sentence ends.
fn first_sentences(text: &str, n: usize) -> String {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut end = normalized.len();
    let mut seen = 0;
    for (i, c) in normalized.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let next = normalized[i + c.len_utf8()..].chars().next();
            if next.is_none_or(char::is_whitespace) {
                seen += 1;
                if seen == n {
                    end = i + c.len_utf8();
                    break;
                }
            }
        }
    }
    normalized[..end].to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}
