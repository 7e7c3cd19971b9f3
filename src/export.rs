//! Itinerary export: the downloadable copy of a finished trip.
//!
//! An export directory holds, per trip:
//! - `<slug>-itinerary.md`: the rendered itinerary
//! - `<slug>-profile.json`: the flat trip profile

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::ExportError;
use crate::planner::{ItineraryDocument, TripProfile};

/// Snapshot of a finished trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripExport {
    pub title: String,
    pub profile: TripProfile,
    pub itinerary: String,
    pub exported_at: DateTime<Utc>,
}

impl TripExport {
    pub fn new(profile: TripProfile, itinerary: &ItineraryDocument) -> Self {
        Self {
            title: itinerary.title.clone(),
            profile,
            itinerary: itinerary.text.clone(),
            exported_at: Utc::now(),
        }
    }

    /// File-name stem derived from the title, e.g. `paris-travel-itinerary-5-days`.
    pub fn slug(&self) -> String {
        let slug = self
            .title
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        if slug.is_empty() {
            "trip".to_string()
        } else {
            slug
        }
    }
}

/// Paths written by [`write_export`].
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub itinerary: PathBuf,
    pub profile: PathBuf,
}

/// Write the itinerary and profile into `dir`, creating it if needed.
/// Existing files for the same trip are overwritten.
pub async fn write_export(dir: &Path, export: &TripExport) -> Result<ExportPaths, ExportError> {
    fs::create_dir_all(dir).await?;

    let slug = export.slug();
    let paths = ExportPaths {
        itinerary: dir.join(format!("{slug}-itinerary.md")),
        profile: dir.join(format!("{slug}-profile.json")),
    };

    let profile_json = serde_json::to_string_pretty(&export.profile)?;
    fs::write(&paths.itinerary, &export.itinerary).await?;
    fs::write(&paths.profile, profile_json).await?;

    tracing::info!(
        itinerary = %paths.itinerary.display(),
        profile = %paths.profile.display(),
        "Trip exported"
    );
    Ok(paths)
}
