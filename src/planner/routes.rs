//! REST endpoints for driving trip-planning conversations.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::enrich::{DestinationEnricher, insight_for};
use crate::error::{ExportError, SessionError};
use crate::session::SessionStore;

use super::engine::{GenerateOutcome, LogEntry, Reply};
use super::profile::TripProfile;
use super::slots::SlotId;

/// Shared state for planner routes.
#[derive(Clone)]
pub struct PlannerRouteState {
    pub sessions: SessionStore,
    pub enricher: Option<Arc<dyn DestinationEnricher>>,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        error_response(StatusCode::NOT_FOUND, self.to_string())
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

#[derive(Debug, Serialize)]
struct CreatedSession {
    session_id: Uuid,
    message: String,
}

#[derive(Debug, Serialize)]
struct SessionStatus {
    session_id: Uuid,
    pending_slot: Option<SlotId>,
    complete: bool,
    answered: usize,
    profile: TripProfile,
    /// "Your Trip Details" lines for display.
    summary: Vec<String>,
    itinerary_generated: bool,
    log: Vec<LogEntry>,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    text: String,
}

#[derive(Debug, Serialize)]
struct ItineraryBody {
    title: String,
    text: String,
    already_generated: bool,
}

/// POST /api/sessions
async fn create_session(State(state): State<PlannerRouteState>) -> impl IntoResponse {
    let (session_id, message) = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(CreatedSession {
            session_id,
            message,
        }),
    )
}

/// GET /api/sessions/{id}
async fn get_session(
    State(state): State<PlannerRouteState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionStatus>, SessionError> {
    let convo = state.sessions.snapshot(id).await?;
    let profile = convo.profile().clone();
    Ok(Json(SessionStatus {
        session_id: id,
        pending_slot: convo.pending_slot(),
        complete: profile.is_complete(),
        answered: profile.answered_count(),
        summary: profile.summary_lines(),
        profile,
        itinerary_generated: convo.itinerary().is_some(),
        log: convo.log().to_vec(),
    }))
}

/// DELETE /api/sessions/{id}
async fn delete_session(
    State(state): State<PlannerRouteState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, SessionError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/sessions/{id}/messages
///
/// Takes the text as the answer to the pending slot and returns the next
/// prompt (or the completion notice).
async fn post_message(
    State(state): State<PlannerRouteState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MessageBody>,
) -> Result<Json<Reply>, SessionError> {
    let reply = state
        .sessions
        .with_session(id, |convo| convo.submit_utterance(&body.text))
        .await?;
    Ok(Json(reply))
}

/// POST /api/sessions/{id}/reset
async fn reset_session(
    State(state): State<PlannerRouteState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, SessionError> {
    let message = state.sessions.with_session(id, |convo| convo.reset()).await?;
    Ok(Json(serde_json::json!({ "message": message })))
}

/// POST /api/sessions/{id}/itinerary
///
/// Renders the itinerary once every slot is answered; 409 otherwise.
/// Enrichment runs outside the session lock.
async fn generate_itinerary(
    State(state): State<PlannerRouteState>,
    Path(id): Path<Uuid>,
) -> Result<Response, SessionError> {
    let convo = state.sessions.snapshot(id).await?;
    let insight = insight_for(state.enricher.as_deref(), &convo).await;

    let outcome = state
        .sessions
        .with_session(id, |convo| convo.generate_itinerary(insight.as_ref()))
        .await?;

    let response = match outcome {
        GenerateOutcome::Generated(doc) => Json(ItineraryBody {
            title: doc.title,
            text: doc.text,
            already_generated: false,
        })
        .into_response(),
        GenerateOutcome::AlreadyGenerated(doc) => Json(ItineraryBody {
            title: doc.title,
            text: doc.text,
            already_generated: true,
        })
        .into_response(),
        GenerateOutcome::Incomplete { pending } => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "error": "Trip details are incomplete",
                "pending_slot": pending,
            })),
        )
            .into_response(),
    };
    Ok(response)
}

/// GET /api/sessions/{id}/export
async fn export_session(
    State(state): State<PlannerRouteState>,
    Path(id): Path<Uuid>,
) -> Result<Response, SessionError> {
    let export = state.sessions.with_session(id, |convo| convo.export()).await?;
    Ok(match export {
        Ok(export) => Json(export).into_response(),
        Err(e @ ExportError::NotGenerated) => error_response(StatusCode::CONFLICT, e.to_string()),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    })
}

/// Build the planner REST routes.
pub fn planner_routes(state: PlannerRouteState) -> Router {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/sessions/{id}/messages", post(post_message))
        .route("/api/sessions/{id}/reset", post(reset_session))
        .route("/api/sessions/{id}/itinerary", post(generate_itinerary))
        .route("/api/sessions/{id}/export", get(export_session))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
