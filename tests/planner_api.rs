//! Integration tests for the planner REST API.
//!
//! Each test spins up an Axum server on a random port and exercises the real
//! JSON contract with reqwest.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use trip_assist::enrich::{DestinationEnricher, DestinationInsight};
use trip_assist::planner::{EngineOptions, PlannerRouteState, planner_routes};
use trip_assist::session::SessionStore;

const PARIS_ANSWERS: [&str; 12] = [
    "Paris",
    "5",
    "July 1-5",
    "Boston",
    "medium",
    "vacation",
    "culture",
    "vegetarian",
    "museums",
    "low",
    "hotel",
    "Eiffel Tower",
];

/// Enricher returning canned text (no network).
struct StubEnricher;

#[async_trait]
impl DestinationEnricher for StubEnricher {
    async fn lookup(&self, destination: &str) -> DestinationInsight {
        DestinationInsight {
            summary: format!("{destination} is lovely in summer."),
            activities: vec!["Picnic by the river".to_string()],
        }
    }
}

/// Start an Axum server on a random port, return its base URL.
async fn start_server(enricher: Option<Arc<dyn DestinationEnricher>>) -> String {
    let state = PlannerRouteState {
        sessions: SessionStore::new(EngineOptions::default()),
        enricher,
    };
    let app = planner_routes(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

async fn create_session(client: &reqwest::Client, base: &str) -> String {
    let resp = client
        .post(format!("{base}/api/sessions"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["message"],
        "Hello! I'm your travel planning assistant. Where would you like to go?"
    );
    body["session_id"].as_str().unwrap().to_string()
}

async fn say(client: &reqwest::Client, base: &str, id: &str, text: &str) -> Value {
    let resp = client
        .post(format!("{base}/api/sessions/{id}/messages"))
        .json(&json!({ "text": text }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn full_conversation_over_http() {
    let base = start_server(None).await;
    let client = reqwest::Client::new();
    let id = create_session(&client, &base).await;

    let first = say(&client, &base, &id, "Paris").await;
    assert_eq!(first["recorded"], "destination");
    assert_eq!(first["next"]["state"], "ask");
    assert_eq!(first["next"]["slot"], "duration");
    assert_eq!(first["message"], "How many days will you be in Paris?");

    let mut last = Value::Null;
    for answer in &PARIS_ANSWERS[1..] {
        last = say(&client, &base, &id, answer).await;
    }
    assert_eq!(last["next"]["state"], "complete");

    let status: Value = client
        .get(format!("{base}/api/sessions/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["complete"], true);
    assert_eq!(status["answered"], 12);
    assert!(status["pending_slot"].is_null());
    assert_eq!(status["profile"]["duration"], 5);
    assert_eq!(status["profile"]["preferences"], json!(["culture"]));
    assert_eq!(status["itinerary_generated"], false);

    let itinerary: Value = client
        .post(format!("{base}/api/sessions/{id}/itinerary"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(itinerary["title"], "Paris Travel Itinerary (5 days)");
    assert_eq!(itinerary["already_generated"], false);

    let again: Value = client
        .post(format!("{base}/api/sessions/{id}/itinerary"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(again["already_generated"], true);
    assert_eq!(again["text"], itinerary["text"]);

    let export: Value = client
        .get(format!("{base}/api/sessions/{id}/export"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(export["title"], "Paris Travel Itinerary (5 days)");
    assert_eq!(export["profile"]["must_see"], "Eiffel Tower");
    assert_eq!(export["itinerary"], itinerary["text"]);
}

#[tokio::test]
async fn itinerary_and_export_conflict_until_complete() {
    let base = start_server(None).await;
    let client = reqwest::Client::new();
    let id = create_session(&client, &base).await;
    say(&client, &base, &id, "Oslo").await;

    let resp = client
        .post(format!("{base}/api/sessions/{id}/itinerary"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["pending_slot"], "duration");

    let resp = client
        .get(format!("{base}/api/sessions/{id}/export"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn reset_returns_to_destination() {
    let base = start_server(None).await;
    let client = reqwest::Client::new();
    let id = create_session(&client, &base).await;
    for answer in PARIS_ANSWERS {
        say(&client, &base, &id, answer).await;
    }

    let body: Value = client
        .post(format!("{base}/api/sessions/{id}/reset"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "Hello! Where would you like to go?");

    let status: Value = client
        .get(format!("{base}/api/sessions/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["pending_slot"], "destination");
    assert_eq!(status["answered"], 0);
    assert_eq!(status["log"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn sessions_do_not_share_state() {
    let base = start_server(None).await;
    let client = reqwest::Client::new();
    let a = create_session(&client, &base).await;
    let b = create_session(&client, &base).await;

    say(&client, &base, &a, "Cairo").await;
    let reply = say(&client, &base, &b, "Hanoi").await;
    assert_eq!(reply["message"], "How many days will you be in Hanoi?");

    let status: Value = client
        .get(format!("{base}/api/sessions/{a}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["profile"]["destination"], "Cairo");
}

#[tokio::test]
async fn unknown_session_is_404() {
    let base = start_server(None).await;
    let client = reqwest::Client::new();
    let resp = client
        .get(format!(
            "{base}/api/sessions/00000000-0000-0000-0000-000000000000"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn deleted_session_is_gone() {
    let base = start_server(None).await;
    let client = reqwest::Client::new();
    let id = create_session(&client, &base).await;
    let other = create_session(&client, &base).await;
    say(&client, &base, &id, "Lisbon").await;

    let resp = client
        .delete(format!("{base}/api/sessions/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let resp = client
        .get(format!("{base}/api/sessions/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(format!("{base}/api/sessions/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .get(format!("{base}/api/sessions/{other}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn enrichment_is_embedded_in_itinerary() {
    let base = start_server(Some(Arc::new(StubEnricher))).await;
    let client = reqwest::Client::new();
    let id = create_session(&client, &base).await;
    for answer in PARIS_ANSWERS {
        say(&client, &base, &id, answer).await;
    }

    let itinerary: Value = client
        .post(format!("{base}/api/sessions/{id}/itinerary"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let text = itinerary["text"].as_str().unwrap();
    assert!(text.contains("## About Paris\nParis is lovely in summer."));
    assert!(text.contains("- Picnic by the river"));
}
