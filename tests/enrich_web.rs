//! WebEnricher against a local stub of the summary and search endpoints.

use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;

use trip_assist::config::EnrichConfig;
use trip_assist::enrich::{DestinationEnricher, DestinationInsight, WebEnricher};

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
}

async fn summary(Path(title): Path<String>) -> impl IntoResponse {
    match title.as_str() {
        "New_York" => Json(serde_json::json!({
            "title": "New York",
            "extract": "New York is a city in the United States. It is very large. It has five boroughs."
        }))
        .into_response(),
        "Empty" => Json(serde_json::json!({ "title": "Empty" })).into_response(),
        "Bosnia/Herzegovina" | "Antigua_#2" | "Why?" => Json(serde_json::json!({
            "title": &title,
            "extract": format!("Page for {title}.")
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn search(Query(query): Query<SearchQuery>) -> Html<String> {
    if query.q.contains("Empty") {
        return Html("<html><body>No results.</body></html>".to_string());
    }
    Html(format!(
        r#"<html><body>
        <a class="result__a" href="/1">Walk the <b>High Line</b></a>
        <a class="result__a" href="/2">Central Park &amp; the Met</a>
        <a class="result__a" href="/3">{}</a>
        </body></html>"#,
        query.q
    ))
}

/// Start stub endpoints on a random port, return an enricher pointed at them.
async fn stub_enricher(max_activities: usize) -> WebEnricher {
    let app = Router::new()
        .route("/summary/{title}", get(summary))
        .route("/html/", get(search));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    WebEnricher::new(EnrichConfig {
        enabled: true,
        wikipedia_url: format!("http://127.0.0.1:{port}/summary"),
        search_url: format!("http://127.0.0.1:{port}/html/"),
        timeout: Duration::from_secs(2),
        max_activities,
    })
}

#[tokio::test]
async fn summary_and_activities_from_sources() {
    let enricher = stub_enricher(2).await;
    let insight = enricher.lookup("New York").await;
    assert_eq!(
        insight.summary,
        "New York is a city in the United States. It is very large."
    );
    assert_eq!(
        insight.activities,
        vec![
            "Walk the High Line".to_string(),
            "Central Park & the Met".to_string(),
        ]
    );
}

#[tokio::test]
async fn query_mentions_destination() {
    let enricher = stub_enricher(5).await;
    let insight = enricher.lookup("New York").await;
    assert_eq!(insight.activities.len(), 3);
    assert_eq!(insight.activities[2], "top things to do in New York");
}

#[tokio::test]
async fn missing_page_and_empty_results_fall_back() {
    let enricher = stub_enricher(5).await;
    let insight = enricher.lookup("Atlantis").await;
    assert_eq!(insight.summary, "No summary available for Atlantis.");
    assert_eq!(insight.activities.len(), 3);

    let empty = enricher.lookup("Empty").await;
    assert_eq!(empty, DestinationInsight::fallback("Empty"));
}

#[tokio::test]
async fn title_with_reserved_characters_stays_one_segment() {
    let enricher = stub_enricher(5).await;
    for (destination, expected) in [
        ("Bosnia/Herzegovina", "Page for Bosnia/Herzegovina."),
        ("Antigua #2", "Page for Antigua_#2."),
        ("Why?", "Page for Why?."),
    ] {
        let insight = enricher.lookup(destination).await;
        assert_eq!(insight.summary, expected, "destination {destination:?}");
    }
}
