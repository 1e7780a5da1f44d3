#![allow(dead_code)]

//! Local stand-ins for the remote sites: a web page host, YouTube and the
//! chat completions API.

use std::collections::HashMap;

use axum::{
    extract::{Json, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url_summarizer::config::DefaultPipeline;
use url_summarizer::llm::GroqClient;
use url_summarizer::loader::{WebPageLoader, YoutubeLoader};
use url_summarizer::pipeline::Pipeline;

pub const GOOD_KEY: &str = "gsk_test_key";

pub const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Release notes</title><style>h1 { color: red; }</style></head>
  <body>
    <h1>Rust 2024</h1>
    <p>The edition ships today.</p>
    <script>track();</script>
  </body>
</html>"#;

pub const ARTICLE_TEXT: &str = "Rust 2024\nThe edition ships today.";

pub const TIMED_TEXT: &str = r#"<?xml version="1.0" encoding="utf-8" ?><transcript><text start="0.0" dur="1.2">Hello &amp;amp; welcome</text><text start="1.2" dur="2.0">to the show</text></transcript>"#;

pub const TRANSCRIPT_TEXT: &str = "Hello & welcome to the show";

/// Prompt the pipeline builds around `text` with the default template.
pub fn expected_prompt(text: &str) -> String {
    format!("\nProvide a summary of the following content:\nContent: {text}\n")
}

/// The fake model answers with the prompt it received, so tests can check
/// both the prompt and that the reply is shown untouched.
pub fn expected_summary(text: &str) -> String {
    format!("SUMMARY\n{}", expected_prompt(text))
}

pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Starts the fixture server and returns its base URL.
pub async fn spawn_fixture() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let router = Router::new()
        .route("/article", get(|| async { Html(ARTICLE_HTML) }))
        .route("/notes.txt", get(plain_text))
        .route("/report.pdf", get(pdf))
        .route("/blank", get(|| async { Html("<html><body>  </body></html>") }))
        .route("/watch", get(watch_page))
        .route("/api/timedtext", get(timed_text))
        .route("/openai/v1/chat/completions", post(chat_completions))
        .with_state(base.clone());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    base
}

/// Pipeline wired to the fixture server instead of the real services.
pub fn fixture_pipeline(base: &str) -> DefaultPipeline {
    let client = reqwest::Client::new();
    Pipeline::new(
        YoutubeLoader::new(client.clone()).with_base_url(base),
        WebPageLoader::new(client.clone()),
        GroqClient::new(client).with_base_url(format!("{base}/openai/v1")),
    )
}

async fn plain_text() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], "  Plain notes.\n\nSecond line.\n")
}

async fn pdf() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/pdf")], "%PDF-1.4")
}

async fn watch_page(
    State(base): State<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Html<String> {
    let video_id = query.get("v").cloned().unwrap_or_default();
    if video_id != "abc123" {
        return Html(
            r#"<html><script>var ytInitialPlayerResponse = {"playabilityStatus":{}};</script></html>"#
                .into(),
        );
    }

    Html(format!(
        r#"<html><script>var ytInitialPlayerResponse = {{"captions":{{"playerCaptionsTracklistRenderer":{{"captionTracks":[{{"baseUrl":"{base}/api/timedtext?v=abc123&lang=de","languageCode":"de"}},{{"baseUrl":"{base}/api/timedtext?v=abc123&lang=en","languageCode":"en","kind":"asr"}}]}}}}}};</script></html>"#
    ))
}

async fn timed_text(Query(query): Query<HashMap<String, String>>) -> Response {
    match query.get("lang").map(String::as_str) {
        Some("en") => ([(CONTENT_TYPE, "text/xml; charset=UTF-8")], TIMED_TEXT).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn chat_completions(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {GOOD_KEY}"))
        .unwrap_or(false);
    if !authorized {
        let error = json!({
            "error": { "message": "Invalid API Key", "type": "invalid_request_error" }
        });
        return (StatusCode::UNAUTHORIZED, Json(error)).into_response();
    }

    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
    let reply = json!({
        "id": "chatcmpl-test",
        "model": body["model"],
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": format!("SUMMARY\n{prompt}") },
            "finish_reason": "stop"
        }]
    });
    Json(reply).into_response()
}
