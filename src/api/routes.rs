use axum::{
    routing::{get, post},
    Router,
    extract::{Form, Json, State},
    response::{Html, IntoResponse},
};
use tower_http::cors::{CorsLayer, Any};
use chrono::Utc;
use std::time::Instant;

use crate::error::Result;
use crate::api::models::{SummarizeRequest, SummarizeResponse};
use crate::api::{page, response};
use crate::presenter::{run_action, ViewState};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/api/summarize", post(summarize_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    Router::new()
        .route("/", get(index_handler).post(page_action_handler))
        .merge(api)
        .with_state(app_state)
}

async fn index_handler() -> Html<String> {
    Html(page::render(&ViewState::Idle, ""))
}

async fn page_action_handler(
    State(state): State<AppState>,
    Form(req): Form<SummarizeRequest>,
) -> Html<String> {
    let start = Instant::now();
    let view = run_action(&*state.pipeline, &req.api_key, &req.url).await;

    match &view {
        ViewState::SummaryDisplayed(result) => {
            tracing::info!(
                url = %req.url,
                strategy = %result.strategy,
                elapsed = ?start.elapsed(),
                "Summary displayed"
            );
        }
        ViewState::ErrorDisplayed(message) => {
            tracing::warn!(
                url = %req.url,
                error = %message,
                elapsed = ?start.elapsed(),
                "Error displayed"
            );
        }
        _ => {}
    }

    Html(page::render(&view, &req.url))
}

async fn summarize_handler(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<impl IntoResponse> {
    let start = Instant::now();

    let result = state
        .pipeline
        .summarize_action(&req.api_key, &req.url)
        .await
        .inspect_err(|e| {
            tracing::warn!(
                url = %req.url,
                error = %e,
                elapsed = ?start.elapsed(),
                "Summarize request failed"
            )
        })?;

    tracing::info!(
        url = %req.url,
        strategy = %result.strategy,
        elapsed = ?start.elapsed(),
        "Summarize request completed"
    );

    Ok(response::success(SummarizeResponse {
        url: req.url,
        summary: result.summary,
        strategy: result.strategy,
        word_count: result.word_count,
        summarized_at: Utc::now(),
    }))
}
