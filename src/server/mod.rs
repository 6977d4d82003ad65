//! REST Facade
//!
//! Thin HTTP layer over the search engine: request validation, response
//! envelopes, and the derived presentation fields (article URLs, numbered
//! steps, transition types). The engine itself never errors; this layer
//! turns empty paths into 404s and malformed input into 400s.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use url::Url;

use crate::constants::languages;
use crate::search::{SearchEngine, SearchOutcome};
use crate::types::{Result, WikiError, WikiNode};

// =============================================================================
// Wire Types
// =============================================================================

/// Body of `POST /api/v1/search`. Absent fields decode as empty strings
/// and fail parameter validation, not JSON parsing.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub lang: Option<String>,
}

/// Query string of `GET /api/v1/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

/// One numbered node of the returned path.
#[derive(Debug, Serialize)]
pub struct PathStep {
    pub step: usize,
    pub title: String,
    pub lang: String,
    pub url: String,
    pub full_name: String,
}

/// How to get from one path node to the next. Advisory: the backward half
/// of the search traverses incoming links, so the edge may only exist in
/// the reverse direction on the live wiki.
#[derive(Debug, Serialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub check_url: String,
}

#[derive(Debug, Serialize)]
pub struct SearchStats {
    pub duration: String,
    pub duration_ms: f64,
    pub request_count: u64,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub from: String,
    pub to: String,
    pub path_length: usize,
    pub path: Vec<PathStep>,
    pub transitions: Vec<Transition>,
    pub stats: SearchStats,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: String,
}

// =============================================================================
// Presentation Helpers
// =============================================================================

/// Browser URL of an article, percent-encoded but with `/` preserved
/// (subpage titles stay readable).
pub fn article_url(lang: &str, title: &str) -> String {
    let base = format!("https://{}.wikipedia.org/", lang);
    match Url::parse(&base) {
        Ok(mut url) => {
            url.set_path(&format!("wiki/{}", title));
            url.to_string()
        }
        Err(_) => format!("{}wiki/{}", base, title),
    }
}

/// Per-edge transitions for a path.
pub fn transitions(path: &[WikiNode]) -> Vec<Transition> {
    path.windows(2)
        .map(|pair| {
            let (from, to) = (&pair[0], &pair[1]);
            let (kind, description) = if from.lang == to.lang {
                (
                    "link",
                    format!("Find '{}' in the article '{}'", to.title, from.title),
                )
            } else {
                (
                    "interwiki",
                    format!("Switch to the {} edition via the languages menu", to.lang),
                )
            };
            Transition {
                from: from.title.clone(),
                to: to.title.clone(),
                kind: kind.to_string(),
                description,
                check_url: article_url(&from.lang, &from.title),
            }
        })
        .collect()
}

fn build_response(from: String, to: String, outcome: SearchOutcome) -> SearchResponse {
    let path: Vec<PathStep> = outcome
        .path
        .iter()
        .enumerate()
        .map(|(i, node)| PathStep {
            step: i + 1,
            title: node.title.clone(),
            lang: node.lang.clone(),
            url: article_url(&node.lang, &node.title),
            full_name: node.full_name(),
        })
        .collect();

    SearchResponse {
        success: true,
        from,
        to,
        path_length: outcome.path.len(),
        transitions: transitions(&outcome.path),
        path,
        stats: SearchStats {
            duration: format!("{:?}", outcome.duration),
            duration_ms: outcome.duration.as_secs_f64() * 1000.0,
            request_count: outcome.request_count,
        },
    }
}

fn error_response(status: StatusCode, error: &str, code: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: error.to_string(),
            code: code.to_string(),
        }),
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Clone)]
struct AppState {
    engine: Arc<SearchEngine>,
}

async fn run_search(state: &AppState, from: String, to: String, lang: Option<String>) -> Response {
    if from.is_empty() || to.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "both 'from' and 'to' are required",
            "MISSING_PARAMS",
        );
    }

    let lang = lang.unwrap_or_else(|| languages::DEFAULT.to_string());
    let outcome = state.engine.search(&from, &to, &lang).await;

    if !outcome.is_found() {
        return error_response(StatusCode::NOT_FOUND, "no path found", "PATH_NOT_FOUND");
    }

    Json(build_response(from, to, outcome)).into_response()
}

async fn search_get(State(state): State<AppState>, Query(params): Query<SearchQuery>) -> Response {
    run_search(
        &state,
        params.from.unwrap_or_default(),
        params.to.unwrap_or_default(),
        params.lang,
    )
    .await
}

async fn search_post(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("invalid request body: {}", rejection.body_text()),
                "INVALID_REQUEST",
            );
        }
    };
    run_search(&state, request.from, request.to, request.lang).await
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "WikiRacer API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// =============================================================================
// Router / Serve
// =============================================================================

/// Build the application router.
pub fn router(engine: Arc<SearchEngine>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/search", get(search_get).post(search_post))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { engine })
}

/// Bind and serve until the process is stopped.
pub async fn serve(engine: Arc<SearchEngine>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| WikiError::Server(format!("failed to bind {}: {}", addr, e)))?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, router(engine))
        .await
        .map_err(|e| WikiError::Server(e.to_string()))?;
    Ok(())
}
