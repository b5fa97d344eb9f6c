//! JSON route handlers.

use crate::error::UpstreamError;
use crate::model::query::SearchQuery;
use crate::server::server::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{error, warn};

/// Wrapper turning any upstream failure into the JSON error envelope.
/// Every failure is a 500: the proxy never partially succeeds.
pub struct ApiError(pub UpstreamError);

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": self.0.to_string() })),
        )
            .into_response()
    }
}

/// GET / — service documentation.
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "Legislatie.just.ro API Proxy",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/health": "GET - service and upstream status",
            "/token": "GET - obtain a token (cached)",
            "/search": "GET - search the legislation",
            "/codes": "GET - the principal Romanian legal codes",
        },
        "search_params": {
            "title": "act title (ex: Codul civil)",
            "year": "year (ex: 2009)",
            "number": "act number (ex: 287)",
            "text": "full-text query",
            "page": "page number (default: 0)",
            "per_page": "results per page (default: 10, max: 100)",
        },
    }))
}

/// GET /health — upstream reachability probe.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.client.probe().await {
        Ok(()) => Json(json!({
            "status": "healthy",
            "soap_service": "connected",
            "timestamp": Utc::now().to_rfc3339(),
        }))
        .into_response(),
        Err(err) => {
            warn!("health probe failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "unhealthy",
                    "error": err.to_string(),
                    "timestamp": Utc::now().to_rfc3339(),
                })),
            )
                .into_response()
        }
    }
}

/// GET /token — current token, fetching if needed.
pub async fn token(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let (token, cached) = state.tokens.get(&state.client).await?;
    Ok(Json(json!({
        "success": true,
        "token": token,
        "cached": cached,
    })))
}

/// GET /search — the main search endpoint.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let query = SearchQuery::from_raw(&params);
    let outcome = state.executor.search(&query).await?;
    Ok(Json(json!({
        "success": true,
        "total": outcome.results.len(),
        "page": outcome.query.page,
        "per_page": outcome.query.per_page,
        "filters_applied": {
            "title": outcome.query.title,
            "year": outcome.query.year,
            "number": outcome.query.number,
            "text": outcome.query.text,
        },
        "results": outcome.results,
    })))
}

/// The principal codes looked up by /codes.
const MAIN_CODES: &[(&str, Option<&str>)] = &[
    ("Codul civil", Some("2009")),
    ("Codul penal", Some("2009")),
    ("Codul de procedură civilă", Some("2010")),
    ("Codul de procedură penală", Some("2010")),
    ("Codul muncii", Some("2003")),
    ("Codul fiscal", Some("2015")),
    ("Constituția României", None),
];

/// GET /codes — one lookup per principal code. A code that fails or
/// matches nothing is skipped, not fatal.
pub async fn codes(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let mut found = Vec::new();
    for (name, year) in MAIN_CODES {
        let query = SearchQuery {
            per_page: 1,
            title: Some((*name).to_owned()),
            year: year.map(str::to_owned),
            ..Default::default()
        };
        match state.executor.search(&query).await {
            Ok(outcome) => {
                if let Some(lege) = outcome.results.into_iter().next() {
                    found.push(json!({ "code_name": name, "details": lege }));
                }
            }
            Err(err) => warn!("code lookup '{name}' failed: {err}"),
        }
    }
    Ok(Json(json!({
        "success": true,
        "total": found.len(),
        "codes": found,
    })))
}

/// GET /document/{id} — canonical detail-page URL for an act.
pub async fn document(Path(doc_id): Path<String>) -> Json<Value> {
    Json(json!({
        "success": true,
        "url": format!("https://legislatie.just.ro/Public/DetaliiDocument/{doc_id}"),
        "note": "full document retrieval is not proxied; use the URL directly",
    }))
}
