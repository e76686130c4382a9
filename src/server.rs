//! HTTP surface: router construction and request handlers.
//!
//! Requests are routed by method only, on every path: GET returns the
//! static test page, POST runs a generation, and anything else is 405.
//! Each request is independent and stateless; the only shared state is the
//! injected inference backend.

use crate::inference::InferenceService;
use crate::models::{ErrorResponse, GenerateRequest};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Static test page served on GET. The contract with it is byte-identical
/// HTML; the page itself is an asset, not part of the core.
const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Clone)]
pub struct AppState {
    pub inference: Arc<dyn InferenceService>,
}

impl AppState {
    pub fn new(inference: Arc<dyn InferenceService>) -> Self {
        Self { inference }
    }
}

/// Request-boundary errors, each mapped to its own status code with a
/// fixed user-facing body. Causes are logged server-side, never surfaced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApiError {
    MissingPrompt,
    MalformedRequest,
    UpstreamFailure,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingPrompt => (StatusCode::BAD_REQUEST, "missing prompt"),
            ApiError::MalformedRequest => {
                (StatusCode::UNPROCESSABLE_ENTITY, "malformed request body")
            }
            ApiError::UpstreamFailure => (StatusCode::BAD_GATEWAY, "failed to generate image"),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Method-only dispatch on every path. HEAD is not special-cased: anything
/// other than GET and POST lands in the 405 branch.
async fn dispatch(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
    if method == Method::POST {
        generate(&state, body)
            .await
            .unwrap_or_else(|e| e.into_response())
    } else if method == Method::GET {
        index()
    } else {
        method_not_allowed()
    }
}

fn index() -> Response {
    Html(INDEX_HTML).into_response()
}

fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("method not allowed")),
    )
        .into_response()
}

async fn generate(state: &AppState, body: Bytes) -> Result<Response, ApiError> {
    let request: GenerateRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Rejected request with malformed body: {}", e);
        ApiError::MalformedRequest
    })?;

    let prompt = request.prompt().ok_or(ApiError::MissingPrompt)?;

    tracing::info!("Generating image for prompt ({} chars)", prompt.len());

    // Byte-transparent relay: the image is forwarded exactly as the
    // inference service produced it.
    let image = state.inference.generate_image(prompt).await.map_err(|e| {
        tracing::error!("Image generation failed: {}", e);
        ApiError::UpstreamFailure
    })?;

    tracing::info!("Generated image ({} bytes)", image.len());

    Ok(([(header::CONTENT_TYPE, "image/png")], image).into_response())
}
