//! Web UI: the embedded page and the JSON endpoints it drives.
//!
//! The page is dumb rendering; every decision lives in the core state
//! machine. Handlers enqueue messages and serve the current view model.

mod render;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use fitbeat_core::Msg;
use serde::{Deserialize, Serialize};

use super::app::SessionHost;

const INDEX_HTML: &str = include_str!("assets/index.html");
const APP_JS: &str = include_str!("assets/app.js");

#[derive(Clone)]
pub(crate) struct WebState {
    pub host: SessionHost,
}

pub(crate) fn build_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/static/app.js", get(serve_app_js))
        .route("/api/view", get(get_view))
        .route("/api/submit", post(post_submit))
        .route("/api/reset", post(post_reset))
        .route("/health", get(health_check))
        .with_state(state)
}

/// GET /
async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/app.js
async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}

/// GET /api/view — the page re-renders from this on a short interval.
async fn get_view(State(state): State<WebState>) -> Json<render::ViewDto> {
    Json(render::render(&state.host.view()))
}

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    description: String,
}

/// POST /api/submit — the state machine decides whether a session starts.
async fn post_submit(
    State(state): State<WebState>,
    Json(request): Json<SubmitRequest>,
) -> StatusCode {
    state
        .host
        .dispatch(Msg::DescriptionChanged(request.description));
    state.host.dispatch(Msg::SubmitClicked);
    StatusCode::ACCEPTED
}

/// POST /api/reset
async fn post_reset(State(state): State<WebState>) -> StatusCode {
    state.host.dispatch(Msg::ResetClicked);
    StatusCode::ACCEPTED
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
