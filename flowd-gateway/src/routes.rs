//! Axum route handlers for the flowd HTTP surface.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use flowd_core::{FlowDraft, FlowId};
use flowd_sandbox::ProgramRunner;
use flowd_store::{FlowAdded, FlowById, FlowDeleted, FlowList, FlowStore, FlowUpdated};

use crate::{config::GatewayConfig, error::GatewayError};

// ── Shared state ─────────────────────────────────────────────────────────────

/// Per-process service state; request handlers share it read-only.
pub struct AppState {
    pub store: FlowStore,
    pub runner: Arc<ProgramRunner>,
}

type Shared = Arc<AppState>;

// ── Request / response types ──────────────────────────────────────────────────

/// Body of `POST /flows/execute`.
#[derive(Debug, Deserialize)]
pub struct ExecuteBody {
    pub code: String,
}

/// Response of `POST /flows/execute`: the program's captured stdout.
#[derive(Debug, Serialize)]
pub struct ExecuteResponse {
    pub response: String,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router with the given state and CORS policy.
pub fn create_router(state: Shared, config: &GatewayConfig) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/flows", get(list_flows).post(create_flow))
        .route("/flows/execute", post(execute_flow))
        .route(
            "/flows/{id}",
            get(get_flow).put(update_flow).delete(delete_flow),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

/// Cross-origin policy from configuration. The method and header sets are
/// fixed; the allowed origins come from `FLOWD_CORS_ORIGINS`.
fn cors_layer(config: &GatewayConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    if config.cors_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(origins)
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /` — liveness probe.
pub async fn greeting() -> impl IntoResponse {
    "Hello World!"
}

/// `GET /flows` — read the list of flows.
///
/// # Errors
/// Returns [`GatewayError::Store`] if the store is unreachable or answers
/// out of protocol.
pub async fn list_flows(State(state): State<Shared>) -> Result<Json<FlowList>, GatewayError> {
    Ok(Json(state.store.list().await?))
}

/// `POST /flows` — create a new flow. The store assigns the id and reports
/// the record count.
///
/// # Errors
/// Returns [`GatewayError::Store`] on store failure. A malformed body is
/// rejected with 400 before this handler runs.
pub async fn create_flow(
    State(state): State<Shared>,
    Json(draft): Json<FlowDraft>,
) -> Result<Json<FlowAdded>, GatewayError> {
    Ok(Json(state.store.create(&draft).await?))
}

/// `POST /flows/execute` — run submitted program text in the sandbox and
/// return its captured stdout.
///
/// # Errors
/// Returns [`GatewayError::Sandbox`] when the interpreter cannot start,
/// the budget elapses, or the program reports failure.
pub async fn execute_flow(
    State(state): State<Shared>,
    Json(body): Json<ExecuteBody>,
) -> Result<Json<ExecuteResponse>, GatewayError> {
    tracing::debug!(
        code_bytes = body.code.len(),
        slots = state.runner.available_slots(),
        "execution requested"
    );
    let output = state.runner.execute(&body.code).await?;
    Ok(Json(ExecuteResponse { response: output.stdout }))
}

/// `GET /flows/{id}` — read a single flow by id. An unknown id passes the
/// store's `null` through unchanged.
///
/// # Errors
/// Returns [`GatewayError::Store`] on store failure.
pub async fn get_flow(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<FlowById>, GatewayError> {
    Ok(Json(state.store.get(&FlowId::new(id)).await?))
}

/// `PUT /flows/{id}` — replace a flow's title and content wholesale.
///
/// # Errors
/// Returns [`GatewayError::Store`] on store failure.
pub async fn update_flow(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(draft): Json<FlowDraft>,
) -> Result<Json<FlowUpdated>, GatewayError> {
    Ok(Json(state.store.update(&FlowId::new(id), &draft).await?))
}

/// `DELETE /flows/{id}` — delete a single flow by id. Deleting an unknown
/// id reports an empty deletion, not an error.
///
/// # Errors
/// Returns [`GatewayError::Store`] on store failure.
pub async fn delete_flow(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<FlowDeleted>, GatewayError> {
    Ok(Json(state.store.delete(&FlowId::new(id)).await?))
}
