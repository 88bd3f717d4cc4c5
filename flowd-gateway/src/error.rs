//! Error types for the gateway crate and their HTTP mappings.
//!
//! Upstream detail goes to the log; response bodies carry a safe summary
//! plus whatever program output was captured before the failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flowd_sandbox::SandboxError;
use flowd_store::StoreError;
use serde_json::json;

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The flow store was unreachable or answered out of protocol.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Program execution failed in the sandbox layer.
    #[error("execution error: {0}")]
    Sandbox(#[from] SandboxError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::Store(e) => {
                tracing::error!(error = %e, "store request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({"error": "flow store unavailable"})),
                )
                    .into_response()
            }
            GatewayError::Sandbox(e) => sandbox_response(e),
        }
    }
}

fn sandbox_response(err: SandboxError) -> Response {
    match err {
        SandboxError::Timeout { budget_ms, stdout, stderr } => (
            StatusCode::GATEWAY_TIMEOUT,
            Json(json!({
                "error": format!("execution exceeded {budget_ms}ms budget"),
                "response": stdout,
                "stderr": stderr,
            })),
        )
            .into_response(),
        SandboxError::NonZeroExit { exit_code, stdout, stderr } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": format!("program exited with status {exit_code}"),
                "response": stdout,
                "stderr": stderr,
            })),
        )
            .into_response(),
        SandboxError::SpawnFailed(reason) => {
            tracing::error!(%reason, "interpreter failed to start");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "interpreter unavailable"})),
            )
                .into_response()
        }
        e => {
            tracing::error!(error = %e, "execution failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "execution failed"})),
            )
                .into_response()
        }
    }
}
