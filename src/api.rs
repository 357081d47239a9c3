//! REST API server for the operations assistant
//!
//! Exposes the pipeline over HTTP.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt::Display;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::agent::Orchestrator;
use crate::error::OrchestrationError;

/// =============================
/// Request / Response Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TaskRequest {
    pub task: String,
}

/// Body of every non-2xx response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub timestamp: String,
}

fn error_response(status: StatusCode, detail: String) -> Response {
    let body = ErrorResponse {
        detail,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    (status, Json(body)).into_response()
}

fn processing_failed(cause: impl Display) -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Task processing failed: {}", cause),
    )
}

/// Converts a panic inside a handler into the usual `{detail}` 500
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(panic = %message, "Request handler panicked");
    processing_failed(message)
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub orchestrator: Arc<Orchestrator>,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "running",
        "service": "AI Operations Assistant",
        "agents": ["Planner", "Executor", "Verifier"],
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Task Endpoint
/// =============================

async fn process_task(State(state): State<ApiState>, Json(req): Json<TaskRequest>) -> Response {
    let task = req.task.trim();
    if task.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "task must not be empty".to_string(),
        );
    }

    info!("Received task: {}", task);

    match state.orchestrator.process_task(task).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e @ OrchestrationError::PlanningError(_)) => {
            error!(error = %e, "Task rejected at planning");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e) => {
            error!(error = %e, "Task processing failed");
            processing_failed(e)
        }
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(orchestrator: Arc<Orchestrator>) -> Router {
    let state = ApiState { orchestrator };

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/process", post(process_task))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(orchestrator: Arc<Orchestrator>, port: u16) -> crate::Result<()> {
    let router = create_router(orchestrator);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
