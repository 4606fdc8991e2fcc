use crate::error::AppResult;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use server::model::Entry;
use server::queue_manager::{ActionOutcome, JoinReceipt, QueueManager, QueueStatus};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub name: String,
    pub phone: String,
    pub service_type: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

async fn join_queue(
    State(manager): State<Arc<QueueManager>>,
    Json(request): Json<JoinRequest>,
) -> AppResult<Json<JoinReceipt>> {
    let receipt = manager
        .join(request.name, request.phone, request.service_type)
        .await?;
    Ok(Json(receipt))
}

async fn queue_status(
    State(manager): State<Arc<QueueManager>>,
    Path(token): Path<String>,
) -> AppResult<Json<QueueStatus>> {
    Ok(Json(manager.status(token).await?))
}

async fn queue_list(State(manager): State<Arc<QueueManager>>) -> AppResult<Json<Vec<Entry>>> {
    Ok(Json(manager.list_all().await?))
}

async fn leave_queue(
    State(manager): State<Arc<QueueManager>>,
    Path(token): Path<String>,
) -> AppResult<Json<DetailResponse>> {
    manager.leave(token).await?;
    Ok(Json(DetailResponse {
        detail: "Left the queue".to_string(),
    }))
}

async fn serve_token(
    State(manager): State<Arc<QueueManager>>,
    Json(request): Json<TokenRequest>,
) -> AppResult<Json<ActionOutcome>> {
    Ok(Json(manager.serve(request.token).await?))
}

async fn skip_token(
    State(manager): State<Arc<QueueManager>>,
    Json(request): Json<TokenRequest>,
) -> AppResult<Json<ActionOutcome>> {
    Ok(Json(manager.skip(request.token).await?))
}

async fn resume_token(
    State(manager): State<Arc<QueueManager>>,
    Json(request): Json<TokenRequest>,
) -> AppResult<Json<ActionOutcome>> {
    Ok(Json(manager.resume(request.token).await?))
}

async fn health(State(manager): State<Arc<QueueManager>>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status) = if manager.is_store_available().await {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };
    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            store: manager.store_backend().to_string(),
            last_error: manager.get_last_error().await,
        }),
    )
}

/// Create the queue routes
pub fn create_routes(manager: Arc<QueueManager>, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/queue/join", post(join_queue))
        .route("/queue/status/:token", get(queue_status))
        .route("/queue/list", get(queue_list))
        .route("/queue/leave/:token", delete(leave_queue))
        .route("/queue/serve", post(serve_token))
        .route("/queue/skip", post(skip_token))
        .route("/queue/resume", post(resume_token))
        .route("/health", get(health))
        .with_state(manager);

    if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
