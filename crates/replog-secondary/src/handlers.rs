use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use replog_core::{MessagesResponse, ReplicateRequest};

use crate::state::SecondaryState;

pub async fn replicate(
    State(state): State<SecondaryState>,
    Json(req): Json<ReplicateRequest>,
) -> StatusCode {
    state.block.block_if_needed().await;

    let inserted = state.log.insert(req.id, req.message);
    tracing::info!(id = req.id, inserted, "applied replicated message");

    StatusCode::OK
}

pub async fn messages(State(state): State<SecondaryState>) -> Json<MessagesResponse> {
    let messages = state.log.prefix().iter().map(|m| m.to_string()).collect();
    Json(MessagesResponse { messages })
}

pub async fn healthcheck(State(state): State<SecondaryState>) -> StatusCode {
    if state.block.is_waiting().await {
        StatusCode::NOT_ACCEPTABLE
    } else {
        StatusCode::OK
    }
}

#[cfg(feature = "test-endpoints")]
pub async fn clean(State(state): State<SecondaryState>) -> StatusCode {
    state.log.clear();
    StatusCode::OK
}

#[cfg(feature = "test-endpoints")]
#[derive(serde::Deserialize)]
pub struct SetBlockRequest {
    pub enable: bool,
}

#[cfg(feature = "test-endpoints")]
pub async fn replication_block(
    State(state): State<SecondaryState>,
    Json(req): Json<SetBlockRequest>,
) -> StatusCode {
    state.block.set_enabled(req.enable).await;
    StatusCode::OK
}
