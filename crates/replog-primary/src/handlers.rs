use axum::extract::State;
use axum::Json;
use replog_core::{AppError, AppendRequest, MessagesResponse};
use tracing::info;

use crate::state::PrimaryState;

pub async fn append(
    State(state): State<PrimaryState>,
    Json(req): Json<AppendRequest>,
) -> Result<(), AppError> {
    if req.w > state.max_w {
        return Err(AppError::InvalidWriteConcern { w: req.w, max: state.max_w });
    }

    let message = state.log.append_raw(req.message);
    info!(id = message.id, w = req.w, "accepted append");

    // w is the total ack count including the primary's own write.
    let required_acks = (req.w.saturating_sub(1)) as usize;
    state.coordinator.replicate(&message, required_acks).await;

    Ok(())
}

pub async fn messages(State(state): State<PrimaryState>) -> Json<MessagesResponse> {
    let messages = state.log.prefix().iter().map(|s| s.to_string()).collect();
    Json(MessagesResponse { messages })
}

#[cfg(feature = "test-endpoints")]
pub async fn clean(State(state): State<PrimaryState>) {
    state.log.clear();
}
