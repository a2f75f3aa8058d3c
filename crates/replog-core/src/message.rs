use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An immutable record in the log. Two records are equal iff their ids are
/// equal — payload equality follows from the at-most-once apply invariant.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: u32,
    pub payload: Arc<str>,
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Message {}

/// Wire format for `POST /api/v1/internal/replicate`: `{"id":<u32>,"message":<string>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicateRequest {
    pub id: u32,
    pub message: String,
}

impl From<&Message> for ReplicateRequest {
    fn from(m: &Message) -> Self {
        ReplicateRequest {
            id: m.id,
            message: m.payload.to_string(),
        }
    }
}

/// Body of `POST /api/v1/append`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppendRequest {
    pub message: String,
    pub w: u32,
}

/// Shared response shape for `GET /api/v1/messages` on either role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<String>,
}
