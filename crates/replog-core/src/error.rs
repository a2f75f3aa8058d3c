use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ProblemDetails,
}

#[derive(Debug, Serialize)]
struct ProblemDetails {
    title: String,
}

/// Errors that can be automatically turned into an HTTP response. Invariant
/// violations (broken density, unknown secondary url, `w` above `N+1`) are
/// deliberately absent here — those are logic bugs and panic instead of
/// flowing through this type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("write concern {w} exceeds the maximum of {max}")]
    InvalidWriteConcern { w: u32, max: u32 },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::InvalidWriteConcern { .. } => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            error!(?status, message = %self, "request failed");
        }

        let body = Json(ErrorBody {
            error: ProblemDetails { title: self.to_string() },
        });
        (status, body).into_response()
    }
}
