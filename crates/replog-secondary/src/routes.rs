use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::SecondaryState;

pub fn app(state: SecondaryState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/api/v1/internal/replicate", post(handlers::replicate))
        .route("/api/v1/messages", get(handlers::messages))
        .route("/api/v1/healthcheck", get(handlers::healthcheck));

    #[cfg(feature = "test-endpoints")]
    let router = router
        .route("/api/test/clean", post(handlers::clean))
        .route("/api/test/replication_block", post(handlers::replication_block));

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
