use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::PrimaryState;

pub fn app(state: PrimaryState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new()
        .route("/api/v1/append", post(handlers::append))
        .route("/api/v1/messages", get(handlers::messages));

    #[cfg(feature = "test-endpoints")]
    let router = router.route("/api/test/clean", post(handlers::clean));

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
