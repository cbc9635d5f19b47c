use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::AppState;

/// Builds the application router. Every route lives under `/api`.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/teams", get(handlers::get_teams))
        .route("/fantasy", get(handlers::get_fantasy))
        .route("/predictions", get(handlers::get_predictions))
        .route("/scorepredictions", get(handlers::get_score_predictions))
        .route("/riskpredictions", get(handlers::get_risk_predictions))
        .route("/health", get(handlers::health_check));

    Router::new()
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
