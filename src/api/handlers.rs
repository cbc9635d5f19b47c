use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::{error, info};

use super::responses::{FantasyBody, HealthBody, PredictionsBody};
use super::state::AppState;
use crate::classifier::{Scheme, classify_groups};
use crate::error::AppError;
use crate::models::{Document, OutcomeGroup};

/// GET /api/teams
pub async fn get_teams(State(state): State<AppState>) -> Result<Json<Arc<Document>>, AppError> {
    let season = state.season;
    let provider = Arc::clone(&state.provider);
    let teams = state
        .cache
        .get_or_fetch(state.cache.teams(), move || async move {
            provider.fetch_teams(season).await
        })
        .await
        .inspect_err(|e| error!("Failed to serve team data for season {season}: {e}"))?;

    Ok(Json(teams))
}

/// GET /api/fantasy
pub async fn get_fantasy(State(state): State<AppState>) -> Result<Json<FantasyBody>, AppError> {
    let provider = Arc::clone(&state.provider);
    let fantasy_data = state
        .cache
        .get_or_fetch(state.cache.fantasy(), move || async move {
            provider.fetch_fantasy().await
        })
        .await
        .inspect_err(|e| error!("Failed to serve fantasy data: {e}"))?;

    Ok(Json(FantasyBody { fantasy_data }))
}

/// GET /api/predictions
pub async fn get_predictions(
    State(state): State<AppState>,
) -> Result<Json<PredictionsBody>, AppError> {
    let provider = Arc::clone(&state.provider);
    let predictions_data = state
        .cache
        .get_or_fetch(state.cache.predictions(), move || async move {
            provider.fetch_predictions().await
        })
        .await
        .inspect_err(|e| error!("Failed to serve predictions: {e}"))?;

    Ok(Json(PredictionsBody { predictions_data }))
}

/// Fetches predictions straight from the provider and labels them.
/// Classified views are never cached.
async fn classified(state: &AppState, scheme: Scheme) -> Result<Vec<OutcomeGroup>, AppError> {
    let groups = state
        .provider
        .fetch_predictions()
        .await
        .inspect_err(|e| error!("Failed to fetch predictions for {scheme} view: {e}"))?;

    let outcomes = classify_groups(&groups, scheme).map_err(|e| {
        error!("Rejected {scheme} view: {e}");
        AppError::from(e)
    })?;

    info!("Served {} {} outcome groups", outcomes.len(), scheme);
    Ok(outcomes)
}

/// GET /api/scorepredictions
pub async fn get_score_predictions(
    State(state): State<AppState>,
) -> Result<Json<Vec<OutcomeGroup>>, AppError> {
    classified(&state, Scheme::Score).await.map(Json)
}

/// GET /api/riskpredictions
pub async fn get_risk_predictions(
    State(state): State<AppState>,
) -> Result<Json<Vec<OutcomeGroup>>, AppError> {
    classified(&state, Scheme::Risk).await.map(Json)
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        cache: state.cache.statuses().await,
    })
}
