//! Response bodies. Field selection and renaming only.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::sync::Arc;

use crate::cache::CacheStatus;
use crate::error::AppError;
use crate::models::{Document, PredictionGroup};

/// Failure body shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct FantasyBody {
    pub fantasy_data: Arc<Document>,
}

#[derive(Debug, Serialize)]
pub struct PredictionsBody {
    pub predictions_data: Arc<Vec<PredictionGroup>>,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub cache: Vec<CacheStatus>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
