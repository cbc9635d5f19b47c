//! Access to the backing document store.
//!
//! Handlers only see the [`DataProvider`] trait; [`HttpDocumentStore`] is the
//! production implementation.

pub mod fetch_utils;
pub mod grouping;
pub mod http_client;
pub mod http_store;
pub mod records;

pub use grouping::group_by_match_date;
pub use http_store::HttpDocumentStore;
pub use records::{ActualScores, UpcomingPrediction, build_prediction_records, fill_missing_actual_scores};

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Document, PredictionGroup};

/// Source of team, fantasy and prediction documents. Every call may fail;
/// timeouts are the implementation's responsibility.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Team data document for `season`
    async fn fetch_teams(&self, season: i32) -> Result<Document, AppError>;

    async fn fetch_fantasy(&self) -> Result<Document, AppError>;

    /// Predictions grouped by match date, in store order
    async fn fetch_predictions(&self) -> Result<Vec<PredictionGroup>, AppError>;
}
