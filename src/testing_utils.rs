use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::AppError;
use crate::models::{ActualScore, Document, PredictedScore, PredictionGroup, PredictionRecord, parse_match_datetime};
use crate::provider::{DataProvider, group_by_match_date};

/// Test utilities for creating mock data and testing scenarios
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a prediction record with no recorded result.
    ///
    /// Panics if `datetime` cannot be parsed.
    pub fn prediction(
        home: &str,
        away: &str,
        datetime: &str,
        home_goals: f64,
        away_goals: f64,
    ) -> PredictionRecord {
        PredictionRecord {
            id: PredictionRecord::composite_id(home, away),
            datetime: parse_match_datetime(datetime).expect("test datetime should parse"),
            home: home.to_string(),
            away: away.to_string(),
            prediction: Some(PredictedScore::new(home_goals, away_goals)),
            actual: None,
        }
    }

    /// Creates a prediction record that already has a final score
    pub fn played_prediction(
        home: &str,
        away: &str,
        datetime: &str,
        predicted: (f64, f64),
        actual: (i64, i64),
    ) -> PredictionRecord {
        PredictionRecord {
            actual: Some(ActualScore {
                home_goals: actual.0,
                away_goals: actual.1,
            }),
            ..Self::prediction(home, away, datetime, predicted.0, predicted.1)
        }
    }

    /// Three match days of varying size, covering every classifier branch
    pub fn matchweek_groups() -> Vec<PredictionGroup> {
        group_by_match_date(vec![
            Self::played_prediction("BUR", "MCI", "2023-08-11T19:00:00", (0.6, 2.4), (0, 3)),
            Self::prediction("ARS", "NFO", "2023-08-12T11:30:00", 2.0, 0.0),
            Self::prediction("BOU", "WHU", "2023-08-12T14:00:00", 1.0, 1.0),
            Self::prediction("EVE", "FUL", "2023-08-12T14:00:00", 0.0, 1.0),
            Self::prediction("SHU", "CRY", "2023-08-12T14:00:00", 0.0, 0.0),
            Self::prediction("BRE", "TOT", "2023-08-13T13:00:00", 1.0, 1.6),
            Self::prediction("CHE", "LIV", "2023-08-13T15:30:00", 2.0, 1.0),
        ])
    }

    pub fn team_document(season: i32) -> Document {
        json!({
            "_id": season,
            "teams": [
                {"name": "Arsenal", "initials": "ARS"},
                {"name": "Chelsea", "initials": "CHE"}
            ]
        })
    }

    pub fn fantasy_document() -> Document {
        json!({
            "_id": "fantasy",
            "players": [
                {"name": "Saka", "team": "ARS", "points": 8.4},
                {"name": "Salah", "team": "LIV", "points": 9.1}
            ]
        })
    }
}

/// In-memory [`DataProvider`] with per-method call counters and failure toggles.
pub struct MockDataProvider {
    teams: Mutex<Document>,
    fantasy: Mutex<Document>,
    predictions: Mutex<Vec<PredictionGroup>>,
    fail_teams: AtomicBool,
    fail_fantasy: AtomicBool,
    fail_predictions: AtomicBool,
    teams_calls: AtomicUsize,
    fantasy_calls: AtomicUsize,
    predictions_calls: AtomicUsize,
}

impl Default for MockDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDataProvider {
    pub fn new() -> Self {
        Self {
            teams: Mutex::new(TestDataBuilder::team_document(2023)),
            fantasy: Mutex::new(TestDataBuilder::fantasy_document()),
            predictions: Mutex::new(TestDataBuilder::matchweek_groups()),
            fail_teams: AtomicBool::new(false),
            fail_fantasy: AtomicBool::new(false),
            fail_predictions: AtomicBool::new(false),
            teams_calls: AtomicUsize::new(0),
            fantasy_calls: AtomicUsize::new(0),
            predictions_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_teams(&self, document: Document) {
        *self.teams.lock().unwrap_or_else(|p| p.into_inner()) = document;
    }

    pub fn set_fantasy(&self, document: Document) {
        *self.fantasy.lock().unwrap_or_else(|p| p.into_inner()) = document;
    }

    pub fn set_predictions(&self, groups: Vec<PredictionGroup>) {
        *self.predictions.lock().unwrap_or_else(|p| p.into_inner()) = groups;
    }

    pub fn fail_teams(&self, fail: bool) {
        self.fail_teams.store(fail, Ordering::SeqCst);
    }

    pub fn fail_fantasy(&self, fail: bool) {
        self.fail_fantasy.store(fail, Ordering::SeqCst);
    }

    pub fn fail_predictions(&self, fail: bool) {
        self.fail_predictions.store(fail, Ordering::SeqCst);
    }

    pub fn teams_calls(&self) -> usize {
        self.teams_calls.load(Ordering::SeqCst)
    }

    pub fn fantasy_calls(&self) -> usize {
        self.fantasy_calls.load(Ordering::SeqCst)
    }

    pub fn predictions_calls(&self) -> usize {
        self.predictions_calls.load(Ordering::SeqCst)
    }

    fn unavailable(path: &str) -> AppError {
        AppError::store_service_unavailable(503, "Service Unavailable", format!("mock://{path}"))
    }
}

#[async_trait]
impl DataProvider for MockDataProvider {
    async fn fetch_teams(&self, season: i32) -> Result<Document, AppError> {
        self.teams_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_teams.load(Ordering::SeqCst) {
            return Err(Self::unavailable(&format!("team-data/{season}")));
        }
        Ok(self.teams.lock().unwrap_or_else(|p| p.into_inner()).clone())
    }

    async fn fetch_fantasy(&self) -> Result<Document, AppError> {
        self.fantasy_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fantasy.load(Ordering::SeqCst) {
            return Err(Self::unavailable("fantasy"));
        }
        Ok(self.fantasy.lock().unwrap_or_else(|p| p.into_inner()).clone())
    }

    async fn fetch_predictions(&self) -> Result<Vec<PredictionGroup>, AppError> {
        self.predictions_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_predictions.load(Ordering::SeqCst) {
            return Err(Self::unavailable("predictions"));
        }
        Ok(self
            .predictions
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone())
    }
}
