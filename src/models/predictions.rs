use chrono::{NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::datetime::match_datetime;

/// Predicted scoreline as persisted by the prediction model.
///
/// Both legs are optional on the wire so a record with a missing leg can be
/// reported as malformed instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedScore {
    #[serde(rename = "homeGoals", default)]
    pub home_goals: Option<f64>,
    #[serde(rename = "awayGoals", default)]
    pub away_goals: Option<f64>,
}

impl PredictedScore {
    pub fn new(home_goals: f64, away_goals: f64) -> Self {
        Self {
            home_goals: Some(home_goals),
            away_goals: Some(away_goals),
        }
    }
}

/// Final score of a played match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualScore {
    #[serde(rename = "homeGoals", deserialize_with = "whole_goals")]
    pub home_goals: i64,
    #[serde(rename = "awayGoals", deserialize_with = "whole_goals")]
    pub away_goals: i64,
}

/// Largest float that still converts to an exact integer
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Accepts integer goals and integral floats such as `2.0`; rejects `1.5`.
fn whole_goals<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_i64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|goals| goals.fract() == 0.0 && goals.abs() <= MAX_EXACT_FLOAT)
                .map(|goals| goals as i64)
        })
        .ok_or_else(|| de::Error::custom(format!("expected a whole number of goals, got {number}")))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(with = "match_datetime")]
    pub datetime: NaiveDateTime,
    pub home: String,
    pub away: String,
    #[serde(default)]
    pub prediction: Option<PredictedScore>,
    #[serde(default)]
    pub actual: Option<ActualScore>,
}

impl PredictionRecord {
    /// Builds the `"<home> vs <away>"` key shared with the persisted row.
    pub fn composite_id(home: &str, away: &str) -> String {
        format!("{home} vs {away}")
    }

    /// Calendar date used to bucket the record into a [`PredictionGroup`]
    pub fn group_key(&self) -> NaiveDate {
        self.datetime.date()
    }
}

/// Predictions for a single match day, in store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionGroup {
    #[serde(rename = "_id")]
    pub date: NaiveDate,
    pub predictions: Vec<PredictionRecord>,
}
