//! Builds store-shaped prediction records from model output.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::models::datetime::match_datetime;
use crate::models::{ActualScore, PredictedScore, PredictionRecord};

/// Model output for one upcoming fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingPrediction {
    #[serde(with = "match_datetime")]
    pub date: NaiveDateTime,
    #[serde(rename = "homeInitials")]
    pub home_initials: String,
    #[serde(rename = "awayInitials")]
    pub away_initials: String,
    pub prediction: PredictedScore,
}

/// Recorded results keyed by `"<home> vs <away>"`
pub type ActualScores = HashMap<String, ActualScore>;

/// Joins predictions with any recorded result for the same fixture.
///
/// Model output is produced per team, so each fixture usually shows up twice.
/// The record keeps the position of its first occurrence and the data of its
/// last, matching an upsert keyed on the composite id.
pub fn build_prediction_records<I>(predictions: I, actual_scores: &ActualScores) -> Vec<PredictionRecord>
where
    I: IntoIterator<Item = UpcomingPrediction>,
{
    let mut records: Vec<PredictionRecord> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for upcoming in predictions {
        let id = PredictionRecord::composite_id(&upcoming.home_initials, &upcoming.away_initials);
        let record = PredictionRecord {
            actual: actual_scores.get(&id).copied(),
            id: id.clone(),
            datetime: upcoming.date,
            home: upcoming.home_initials,
            away: upcoming.away_initials,
            prediction: Some(upcoming.prediction),
        };

        match positions.get(&id) {
            Some(&position) => records[position] = record,
            None => {
                positions.insert(id, records.len());
                records.push(record);
            }
        }
    }

    debug!("Built {} prediction records", records.len());
    records
}

/// Sets `actual` on records that have none and whose fixture has a recorded
/// result. Records that already carry a result are left alone. Returns the
/// number of records updated.
pub fn fill_missing_actual_scores(records: &mut [PredictionRecord], actual_scores: &ActualScores) -> usize {
    let mut updated = 0;

    for record in records.iter_mut().filter(|r| r.actual.is_none()) {
        if let Some(actual) = actual_scores.get(&record.id) {
            record.actual = Some(*actual);
            updated += 1;
        }
    }

    debug!("Back-filled actual scores on {updated} records");
    updated
}
