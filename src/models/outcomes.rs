use serde::{Deserialize, Serialize};

use super::predictions::ActualScore;

/// Flattened, labelled view of a single prediction. Only lives for the
/// duration of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub datetime: String,
    pub home: String,
    pub away: String,
    #[serde(rename = "totalGoals")]
    pub total_goals: f64,
    #[serde(rename = "outcome")]
    pub outcome_label: String,
    pub actual: Option<ActualScore>,
}

/// One match day's worth of outcome records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeGroup {
    pub predictions: Vec<OutcomeRecord>,
}
