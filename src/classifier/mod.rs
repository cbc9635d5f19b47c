//! Outcome classification of grouped prediction records.
//!
//! Pure and stateless: identical input always produces identical output, and
//! group boundaries plus record order are carried through unchanged.

pub mod schemes;

pub use schemes::Scheme;

use thiserror::Error;
use tracing::debug;

use crate::error::AppError;
use crate::models::{OutcomeGroup, OutcomeRecord, PredictionGroup, PredictionRecord, format_iso};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("prediction record {id} is missing {field}")]
    MissingField { id: String, field: &'static str },
}

impl From<ClassifyError> for AppError {
    fn from(err: ClassifyError) -> Self {
        match err {
            ClassifyError::MissingField { id, field } => AppError::malformed_record(id, field),
        }
    }
}

fn predicted_goals(record: &PredictionRecord) -> Result<(f64, f64), ClassifyError> {
    let missing = |field| ClassifyError::MissingField {
        id: record.id.clone(),
        field,
    };

    let prediction = record.prediction.as_ref().ok_or_else(|| missing("prediction"))?;
    let home = prediction
        .home_goals
        .ok_or_else(|| missing("prediction.homeGoals"))?;
    let away = prediction
        .away_goals
        .ok_or_else(|| missing("prediction.awayGoals"))?;
    Ok((home, away))
}

/// Labels a single record under `scheme`.
pub fn classify_record(
    record: &PredictionRecord,
    scheme: Scheme,
) -> Result<OutcomeRecord, ClassifyError> {
    let (home_goals, away_goals) = predicted_goals(record)?;
    let total_goals = home_goals + away_goals;

    Ok(OutcomeRecord {
        id: record.id.clone(),
        datetime: format_iso(&record.datetime),
        home: record.home.clone(),
        away: record.away.clone(),
        total_goals,
        outcome_label: scheme.label(home_goals, away_goals, total_goals).to_string(),
        actual: record.actual,
    })
}

/// Flattens every group into outcome records. Any malformed record fails the
/// whole batch.
pub fn classify_groups(
    groups: &[PredictionGroup],
    scheme: Scheme,
) -> Result<Vec<OutcomeGroup>, ClassifyError> {
    let classified = groups
        .iter()
        .map(|group| {
            let predictions = group
                .predictions
                .iter()
                .map(|record| classify_record(record, scheme))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(OutcomeGroup { predictions })
        })
        .collect::<Result<Vec<_>, ClassifyError>>()?;

    debug!(
        "Classified {} groups ({} records) with {} scheme",
        classified.len(),
        classified.iter().map(|g| g.predictions.len()).sum::<usize>(),
        scheme
    );

    Ok(classified)
}
