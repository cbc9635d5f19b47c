pub mod datetime;
pub mod outcomes;
pub mod predictions;

pub use datetime::{format_iso, parse_match_datetime};
pub use outcomes::{OutcomeGroup, OutcomeRecord};
pub use predictions::{ActualScore, PredictedScore, PredictionGroup, PredictionRecord};

/// Team and fantasy documents are served exactly as stored
pub type Document = serde_json::Value;
