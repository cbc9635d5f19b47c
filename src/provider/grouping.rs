use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{PredictionGroup, PredictionRecord};

/// Buckets records by match date.
///
/// Groups appear in the order their first record appears; records keep their
/// relative order inside each group.
pub fn group_by_match_date(records: Vec<PredictionRecord>) -> Vec<PredictionGroup> {
    let mut groups: Vec<PredictionGroup> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for record in records {
        let date = record.group_key();
        match index.get(&date) {
            Some(&position) => groups[position].predictions.push(record),
            None => {
                index.insert(date, groups.len());
                groups.push(PredictionGroup {
                    date,
                    predictions: vec![record],
                });
            }
        }
    }

    groups
}
