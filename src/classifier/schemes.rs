//! Threshold tables for the named outcome schemes

use std::fmt;

pub const OVER_1_5: &str = "Over 1.5 goals";
pub const UNDER_1_5: &str = "Under 1.5 goals";
pub const OVER_1_5_AND_GG: &str = "Over 1.5 goals and GG";
pub const UNDER_4_5: &str = "Under 4.5 goals";

/// Rule set mapping a predicted scoreline to an outcome label.
///
/// Only the `total >= 2` split is observable in either scheme. Earlier
/// "Over 2.5" and single-team "over 0.5" tiers were always overwritten and
/// are intentionally not reproduced; a finer tiering belongs in a new variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Score,
    Risk,
}

impl Scheme {
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Score => "score",
            Scheme::Risk => "risk",
        }
    }

    /// Label for a scoreline. `total` is passed in so callers compute it once.
    pub fn label(&self, home_goals: f64, away_goals: f64, total: f64) -> &'static str {
        match self {
            Scheme::Score => {
                if total >= 2.0 {
                    OVER_1_5
                } else {
                    UNDER_1_5
                }
            }
            Scheme::Risk => {
                if total >= 2.0 {
                    if home_goals == 1.0 && away_goals == 1.0 {
                        OVER_1_5_AND_GG
                    } else {
                        UNDER_1_5
                    }
                } else {
                    UNDER_4_5
                }
            }
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
