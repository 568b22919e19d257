//! Rule-based next-session suggestion
//!
//! A deliberately simple heuristic over the most recent two records of an
//! exercise: high reps earn more load, low reps hold the load and chase
//! rep count, anything in between maintains. Criteria-driven, no calendar
//! logic, no per-user tuning.

use serde::{Deserialize, Serialize};

use crate::analysis::latest_record;
use crate::models::WorkoutSet;

/// Fixed load step for a progression suggestion
pub const LOAD_INCREMENT_KG: f64 = 2.5;

/// At or above this rep count the load goes up. Policy choice: 10, the
/// lower of the two candidate thresholds, so progression triggers at the
/// top of a standard 8-10 working range.
pub const HIGH_REP_THRESHOLD: u32 = 10;

/// At or below this rep count the load holds and reps become the focus
pub const LOW_REP_THRESHOLD: u32 = 6;

// ---------------------------------------------------------------------------
/// Suggestion: What the next session should do
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Suggestion {
    /// Fewer than two records exist; the heuristic never fires on a single
    /// data point. Distinct from every computed outcome.
    NotEnoughData,
    /// Latest reps at or above the high threshold: add the fixed increment
    IncreaseLoad { target_weight_kg: f64 },
    /// Latest reps at or below the low threshold: keep the load, build reps
    HoldWeight { target_weight_kg: f64 },
    /// Working range: keep everything as is
    Maintain { target_weight_kg: f64 },
}

impl Suggestion {
    /// Human-readable reason for display next to the suggestion
    pub fn describe(&self) -> String {
        match self {
            Self::NotEnoughData => "Not enough history for a suggestion yet".to_string(),
            Self::IncreaseLoad { target_weight_kg } => {
                format!("Hit {HIGH_REP_THRESHOLD}+ reps - increase to {target_weight_kg} kg")
            }
            Self::HoldWeight { target_weight_kg } => {
                format!("Stay at {target_weight_kg} kg and focus on rep count")
            }
            Self::Maintain { target_weight_kg } => {
                format!("Maintain {target_weight_kg} kg")
            }
        }
    }
}

/// Suggest the next session for one exercise from its history.
///
/// Requires at least two records; the decision itself reads the latest one.
pub fn next_session(history: &[WorkoutSet]) -> Suggestion {
    if history.len() < 2 {
        return Suggestion::NotEnoughData;
    }

    let latest = match latest_record(history) {
        Some(record) => record,
        None => return Suggestion::NotEnoughData,
    };

    if latest.reps >= HIGH_REP_THRESHOLD {
        Suggestion::IncreaseLoad {
            target_weight_kg: latest.weight + LOAD_INCREMENT_KG,
        }
    } else if latest.reps <= LOW_REP_THRESHOLD {
        Suggestion::HoldWeight {
            target_weight_kg: latest.weight,
        }
    } else {
        Suggestion::Maintain {
            target_weight_kg: latest.weight,
        }
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
