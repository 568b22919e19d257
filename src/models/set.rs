use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One logged set: an exercise performed on a date for `reps` x `weight`.
///
/// Multiple sets may share date+exercise (a session). Analytics treat the
/// record as immutable; derived statistics are recomputed from the full
/// list on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
  pub id: String,
  pub date: NaiveDate,
  /// Scheduled weekday label; may differ from `date`'s actual weekday
  /// when a session is backfilled.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub day: Option<String>,
  pub exercise: String,
  /// 1-based ordinal within one save action. Display only, except as the
  /// documented tie-breaker for same-date ordering.
  pub set: u32,
  pub reps: u32,
  pub weight: f64,
}

/// Input row for one save action (ids and ordinals assigned by the store)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewSet {
  pub reps: u32,
  pub weight: f64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
  #[error("record has no date")]
  MissingDate,

  #[error("unparseable date: {0}")]
  BadDate(String),

  #[error("record has no exercise name")]
  MissingExercise,

  #[error("reps must be a non-negative integer, got {0}")]
  BadReps(String),

  #[error("weight must be a non-negative number, got {0}")]
  BadWeight(String),
}

/// The persisted record shape, before validation. Every field is optional
/// so a single damaged record decodes (and is then rejected) instead of
/// failing the whole blob.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWorkoutSet {
  #[serde(default)]
  pub id: Option<String>,
  #[serde(default)]
  pub date: Option<String>,
  #[serde(default)]
  pub day: Option<String>,
  #[serde(default)]
  pub exercise: Option<String>,
  #[serde(default)]
  pub set: Option<u32>,
  #[serde(default)]
  pub reps: Option<f64>,
  #[serde(default)]
  pub weight: Option<f64>,
}

impl RawWorkoutSet {
  /// Validate the raw shape into a `WorkoutSet`.
  ///
  /// Missing `day` is tolerated (unset), missing `set` defaults to 1, and
  /// a missing `id` is replaced. Missing `date`/`exercise`, an unparseable
  /// date, non-integer or negative `reps`, and negative or non-finite
  /// `weight` are rejected.
  pub fn validate(self, fallback_id: impl FnOnce() -> String) -> Result<WorkoutSet, ValidationError> {
    let date_str = self.date.ok_or(ValidationError::MissingDate)?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
      .map_err(|_| ValidationError::BadDate(date_str))?;

    let exercise = match self.exercise {
      Some(name) if !name.is_empty() => name,
      _ => return Err(ValidationError::MissingExercise),
    };

    let reps_raw = self.reps.unwrap_or(0.0);
    if !reps_raw.is_finite() || reps_raw < 0.0 || reps_raw.fract() != 0.0 {
      return Err(ValidationError::BadReps(reps_raw.to_string()));
    }

    let weight = self.weight.unwrap_or(0.0);
    if !weight.is_finite() || weight < 0.0 {
      return Err(ValidationError::BadWeight(weight.to_string()));
    }

    Ok(WorkoutSet {
      id: self.id.unwrap_or_else(fallback_id),
      date,
      day: self.day,
      exercise,
      set: self.set.unwrap_or(1),
      reps: reps_raw as u32,
      weight,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn raw(date: Option<&str>, exercise: Option<&str>, reps: f64, weight: f64) -> RawWorkoutSet {
    RawWorkoutSet {
      id: Some("abc1234".to_string()),
      date: date.map(String::from),
      day: None,
      exercise: exercise.map(String::from),
      set: Some(1),
      reps: Some(reps),
      weight: Some(weight),
    }
  }

  #[test]
  fn test_valid_record_passes() {
    let set = raw(Some("2025-09-01"), Some("Bench Press"), 8.0, 40.0)
      .validate(|| unreachable!())
      .expect("record should validate");

    assert_eq!(set.exercise, "Bench Press");
    assert_eq!(set.reps, 8);
    assert_eq!(set.weight, 40.0);
    assert_eq!(set.date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    assert!(set.day.is_none());
  }

  #[test]
  fn test_missing_date_rejected() {
    let err = raw(None, Some("Squats"), 8.0, 60.0)
      .validate(|| unreachable!())
      .unwrap_err();
    assert_eq!(err, ValidationError::MissingDate);
  }

  #[test]
  fn test_unparseable_date_rejected() {
    let err = raw(Some("01/09/2025"), Some("Squats"), 8.0, 60.0)
      .validate(|| unreachable!())
      .unwrap_err();
    assert!(matches!(err, ValidationError::BadDate(_)));
  }

  #[test]
  fn test_missing_exercise_rejected() {
    let err = raw(Some("2025-09-01"), None, 8.0, 60.0)
      .validate(|| unreachable!())
      .unwrap_err();
    assert_eq!(err, ValidationError::MissingExercise);

    let err = raw(Some("2025-09-01"), Some(""), 8.0, 60.0)
      .validate(|| unreachable!())
      .unwrap_err();
    assert_eq!(err, ValidationError::MissingExercise);
  }

  #[test]
  fn test_fractional_or_negative_reps_rejected() {
    let err = raw(Some("2025-09-01"), Some("Dips"), 8.5, 0.0)
      .validate(|| unreachable!())
      .unwrap_err();
    assert!(matches!(err, ValidationError::BadReps(_)));

    let err = raw(Some("2025-09-01"), Some("Dips"), -3.0, 0.0)
      .validate(|| unreachable!())
      .unwrap_err();
    assert!(matches!(err, ValidationError::BadReps(_)));
  }

  #[test]
  fn test_negative_or_nonfinite_weight_rejected() {
    let err = raw(Some("2025-09-01"), Some("Dips"), 8.0, -1.0)
      .validate(|| unreachable!())
      .unwrap_err();
    assert!(matches!(err, ValidationError::BadWeight(_)));

    let err = raw(Some("2025-09-01"), Some("Dips"), 8.0, f64::NAN)
      .validate(|| unreachable!())
      .unwrap_err();
    assert!(matches!(err, ValidationError::BadWeight(_)));
  }

  #[test]
  fn test_missing_optional_fields_tolerated() {
    let mut r = raw(Some("2025-09-01"), Some("Plank"), 0.0, 0.0);
    r.id = None;
    r.set = None;
    r.reps = None;
    r.weight = None;

    let set = r.validate(|| "fresh-id".to_string()).expect("should validate");
    assert_eq!(set.id, "fresh-id");
    assert_eq!(set.set, 1);
    assert_eq!(set.reps, 0);
    assert_eq!(set.weight, 0.0);
  }

  #[test]
  fn test_serialized_shape_matches_persisted_contract() {
    let set = WorkoutSet {
      id: "abc1234".to_string(),
      date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
      day: Some("Monday".to_string()),
      exercise: "Bench Press".to_string(),
      set: 1,
      reps: 8,
      weight: 40.0,
    };

    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(json["date"], "2025-09-01");
    assert_eq!(json["day"], "Monday");
    assert_eq!(json["set"], 1);

    // day is omitted when unset, not serialized as null
    let bare = WorkoutSet { day: None, ..set };
    let json = serde_json::to_value(&bare).unwrap();
    assert!(json.get("day").is_none());
  }
}
