//! Deterministic progress analytics over the workout log
//!
//! Every function here is a pure function of the record slice plus an
//! explicit reference date. Nothing reads a clock, performs I/O, or keeps
//! state between calls, so two calls inside one logical query always agree
//! on where "today" is. Persistence and rendering belong to the caller.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::WorkoutSet;

/// ---------------------------------------------------------------------------
/// Rounding
/// ---------------------------------------------------------------------------

/// Round to two decimals, half away from zero.
///
/// Every aggregate and percentage in this module goes through here so the
/// rounding semantics cannot drift between call sites.
pub fn round2(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}

/// ---------------------------------------------------------------------------
/// Grouping / Indexing
/// ---------------------------------------------------------------------------

/// Partition records by exercise name (case-sensitive, exact match).
///
/// Each history is sorted ascending by date, ties broken by `set` ordinal
/// and then by insertion order (the sort is stable). Keys are exactly the
/// distinct exercise values present; empty input yields an empty map.
pub fn group_by_exercise(records: &[WorkoutSet]) -> BTreeMap<String, Vec<WorkoutSet>> {
  let mut map: BTreeMap<String, Vec<WorkoutSet>> = BTreeMap::new();

  for record in records {
    map.entry(record.exercise.clone()).or_default().push(record.clone());
  }

  for history in map.values_mut() {
    history.sort_by_key(|r| (r.date, r.set));
  }

  map
}

/// Chronologically first record of a history (date, then `set` ordinal,
/// then insertion order). Tolerates unsorted input.
pub fn first_record(history: &[WorkoutSet]) -> Option<&WorkoutSet> {
  history.iter().min_by_key(|r| (r.date, r.set))
}

/// Chronologically last record of a history, under the same ordering rule.
pub fn latest_record(history: &[WorkoutSet]) -> Option<&WorkoutSet> {
  history.iter().max_by_key(|r| (r.date, r.set))
}

/// ---------------------------------------------------------------------------
/// Window Aggregation
/// ---------------------------------------------------------------------------

/// Mean reps and weight over a date window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowAggregate {
  pub avg_reps: f64,
  pub avg_weight: f64,
  pub count: usize,
}

fn aggregate_of(matching: &[&WorkoutSet]) -> WindowAggregate {
  if matching.is_empty() {
    return WindowAggregate::default();
  }

  let count = matching.len();
  let reps_mean = matching.iter().map(|r| r.reps as f64).sum::<f64>() / count as f64;
  let weight_mean = matching.iter().map(|r| r.weight).sum::<f64>() / count as f64;

  WindowAggregate {
    avg_reps: round2(reps_mean),
    avg_weight: round2(weight_mean),
    count,
  }
}

/// Aggregate over `start ..= end` (both inclusive). No matching records is
/// a defined zero result, not an error.
pub fn average_between(history: &[WorkoutSet], start: NaiveDate, end: NaiveDate) -> WindowAggregate {
  let matching: Vec<&WorkoutSet> = history
    .iter()
    .filter(|r| r.date >= start && r.date <= end)
    .collect();

  aggregate_of(&matching)
}

/// Aggregate over `start ..= today`. Records dated after `today` never
/// count, which keeps future-dated entries out of rolling statistics.
pub fn average_in_range(
  history: &[WorkoutSet],
  start: NaiveDate,
  today: NaiveDate,
) -> WindowAggregate {
  average_between(history, start, today)
}

/// Window specification as it crosses the application boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Window {
  Rolling14,
  CalendarMonth,
  Weekly,
  AllTime,
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
  NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn week_aggregate(history: &[WorkoutSet], key: WeekKey, today: NaiveDate) -> WindowAggregate {
  let matching: Vec<&WorkoutSet> = history
    .iter()
    .filter(|r| week_key(r.date) == key && r.date <= today)
    .collect();

  aggregate_of(&matching)
}

/// Aggregate for the current period of `window`, ending at `today`
pub fn window_aggregate(
  history: &[WorkoutSet],
  window: Window,
  today: NaiveDate,
) -> WindowAggregate {
  match window {
    // 14 calendar days inclusive of today
    Window::Rolling14 => average_between(history, today - Duration::days(13), today),
    Window::CalendarMonth => average_between(history, first_of_month(today), today),
    Window::Weekly => week_aggregate(history, week_key(today), today),
    Window::AllTime => {
      let matching: Vec<&WorkoutSet> = history.iter().filter(|r| r.date <= today).collect();
      aggregate_of(&matching)
    }
  }
}

/// Aggregate for the immediately preceding period of `window`.
///
/// `None` for the all-time window, which has no predecessor.
pub fn previous_window_aggregate(
  history: &[WorkoutSet],
  window: Window,
  today: NaiveDate,
) -> Option<WindowAggregate> {
  match window {
    Window::Rolling14 => Some(average_between(
      history,
      today - Duration::days(27),
      today - Duration::days(14),
    )),
    Window::CalendarMonth => {
      let last_of_previous = first_of_month(today).pred_opt()?;
      Some(average_between(
        history,
        first_of_month(last_of_previous),
        last_of_previous,
      ))
    }
    Window::Weekly => Some(week_aggregate(history, week_key(today - Duration::days(7)), today)),
    Window::AllTime => None,
  }
}

/// ---------------------------------------------------------------------------
/// Comparative Statistics
/// ---------------------------------------------------------------------------

/// Percentage change of `current` against `baseline`, rounded to two
/// decimals. A zero (or non-finite) baseline has no meaningful percentage
/// and yields `None` - never a panic, `NaN`, or infinity.
pub fn percent_delta(current: f64, baseline: f64) -> Option<f64> {
  if baseline == 0.0 || !baseline.is_finite() || !current.is_finite() {
    return None;
  }

  Some(round2(((current - baseline) / baseline) * 100.0))
}

/// Weight and reps percentages, computed independently: a zero weight
/// baseline must not suppress a valid reps percentage and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricDelta {
  pub weight: Option<f64>,
  pub reps: Option<f64>,
}

/// vs-first-ever: a window aggregate against the lifetime baseline (the
/// chronologically first record for the exercise).
pub fn delta_vs_first(history: &[WorkoutSet], aggregate: &WindowAggregate) -> MetricDelta {
  match first_record(history) {
    Some(first) => MetricDelta {
      weight: percent_delta(aggregate.avg_weight, first.weight),
      reps: percent_delta(aggregate.avg_reps, first.reps as f64),
    },
    None => MetricDelta::default(),
  }
}

/// vs-previous-period: the current period's aggregate against the
/// immediately preceding period's (see `previous_window_aggregate`).
pub fn delta_vs_previous(current: &WindowAggregate, previous: &WindowAggregate) -> MetricDelta {
  MetricDelta {
    weight: percent_delta(current.avg_weight, previous.avg_weight),
    reps: percent_delta(current.avg_reps, previous.avg_reps),
  }
}

/// Lifetime headline: the latest record against the first, per metric
pub fn delta_latest_vs_first(history: &[WorkoutSet]) -> MetricDelta {
  match (first_record(history), latest_record(history)) {
    (Some(first), Some(latest)) => MetricDelta {
      weight: percent_delta(latest.weight, first.weight),
      reps: percent_delta(latest.reps as f64, first.reps as f64),
    },
    _ => MetricDelta::default(),
  }
}

/// ---------------------------------------------------------------------------
/// Weekly Bucketing
/// ---------------------------------------------------------------------------

/// Jan-1-anchored week identity: week n of a year covers ordinal days
/// `(n-1)*7 + 1 ..= n*7`, so the week containing January 1 is week 1 and
/// week 53 is the short tail. Deliberately not ISO-8601 Thursday-anchored;
/// this is the only week scheme in the crate.
///
/// Ordering is by `(year, week)`, so the string form (`"{year}-{week}"`)
/// never affects bucket order and equal week numbers in different years
/// never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey {
  pub year: i32,
  pub week: u32,
}

impl fmt::Display for WeekKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.year, self.week)
  }
}

/// Week bucket identity for a date
pub fn week_key(date: NaiveDate) -> WeekKey {
  WeekKey {
    year: date.year(),
    week: (date.ordinal0() / 7) + 1,
  }
}

/// Group one exercise's history into week buckets, preserving
/// within-bucket chronological order.
pub fn bucket_by_week(history: &[WorkoutSet]) -> BTreeMap<WeekKey, Vec<WorkoutSet>> {
  let mut buckets: BTreeMap<WeekKey, Vec<WorkoutSet>> = BTreeMap::new();

  for record in history {
    buckets.entry(week_key(record.date)).or_default().push(record.clone());
  }

  for bucket in buckets.values_mut() {
    bucket.sort_by_key(|r| (r.date, r.set));
  }

  buckets
}

/// Outcome of a week-over-week comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeekComparison {
  /// Fewer than two week buckets exist. Distinct from a computed 0%.
  InsufficientData,
  Compared {
    previous_week: WeekKey,
    current_week: WeekKey,
    delta: MetricDelta,
  },
}

/// Compare the last record of the most recent week bucket against the last
/// record of the bucket before it.
pub fn week_over_week(history: &[WorkoutSet]) -> WeekComparison {
  let buckets = bucket_by_week(history);
  if buckets.len() < 2 {
    return WeekComparison::InsufficientData;
  }

  let mut weeks = buckets.iter().rev();
  let (current_key, current_bucket) = match weeks.next() {
    Some(entry) => entry,
    None => return WeekComparison::InsufficientData,
  };
  let (previous_key, previous_bucket) = match weeks.next() {
    Some(entry) => entry,
    None => return WeekComparison::InsufficientData,
  };

  let (current, previous) = match (current_bucket.last(), previous_bucket.last()) {
    (Some(c), Some(p)) => (c, p),
    _ => return WeekComparison::InsufficientData,
  };

  WeekComparison::Compared {
    previous_week: *previous_key,
    current_week: *current_key,
    delta: MetricDelta {
      weight: percent_delta(current.weight, previous.weight),
      reps: percent_delta(current.reps as f64, previous.reps as f64),
    },
  }
}

/// ---------------------------------------------------------------------------
/// Progress Summary
/// ---------------------------------------------------------------------------

/// The lifetime baseline shown in the progress panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirstEntry {
  pub date: NaiveDate,
  pub weight: f64,
  pub reps: u32,
}

/// Per-exercise progress: lifetime baseline plus the two standard windows,
/// each with its percentage deltas against the baseline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
  pub exercise: String,
  pub first: Option<FirstEntry>,
  pub avg_14: WindowAggregate,
  pub pct_14: MetricDelta,
  pub avg_month: WindowAggregate,
  pub pct_month: MetricDelta,
}

/// Build the progress summary for every logged exercise.
///
/// When nothing has been logged yet the summary covers `catalog` (the
/// split's exercise list) instead, so a consumer can still render the full
/// plan with empty stats.
pub fn progress_summary(
  records: &[WorkoutSet],
  catalog: &[&str],
  today: NaiveDate,
) -> Vec<ProgressSummary> {
  let by_exercise = group_by_exercise(records);

  let exercises: Vec<String> = if by_exercise.is_empty() {
    let mut seen = std::collections::BTreeSet::new();
    catalog
      .iter()
      .filter(|e| seen.insert(**e))
      .map(|e| e.to_string())
      .collect()
  } else {
    by_exercise.keys().cloned().collect()
  };

  let empty: Vec<WorkoutSet> = Vec::new();

  exercises
    .into_iter()
    .map(|exercise| {
      let history = by_exercise.get(&exercise).unwrap_or(&empty);
      let avg_14 = window_aggregate(history, Window::Rolling14, today);
      let avg_month = window_aggregate(history, Window::CalendarMonth, today);

      ProgressSummary {
        first: first_record(history).map(|r| FirstEntry {
          date: r.date,
          weight: r.weight,
          reps: r.reps,
        }),
        pct_14: delta_vs_first(history, &avg_14),
        pct_month: delta_vs_first(history, &avg_month),
        avg_14,
        avg_month,
        exercise,
      }
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Chart Series
/// ---------------------------------------------------------------------------

/// One point of the per-exercise progress chart: per-date mean weight and
/// mean reps
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
  pub date: NaiveDate,
  pub weight: f64,
  pub reps: f64,
}

/// Collapse a history into one point per date, dates ascending
pub fn exercise_series(history: &[WorkoutSet]) -> Vec<SeriesPoint> {
  let mut by_date: BTreeMap<NaiveDate, (f64, f64, usize)> = BTreeMap::new();

  for r in history {
    let entry = by_date.entry(r.date).or_insert((0.0, 0.0, 0));
    entry.0 += r.weight;
    entry.1 += r.reps as f64;
    entry.2 += 1;
  }

  by_date
    .into_iter()
    .map(|(date, (weight_sum, reps_sum, count))| SeriesPoint {
      date,
      weight: round2(weight_sum / count as f64),
      reps: round2(reps_sum / count as f64),
    })
    .collect()
}

/// One point of the whole-body strength chart, across all exercises
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrengthPoint {
  pub date: NaiveDate,
  /// Total work proxy: sum of weight x reps over every set of the day
  pub strength: f64,
  pub avg_weight: f64,
  pub avg_reps: f64,
}

/// Per-date totals over the whole log, dates ascending
pub fn daily_strength(records: &[WorkoutSet]) -> Vec<StrengthPoint> {
  let mut by_date: BTreeMap<NaiveDate, (f64, f64, f64, usize)> = BTreeMap::new();

  for r in records {
    let entry = by_date.entry(r.date).or_insert((0.0, 0.0, 0.0, 0));
    entry.0 += r.weight * r.reps as f64;
    entry.1 += r.weight;
    entry.2 += r.reps as f64;
    entry.3 += 1;
  }

  by_date
    .into_iter()
    .map(|(date, (strength, weight_sum, reps_sum, count))| StrengthPoint {
      date,
      strength,
      avg_weight: round2(weight_sum / count as f64),
      avg_reps: round2(reps_sum / count as f64),
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
