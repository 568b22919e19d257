//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Fixed-date helpers
//! - Helper assertions
//!
//! Dates are always fixed, never relative to the wall clock: the engine
//! takes its reference date explicitly, so tests pin "today" and stay
//! deterministic forever.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::WorkoutSet;
use crate::store::STORAGE_KEY;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from
/// creating isolated in-memory databases, which would cause intermittent
/// test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Install a test subscriber so `RUST_LOG`-filtered store logs show up in
/// test output. Safe to call from any number of tests.
pub fn init_test_logging() {
  use tracing_subscriber::EnvFilter;

  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_test_writer()
    .try_init();
}

/// Write a raw JSON document into the blob table under the log key,
/// bypassing the store's own encoder (for malformed-record tests)
pub async fn seed_blob(pool: &SqlitePool, value: &str) {
  sqlx::query(
    r#"
    INSERT INTO blobs (key, value)
    VALUES (?1, ?2)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value
    "#,
  )
  .bind(STORAGE_KEY)
  .bind(value)
  .execute(pool)
  .await
  .expect("Failed to seed blob");
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Create a workout set with ordinal 1 and no scheduled-day label
pub fn mock_set(exercise: &str, on: &str, reps: u32, weight: f64) -> WorkoutSet {
  mock_set_with_ordinal(exercise, on, 1, reps, weight)
}

/// Create a workout set with an explicit `set` ordinal
pub fn mock_set_with_ordinal(
  exercise: &str,
  on: &str,
  ordinal: u32,
  reps: u32,
  weight: f64,
) -> WorkoutSet {
  WorkoutSet {
    id: Uuid::new_v4().to_string(),
    date: date(on),
    day: None,
    exercise: exercise.to_string(),
    set: ordinal,
    reps,
    weight,
  }
}

/// ---------------------------------------------------------------------------
/// Date Helpers
/// ---------------------------------------------------------------------------

/// Parse a fixed `yyyy-MM-dd` test date
pub fn date(s: &str) -> NaiveDate {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test dates must be yyyy-MM-dd")
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> =
      sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = 'blobs'")
        .fetch_all(&pool)
        .await
        .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_blob_upserts() {
    let pool = setup_test_db().await;

    seed_blob(&pool, "[]").await;
    seed_blob(&pool, r#"[{"date":"2025-09-01"}]"#).await;

    let (value,): (String,) = sqlx::query_as("SELECT value FROM blobs WHERE key = ?1")
      .bind(STORAGE_KEY)
      .fetch_one(&pool)
      .await
      .expect("Failed to read blob");

    assert!(value.contains("2025-09-01"));

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let set = mock_set("Bench Press", "2025-09-01", 8, 40.0);
    assert_eq!(set.exercise, "Bench Press");
    assert_eq!(set.set, 1);
    assert!(!set.id.is_empty());

    let other = mock_set("Bench Press", "2025-09-01", 8, 40.0);
    assert_ne!(set.id, other.id, "factory ids must not collide");
  }

  #[test]
  fn test_date_helper_parses_iso_dates() {
    let d = date("2025-09-01");
    assert_eq!(d, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
  }
}
