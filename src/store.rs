//! Record store - the workout log persisted as a single blob
//!
//! The log is an append-only list of `WorkoutSet`, stored as one JSON
//! document under a fixed key. Analytics never touch this module: callers
//! load a snapshot, hand it to `analysis`, and persist mutations here.

use chrono::NaiveDate;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewSet, RawWorkoutSet, WorkoutSet};

pub type DbPool = SqlitePool;

/// Fixed identifier of the log blob
pub const STORAGE_KEY: &str = "gympro_logs_v2";

#[derive(Error, Debug)]
pub enum StoreError {
  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("migration failed: {0}")]
  Migration(#[from] sqlx::migrate::MigrateError),

  #[error("log blob is not valid JSON: {0}")]
  Blob(#[from] serde_json::Error),
}

fn new_record_id() -> String {
  Uuid::new_v4().to_string()
}

/// Database location: `GYMPRO_DATABASE_URL` (via the environment or a
/// `.env` file), falling back to a local file next to the executable
fn database_url() -> String {
  dotenvy::dotenv().ok();
  std::env::var("GYMPRO_DATABASE_URL")
    .unwrap_or_else(|_| "sqlite://gympro.db?mode=rwc".to_string())
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db() -> Result<DbPool, StoreError> {
  let db_url = database_url();

  tracing::info!(url = %db_url, "initializing database");

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("database ready");

  Ok(pool)
}

/// The workout log, backed by the blob table
pub struct LogStore {
  pool: DbPool,
}

impl LogStore {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }

  /// Load the current record list, sorted ascending by date.
  ///
  /// Decoding is per-record: a damaged entry is skipped with a warning and
  /// the rest of the log still loads. A missing blob is an empty log.
  pub async fn load(&self) -> Result<Vec<WorkoutSet>, StoreError> {
    let blob: Option<(String,)> = sqlx::query_as("SELECT value FROM blobs WHERE key = ?1")
      .bind(STORAGE_KEY)
      .fetch_optional(&self.pool)
      .await?;

    let raw = match blob {
      Some((value,)) => serde_json::from_str::<Vec<serde_json::Value>>(&value)?,
      None => return Ok(Vec::new()),
    };

    let mut records = Vec::with_capacity(raw.len());
    for value in raw {
      let parsed = serde_json::from_value::<RawWorkoutSet>(value)
        .map_err(|e| e.to_string())
        .and_then(|r| r.validate(new_record_id).map_err(|e| e.to_string()));

      match parsed {
        Ok(set) => records.push(set),
        Err(reason) => tracing::warn!(%reason, "skipping malformed record"),
      }
    }

    // Stable by date only: same-date records keep their stored order
    records.sort_by_key(|r| r.date);

    Ok(records)
  }

  /// Serialize and upsert the full record list under the fixed key
  pub async fn save(&self, records: &[WorkoutSet]) -> Result<(), StoreError> {
    let value = serde_json::to_string(records)?;

    sqlx::query(
      r#"
      INSERT INTO blobs (key, value, updated_at)
      VALUES (?1, ?2, CURRENT_TIMESTAMP)
      ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = CURRENT_TIMESTAMP
      "#,
    )
    .bind(STORAGE_KEY)
    .bind(value)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  /// Append one save action for one exercise.
  ///
  /// Every row becomes a record with a fresh id and a 1-based `set`
  /// ordinal. `day` defaults to the date's weekday name when no scheduled
  /// label is passed (backfilled entries may pass a different one).
  /// Returns the updated, date-sorted list.
  pub async fn append_session(
    &self,
    date: NaiveDate,
    day: Option<String>,
    exercise: &str,
    rows: &[NewSet],
  ) -> Result<Vec<WorkoutSet>, StoreError> {
    let mut records = self.load().await?;
    let day = day.unwrap_or_else(|| date.format("%A").to_string());

    for (index, row) in rows.iter().enumerate() {
      records.push(WorkoutSet {
        id: new_record_id(),
        date,
        day: Some(day.clone()),
        exercise: exercise.to_string(),
        set: index as u32 + 1,
        reps: row.reps,
        weight: row.weight,
      });
    }

    records.sort_by_key(|r| r.date);
    self.save(&records).await?;

    Ok(records)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
