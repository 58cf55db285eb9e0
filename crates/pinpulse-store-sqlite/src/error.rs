//! Error type for `pinpulse-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A score outside the range SQLite's signed 64-bit INTEGER can hold.
  #[error("score out of range: {0}")]
  ScoreOutOfRange(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
