//! Encoding and decoding helpers between Rust domain types and the plain-text
//! or integer representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. Scores are stored as SQLite
//! INTEGER, which is signed.

use chrono::{DateTime, Utc};
use pinpulse_core::store::ProfileSnapshot;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Score ───────────────────────────────────────────────────────────────────

pub fn encode_score(score: u64) -> Result<i64> {
  i64::try_from(score).map_err(|_| Error::ScoreOutOfRange(score.to_string()))
}

pub fn decode_score(raw: i64) -> Result<u64> {
  u64::try_from(raw).map_err(|_| Error::ScoreOutOfRange(raw.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from the `profile` row and the achievements table.
pub struct RawProfile {
  pub score:        i64,
  pub saved_at:     String,
  pub achievements: Vec<String>,
}

impl RawProfile {
  pub fn into_snapshot(self) -> Result<ProfileSnapshot> {
    let saved_at = decode_dt(&self.saved_at)?;
    tracing::debug!(%saved_at, "loaded saved profile");
    Ok(ProfileSnapshot {
      score:                 decode_score(self.score)?,
      unlocked_achievements: self.achievements.into_iter().collect(),
    })
  }
}
