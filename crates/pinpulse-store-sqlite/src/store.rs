//! [`SqliteProfileStore`]: the SQLite implementation of [`ProfileStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use pinpulse_core::store::{ProfileSnapshot, ProfileStore};

use crate::{
  Error, Result,
  encode::{RawProfile, encode_dt, encode_score},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A profile store backed by a single SQLite file.
///
/// Cloning is cheap, the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteProfileStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteProfileStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteProfileStore {
  type Error = Error;

  async fn load_profile(&self) -> Result<Option<ProfileSnapshot>> {
    let raw: Option<RawProfile> = self
      .conn
      .call(|conn| {
        let row: Option<(i64, String)> = conn
          .query_row(
            "SELECT score, saved_at FROM profile WHERE profile_id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;

        let Some((score, saved_at)) = row else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(
          "SELECT achievement_id FROM unlocked_achievements ORDER BY achievement_id",
        )?;
        let achievements = stmt
          .query_map([], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(Some(RawProfile { score, saved_at, achievements }))
      })
      .await?;

    raw.map(RawProfile::into_snapshot).transpose()
  }

  async fn save_profile(&self, profile: &ProfileSnapshot) -> Result<()> {
    let score        = encode_score(profile.score)?;
    let saved_at     = encode_dt(Utc::now());
    let achievements: Vec<String> =
      profile.unlocked_achievements.iter().cloned().collect();
    let count        = achievements.len();

    // One transaction: a crash mid-save leaves the previous profile intact.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO profile (profile_id, score, saved_at) VALUES (1, ?1, ?2)
           ON CONFLICT (profile_id) DO UPDATE SET
             score    = excluded.score,
             saved_at = excluded.saved_at",
          rusqlite::params![score, saved_at],
        )?;
        tx.execute("DELETE FROM unlocked_achievements", [])?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO unlocked_achievements (achievement_id) VALUES (?1)",
          )?;
          for id in &achievements {
            stmt.execute(rusqlite::params![id])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(score = profile.score, achievements = count, "profile saved");
    Ok(())
  }
}
