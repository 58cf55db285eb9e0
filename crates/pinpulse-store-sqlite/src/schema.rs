//! SQL schema for the PinPulse SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- At most one row: the local user's profile.
CREATE TABLE IF NOT EXISTS profile (
    profile_id  INTEGER PRIMARY KEY CHECK (profile_id = 1),
    score       INTEGER NOT NULL CHECK (score >= 0),
    saved_at    TEXT NOT NULL      -- ISO 8601 UTC
);

-- Achievement ids unlocked by the local user.
CREATE TABLE IF NOT EXISTS unlocked_achievements (
    achievement_id TEXT PRIMARY KEY
);

PRAGMA user_version = 1;
";
