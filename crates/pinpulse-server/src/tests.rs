//! Tests for configuration loading, the session lifecycle and the assembled
//! router.

use std::io;

use axum::{
  body::Body,
  http::{Request, StatusCode},
};
use config::{File, FileFormat};
use pinpulse_core::{
  achievement::AchievementTable,
  report::{NewReport, Priority, ReportType},
  store::{MemoryProfileStore, ProfileSnapshot, ProfileStore},
};
use pinpulse_store_sqlite::SqliteProfileStore;
use serde_json::Value;
use tower::ServiceExt as _;

use crate::{ServerConfig, Session, open_store, router};

fn config_from_toml(toml: &str) -> ServerConfig {
  ServerConfig::from_sources(
    config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
  )
  .unwrap()
}

/// A store whose disk is permanently unavailable.
struct BrokenStore;

impl ProfileStore for BrokenStore {
  type Error = io::Error;

  async fn load_profile(&self) -> Result<Option<ProfileSnapshot>, io::Error> {
    Err(io::Error::other("disk unavailable"))
  }

  async fn save_profile(&self, _profile: &ProfileSnapshot) -> Result<(), io::Error> {
    Err(io::Error::other("disk unavailable"))
  }
}

// ─── Configuration ────────────────────────────────────────────────────────────

#[test]
fn empty_config_uses_defaults() {
  let cfg = config_from_toml("");
  assert_eq!(cfg.host, "127.0.0.1");
  assert_eq!(cfg.port, 8080);
  assert!(cfg.store_path.is_none());
  assert!(cfg.seed_sample_reports);
  assert_eq!(cfg.recent_limit, 5);
  assert_eq!(cfg.achievement_table().unwrap(), AchievementTable::builtin());
}

#[test]
fn config_file_overrides_defaults_and_table() {
  let cfg = config_from_toml(
    r#"
      port = 9000
      store_path = "/tmp/pinpulse.sqlite"
      seed_sample_reports = false
      recent_limit = 3

      [[achievements]]
      id = "starter"
      threshold = 1
      title = "Starter"
      description = "Scored a point"

      [[achievements]]
      id = "regular"
      threshold = 25
      title = "Regular"
      description = "Scored 25 points"
      icon = "🔥"
    "#,
  );

  assert_eq!(cfg.port, 9000);
  assert_eq!(cfg.store_path.as_deref(), Some(std::path::Path::new("/tmp/pinpulse.sqlite")));
  assert!(!cfg.seed_sample_reports);
  assert_eq!(cfg.recent_limit, 3);

  let table = cfg.achievement_table().unwrap();
  assert_eq!(table.len(), 2);
  assert_eq!(table.get("regular").unwrap().icon.as_deref(), Some("🔥"));
}

#[test]
fn duplicate_configured_achievements_are_rejected() {
  let cfg = config_from_toml(
    r#"
      [[achievements]]
      id = "same"
      threshold = 1
      title = "A"
      description = ""

      [[achievements]]
      id = "same"
      threshold = 2
      title = "B"
      description = ""
    "#,
  );
  let err = cfg.achievement_table().unwrap_err();
  assert!(err.is_validation());
}

// ─── Session lifecycle ────────────────────────────────────────────────────────

#[tokio::test]
async fn session_restores_saved_profile_and_seeds_reports() {
  let saved = ProfileSnapshot {
    score:                 42,
    unlocked_achievements: ["first_report".to_string()].into(),
  };
  let session = Session::open(
    MemoryProfileStore::with_profile(saved),
    AchievementTable::builtin(),
    true,
  )
  .await;

  let stats = session.ledger().stats();
  assert_eq!(stats.score, 42);
  assert!(stats.unlocked.contains("first_report"));
  assert_eq!(stats.total, 5);
}

#[tokio::test]
async fn session_without_seed_starts_empty() {
  let session = Session::open(MemoryProfileStore::new(), AchievementTable::builtin(), false).await;
  assert_eq!(session.ledger().stats().total, 0);
  assert_eq!(session.ledger().score(), 0);
}

#[tokio::test]
async fn close_saves_profile_for_next_session() {
  let store = SqliteProfileStore::open_in_memory().await.unwrap();

  let session = Session::open(store.clone(), AchievementTable::builtin(), false).await;
  session
    .ledger()
    .create_report(NewReport::new(ReportType::Positive, "Community garden", Priority::Low))
    .unwrap();
  let closed = session.close().await.unwrap();
  assert_eq!(closed.score, 10);

  let next = Session::open(store, AchievementTable::builtin(), false).await;
  assert_eq!(next.ledger().score(), 10);
  assert_eq!(next.ledger().snapshot(), closed);
}

#[tokio::test]
async fn unreadable_store_falls_back_to_defaults() {
  let session = Session::open(BrokenStore, AchievementTable::builtin(), false).await;

  let award = session.ledger().award_points(50).unwrap();
  assert_eq!(award.score, 50);
  assert_eq!(award.unlocked.len(), 2);

  assert!(session.close().await.is_err());
}

// ─── Store ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unopenable_store_path_falls_back_to_memory() {
  // A directory cannot be opened as a database file.
  let dir = std::env::temp_dir();
  assert!(SqliteProfileStore::open(&dir).await.is_err());
  let store = open_store(Some(&dir)).await.unwrap();

  let profile = ProfileSnapshot { score: 30, ..ProfileSnapshot::default() };
  store.save_profile(&profile).await.unwrap();
  assert_eq!(store.load_profile().await.unwrap(), Some(profile));
}

#[tokio::test]
async fn missing_store_path_opens_memory_store() {
  let store = open_store(None).await.unwrap();
  assert_eq!(store.load_profile().await.unwrap(), None);
}

// ─── Router ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn router_serves_api_under_prefix_with_configured_limit() {
  let cfg = ServerConfig { recent_limit: 2, ..ServerConfig::default() };
  let session = Session::open(MemoryProfileStore::new(), AchievementTable::builtin(), true).await;
  let app = router(session.ledger(), &cfg);

  let resp = app
    .clone()
    .oneshot(Request::builder().uri("/api/reports").body(Body::empty()).unwrap())
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(body.as_array().unwrap().len(), 2);

  let resp = app
    .oneshot(Request::builder().uri("/reports").body(Body::empty()).unwrap())
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
