//! PinPulse server: configuration, session lifecycle and HTTP wiring.
//!
//! A [`Session`] hydrates the ledger from a [`ProfileStore`] at startup and
//! hands the profile back to it at shutdown. In between, the ledger lives
//! purely in memory behind a [`SharedLedger`].

use std::path::{Path, PathBuf};

use axum::Router;
use chrono::Utc;
use config::{ConfigError, builder::{ConfigBuilder, DefaultState}};
use pinpulse_api::{ApiState, DEFAULT_RECENT_LIMIT};
use pinpulse_core::{
  achievement::{Achievement, AchievementTable},
  ledger::Ledger,
  seed::sample_reports,
  shared::SharedLedger,
  store::{ProfileSnapshot, ProfileStore},
};
use pinpulse_store_sqlite::SqliteProfileStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PINPULSE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  /// SQLite file holding the profile. Without one, the profile only lives
  /// as long as the process.
  #[serde(default)]
  pub store_path:          Option<PathBuf>,
  /// Start each session with the demo reports.
  #[serde(default = "default_seed")]
  pub seed_sample_reports: bool,
  /// Default length of the recent-reports list.
  #[serde(default = "default_recent_limit")]
  pub recent_limit:        usize,
  /// Replaces the built-in achievement table when present.
  #[serde(default)]
  pub achievements:        Option<Vec<Achievement>>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_seed() -> bool { true }

fn default_recent_limit() -> usize { DEFAULT_RECENT_LIMIT }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                default_host(),
      port:                default_port(),
      store_path:          None,
      seed_sample_reports: default_seed(),
      recent_limit:        default_recent_limit(),
      achievements:        None,
    }
  }
}

impl ServerConfig {
  /// Read `path` (optional) and overlay `PINPULSE_*` environment variables.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::from_sources(
      config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("PINPULSE")),
    )
  }

  fn from_sources(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
    builder.build()?.try_deserialize()
  }

  /// The configured achievement table, or the built-in one.
  pub fn achievement_table(&self) -> pinpulse_core::Result<AchievementTable> {
    match &self.achievements {
      Some(items) => AchievementTable::new(items.clone()),
      None => Ok(AchievementTable::builtin()),
    }
  }
}

// ─── Session ──────────────────────────────────────────────────────────────────

/// One run of the application: a ledger plus the store it came from.
pub struct Session<S: ProfileStore> {
  store:  S,
  ledger: SharedLedger,
}

impl<S: ProfileStore> Session<S> {
  /// Load the saved profile and build the ledger.
  ///
  /// A store that fails to load is logged and treated as empty; the session
  /// carries on in memory.
  pub async fn open(store: S, achievements: AchievementTable, seed: bool) -> Self {
    let profile = match store.load_profile().await {
      Ok(profile) => profile,
      Err(e) => {
        tracing::warn!(error = %e, "failed to load saved profile, starting from defaults");
        None
      }
    };

    let mut ledger = Ledger::hydrate(achievements, profile);
    if seed {
      ledger.seed_reports(sample_reports(Utc::now()));
    }

    tracing::info!(
      score = ledger.score(),
      unlocked = ledger.unlocked_achievements().len(),
      reports = ledger.len(),
      "session opened"
    );
    Self { store, ledger: SharedLedger::new(ledger) }
  }

  /// A handle to the session's ledger.
  pub fn ledger(&self) -> SharedLedger { self.ledger.clone() }

  /// Save the profile and end the session.
  pub async fn close(self) -> Result<ProfileSnapshot, S::Error> {
    let snapshot = self.ledger.snapshot();
    self.store.save_profile(&snapshot).await?;
    tracing::info!(
      score = snapshot.score,
      unlocked = snapshot.unlocked_achievements.len(),
      "session closed, profile saved"
    );
    Ok(snapshot)
  }
}

// ─── Store ────────────────────────────────────────────────────────────────────

/// Open the profile store at `path`, or an in-memory one when no path is
/// configured or the file cannot be opened. The in-memory store loses the
/// profile on restart, so both fallbacks are logged.
pub async fn open_store(path: Option<&Path>) -> pinpulse_store_sqlite::Result<SqliteProfileStore> {
  match path {
    Some(path) => {
      let path = expand_tilde(path);
      match SqliteProfileStore::open(&path).await {
        Ok(store) => Ok(store),
        Err(e) => {
          tracing::warn!(
            error = %e,
            path = ?path,
            "failed to open profile store, falling back to in-memory"
          );
          SqliteProfileStore::open_in_memory().await
        }
      }
    }
    None => {
      tracing::warn!("no store_path configured, profile will not survive a restart");
      SqliteProfileStore::open_in_memory().await
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router: the JSON API under `/api`, with request
/// tracing.
pub fn router(ledger: SharedLedger, config: &ServerConfig) -> Router {
  let state = ApiState { ledger, recent_limit: config.recent_limit };
  Router::new()
    .nest("/api", pinpulse_api::api_router(state))
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests;
