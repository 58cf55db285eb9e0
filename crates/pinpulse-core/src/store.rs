//! The `ProfileStore` trait: the ledger's persistence collaborator.
//!
//! Only the user's profile (score plus unlocked achievement ids) outlives a
//! session. It is read once at startup and written once at shutdown; no
//! ledger operation touches storage.
//!
//! Backends (e.g. `pinpulse-store-sqlite`) implement the trait. The server
//! depends on this abstraction, not on any concrete backend.

use std::{
  collections::BTreeSet,
  convert::Infallible,
  future::Future,
  sync::{Mutex, PoisonError},
};

use serde::{Deserialize, Serialize};

/// The durable part of a ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
  pub score:                 u64,
  pub unlocked_achievements:  BTreeSet<String>,
}

/// Abstraction over where a profile is kept between sessions.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the last saved profile, or `None` if nothing was ever saved.
  fn load_profile(
    &self,
  ) -> impl Future<Output = Result<Option<ProfileSnapshot>, Self::Error>> + Send + '_;

  /// Durably replace the stored profile with `profile`.
  fn save_profile<'a>(
    &'a self,
    profile: &'a ProfileSnapshot,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A store that keeps the profile in process memory. Nothing survives a
/// restart; useful for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
  slot: Mutex<Option<ProfileSnapshot>>,
}

impl MemoryProfileStore {
  pub fn new() -> Self { Self::default() }

  /// A store that already holds `profile`, as if a previous session saved it.
  pub fn with_profile(profile: ProfileSnapshot) -> Self {
    Self { slot: Mutex::new(Some(profile)) }
  }
}

impl ProfileStore for MemoryProfileStore {
  type Error = Infallible;

  async fn load_profile(&self) -> Result<Option<ProfileSnapshot>, Infallible> {
    Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
  }

  async fn save_profile(&self, profile: &ProfileSnapshot) -> Result<(), Infallible> {
    *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());
    Ok(())
  }
}
