//! [`SharedLedger`]: a [`Ledger`] behind a single lock.
//!
//! Each public operation takes the lock once and runs to completion while
//! holding it, so read-modify-write sequences (score plus achievements,
//! report list plus score) are never interleaved.

use std::{
  collections::BTreeMap,
  sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use rand_core::RngCore;
use uuid::Uuid;

use crate::{
  Result,
  ledger::{Award, Ledger, Stats},
  report::{NewReport, Report, ReportType},
  store::ProfileSnapshot,
};

/// Cloning is cheap; every clone refers to the same ledger.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
  inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
  pub fn new(ledger: Ledger) -> Self {
    Self { inner: Arc::new(Mutex::new(ledger)) }
  }

  // A panic can only happen between operations (they are all-or-nothing),
  // so a poisoned ledger is still consistent.
  fn lock(&self) -> MutexGuard<'_, Ledger> {
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Run `f` with exclusive access to the ledger.
  pub fn with<T>(&self, f: impl FnOnce(&mut Ledger) -> T) -> T { f(&mut *self.lock()) }

  pub fn create_report(&self, input: NewReport) -> Result<(Report, Award)> {
    self.lock().create_report(input)
  }

  pub fn upvote_report(&self, id: Uuid) -> Result<(Report, Award)> {
    self.lock().upvote_report(id)
  }

  pub fn award_points(&self, amount: i64) -> Result<Award> {
    self.lock().award_points(amount)
  }

  pub fn award_surprise<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<Award> {
    self.lock().award_surprise(rng)
  }

  pub fn list_recent_reports(&self, limit: usize) -> Vec<Report> {
    self.lock().list_recent_reports(limit).to_vec()
  }

  pub fn get_report(&self, id: Uuid) -> Option<Report> {
    self.lock().get_report(id).cloned()
  }

  pub fn count_by_type(&self) -> BTreeMap<ReportType, usize> {
    self.lock().count_by_type()
  }

  pub fn stats(&self) -> Stats { self.lock().stats() }

  pub fn score(&self) -> u64 { self.lock().score() }

  pub fn snapshot(&self) -> ProfileSnapshot { self.lock().snapshot() }
}

impl From<Ledger> for SharedLedger {
  fn from(ledger: Ledger) -> Self { Self::new(ledger) }
}
