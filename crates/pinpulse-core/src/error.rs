//! Error types for `pinpulse-core`.
//!
//! Every variant is recoverable: the ledger performs no mutation when it
//! returns one of these.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("report title must not be empty")]
  EmptyTitle,

  #[error("unknown report type: {0:?}")]
  UnknownReportType(String),

  #[error("unknown priority: {0:?}")]
  UnknownPriority(String),

  #[error("point amount must be non-negative, got {0}")]
  NegativePoints(i64),

  #[error("awarding {0} points would overflow the score")]
  ScoreOverflow(u64),

  #[error("duplicate achievement id in table: {0:?}")]
  DuplicateAchievement(String),

  #[error("report not found: {0}")]
  ReportNotFound(Uuid),
}

impl Error {
  /// Bad input from the caller: empty title, unknown enum member, negative
  /// or overflowing point amount, malformed achievement table.
  pub fn is_validation(&self) -> bool { !self.is_not_found() }

  /// The operation referenced a report id the ledger does not hold.
  pub fn is_not_found(&self) -> bool { matches!(self, Self::ReportNotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
