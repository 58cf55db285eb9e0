//! [`Ledger`]: the in-memory owner of reports, score and unlocked
//! achievements.
//!
//! Invariants:
//! - `reports` is newest-first; new reports are only ever inserted at the
//!   front and nothing reorders them afterwards.
//! - `score` never decreases and `unlocked` never shrinks.
//! - Every operation either applies completely or returns an error without
//!   touching any state.

use std::{
  collections::{BTreeMap, BTreeSet},
  ops::RangeInclusive,
};

use chrono::Utc;
use rand_core::RngCore;
use serde::Serialize;
use uuid::Uuid;

use crate::{
  Error, Result,
  achievement::{Achievement, AchievementTable},
  report::{NewReport, Report, ReportType},
  store::ProfileSnapshot,
};

/// Points granted for filing a report.
pub const REPORT_POINTS: u64 = 10;

/// Points granted for upvoting a report.
pub const UPVOTE_POINTS: u64 = 1;

/// Range of the random bonus granted by [`Ledger::award_surprise`].
pub const SURPRISE_POINTS: RangeInclusive<u64> = 5..=24;

// ─── Results ─────────────────────────────────────────────────────────────────

/// The outcome of one scored action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Award {
  /// Points granted by this action.
  pub points:   u64,
  /// Score after the points were added.
  pub score:    u64,
  /// Achievements unlocked by this action, in table order.
  pub unlocked: Vec<Achievement>,
}

/// Aggregate counters for a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
  pub total:    usize,
  pub by_type:  BTreeMap<ReportType, usize>,
  pub score:    u64,
  pub unlocked: BTreeSet<String>,
}

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// Owns reports, the cumulative score and the set of unlocked achievements.
///
/// Reports are addressed by their stable [`Uuid`], never by position.
#[derive(Debug, Clone)]
pub struct Ledger {
  reports:      Vec<Report>,
  score:        u64,
  unlocked:     BTreeSet<String>,
  achievements: AchievementTable,
}

impl Ledger {
  /// An empty ledger: no reports, score 0, nothing unlocked.
  pub fn new(achievements: AchievementTable) -> Self {
    Self {
      reports: Vec::new(),
      score: 0,
      unlocked: BTreeSet::new(),
      achievements,
    }
  }

  /// Seed a ledger from a previously saved profile. A missing profile yields
  /// the same state as [`Ledger::new`].
  ///
  /// Ids in the saved set that the table no longer knows are kept. No
  /// evaluation runs here; the next scored action picks up any threshold the
  /// restored score already satisfies.
  pub fn hydrate(achievements: AchievementTable, profile: Option<ProfileSnapshot>) -> Self {
    let mut ledger = Self::new(achievements);
    if let Some(profile) = profile {
      ledger.score = profile.score;
      ledger.unlocked = profile.unlocked_achievements;
    }
    ledger
  }

  /// Install the session's starting reports. They are not scored.
  ///
  /// The seed list is ordered newest-first by `created_at` and placed behind
  /// any report already held, which keeps the front of the list the most
  /// recent insertion.
  pub fn seed_reports(&mut self, mut reports: Vec<Report>) {
    reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    self.reports.extend(reports);
  }

  /// The durable part of the ledger, for the persistence collaborator.
  pub fn snapshot(&self) -> ProfileSnapshot {
    ProfileSnapshot {
      score:                 self.score,
      unlocked_achievements: self.unlocked.clone(),
    }
  }

  // ── Scored actions ────────────────────────────────────────────────────────

  /// Validate `input`, insert the report at the front and award
  /// [`REPORT_POINTS`].
  pub fn create_report(&mut self, input: NewReport) -> Result<(Report, Award)> {
    let report = input.into_report(Utc::now())?;
    let new_score = self.checked_score(REPORT_POINTS)?;

    self.reports.insert(0, report.clone());
    let award = self.apply_points(REPORT_POINTS, new_score);

    tracing::debug!(
      report_id = %report.id,
      kind = %report.kind,
      score = award.score,
      "report created"
    );
    Ok((report, award))
  }

  /// Add one upvote to the report with `id` and award [`UPVOTE_POINTS`].
  /// No other report changes and the order is left alone.
  pub fn upvote_report(&mut self, id: Uuid) -> Result<(Report, Award)> {
    let idx = self.position(id).ok_or(Error::ReportNotFound(id))?;
    let new_score = self.checked_score(UPVOTE_POINTS)?;

    let report = &mut self.reports[idx];
    report.upvotes = report.upvotes.saturating_add(1);
    let report = report.clone();
    let award = self.apply_points(UPVOTE_POINTS, new_score);

    tracing::debug!(report_id = %id, upvotes = report.upvotes, "report upvoted");
    Ok((report, award))
  }

  /// Add `amount` to the score and evaluate achievements. Negative amounts
  /// are rejected; the score never goes down.
  pub fn award_points(&mut self, amount: i64) -> Result<Award> {
    let points = u64::try_from(amount).map_err(|_| Error::NegativePoints(amount))?;
    let new_score = self.checked_score(points)?;
    Ok(self.apply_points(points, new_score))
  }

  /// Award a random bonus drawn uniformly from [`SURPRISE_POINTS`].
  pub fn award_surprise<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> Result<Award> {
    let points = surprise_bonus(rng);
    let new_score = self.checked_score(points)?;
    Ok(self.apply_points(points, new_score))
  }

  /// Unlock every achievement whose threshold the current score meets and
  /// that is not unlocked yet. Returns the newly unlocked ones in table
  /// order; calling again without a score change returns nothing.
  pub fn evaluate_achievements(&mut self) -> Vec<Achievement> {
    let score = self.score;
    let fresh: Vec<Achievement> = self
      .achievements
      .iter()
      .filter(|a| score >= a.threshold && !self.unlocked.contains(&a.id))
      .cloned()
      .collect();

    for achievement in &fresh {
      self.unlocked.insert(achievement.id.clone());
      tracing::info!(
        achievement = %achievement.id,
        threshold = achievement.threshold,
        score,
        "achievement unlocked"
      );
    }
    fresh
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// The first `limit` reports, newest first.
  pub fn list_recent_reports(&self, limit: usize) -> &[Report] {
    &self.reports[..limit.min(self.reports.len())]
  }

  /// Number of reports per type. Every type is present, zero counts
  /// included.
  pub fn count_by_type(&self) -> BTreeMap<ReportType, usize> {
    let mut counts: BTreeMap<ReportType, usize> =
      ReportType::all().into_iter().map(|t| (t, 0)).collect();
    for report in &self.reports {
      *counts.entry(report.kind).or_default() += 1;
    }
    counts
  }

  pub fn stats(&self) -> Stats {
    Stats {
      total:    self.reports.len(),
      by_type:  self.count_by_type(),
      score:    self.score,
      unlocked: self.unlocked.clone(),
    }
  }

  pub fn get_report(&self, id: Uuid) -> Option<&Report> {
    self.reports.iter().find(|r| r.id == id)
  }

  /// All reports, newest first.
  pub fn reports(&self) -> &[Report] { &self.reports }

  pub fn len(&self) -> usize { self.reports.len() }

  pub fn is_empty(&self) -> bool { self.reports.is_empty() }

  pub fn score(&self) -> u64 { self.score }

  pub fn unlocked_achievements(&self) -> &BTreeSet<String> { &self.unlocked }

  pub fn is_unlocked(&self, id: &str) -> bool { self.unlocked.contains(id) }

  pub fn achievements(&self) -> &AchievementTable { &self.achievements }

  // ── Internals ─────────────────────────────────────────────────────────────

  fn position(&self, id: Uuid) -> Option<usize> {
    self.reports.iter().position(|r| r.id == id)
  }

  /// Score after adding `points`, or an error if that would overflow.
  /// Called before any mutation so failures leave the ledger untouched.
  fn checked_score(&self, points: u64) -> Result<u64> {
    self.score.checked_add(points).ok_or(Error::ScoreOverflow(points))
  }

  fn apply_points(&mut self, points: u64, new_score: u64) -> Award {
    self.score = new_score;
    let unlocked = self.evaluate_achievements();
    Award { points, score: self.score, unlocked }
  }
}

impl Default for Ledger {
  fn default() -> Self { Self::new(AchievementTable::builtin()) }
}

/// Draw a bonus uniformly from [`SURPRISE_POINTS`].
///
/// Raw draws at or above the largest multiple of the span are rejected and
/// redrawn, so every bonus in the range is equally likely.
pub fn surprise_bonus<R: RngCore + ?Sized>(rng: &mut R) -> u64 {
  let span = (SURPRISE_POINTS.end() - SURPRISE_POINTS.start() + 1) as u32;
  let limit = u32::MAX - u32::MAX % span;
  loop {
    let raw = rng.next_u32();
    if raw < limit {
      return SURPRISE_POINTS.start() + u64::from(raw % span);
    }
  }
}
