//! Reports: the community-submitted items shown as map markers.
//!
//! A report's identity, content and creation time never change once it has
//! been created. Only the upvote counter moves, and only upward.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator as _};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Closed enumerations ─────────────────────────────────────────────────────

/// What kind of attention a report asks for.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportType {
  Emergency,
  Attention,
  Positive,
}

impl ReportType {
  /// Parse the lowercase wire name, e.g. `"emergency"`.
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownReportType(s.to_owned()))
  }

  /// Every member, in declaration order.
  pub fn all() -> Vec<Self> { Self::iter().collect() }
}

/// How urgently the reporter thinks the item should be handled.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
  Low,
  Medium,
  High,
  Urgent,
}

impl Priority {
  /// Parse the lowercase wire name, e.g. `"urgent"`.
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownPriority(s.to_owned()))
  }

  /// Every member, in declaration order.
  pub fn all() -> Vec<Self> { Self::iter().collect() }
}

// ─── Location ────────────────────────────────────────────────────────────────

/// A point on the map in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub lat: f64,
  pub lng: f64,
}

impl Location {
  /// Where a report lands when the user did not click the map first.
  pub const DEFAULT_CENTER: Location = Location { lat: -6.2088, lng: 106.8456 };

  pub const fn new(lat: f64, lng: f64) -> Self { Self { lat, lng } }
}

impl Default for Location {
  fn default() -> Self { Self::DEFAULT_CENTER }
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// A single community report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
  pub id:          Uuid,
  #[serde(rename = "type")]
  pub kind:        ReportType,
  pub title:       String,
  pub description: String,
  pub priority:    Priority,
  pub location:    Location,
  /// Set once at creation.
  pub created_at:  DateTime<Utc>,
  pub upvotes:     u32,
}

// ─── NewReport ───────────────────────────────────────────────────────────────

/// Input to [`crate::ledger::Ledger::create_report`].
/// The id and upvote counter are always assigned by the ledger.
#[derive(Debug, Clone)]
pub struct NewReport {
  pub kind:        ReportType,
  pub title:       String,
  pub description: String,
  pub priority:    Priority,
  /// Falls back to [`Location::DEFAULT_CENTER`].
  pub location:    Option<Location>,
  /// Falls back to the current time.
  pub timestamp:   Option<DateTime<Utc>>,
}

impl NewReport {
  /// Convenience constructor with an empty description, no location and no
  /// explicit timestamp.
  pub fn new(kind: ReportType, title: impl Into<String>, priority: Priority) -> Self {
    Self {
      kind,
      title: title.into(),
      description: String::new(),
      priority,
      location: None,
      timestamp: None,
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn at(mut self, location: Location) -> Self {
    self.location = Some(location);
    self
  }

  pub fn recorded_at(mut self, timestamp: DateTime<Utc>) -> Self {
    self.timestamp = Some(timestamp);
    self
  }

  /// Check the input and build the report it describes.
  ///
  /// The title is stored trimmed. Nothing is inserted anywhere; that is the
  /// ledger's job.
  pub(crate) fn into_report(self, now: DateTime<Utc>) -> Result<Report> {
    let title = self.title.trim();
    if title.is_empty() {
      return Err(Error::EmptyTitle);
    }

    Ok(Report {
      id:          Uuid::new_v4(),
      kind:        self.kind,
      title:       title.to_owned(),
      description: self.description,
      priority:    self.priority,
      location:    self.location.unwrap_or_default(),
      created_at:  self.timestamp.unwrap_or(now),
      upvotes:     0,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn enums_parse_their_wire_names() {
    assert_eq!(ReportType::parse("emergency").unwrap(), ReportType::Emergency);
    assert_eq!(ReportType::parse("positive").unwrap(), ReportType::Positive);
    assert_eq!(Priority::parse("urgent").unwrap(), Priority::Urgent);
    assert_eq!(Priority::Medium.to_string(), "medium");
  }

  #[test]
  fn unknown_enum_members_are_validation_errors() {
    let err = ReportType::parse("fire").unwrap_err();
    assert_eq!(err, Error::UnknownReportType("fire".into()));
    assert!(err.is_validation());

    let err = Priority::parse("HIGH").unwrap_err();
    assert_eq!(err, Error::UnknownPriority("HIGH".into()));
  }

  #[test]
  fn closed_lists_keep_declaration_order() {
    assert_eq!(
      ReportType::all(),
      vec![ReportType::Emergency, ReportType::Attention, ReportType::Positive]
    );
    assert_eq!(Priority::all().len(), 4);
  }

  #[test]
  fn into_report_trims_title_and_fills_defaults() {
    let now = Utc::now();
    let report = NewReport::new(ReportType::Attention, "  Broken swing  ", Priority::Low)
      .into_report(now)
      .unwrap();

    assert_eq!(report.title, "Broken swing");
    assert_eq!(report.location, Location::DEFAULT_CENTER);
    assert_eq!(report.created_at, now);
    assert_eq!(report.upvotes, 0);
  }

  #[test]
  fn into_report_rejects_blank_title() {
    let err = NewReport::new(ReportType::Positive, " \t\n", Priority::Low)
      .into_report(Utc::now())
      .unwrap_err();
    assert_eq!(err, Error::EmptyTitle);
  }

  #[test]
  fn report_json_uses_type_key() {
    let report = NewReport::new(ReportType::Emergency, "Pothole", Priority::High)
      .at(Location::new(-6.2, 106.8))
      .into_report(Utc::now())
      .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["type"], "emergency");
    assert_eq!(json["priority"], "high");
    assert_eq!(json["location"]["lat"], -6.2);
  }
}
