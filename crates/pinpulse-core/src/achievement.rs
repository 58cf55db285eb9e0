//! Achievements: named milestones unlocked once the cumulative score crosses
//! a fixed threshold.
//!
//! The table is static configuration. The ledger consults it and nothing
//! else; there is exactly one table per ledger.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One milestone definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
  pub id:          String,
  /// Unlocked the first time `score >= threshold` is observed.
  pub threshold:   u64,
  pub title:       String,
  pub description: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub icon:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category:    Option<String>,
}

impl Achievement {
  pub fn new(
    id: impl Into<String>,
    threshold: u64,
    title: impl Into<String>,
    description: impl Into<String>,
  ) -> Self {
    Self {
      id: id.into(),
      threshold,
      title: title.into(),
      description: description.into(),
      icon: None,
      category: None,
    }
  }

  fn decorated(mut self, icon: &str, category: &str) -> Self {
    self.icon = Some(icon.to_owned());
    self.category = Some(category.to_owned());
    self
  }
}

/// The closed, ordered list of achievements a ledger evaluates against.
///
/// Declaration order is significant: simultaneous unlocks are reported in
/// this order, not sorted by threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AchievementTable {
  items: Vec<Achievement>,
}

impl AchievementTable {
  /// Build a table, rejecting duplicate ids.
  pub fn new(items: Vec<Achievement>) -> Result<Self> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
      if !seen.insert(item.id.as_str()) {
        return Err(Error::DuplicateAchievement(item.id.clone()));
      }
    }
    Ok(Self { items })
  }

  /// The built-in table shipped with the application.
  pub fn builtin() -> Self {
    Self {
      items: vec![
        Achievement::new(
          "first_report",
          10,
          "First Reporter",
          "You added your first report!",
        )
        .decorated("📝", "reporting"),
        Achievement::new(
          "community_helper",
          50,
          "Community Helper",
          "Your community score reached 50!",
        )
        .decorated("🤝", "community"),
        Achievement::new(
          "local_hero",
          100,
          "Local Hero",
          "Your community score reached 100!",
        )
        .decorated("🦸", "community"),
        Achievement::new(
          "super_reporter",
          200,
          "Super Reporter",
          "Your community score reached 200!",
        )
        .decorated("⭐", "reporting"),
        Achievement::new(
          "map_explorer",
          150,
          "Map Explorer",
          "You have explored many areas of the map!",
        )
        .decorated("🗺️", "exploration"),
        Achievement::new(
          "community_leader",
          300,
          "Community Leader",
          "You are an active contributor to the community!",
        )
        .decorated("👑", "leadership"),
      ],
    }
  }

  pub fn get(&self, id: &str) -> Option<&Achievement> {
    self.items.iter().find(|a| a.id == id)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Achievement> { self.items.iter() }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl Default for AchievementTable {
  fn default() -> Self { Self::builtin() }
}
