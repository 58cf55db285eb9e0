//! Handlers for the user's score, achievements and dashboard counters.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/profile` | Score and unlocked ids |
//! | `POST` | `/points` | Body: `{"amount": N}`; 400 if negative |
//! | `POST` | `/surprise` | Random bonus |
//! | `GET`  | `/achievements` | Table with per-item `unlocked` flag |
//! | `GET`  | `/stats` | Report counts per type, score, unlocked ids |

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use pinpulse_core::{
  achievement::Achievement,
  ledger::{Award, Stats},
  store::ProfileSnapshot,
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

/// `GET /profile`
pub async fn get_profile(State(state): State<ApiState>) -> Json<ProfileSnapshot> {
  Json(state.ledger.snapshot())
}

#[derive(Debug, Deserialize)]
pub struct PointsBody {
  pub amount: i64,
}

/// `POST /points`, body: `{"amount": 15}`
pub async fn award_points(
  State(state): State<ApiState>,
  body: Result<Json<PointsBody>, JsonRejection>,
) -> Result<Json<Award>, ApiError> {
  let Json(body) = body?;
  Ok(Json(state.ledger.award_points(body.amount)?))
}

/// `POST /surprise`
pub async fn surprise(State(state): State<ApiState>) -> Result<Json<Award>, ApiError> {
  Ok(Json(state.ledger.award_surprise(&mut OsRng)?))
}

/// One row of `GET /achievements`.
#[derive(Debug, Serialize)]
pub struct AchievementStatus {
  #[serde(flatten)]
  pub achievement: Achievement,
  pub unlocked:    bool,
}

/// `GET /achievements`
pub async fn achievements(State(state): State<ApiState>) -> Json<Vec<AchievementStatus>> {
  let rows: Vec<AchievementStatus> = state.ledger.with(|ledger| {
    ledger
      .achievements()
      .iter()
      .map(|a| AchievementStatus {
        unlocked:    ledger.is_unlocked(&a.id),
        achievement: a.clone(),
      })
      .collect()
  });
  Json(rows)
}

/// `GET /stats`
pub async fn stats(State(state): State<ApiState>) -> Json<Stats> {
  Json(state.ledger.stats())
}
