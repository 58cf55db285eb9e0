//! Handlers for `/reports` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/reports` | Optional `?limit=N`; newest first |
//! | `POST` | `/reports` | Body: [`NewReportBody`]; returns 201 + [`ScoredReport`] |
//! | `GET`  | `/reports/:id` | 404 if not found |
//! | `POST` | `/reports/:id/upvote` | Returns [`ScoredReport`] |

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use pinpulse_core::{
  ledger::Award,
  report::{Location, NewReport, Priority, Report, ReportType},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// A report together with the points its action earned.
#[derive(Debug, Serialize)]
pub struct ScoredReport {
  pub report: Report,
  pub award:  Award,
}

impl From<(Report, Award)> for ScoredReport {
  fn from((report, award): (Report, Award)) -> Self { Self { report, award } }
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Maximum number of reports to return. Defaults to the configured
  /// recent-list length.
  pub limit: Option<usize>,
}

/// `GET /reports[?limit=N]`
pub async fn list(
  State(state): State<ApiState>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Report>>, ApiError> {
  let Query(params) = params?;
  let limit = params.limit.unwrap_or(state.recent_limit);
  Ok(Json(state.ledger.list_recent_reports(limit)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /reports/:id`
pub async fn get_one(
  State(state): State<ApiState>,
  Path(id): Path<Uuid>,
) -> Result<Json<Report>, ApiError> {
  let report = state
    .ledger
    .get_report(id)
    .ok_or_else(|| ApiError::NotFound(format!("report {id} not found")))?;
  Ok(Json(report))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /reports`.
///
/// `type` and `priority` arrive as plain strings so that unknown values are
/// reported by the ledger's own validation rather than by the JSON decoder.
/// A missing `title` is treated as an empty one.
#[derive(Debug, Deserialize)]
pub struct NewReportBody {
  #[serde(rename = "type")]
  pub kind:        String,
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub description: String,
  pub priority:    String,
  pub location:    Option<Location>,
  pub timestamp:   Option<DateTime<Utc>>,
}

impl TryFrom<NewReportBody> for NewReport {
  type Error = pinpulse_core::Error;

  fn try_from(b: NewReportBody) -> Result<Self, Self::Error> {
    Ok(NewReport {
      kind:        ReportType::parse(&b.kind)?,
      title:       b.title,
      description: b.description,
      priority:    Priority::parse(&b.priority)?,
      location:    b.location,
      timestamp:   b.timestamp,
    })
  }
}

/// `POST /reports`: returns 201 + the stored report and its award.
pub async fn create(
  State(state): State<ApiState>,
  body: Result<Json<NewReportBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body?;
  let input = NewReport::try_from(body)?;
  let scored = ScoredReport::from(state.ledger.create_report(input)?);
  Ok((StatusCode::CREATED, Json(scored)))
}

// ─── Upvote ───────────────────────────────────────────────────────────────────

/// `POST /reports/:id/upvote`
pub async fn upvote(
  State(state): State<ApiState>,
  Path(id): Path<Uuid>,
) -> Result<Json<ScoredReport>, ApiError> {
  Ok(Json(state.ledger.upvote_report(id)?.into()))
}
