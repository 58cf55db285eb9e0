//! JSON REST API for PinPulse.
//!
//! Exposes an axum [`Router`] over a [`SharedLedger`]. This is the boundary
//! the browser front-end talks to; map rendering, notifications and
//! animations stay on the other side of it.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", pinpulse_api::api_router(ApiState::new(ledger)))
//! ```

pub mod error;
pub mod profile;
pub mod reports;

use axum::{
  Router,
  routing::{get, post},
};
use pinpulse_core::shared::SharedLedger;

pub use error::ApiError;

/// How many reports `GET /reports` returns when no `limit` is given.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct ApiState {
  pub ledger:       SharedLedger,
  pub recent_limit: usize,
}

impl ApiState {
  pub fn new(ledger: SharedLedger) -> Self {
    Self { ledger, recent_limit: DEFAULT_RECENT_LIMIT }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router(state: ApiState) -> Router<()> {
  Router::new()
    // Reports
    .route("/reports", get(reports::list).post(reports::create))
    .route("/reports/{id}", get(reports::get_one))
    .route("/reports/{id}/upvote", post(reports::upvote))
    // Score and achievements
    .route("/profile", get(profile::get_profile))
    .route("/points", post(profile::award_points))
    .route("/surprise", post(profile::surprise))
    .route("/achievements", get(profile::achievements))
    .route("/stats", get(profile::stats))
    .with_state(state)
}
