//! Core types for PinPulse community reporting.
//!
//! The [`ledger::Ledger`] owns reports, the user's score and their unlocked
//! achievements. Map rendering, notifications and animation are the
//! presentation layer's business; this crate never touches them and is free
//! of HTTP and database dependencies.

pub mod achievement;
pub mod error;
pub mod ledger;
pub mod report;
pub mod seed;
pub mod shared;
pub mod store;

pub use error::{Error, Result};
