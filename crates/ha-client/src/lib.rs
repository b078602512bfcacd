//! Home Assistant REST client
//!
//! Fetches the full entity state snapshot from `GET /api/states` using a
//! long-lived access token. The [`StateSource`] trait is the seam the report
//! pipeline depends on, so it can run against anything that yields states.

mod client;
mod error;

pub use client::{HaClient, StateSource};
pub use error::ClientError;
pub use reqwest::StatusCode;
