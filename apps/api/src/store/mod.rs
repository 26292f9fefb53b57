//! Store: the external relational backend that owns jobs, applicants and matching.
//!
//! Handlers only see the `Store` trait. Backends:
//! - `RestStore`: PostgREST-style HTTP API (default)
//! - `PgStore`: direct PostgreSQL connection, selected when `DATABASE_URL` is set
//!
//! `AppState` holds an `Arc<dyn Store>` built once at startup.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::applicant::{Applicant, MatchResult, NewApplicant};

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod rest;

/// Table holding job rows; only ever probed for existence.
pub const JOBS_TABLE: &str = "jobs";
/// Table holding applicant rows.
pub const CANDIDATES_TABLE: &str = "candidates";
/// Remote ranking procedure.
pub const MATCH_PROCEDURE: &str = "match_candidates";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Capabilities the applicant API needs from the store.
#[async_trait]
pub trait Store: Send + Sync {
    /// Whether a row with this id exists in the jobs table.
    async fn job_exists(&self, job_id: &str) -> Result<bool, StoreError>;

    /// Inserts an applicant and returns the stored row, or `None` if the store
    /// reported nothing inserted.
    async fn insert_applicant(&self, applicant: &NewApplicant)
        -> Result<Option<Applicant>, StoreError>;

    /// All applicants whose `job_id` equals the given id, in storage order.
    async fn applicants_for_job(&self, job_id: &str) -> Result<Vec<Applicant>, StoreError>;

    /// Invokes the ranking procedure for a job.
    async fn match_applicants(
        &self,
        job_id: &str,
        limit: u32,
    ) -> Result<Vec<MatchResult>, StoreError>;

    /// Releases backend resources on shutdown.
    async fn close(&self) {}
}
