use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Review state of an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicantStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
}

#[derive(Debug, Error)]
#[error("unknown applicant status '{0}'")]
pub struct UnknownStatus(pub String);

impl ApplicantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicantStatus::Pending => "pending",
            ApplicantStatus::Reviewed => "reviewed",
            ApplicantStatus::Shortlisted => "shortlisted",
            ApplicantStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ApplicantStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "pending" => Ok(ApplicantStatus::Pending),
            "reviewed" => Ok(ApplicantStatus::Reviewed),
            "shortlisted" => Ok(ApplicantStatus::Shortlisted),
            "rejected" => Ok(ApplicantStatus::Rejected),
            _ => Err(UnknownStatus(value)),
        }
    }
}

/// A stored applicant row. `id` and both timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Applicant {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_url: String,
    #[sqlx(try_from = "String")]
    pub status: ApplicantStatus,
    pub job_id: String,
    #[serde(deserialize_with = "deserialize_store_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_store_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Parses a store timestamp. RFC 3339 values keep their offset; values without
/// an offset (`timestamp` columns) are read as UTC.
pub fn parse_store_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
}

fn deserialize_store_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_store_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Row payload sent to the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewApplicant {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume_url: String,
    pub status: ApplicantStatus,
    pub job_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row yielded by the `match_candidates` procedure. `score` is in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MatchResult {
    pub candidate_id: String,
    pub full_name: String,
    pub email: String,
    pub score: f64,
}

impl MatchResult {
    /// False for NaN and anything outside [0, 1].
    pub fn score_in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.score)
    }
}
