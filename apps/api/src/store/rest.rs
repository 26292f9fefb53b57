//! REST store client for a PostgREST-style API (`{base}/rest/v1`).
//!
//! Every request carries the access key both as `apikey` and as a bearer token.
//! Calls are single-shot: no retries.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::{Store, StoreError, CANDIDATES_TABLE, JOBS_TABLE, MATCH_PROCEDURE};
use crate::models::applicant::{Applicant, MatchResult, NewApplicant};

#[derive(Debug, Deserialize)]
struct RestErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct MatchParams<'a> {
    p_job_id: &'a str,
    p_limit: u32,
}

#[derive(Clone)]
pub struct RestStore {
    client: Client,
    rest_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    fn procedure_url(&self, name: &str) -> String {
        format!("{}/rpc/{}", self.rest_url, name)
    }
}

#[async_trait]
impl Store for RestStore {
    async fn job_exists(&self, job_id: &str) -> Result<bool, StoreError> {
        let filter = eq_filter(job_id);
        let response = self
            .authorized(self.client.get(self.table_url(JOBS_TABLE)))
            .query(&[("select", "id"), ("id", filter.as_str())])
            .send()
            .await?;

        let rows: Vec<serde_json::Value> = read_rows(response).await?;
        Ok(!rows.is_empty())
    }

    async fn insert_applicant(
        &self,
        applicant: &NewApplicant,
    ) -> Result<Option<Applicant>, StoreError> {
        let response = self
            .authorized(self.client.post(self.table_url(CANDIDATES_TABLE)))
            .header("Prefer", "return=representation")
            .json(applicant)
            .send()
            .await?;

        let rows: Vec<Applicant> = read_rows(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn applicants_for_job(&self, job_id: &str) -> Result<Vec<Applicant>, StoreError> {
        let filter = eq_filter(job_id);
        let response = self
            .authorized(self.client.get(self.table_url(CANDIDATES_TABLE)))
            .query(&[("select", "*"), ("job_id", filter.as_str())])
            .send()
            .await?;

        read_rows(response).await
    }

    async fn match_applicants(
        &self,
        job_id: &str,
        limit: u32,
    ) -> Result<Vec<MatchResult>, StoreError> {
        let response = self
            .authorized(self.client.post(self.procedure_url(MATCH_PROCEDURE)))
            .json(&MatchParams {
                p_job_id: job_id,
                p_limit: limit,
            })
            .send()
            .await?;

        read_rows(response).await
    }
}

fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

async fn read_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, StoreError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(StoreError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    debug!("Store responded {} ({} bytes)", status, body.len());
    parse_rows(&body)
}

/// Parses a row array. An empty or `null` body is an empty result.
fn parse_rows<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, StoreError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Option<Vec<T>> = serde_json::from_str(body)?;
    Ok(rows.unwrap_or_default())
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<RestErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string())
}
