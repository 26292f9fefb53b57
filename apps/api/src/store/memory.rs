//! In-memory store used by handler and router tests.
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{Store, StoreError};
use crate::models::applicant::{Applicant, MatchResult, NewApplicant};

#[derive(Default)]
pub struct MemoryStore {
    jobs: Mutex<HashSet<String>>,
    applicants: Mutex<Vec<Applicant>>,
    matches: Mutex<HashMap<String, Vec<MatchResult>>>,
    calls: Mutex<Vec<String>>,
    drop_inserts: bool,
    fail_with: Option<String>,
}

impl MemoryStore {
    pub fn with_jobs(ids: &[&str]) -> Self {
        let store = Self::default();
        store
            .jobs
            .lock()
            .unwrap()
            .extend(ids.iter().map(|id| id.to_string()));
        store
    }

    /// Inserts report no row.
    pub fn dropping_inserts(mut self) -> Self {
        self.drop_inserts = true;
        self
    }

    /// Every call fails with this API message.
    pub fn failing_with(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    pub fn seed_matches(&self, job_id: &str, rows: Vec<MatchResult>) {
        self.matches
            .lock()
            .unwrap()
            .insert(job_id.to_string(), rows);
    }

    pub fn seed_applicant(&self, applicant: Applicant) {
        self.applicants.lock().unwrap().push(applicant);
    }

    /// Names of the store operations invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn applicants(&self) -> Vec<Applicant> {
        self.applicants.lock().unwrap().clone()
    }

    fn record(&self, op: &str) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(op.to_string());
        match &self.fail_with {
            Some(message) => Err(StoreError::Api {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn job_exists(&self, job_id: &str) -> Result<bool, StoreError> {
        self.record("job_exists")?;
        Ok(self.jobs.lock().unwrap().contains(job_id))
    }

    async fn insert_applicant(
        &self,
        applicant: &NewApplicant,
    ) -> Result<Option<Applicant>, StoreError> {
        self.record("insert_applicant")?;
        if self.drop_inserts {
            return Ok(None);
        }
        let stored = Applicant {
            id: Uuid::new_v4().to_string(),
            full_name: applicant.full_name.clone(),
            email: applicant.email.clone(),
            phone: applicant.phone.clone(),
            resume_url: applicant.resume_url.clone(),
            status: applicant.status,
            job_id: applicant.job_id.clone(),
            created_at: applicant.created_at,
            updated_at: applicant.updated_at,
        };
        self.applicants.lock().unwrap().push(stored.clone());
        Ok(Some(stored))
    }

    async fn applicants_for_job(&self, job_id: &str) -> Result<Vec<Applicant>, StoreError> {
        self.record("applicants_for_job")?;
        Ok(self
            .applicants
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn match_applicants(
        &self,
        job_id: &str,
        limit: u32,
    ) -> Result<Vec<MatchResult>, StoreError> {
        self.record(&format!("match_applicants:{limit}"))?;
        Ok(self
            .matches
            .lock()
            .unwrap()
            .get(job_id)
            .map(|rows| rows.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }
}
