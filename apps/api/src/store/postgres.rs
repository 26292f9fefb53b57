//! Direct PostgreSQL backend. Same capabilities as the REST store, expressed as SQL.
//! Ids are compared and returned as text so both uuid and text keys work.
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use super::{Store, StoreError, CANDIDATES_TABLE, JOBS_TABLE, MATCH_PROCEDURE};
use crate::models::applicant::{Applicant, MatchResult, NewApplicant};

const MAX_CONNECTIONS: u32 = 10;

const APPLICANT_COLUMNS: &str = "id::text AS id, full_name, email, phone, resume_url, \
     status::text AS status, job_id::text AS job_id, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Opens the connection pool the store lives on until `close`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }
}

fn job_exists_sql() -> String {
    format!("SELECT EXISTS (SELECT 1 FROM {JOBS_TABLE} WHERE id::text = $1)")
}

/// Inserts only while the job row is still present, so a job removed after the
/// existence check yields no row instead of an orphan applicant.
fn insert_applicant_sql() -> String {
    format!(
        r#"
        INSERT INTO {CANDIDATES_TABLE}
            (full_name, email, phone, resume_url, status, job_id, created_at, updated_at)
        SELECT $1, $2, $3, $4, $5, j.id, $7, $8
        FROM {JOBS_TABLE} j
        WHERE j.id::text = $6
        RETURNING {APPLICANT_COLUMNS}
        "#
    )
}

fn applicants_for_job_sql() -> String {
    format!("SELECT {APPLICANT_COLUMNS} FROM {CANDIDATES_TABLE} WHERE job_id::text = $1")
}

fn match_applicants_sql() -> String {
    format!(
        r#"
        SELECT candidate_id::text AS candidate_id, full_name, email, score::float8 AS score
        FROM {MATCH_PROCEDURE}($1::uuid, $2)
        "#
    )
}

#[async_trait]
impl Store for PgStore {
    async fn job_exists(&self, job_id: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(&job_exists_sql())
            .bind(job_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_applicant(
        &self,
        applicant: &NewApplicant,
    ) -> Result<Option<Applicant>, StoreError> {
        let sql = insert_applicant_sql();
        let row = sqlx::query_as::<_, Applicant>(&sql)
            .bind(&applicant.full_name)
            .bind(&applicant.email)
            .bind(&applicant.phone)
            .bind(&applicant.resume_url)
            .bind(applicant.status.as_str())
            .bind(&applicant.job_id)
            .bind(applicant.created_at)
            .bind(applicant.updated_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn applicants_for_job(&self, job_id: &str) -> Result<Vec<Applicant>, StoreError> {
        let sql = applicants_for_job_sql();
        let rows = sqlx::query_as::<_, Applicant>(&sql)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn match_applicants(
        &self,
        job_id: &str,
        limit: u32,
    ) -> Result<Vec<MatchResult>, StoreError> {
        let sql = match_applicants_sql();
        let rows = sqlx::query_as::<_, MatchResult>(&sql)
            .bind(job_id)
            .bind(limit as i32)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_targets_store_names() {
        assert!(job_exists_sql().contains("FROM jobs WHERE"));
        assert!(insert_applicant_sql().contains("INSERT INTO candidates"));
        assert!(applicants_for_job_sql().contains("FROM candidates WHERE job_id::text = $1"));
        assert!(match_applicants_sql().contains("FROM match_candidates($1::uuid, $2)"));
    }

    #[test]
    fn test_insert_returns_applicant_columns() {
        let sql = insert_applicant_sql();
        assert!(sql.contains("RETURNING id::text AS id"));
        assert!(sql.contains("status::text AS status"));
    }
}
