//! Applicant operations: existence check, then one store call.
use chrono::Utc;
use tracing::info;

use crate::candidates::requests::CreateApplicantRequest;
use crate::errors::AppError;
use crate::models::applicant::{Applicant, ApplicantStatus, MatchResult, NewApplicant};
use crate::store::Store;

fn job_not_found(job_id: &str) -> String {
    format!("Job with id {job_id} not found")
}

/// Creates an applicant against an existing job.
///
/// The existence check and the insert are separate calls; a job deleted in
/// between is not detected here.
pub async fn create_applicant(
    store: &dyn Store,
    request: CreateApplicantRequest,
) -> Result<Applicant, AppError> {
    let status = ApplicantStatus::try_from(request.status)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if !store.job_exists(&request.job_id).await? {
        return Err(AppError::BadRequest(job_not_found(&request.job_id)));
    }

    let now = Utc::now();
    let new_applicant = NewApplicant {
        full_name: request.full_name,
        email: request.email,
        phone: request.phone,
        resume_url: request.resume_url,
        status,
        job_id: request.job_id,
        created_at: now,
        updated_at: now,
    };

    let applicant = store
        .insert_applicant(&new_applicant)
        .await?
        .ok_or_else(|| AppError::Internal("Failed to create candidate".to_string()))?;

    info!(
        "Created applicant {} for job {}",
        applicant.id, applicant.job_id
    );
    Ok(applicant)
}

/// Lists every applicant of an existing job, in storage order.
pub async fn list_applicants(store: &dyn Store, job_id: &str) -> Result<Vec<Applicant>, AppError> {
    if !store.job_exists(job_id).await? {
        return Err(AppError::NotFound(job_not_found(job_id)));
    }

    Ok(store.applicants_for_job(job_id).await?)
}

/// Delegates ranking to the store procedure.
///
/// No job existence check happens here, unlike create and list: an unknown
/// job yields whatever the procedure returns (normally nothing). A row scored
/// outside [0, 1] fails the whole call.
pub async fn match_applicants(
    store: &dyn Store,
    job_id: &str,
    limit: u32,
) -> Result<Vec<MatchResult>, AppError> {
    let matches = store.match_applicants(job_id, limit).await?;

    if let Some(bad) = matches.iter().find(|m| !m.score_in_range()) {
        return Err(AppError::Internal(format!(
            "Match score {} for candidate {} is outside [0, 1]",
            bad.score, bad.candidate_id
        )));
    }

    Ok(matches)
}
