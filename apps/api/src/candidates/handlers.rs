//! Axum route handlers for the Candidates API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::candidates::requests::{CreateApplicantRequest, MatchQuery};
use crate::candidates::service::{create_applicant, list_applicants, match_applicants};
use crate::errors::AppError;
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::models::applicant::{Applicant, MatchResult};
use crate::state::AppState;

/// POST /candidates/
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateApplicantRequest>,
) -> Result<(StatusCode, Json<Applicant>), AppError> {
    let applicant = create_applicant(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(applicant)))
}

/// GET /candidates/:job_id
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Vec<Applicant>>, AppError> {
    let applicants = list_applicants(state.store.as_ref(), &job_id).await?;
    Ok(Json(applicants))
}

/// GET /candidates/:job_id/match?limit=N
pub async fn handle_match_candidates(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<MatchQuery>,
) -> Result<Json<Vec<MatchResult>>, AppError> {
    let matches = match_applicants(state.store.as_ref(), &job_id, query.limit).await?;
    Ok(Json(matches))
}
