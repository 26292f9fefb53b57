use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::applicant::ApplicantStatus;

pub const DEFAULT_MATCH_LIMIT: u32 = 10;

/// Body of `POST /candidates/`.
///
/// Required strings default to empty so a missing field is reported by its
/// validation rule, with field-level detail, rather than as a parse failure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApplicantRequest {
    #[serde(default)]
    #[validate(length(
        min = 2,
        max = 100,
        message = "full_name must be between 2 and 100 characters"
    ))]
    pub full_name: String,

    #[serde(default)]
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(min = 5, message = "resume_url must be at least 5 characters"))]
    pub resume_url: String,

    #[serde(default = "default_status")]
    #[validate(custom(function = "validate_status"))]
    pub status: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "job_id is required"))]
    pub job_id: String,
}

/// Query of `GET /candidates/:job_id/match`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MatchQuery {
    #[serde(default = "default_match_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: u32,
}

fn default_match_limit() -> u32 {
    DEFAULT_MATCH_LIMIT
}

fn default_status() -> String {
    ApplicantStatus::default().as_str().to_string()
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    ApplicantStatus::try_from(status.to_string())
        .map(|_| ())
        .map_err(|_| {
            let mut err = ValidationError::new("status");
            err.message = Some(
                "status must be one of pending, reviewed, shortlisted, rejected".into(),
            );
            err
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> serde_json::Value {
        json!({
            "full_name": "John Doe",
            "email": "john.doe@example.com",
            "resume_url": "https://example.com/resume.pdf",
            "job_id": "job-1"
        })
    }

    fn parse(body: serde_json::Value) -> CreateApplicantRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_minimal_body_is_valid_and_pending() {
        let req = parse(valid_body());
        assert!(req.validate().is_ok());
        assert_eq!(req.status, "pending");
        assert_eq!(req.phone, None);
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut body = valid_body();
        body["email"] = json!("john.doe-at-example.com");
        let errors = parse(body).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_short_resume_url_rejected() {
        let mut body = valid_body();
        body["resume_url"] = json!("cv");
        let errors = parse(body).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("resume_url"));
    }

    #[test]
    fn test_name_length_bounds() {
        let mut body = valid_body();
        body["full_name"] = json!("J");
        assert!(parse(body.clone()).validate().is_err());

        body["full_name"] = json!("J".repeat(101));
        assert!(parse(body.clone()).validate().is_err());

        body["full_name"] = json!("J".repeat(100));
        assert!(parse(body).validate().is_ok());
    }

    #[test]
    fn test_long_phone_rejected() {
        let mut body = valid_body();
        body["phone"] = json!("+1 555 0100 0100 0100 0100");
        let errors = parse(body).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn test_unknown_status_rejected_on_field() {
        let mut body = valid_body();
        body["status"] = json!("hired");
        let errors = parse(body).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("status"));
    }

    #[test]
    fn test_explicit_status_kept() {
        let mut body = valid_body();
        body["status"] = json!("shortlisted");
        let req = parse(body);
        assert!(req.validate().is_ok());
        assert_eq!(req.status, "shortlisted");
    }

    #[test]
    fn test_missing_required_fields_reported_per_field() {
        let errors = parse(json!({})).validate().unwrap_err();
        let fields = errors.field_errors();
        for name in ["full_name", "email", "resume_url", "job_id"] {
            assert!(fields.contains_key(name), "{name}");
        }
        assert!(!fields.contains_key("status"));
    }

    #[test]
    fn test_match_limit_defaults_to_ten() {
        let query: MatchQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.limit, DEFAULT_MATCH_LIMIT);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_match_limit_bounds() {
        assert!(MatchQuery { limit: 0 }.validate().is_err());
        assert!(MatchQuery { limit: 1 }.validate().is_ok());
        assert!(MatchQuery { limit: 100 }.validate().is_ok());
        assert!(MatchQuery { limit: 101 }.validate().is_err());
    }
}
