use serde_json::{Map, Value};

use super::assembler::{CareerDraft, ValidatedSubmission};
use super::domain::{CareerStatus, EmploymentType, QuestionCategory, WorkArrangement};

/// Input-validation failures. Each carries the exact user-facing message
/// the posting endpoint returns with a client-error status.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Job title, description, questions and work setup are required")]
    MissingRequired,
    #[error("Invalid job title")]
    InvalidJobTitle,
    #[error("Invalid job description")]
    InvalidDescription,
    #[error("Invalid questions format")]
    InvalidQuestions,
    #[error("Invalid status value")]
    InvalidStatus,
    #[error("Invalid work setup value")]
    InvalidWorkSetup,
    #[error("Invalid employment type value")]
    InvalidEmploymentType,
    #[error("Invalid request payload")]
    MalformedPayload,
    #[error("Request payload is nested too deeply")]
    PayloadTooDeep,
}

pub const MAX_JOB_TITLE_CHARS: usize = 200;
pub const MAX_DESCRIPTION_CHARS: usize = 10_000;

/// Absent means missing, null, or an empty string. Any other value counts
/// as present; its type is checked separately so the caller gets the more
/// specific error.
fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        Some(value) => Some(value),
    }
}

fn string_field(value: &Value) -> Option<&str> {
    value.as_str()
}

/// Check the sanitized payload field by field and produce the validated
/// submission the assembler consumes. Runs strictly after sanitization and
/// before any store access.
pub fn validate_submission(payload: &Value) -> Result<ValidatedSubmission, ValidationError> {
    let object = payload.as_object().ok_or(ValidationError::MissingRequired)?;

    let job_title = present(object, "jobTitle").ok_or(ValidationError::MissingRequired)?;
    let description = present(object, "description").ok_or(ValidationError::MissingRequired)?;
    let questions = present(object, "questions").ok_or(ValidationError::MissingRequired)?;
    let work_setup = present(object, "workSetup").ok_or(ValidationError::MissingRequired)?;

    let job_title = string_field(job_title)
        .filter(|text| text.chars().count() <= MAX_JOB_TITLE_CHARS)
        .ok_or(ValidationError::InvalidJobTitle)?
        .to_string();

    let description = string_field(description)
        .filter(|text| text.chars().count() <= MAX_DESCRIPTION_CHARS)
        .ok_or(ValidationError::InvalidDescription)?
        .to_string();

    if !questions.is_array() {
        return Err(ValidationError::InvalidQuestions);
    }
    let questions: Vec<QuestionCategory> =
        serde_json::from_value(questions.clone()).map_err(|_| ValidationError::InvalidQuestions)?;

    let status = match present(object, "status") {
        None => CareerStatus::Active,
        Some(value) => string_field(value)
            .and_then(CareerStatus::parse)
            .ok_or(ValidationError::InvalidStatus)?,
    };

    let work_setup: WorkArrangement = serde_json::from_value(work_setup.clone())
        .map_err(|_| ValidationError::InvalidWorkSetup)?;

    let employment_type: Option<EmploymentType> = match present(object, "employmentType") {
        None => None,
        Some(value) => Some(
            serde_json::from_value(value.clone())
                .map_err(|_| ValidationError::InvalidEmploymentType)?,
        ),
    };

    let org_id = match object.get("orgID") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    };

    let draft: CareerDraft = serde_json::from_value(payload.clone())
        .map_err(|_| ValidationError::MalformedPayload)?;

    Ok(ValidatedSubmission {
        job_title,
        description,
        questions,
        work_setup,
        employment_type,
        status,
        org_id,
        draft,
    })
}
